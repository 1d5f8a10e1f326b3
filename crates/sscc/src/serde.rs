use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::Sscc;

impl Serialize for Sscc {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(self.as_str())
    }
}

struct SsccVisitor;

impl Visitor<'_> for SsccVisitor {
    type Value = Sscc;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an 18-digit SSCC string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Sscc::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Sscc {
    /// Deserializes from a string, validating length, digits, application
    /// identifier and check digit.
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_str(SsccVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::SsccLayout;

    use super::*;

    #[test]
    fn serializes_as_digit_string() {
        let code = SsccLayout::default().build(0).unwrap();
        assert_eq!(
            serde_json::to_string(&code).unwrap(),
            "\"008596570000000006\""
        );
    }

    #[test]
    fn deserializes_valid_codes() {
        let code: Sscc = serde_json::from_str("\"008596570000000013\"").unwrap();
        assert_eq!(code.serial_reference(), 1);
    }

    #[test]
    fn deserialize_rejects_bad_check_digit() {
        let err = serde_json::from_str::<Sscc>("\"008596570000000014\"").unwrap_err();
        assert!(err.to_string().contains("check digit mismatch"));
    }

    #[test]
    fn deserialize_rejects_numbers() {
        assert!(serde_json::from_str::<Sscc>("8596570000000006").is_err());
    }
}
