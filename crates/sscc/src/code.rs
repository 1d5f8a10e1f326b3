use core::{fmt, str::FromStr};

use crate::{
    check_digit::{compute_check_digit, is_valid},
    error::{Error, Result},
};

/// GS1 application identifier for an SSCC.
pub const APPLICATION_IDENTIFIER: &str = "00";

/// Number of digits in a GS1 company prefix for this layout.
pub const COMPANY_PREFIX_DIGITS: usize = 5;

/// Number of digits in the zero-padded serial reference.
pub const SERIAL_DIGITS: usize = 9;

/// Largest counter value that fits in the serial reference.
pub const MAX_SERIAL_REFERENCE: u64 = 999_999_999;

/// Length of the data portion: AI + extension + prefix + serial.
pub const DATA_LEN: usize = 2 + 1 + COMPANY_PREFIX_DIGITS + SERIAL_DIGITS;

/// Length of a complete code, check digit included.
pub const SSCC_LEN: usize = DATA_LEN + 1;

const EXTENSION_AT: usize = 2;
const PREFIX_AT: usize = EXTENSION_AT + 1;
const SERIAL_AT: usize = PREFIX_AT + COMPANY_PREFIX_DIGITS;

/// The static part of every code: extension digit and company prefix.
///
/// A layout turns counter values into [`Sscc`] codes via
/// [`SsccLayout::build`]. The default layout uses extension digit `8` and
/// company prefix `59657`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SsccLayout {
    extension_digit: u8,
    company_prefix: [u8; COMPANY_PREFIX_DIGITS],
}

impl Default for SsccLayout {
    fn default() -> Self {
        Self {
            extension_digit: 8,
            company_prefix: *b"59657",
        }
    }
}

impl SsccLayout {
    /// Creates a layout from an extension digit (`0..=9`) and a five-digit
    /// GS1 company prefix.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidExtensionDigit`] if `extension_digit > 9`
    /// - [`Error::InvalidCompanyPrefix`] if `company_prefix` is not exactly
    ///   five ASCII digits
    ///
    /// # Example
    /// ```
    /// use sscc::SsccLayout;
    ///
    /// let layout = SsccLayout::new(8, "59657").unwrap();
    /// assert_eq!(layout, SsccLayout::default());
    /// assert!(SsccLayout::new(10, "59657").is_err());
    /// assert!(SsccLayout::new(8, "5965").is_err());
    /// ```
    pub fn new(extension_digit: u8, company_prefix: &str) -> Result<Self> {
        if extension_digit > 9 {
            return Err(Error::InvalidExtensionDigit {
                digit: extension_digit,
            });
        }
        let company_prefix: [u8; COMPANY_PREFIX_DIGITS] = company_prefix
            .as_bytes()
            .try_into()
            .ok()
            .filter(|p: &[u8; COMPANY_PREFIX_DIGITS]| p.iter().all(u8::is_ascii_digit))
            .ok_or_else(|| Error::InvalidCompanyPrefix {
                prefix: company_prefix.to_owned(),
            })?;
        Ok(Self {
            extension_digit,
            company_prefix,
        })
    }

    /// The extension digit as a number.
    pub const fn extension_digit(&self) -> u8 {
        self.extension_digit
    }

    /// The company prefix digits.
    pub fn company_prefix(&self) -> &str {
        // Constructors only accept ASCII digits.
        core::str::from_utf8(&self.company_prefix).unwrap_or_default()
    }

    /// Builds the 17 data digits for `counter`: AI, extension digit, company
    /// prefix and the zero-padded serial reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerialOverflow`] if `counter` exceeds
    /// [`MAX_SERIAL_REFERENCE`].
    pub fn data_digits(&self, counter: u64) -> Result<[u8; DATA_LEN]> {
        if counter > MAX_SERIAL_REFERENCE {
            return Err(Error::SerialOverflow { counter });
        }
        let mut data = [b'0'; DATA_LEN];
        data[EXTENSION_AT] = b'0' + self.extension_digit;
        data[PREFIX_AT..SERIAL_AT].copy_from_slice(&self.company_prefix);

        let mut rest = counter;
        for slot in data[SERIAL_AT..].iter_mut().rev() {
            // `rest % 10` is always a single digit
            *slot = b'0' + (rest % 10) as u8;
            rest /= 10;
        }
        Ok(data)
    }

    /// Builds the complete code for `counter`, appending the Mod-10 check
    /// digit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerialOverflow`] if `counter` exceeds
    /// [`MAX_SERIAL_REFERENCE`].
    ///
    /// # Example
    /// ```
    /// use sscc::SsccLayout;
    ///
    /// let code = SsccLayout::default().build(0).unwrap();
    /// assert_eq!(code.as_str(), "008596570000000006");
    /// ```
    pub fn build(&self, counter: u64) -> Result<Sscc> {
        let data = self.data_digits(counter)?;
        let check = compute_check_digit(&data)?;

        let mut digits = [0_u8; SSCC_LEN];
        digits[..DATA_LEN].copy_from_slice(&data);
        digits[DATA_LEN] = b'0' + check;
        Ok(Sscc { digits })
    }
}

/// A validated 18-digit Serial Shipping Container Code.
///
/// Values are only produced by [`SsccLayout::build`] or by parsing, so every
/// `Sscc` is all ASCII digits, starts with the `00` application identifier,
/// and carries a correct check digit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sscc {
    digits: [u8; SSCC_LEN],
}

impl Sscc {
    /// Parses and validates an 18-digit code.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLength`] if `input` is not 18 bytes
    /// - [`Error::InvalidDigit`] on any non-digit byte
    /// - [`Error::InvalidApplicationIdentifier`] if it does not start with
    ///   `00`
    /// - [`Error::CheckDigitMismatch`] if the check digit is wrong
    ///
    /// # Example
    /// ```
    /// use sscc::{Error, Sscc};
    ///
    /// let code = Sscc::parse("008596570000000006").unwrap();
    /// assert_eq!(code.serial_reference(), 0);
    ///
    /// assert_eq!(
    ///     Sscc::parse("008596570000000007"),
    ///     Err(Error::CheckDigitMismatch { expected: 6, found: 7 })
    /// );
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let digits: [u8; SSCC_LEN] =
            input
                .as_bytes()
                .try_into()
                .map_err(|_| Error::InvalidLength {
                    expected: SSCC_LEN,
                    len: input.len(),
                })?;

        if let Some(index) = digits.iter().position(|b| !b.is_ascii_digit()) {
            return Err(Error::InvalidDigit {
                byte: digits[index],
                index,
            });
        }
        if &digits[..EXTENSION_AT] != APPLICATION_IDENTIFIER.as_bytes() {
            return Err(Error::InvalidApplicationIdentifier {
                found: input[..EXTENSION_AT].to_owned(),
            });
        }
        if !is_valid(&digits) {
            return Err(Error::CheckDigitMismatch {
                expected: compute_check_digit(&digits[..DATA_LEN])?,
                found: digits[DATA_LEN] - b'0',
            });
        }
        Ok(Self { digits })
    }

    /// The code as an 18-character string.
    pub fn as_str(&self) -> &str {
        // Every constructor guarantees ASCII digits.
        core::str::from_utf8(&self.digits).unwrap_or_default()
    }

    /// The raw ASCII digits.
    pub const fn as_bytes(&self) -> &[u8; SSCC_LEN] {
        &self.digits
    }

    /// The extension digit following the application identifier.
    pub const fn extension_digit(&self) -> u8 {
        self.digits[EXTENSION_AT] - b'0'
    }

    /// The five-digit company prefix.
    pub fn company_prefix(&self) -> &str {
        &self.as_str()[PREFIX_AT..SERIAL_AT]
    }

    /// The serial reference, i.e. the counter value the code was built from.
    pub fn serial_reference(&self) -> u64 {
        self.digits[SERIAL_AT..DATA_LEN]
            .iter()
            .fold(0, |acc, d| acc * 10 + u64::from(d - b'0'))
    }

    /// The trailing GS1 Mod-10 check digit.
    pub const fn check_digit(&self) -> u8 {
        self.digits[DATA_LEN] - b'0'
    }

    /// The layout this code was built with.
    pub fn layout(&self) -> SsccLayout {
        let mut company_prefix = [0; COMPANY_PREFIX_DIGITS];
        company_prefix.copy_from_slice(&self.digits[PREFIX_AT..SERIAL_AT]);
        SsccLayout {
            extension_digit: self.extension_digit(),
            company_prefix,
        }
    }

    /// Human readable interpretation, as printed under a GS1-128 barcode.
    ///
    /// ```
    /// use sscc::SsccLayout;
    ///
    /// let code = SsccLayout::default().build(0).unwrap();
    /// assert_eq!(code.to_hri(), "(00) 8 59657 000000000 6");
    /// ```
    pub fn to_hri(&self) -> String {
        let s = self.as_str();
        format!(
            "({}) {} {} {} {}",
            &s[..EXTENSION_AT],
            &s[EXTENSION_AT..PREFIX_AT],
            &s[PREFIX_AT..SERIAL_AT],
            &s[SERIAL_AT..DATA_LEN],
            &s[DATA_LEN..],
        )
    }
}

impl fmt::Display for Sscc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Sscc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sscc").field(&self.as_str()).finish()
    }
}

impl FromStr for Sscc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Sscc {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
