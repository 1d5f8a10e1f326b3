//! GS1 Modulo-10 check digits.
//!
//! The same algorithm protects every GS1 key (GTIN-8/12/13/14, GLN, SSCC), so
//! these functions accept data of any length.

use crate::error::{Error, Result};

/// Weight applied to the rightmost data digit; weights alternate 3,1,3,1...
const ODD_WEIGHT: u32 = 3;
const EVEN_WEIGHT: u32 = 1;

#[inline]
fn digit_at(bytes: &[u8], index: usize) -> Result<u32> {
    let byte = bytes[index];
    if byte.is_ascii_digit() {
        Ok(u32::from(byte - b'0'))
    } else {
        Err(Error::InvalidDigit { byte, index })
    }
}

/// Sums `data` right to left with the weight sequence starting at `first`.
fn weighted_sum(data: &[u8], first: u32, second: u32) -> Result<u32> {
    let mut sum = 0;
    for (offset, index) in (0..data.len()).rev().enumerate() {
        let weight = if offset % 2 == 0 { first } else { second };
        sum += digit_at(data, index)? * weight;
    }
    Ok(sum)
}

/// Computes the GS1 Mod-10 check digit for `data`, a string of ASCII digits
/// that excludes the check digit itself.
///
/// Digits are weighted right to left by 3 and 1 alternately, summed, and the
/// check digit is `(10 - sum % 10) % 10`.
///
/// # Errors
///
/// Returns [`Error::InvalidDigit`] if `data` contains a non-digit byte.
///
/// # Example
///
/// ```
/// use sscc::compute_check_digit;
///
/// assert_eq!(compute_check_digit(b"00859657000000000").unwrap(), 6);
/// // GTIN-13
/// assert_eq!(compute_check_digit(b"400638133393").unwrap(), 1);
/// ```
pub fn compute_check_digit(data: &[u8]) -> Result<u8> {
    let sum = weighted_sum(data, ODD_WEIGHT, EVEN_WEIGHT)?;
    // `(10 - sum % 10) % 10` is always in 0..=9
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Returns `true` if `code` (data digits followed by the check digit)
/// satisfies the GS1 Mod-10 verification equation.
///
/// With the check digit weighted 1 and the data digits continuing 3,1,3...
/// to the left, the weighted sum must be a multiple of ten. Empty input and
/// non-digit bytes are never valid.
pub fn is_valid(code: &[u8]) -> bool {
    if code.is_empty() {
        return false;
    }
    weighted_sum(code, EVEN_WEIGHT, ODD_WEIGHT).is_ok_and(|sum| sum % 10 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_sscc_check_digit_for_zero_serial() {
        // 0*3 + 0*1 + 8*3 + 5*1 + 9*3 + 6*1 + 5*3 + 7*1 = 84
        assert_eq!(compute_check_digit(b"00859657000000000"), Ok(6));
    }

    #[test]
    fn rightmost_digit_carries_weight_three() {
        assert_eq!(compute_check_digit(b"00859657000000001"), Ok(3));
        assert_eq!(compute_check_digit(b"00859657000000010"), Ok(5));
    }

    #[test]
    fn matches_published_gs1_examples() {
        // SSCC from the GS1 General Specifications
        assert_eq!(compute_check_digit(b"10614141123456789"), Ok(7));
        // GTIN-13 and GTIN-12
        assert_eq!(compute_check_digit(b"400638133393"), Ok(1));
        assert_eq!(compute_check_digit(b"03600029145"), Ok(2));
    }

    #[test]
    fn all_zero_data_has_zero_check_digit() {
        assert_eq!(compute_check_digit(b"00000000000000000"), Ok(0));
    }

    #[test]
    fn rejects_non_digit_bytes() {
        assert_eq!(
            compute_check_digit(b"0085965700000A000"),
            Err(Error::InvalidDigit {
                byte: b'A',
                index: 13
            })
        );
    }

    #[test]
    fn verifies_complete_codes() {
        assert!(is_valid(b"008596570000000006"));
        assert!(is_valid(b"106141411234567897"));
        assert!(is_valid(b"4006381333931"));
        assert!(!is_valid(b"008596570000000007"));
        assert!(!is_valid(b"00859657000000000x"));
        assert!(!is_valid(b""));
    }

    #[test]
    fn verification_agrees_with_computation() {
        for serial in [0_u32, 1, 9, 10, 12_345, 999_999_999] {
            let mut code = format!("00859657{serial:09}").into_bytes();
            let check = compute_check_digit(&code).unwrap();
            code.push(b'0' + check);
            assert!(is_valid(&code), "{}", String::from_utf8_lossy(&code));
            for wrong in (0..10).filter(|d| *d != check) {
                *code.last_mut().unwrap() = b'0' + wrong;
                assert!(!is_valid(&code));
            }
        }
    }
}
