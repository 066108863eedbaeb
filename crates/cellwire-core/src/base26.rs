//! Base-26 numeral conversions.
//!
//! Two distinct alphabetic numeral schemes live here, and they are not
//! interchangeable:
//!
//! - [`encode_signed`] / [`decode_signed`]: a plain remainder-based base-26
//!   numeral over the digits 'A'..='Z' where 'A' is the digit 0, with an
//!   optional leading '-'. 25 encodes as "Z" and 26 carries to "BA".
//! - [`column_to_letters`] / [`letters_to_column`]: the bijective base-26
//!   scheme used for spreadsheet column labels, which has no zero digit.
//!   "A" is 1, "Z" is 26, and "AA" is 27.

use std::num::NonZeroU32;

use crate::error::{Error, Result};

/// Largest magnitude that `f64` represents exactly at integer granularity (2^53).
const MAX_EXACT_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

fn digit_to_char(digit: u64) -> char {
    debug_assert!(digit < 26);
    (b'A' + digit as u8) as char
}

/// Encode a signed integer as a remainder-based base-26 numeral.
///
/// The input must be a mathematical integer; fractional or non-finite values
/// are rejected rather than truncated. The sign of `-0.0` is preserved, so
/// `0.0` encodes as `"A"` and `-0.0` as `"-A"`.
///
/// # Examples
/// ```
/// use cellwire_core::base26::encode_signed;
///
/// assert_eq!(encode_signed(0.0).unwrap(), "A");
/// assert_eq!(encode_signed(25.0).unwrap(), "Z");
/// assert_eq!(encode_signed(26.0).unwrap(), "BA");
/// assert_eq!(encode_signed(-1.0).unwrap(), "-B");
/// ```
pub fn encode_signed(value: f64) -> Result<String> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(Error::NotAnInteger(value));
    }

    let negative = value < 0.0 || (value == 0.0 && value.is_sign_negative());
    let magnitude = value.abs();
    if magnitude > MAX_EXACT_MAGNITUDE {
        return Err(Error::OutOfRange(value));
    }

    let mut n = magnitude as u64;
    let mut result = String::new();

    if n == 0 {
        // zero still gets one digit
        result.push(digit_to_char(0));
    } else {
        while n > 0 {
            result.insert(0, digit_to_char(n % 26));
            n /= 26;
        }
    }

    if negative {
        result.insert(0, '-');
    }

    Ok(result)
}

/// Decode a remainder-based base-26 numeral produced by [`encode_signed`].
///
/// Accepts lowercase letters. Returns `-0.0` for `"-A"`, so the sign bit
/// round-trips.
pub fn decode_signed(numeral: &str) -> Result<f64> {
    let invalid = || Error::InvalidNumeral(numeral.to_string());

    let (negative, digits) = match numeral.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, numeral),
    };

    if digits.is_empty() {
        return Err(invalid());
    }

    let mut n: u64 = 0;
    for c in digits.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = (c.to_ascii_uppercase() as u64) - ('A' as u64);
        n = n
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(invalid)?;
    }

    if n > MAX_EXACT_MAGNITUDE as u64 {
        return Err(invalid());
    }

    let value = n as f64;
    Ok(if negative { -value } else { value })
}

/// Convert a 1-based column index to its bijective base-26 letters.
///
/// # Examples
/// ```
/// use cellwire_core::base26::column_to_letters;
///
/// assert_eq!(column_to_letters(1).unwrap(), "A");
/// assert_eq!(column_to_letters(26).unwrap(), "Z");
/// assert_eq!(column_to_letters(27).unwrap(), "AA");
/// ```
pub fn column_to_letters(col: u32) -> Result<String> {
    let col = NonZeroU32::new(col).ok_or(Error::InvalidColumnIndex)?;
    Ok(nonzero_column_to_letters(col))
}

/// Infallible variant of [`column_to_letters`] for already-validated indices.
pub(crate) fn nonzero_column_to_letters(col: NonZeroU32) -> String {
    let mut n = col.get();
    // more than four characters are only needed for outlandish column counts
    let mut letters = String::with_capacity(4);

    while n > 0 {
        n -= 1;
        letters.insert(0, digit_to_char((n % 26) as u64));
        n /= 26;
    }

    letters
}

/// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27).
///
/// Case insensitive. Labels that would overflow `u32` are rejected.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    let invalid = || Error::InvalidColumnLabel(letters.to_string());

    if letters.is_empty() {
        return Err(invalid());
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        col = col
            .checked_mul(26)
            .and_then(|col| col.checked_add(digit))
            .ok_or_else(invalid)?;
    }

    Ok(col)
}
