//! Booking reference: the short code customers quote to find a booking.
//!
//! A reference is exactly [`LENGTH`] symbols drawn from [`ALPHABET`]
//! (upper-case `A`–`Z` then digits `0`–`9`). Uniqueness is not a property
//! of the value itself; it is established by the allocator in `salonbook-app`
//! and, where available, a unique index in storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of distinct symbols a reference may contain.
pub const SYMBOL_COUNT: u8 = 36;

/// Symbols a reference may contain, in canonical order.
pub const ALPHABET: &[u8; SYMBOL_COUNT as usize] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of symbols in every reference.
pub const LENGTH: usize = 6;

/// A validated six-symbol booking reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingReference([u8; LENGTH]);

impl BookingReference {
    /// Build a reference from alphabet indices, one per position.
    ///
    /// Indices are reduced modulo the alphabet size, so any `u8` maps to
    /// a valid symbol.
    #[must_use]
    pub fn from_indices(indices: [u8; LENGTH]) -> Self {
        Self(indices.map(|i| ALPHABET[usize::from(i) % ALPHABET.len()]))
    }

    /// Borrow the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Every byte is ASCII from ALPHABET.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Iterate over the symbols of the reference.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| char::from(b))
    }

    fn is_symbol(byte: u8) -> bool {
        byte.is_ascii_uppercase() || byte.is_ascii_digit()
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingReference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; LENGTH] = s
            .as_bytes()
            .try_into()
            .map_err(|_| ValidationError::InvalidReference(s.to_string()))?;
        if !bytes.iter().copied().all(Self::is_symbol) {
            return Err(ValidationError::InvalidReference(s.to_string()));
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for BookingReference {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BookingReference> for String {
    fn from(value: BookingReference) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_valid_reference() {
        let reference: BookingReference = "AB12CZ".parse().unwrap();
        assert_eq!(reference.as_str(), "AB12CZ");
        assert_eq!(reference.to_string(), "AB12CZ");
    }

    #[test]
    fn should_reject_wrong_length() {
        assert!("ABC12".parse::<BookingReference>().is_err());
        assert!("ABC1234".parse::<BookingReference>().is_err());
        assert!("".parse::<BookingReference>().is_err());
    }

    #[test]
    fn should_reject_lower_case_symbols() {
        let result = "ab12cz".parse::<BookingReference>();
        assert_eq!(
            result,
            Err(ValidationError::InvalidReference("ab12cz".to_string()))
        );
    }

    #[test]
    fn should_reject_symbols_outside_alphabet() {
        assert!("AB-12C".parse::<BookingReference>().is_err());
        assert!("ÄB12C".parse::<BookingReference>().is_err());
    }

    #[test]
    fn should_map_indices_onto_alphabet() {
        let reference = BookingReference::from_indices([0, 25, 26, 35, 36, 71]);
        assert_eq!(reference.as_str(), "AZ09A9");
    }

    #[test]
    fn should_cover_whole_alphabet_with_valid_symbols() {
        assert_eq!(ALPHABET.len(), 36);
        assert!(ALPHABET.iter().copied().all(BookingReference::is_symbol));
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let reference: BookingReference = "QWERTY".parse().unwrap();
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, "\"QWERTY\"");
    }

    #[test]
    fn should_reject_invalid_reference_when_deserializing() {
        let result: Result<BookingReference, _> = serde_json::from_str("\"qwerty\"");
        assert!(result.is_err());
    }
}
