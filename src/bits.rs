//! Bit addressing over binary-string keys.
//!
//! Positions are 1-based. Position `0` is reserved for the head and always
//! reads as `0`, and positions past the end of a key read as `0` too, so keys
//! of different lengths compare as if zero padded.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyError;

/// Bit at 1-based position `i` of `key`.
///
/// Any byte other than `'1'` reads as `0`; validation happens in
/// [`BitKey::parse`], not here.
#[inline]
pub fn bit_at(key: &str, i: u32) -> u8 {
    if i == 0 {
        return 0;
    }
    match key.as_bytes().get(i as usize - 1) {
        Some(b'1') => 1,
        _ => 0,
    }
}

/// Smallest 1-based position at which `a` and `b` differ.
///
/// Returns `max(a.len(), b.len()) + 1` when the keys agree everywhere under
/// zero padding.
pub fn first_diff_bit(a: &str, b: &str) -> u32 {
    let m = a.len().max(b.len()) as u32;
    (1..=m)
        .find(|&i| bit_at(a, i) != bit_at(b, i))
        .unwrap_or(m + 1)
}

/// A validated, non-empty key over `{'0', '1'}`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitKey(Box<str>);

impl BitKey {
    /// Validate `s` as a binary key.
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        if s.is_empty() {
            return Err(KeyError::Empty);
        }
        if let Some((idx, found)) = s.chars().enumerate().find(|&(_, c)| c != '0' && c != '1') {
            return Err(KeyError::InvalidDigit {
                position: idx + 1,
                found,
            });
        }
        Ok(Self(s.into()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Validated keys are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn bit(&self, i: u32) -> u8 {
        bit_at(&self.0, i)
    }

    /// Whether `self` and `other` differ only by trailing zeros.
    pub fn collides_with(&self, other: &str) -> bool {
        first_diff_bit(&self.0, other) as usize > self.len().max(other.len())
    }
}

impl FromStr for BitKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for BitKey {
    type Error = KeyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for BitKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BitKey {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl fmt::Display for BitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for BitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_at() {
        assert_eq!(bit_at("1010", 0), 0);
        assert_eq!(bit_at("1010", 1), 1);
        assert_eq!(bit_at("1010", 2), 0);
        assert_eq!(bit_at("1010", 3), 1);
        assert_eq!(bit_at("1010", 4), 0);
        // Past the end reads as padding.
        assert_eq!(bit_at("1010", 5), 0);
        assert_eq!(bit_at("1", 100), 0);
        // Position 0 is reserved even for all-ones keys.
        assert_eq!(bit_at("1111", 0), 0);
    }

    #[test]
    fn test_first_diff_bit() {
        assert_eq!(first_diff_bit("1000", "1010"), 3);
        assert_eq!(first_diff_bit("0", "1"), 1);
        assert_eq!(first_diff_bit("1", "11"), 2);
        assert_eq!(first_diff_bit("1101", "11011"), 5);
        // Identical up to padding.
        assert_eq!(first_diff_bit("10", "100"), 4);
        assert_eq!(first_diff_bit("101", "101"), 4);
    }

    #[test]
    fn test_parse() {
        assert_eq!(BitKey::parse("0110").unwrap().as_str(), "0110");
        assert_eq!(BitKey::parse(""), Err(KeyError::Empty));
        assert_eq!(
            BitKey::parse("10a1"),
            Err(KeyError::InvalidDigit {
                position: 3,
                found: 'a'
            })
        );
        assert!("2".parse::<BitKey>().is_err());
        assert!(BitKey::try_from("1").is_ok());
    }

    #[test]
    fn test_collides_with() {
        let k = BitKey::parse("10").unwrap();
        assert!(k.collides_with("100"));
        assert!(k.collides_with("10"));
        assert!(!k.collides_with("101"));
        assert!(k.collides_with("1"));
        assert!(!k.collides_with("11"));
    }
}
