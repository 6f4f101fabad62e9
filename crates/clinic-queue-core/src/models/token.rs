//! Queue token model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClinicError;

/// Human-readable queue ticket, rendered as `T` + zero-padded sequence (`T001`).
///
/// Ordering follows the numeric sequence, so `T010 > T009`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(u32);

impl Token {
    pub const PREFIX: char = 'T';

    pub fn new(sequence: u32) -> Self {
        Self(sequence)
    }

    /// Numeric part of the token.
    pub fn sequence(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", Self::PREFIX, self.0)
    }
}

impl FromStr for Token {
    type Err = ClinicError;

    /// Parse `T001` (prefix is case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix(Self::PREFIX)
            .or_else(|| trimmed.strip_prefix(Self::PREFIX.to_ascii_lowercase()))
            .filter(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()))
            .ok_or_else(|| ClinicError::NotFound(format!("token {}", s)))?;

        digits
            .parse::<u32>()
            .map(Token)
            .map_err(|_| ClinicError::NotFound(format!("token {}", s)))
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.to_string()
    }
}

impl TryFrom<String> for Token {
    type Error = ClinicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_padded() {
        assert_eq!(Token::new(1).to_string(), "T001");
        assert_eq!(Token::new(42).to_string(), "T042");
        assert_eq!(Token::new(999).to_string(), "T999");
    }

    #[test]
    fn test_display_widens_past_three_digits() {
        assert_eq!(Token::new(1000).to_string(), "T1000");
    }

    #[test]
    fn test_parse() {
        assert_eq!("T005".parse::<Token>().unwrap(), Token::new(5));
        assert_eq!("t005".parse::<Token>().unwrap(), Token::new(5));
        assert!("005".parse::<Token>().is_err());
        assert!("T".parse::<Token>().is_err());
        assert!("T0x1".parse::<Token>().is_err());
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(Token::new(10) > Token::new(9));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Token::new(3)).unwrap();
        assert_eq!(json, "\"T003\"");
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Token::new(3));
    }
}
