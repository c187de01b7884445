//! Revision tokens for optimistic concurrency.
//!
//! A revision looks like `3-9f86d081884c4d63a1f2e5b0c7d2a8e1`: a generation
//! counter that starts at 1 and grows by one per write, then a random suffix
//! chosen by the store. Callers should treat the whole token as opaque and
//! only ever hand back the token they last observed.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

/// An opaque revision token assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Revision {
    generation: u64,
    token: String,
}

impl Revision {
    /// Revision for a freshly created document.
    pub fn first(suffix: &str) -> ParseResult<Self> {
        Self::new(1, suffix)
    }

    /// Build a revision from its parts.
    pub fn new(generation: u64, suffix: &str) -> ParseResult<Self> {
        let token = format!("{}-{}", generation, suffix);
        if generation == 0 || suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidRevision(token));
        }
        Ok(Self { generation, token })
    }

    /// The revision that follows this one.
    ///
    /// Fails if the generation counter is exhausted.
    pub fn next(&self, suffix: &str) -> ParseResult<Self> {
        let generation = self
            .generation
            .checked_add(1)
            .ok_or_else(|| ParseError::InvalidRevision(self.token.clone()))?;
        Self::new(generation, suffix)
    }

    /// Parse a token such as `2-abc123`.
    pub fn parse(input: &str) -> ParseResult<Self> {
        let (generation, suffix) = input
            .split_once('-')
            .ok_or_else(|| ParseError::InvalidRevision(input.to_string()))?;
        let generation: u64 = generation
            .parse()
            .map_err(|_| ParseError::InvalidRevision(input.to_string()))?;
        Self::new(generation, suffix).map_err(|_| ParseError::InvalidRevision(input.to_string()))
    }

    /// Write counter, starting at 1.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The full token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl FromStr for Revision {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Revision {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Revision> for String {
    fn from(rev: Revision) -> Self {
        rev.token
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_revision() {
        let rev = Revision::first("abc123").unwrap();
        assert_eq!(rev.generation(), 1);
        assert_eq!(rev.as_str(), "1-abc123");
    }

    #[test]
    fn test_next_increments_generation() {
        let rev = Revision::first("aa").unwrap().next("bb").unwrap();
        assert_eq!(rev.generation(), 2);
        assert_eq!(rev.to_string(), "2-bb");
    }

    #[test]
    fn test_next_at_max_generation_fails() {
        let rev = Revision::parse("18446744073709551615-ab").unwrap();
        assert_eq!(rev.generation(), u64::MAX);
        assert!(matches!(
            rev.next("cd"),
            Err(ParseError::InvalidRevision(token)) if token == "18446744073709551615-ab"
        ));
    }

    #[test]
    fn test_parse_round_trip() {
        let rev: Revision = "17-9f86d081884c4d63a1f2e5b0c7d2a8e1".parse().unwrap();
        assert_eq!(rev.generation(), 17);
        assert_eq!(rev.as_str(), "17-9f86d081884c4d63a1f2e5b0c7d2a8e1");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "abc", "0-abc", "-abc", "1-", "1-xyz", "x-abc", "1_abc"] {
            assert!(Revision::parse(input).is_err(), "input {:?}", input);
        }
    }

    #[test]
    fn test_serde_as_plain_string() {
        let rev = Revision::parse("3-ff").unwrap();
        let json = serde_json::to_string(&rev).unwrap();
        assert_eq!(json, "\"3-ff\"");

        let back: Revision = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rev);

        assert!(serde_json::from_str::<Revision>("\"nope\"").is_err());
    }
}
