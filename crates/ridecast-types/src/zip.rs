//! Validated US ZIP codes.

use core::fmt;
use core::str::FromStr;

use crate::error::{ParseError, ParseResult};

/// Prefix shared by every lookup record identifier.
pub const RECORD_ID_PREFIX: &str = "search-";

/// A US ZIP code, either five digits or ZIP+4 (`12345-6789`).
///
/// # Examples
///
/// ```
/// use ridecast_types::ZipCode;
///
/// let zip: ZipCode = " 98052 ".parse().unwrap();
/// assert_eq!(zip.as_str(), "98052");
/// assert_eq!(zip.record_id(), "search-98052");
/// assert!("9805".parse::<ZipCode>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipCode(String);

impl ZipCode {
    /// Parse and normalize a ZIP code.
    pub fn parse(input: &str) -> ParseResult<Self> {
        let trimmed = input.trim();
        let bytes = trimmed.as_bytes();

        let valid = match bytes.len() {
            5 => bytes.iter().all(u8::is_ascii_digit),
            10 => {
                bytes[..5].iter().all(u8::is_ascii_digit)
                    && bytes[5] == b'-'
                    && bytes[6..].iter().all(u8::is_ascii_digit)
            }
            _ => false,
        };

        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ParseError::InvalidZip(input.to_string()))
        }
    }

    /// The normalized ZIP code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The five-digit part, which is what geocoders accept.
    #[must_use]
    pub fn five_digit(&self) -> &str {
        &self.0[..5]
    }

    /// Identifier of the lookup record for this ZIP code.
    #[must_use]
    pub fn record_id(&self) -> String {
        format!("{}{}", RECORD_ID_PREFIX, self.0)
    }
}

impl FromStr for ZipCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
