//! Three-letter currency codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a string is not a valid currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("Currency code must be exactly 3 characters, got {0:?}")]
    Length(String),

    #[error("Currency code must contain only ASCII letters, got {0:?}")]
    Charset(String),
}

/// A fixed-size currency code such as `USD`.
///
/// Stored inline as three upper-case ASCII bytes, so it is `Copy` and cheap to
/// hash. Ordering is plain byte order, which is also the tie-break order used
/// by the search queue.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, utoipa::ToSchema)]
#[schema(value_type = String, example = "USD")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Parses and normalises a code to upper case.
    pub fn new(code: &str) -> Result<Self, CodeError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 {
            return Err(CodeError::Length(code.to_string()));
        }
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(CodeError::Charset(code.to_string()));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters ever get in, see `new`.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for CurrencyCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
