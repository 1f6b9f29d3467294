//! crates/cli/src/frontend/quick.rs
//!
//! Decoding of `-q` literals: `txt:TEXT`, `hex:DIGITS`, `dec:N,N,...`, or bare
//! hex digits.

use std::error::Error;
use std::fmt;
use std::num::ParseIntError;

/// Encoding prefix of a quick sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Encoding {
    Text,
    Hex,
    Decimal,
}

impl Encoding {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "txt" => Some(Self::Text),
            "hex" => Some(Self::Hex),
            "dec" => Some(Self::Decimal),
            _ => None,
        }
    }
}

/// Reasons a quick sequence could not be decoded.
#[derive(Debug)]
pub(crate) enum QuickSequenceError {
    UnknownPrefix(String),
    Hex(hex::FromHexError),
    Decimal { value: String, error: ParseIntError },
}

impl fmt::Display for QuickSequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPrefix(prefix) => write!(
                f,
                "unknown sequence type '{prefix}' (expected txt, hex or dec)"
            ),
            Self::Hex(error) => write!(f, "invalid hex sequence: {error}"),
            Self::Decimal { value, .. } => {
                write!(f, "invalid decimal byte '{value}' (expected -128 to 255)")
            }
        }
    }
}

impl Error for QuickSequenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownPrefix(_) => None,
            Self::Hex(error) => Some(error),
            Self::Decimal { error, .. } => Some(error),
        }
    }
}

/// Decodes a `-q` argument into the bytes to hash.
pub(crate) fn decode(sequence: &str) -> Result<Vec<u8>, QuickSequenceError> {
    let (encoding, body) = match sequence.split_once(':') {
        Some((prefix, body)) => (
            Encoding::from_prefix(prefix)
                .ok_or_else(|| QuickSequenceError::UnknownPrefix(prefix.to_owned()))?,
            body,
        ),
        None => (Encoding::Hex, sequence),
    };

    match encoding {
        Encoding::Text => Ok(body.as_bytes().to_vec()),
        Encoding::Hex => hex::decode(body).map_err(QuickSequenceError::Hex),
        Encoding::Decimal if body.is_empty() => Ok(Vec::new()),
        Encoding::Decimal => body.split(',').map(decimal_byte).collect(),
    }
}

/// Accepts unsigned bytes and their signed two's-complement spelling.
fn decimal_byte(value: &str) -> Result<u8, QuickSequenceError> {
    let trimmed = value.trim();
    trimmed
        .parse::<u8>()
        .or_else(|_| trimmed.parse::<i8>().map(|signed| signed as u8))
        .map_err(|error| QuickSequenceError::Decimal {
            value: value.to_owned(),
            error,
        })
}
