//! Phone number validation and normalization
//!
//! Accepts Iranian mobile numbers in three human-entered shapes and rewrites
//! them to one canonical form, `+989` followed by nine digits:
//!
//! - local: `09xxxxxxxxx`
//! - international: `+989xxxxxxxxx`
//! - international with a `00` prefix: `00989xxxxxxxxx`
//!
//! Whitespace and dashes may appear anywhere in the input. Nothing else is
//! stripped, so parentheses or dots make a number invalid.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Error, Result};

/// Prefix every canonical number starts with
pub const CANONICAL_PREFIX: &str = "+989";

/// Number of subscriber digits after the `9` mobile prefix
pub const SUBSCRIBER_DIGITS: usize = 9;

/// Errors from the internal normalizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("Invalid phone number format")]
    InvalidFormat,
}

impl From<PhoneError> for Error {
    fn from(err: PhoneError) -> Self {
        match err {
            PhoneError::InvalidFormat => Error::InvalidFormat,
        }
    }
}

/// Recognized input shapes, after cleaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `09` + 9 digits
    Local,
    /// `+989` + 9 digits
    International,
    /// `00989` + 9 digits
    InternationalZeros,
}

impl Shape {
    fn of(cleaned: &str) -> Option<Self> {
        if cleaned.strip_prefix("09").is_some_and(is_subscriber) {
            Some(Shape::Local)
        } else if cleaned.strip_prefix(CANONICAL_PREFIX).is_some_and(is_subscriber) {
            Some(Shape::International)
        } else if cleaned.strip_prefix("00989").is_some_and(is_subscriber) {
            Some(Shape::InternationalZeros)
        } else {
            None
        }
    }
}

fn is_subscriber(digits: &str) -> bool {
    digits.len() == SUBSCRIBER_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Whitespace as browsers match it with `\s`: Unicode White_Space without
/// NEL (U+0085), plus U+FEFF.
fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}' || c == '-'
}

/// A mobile number in canonical `+989xxxxxxxxx` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Accept a string that is already canonical. No cleaning is applied.
    pub fn parse(s: &str) -> std::result::Result<Self, PhoneError> {
        Self::try_from(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match Shape::of(&value) {
            Some(Shape::International) => Ok(Self(value)),
            _ => Err(PhoneError::InvalidFormat),
        }
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip whitespace and dashes. Everything else, including a leading `+`, is
/// left as entered.
pub fn clean(raw: &str) -> String {
    raw.chars().filter(|c| !is_separator(*c)).collect()
}

/// Whether the cleaned input matches one of the recognized shapes
pub fn is_valid(raw: &str) -> bool {
    Shape::of(&clean(raw)).is_some()
}

/// Rewrite a valid number to canonical form
pub fn normalize(raw: &str) -> std::result::Result<PhoneNumber, PhoneError> {
    let cleaned = clean(raw);

    let canonical = match Shape::of(&cleaned).ok_or(PhoneError::InvalidFormat)? {
        Shape::International => cleaned,
        Shape::Local => match cleaned.strip_prefix('0') {
            Some(rest) => format!("+98{rest}"),
            None => return Err(PhoneError::InvalidFormat),
        },
        Shape::InternationalZeros => match cleaned.strip_prefix("0098") {
            Some(rest) => format!("+98{rest}"),
            None => return Err(PhoneError::InvalidFormat),
        },
    };

    Ok(PhoneNumber(canonical))
}

/// Field-level check for the login form: empty input and bad shapes get
/// their own localized errors.
pub fn validate_field(raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !is_valid(raw) {
        return Err(Error::InvalidFormat);
    }
    Ok(())
}

/// Validate and normalize in one step, reporting user-facing errors
pub fn validate_and_normalize(raw: &str) -> Result<PhoneNumber> {
    validate_field(raw)?;
    Ok(normalize(raw)?)
}
