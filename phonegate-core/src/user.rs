//! Profile and session record types
//!
//! Serde handles the shape; `Validate` enforces the field rules the shape
//! alone can't express. Records are checked both before they are written and
//! after they are read back.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::phone::PhoneNumber;
use crate::{Error, Result};

/// Storage key holding the single session record
pub const SESSION_STORAGE_KEY: &str = "demo.user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Picture {
    #[validate(url)]
    pub large: String,
    #[validate(url)]
    pub medium: String,
    #[validate(url)]
    pub thumbnail: String,
}

/// A profile as returned by the profile service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileData {
    pub name: PersonName,
    #[validate(email, custom(function = "validate_tld"))]
    pub email: String,
    #[validate(nested)]
    pub picture: Picture,
}

impl ProfileData {
    /// "First Last", trimmed
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name.first, self.name.last)
            .trim()
            .to_string()
    }
}

/// The mail domain must end in a top-level label of two or more letters.
fn validate_tld(email: &str) -> std::result::Result<(), ValidationError> {
    let tld = email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .map(|(_, tld)| tld);

    match tld {
        Some(tld) if tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic()) => Ok(()),
        _ => Err(ValidationError::new("email_tld")),
    }
}

/// The authenticated user, as persisted in the session slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SessionRecord {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: ProfileData,

    #[serde(rename = "phoneNormalized")]
    pub phone_normalized: PhoneNumber,
}

impl SessionRecord {
    pub fn new(profile: ProfileData, phone: PhoneNumber) -> Self {
        Self {
            profile,
            phone_normalized: phone,
        }
    }

    /// Parse and validate a stored record
    pub fn from_json(json: &str) -> Result<Self> {
        let record: SessionRecord =
            serde_json::from_str(json).map_err(|e| Error::StorageCorrupt(e.to_string()))?;
        record
            .validate()
            .map_err(|e| Error::StorageCorrupt(e.to_string()))?;
        Ok(record)
    }

    /// Validate and serialize for storage
    pub fn to_json(&self) -> Result<String> {
        self.validate()
            .map_err(|e| Error::StorageWrite(e.to_string()))?;
        serde_json::to_string(self).map_err(|e| Error::StorageWrite(e.to_string()))
    }

    pub fn display_name(&self) -> String {
        self.profile.display_name()
    }
}

/// Response body of the random-profile endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RandomUserResponse {
    pub results: Vec<ProfileData>,
}

impl RandomUserResponse {
    /// Extract the one profile the endpoint was asked for.
    ///
    /// Anything other than exactly one valid result is a fetch failure.
    pub fn into_profile(self) -> Result<ProfileData> {
        let count = self.results.len();
        let profile = match <[ProfileData; 1]>::try_from(self.results) {
            Ok([profile]) => profile,
            Err(_) => {
                return Err(Error::ProfileFetchFailed(format!(
                    "expected exactly one result, got {count}"
                )))
            }
        };

        profile
            .validate()
            .map_err(|e| Error::ProfileFetchFailed(e.to_string()))?;
        Ok(profile)
    }
}
