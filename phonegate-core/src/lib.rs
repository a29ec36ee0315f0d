//! phonegate core library
//!
//! The logic behind a demo phone-number login:
//! - Normalize human-entered mobile numbers to one canonical form
//! - Describe and validate the profile and session records
//! - Report errors with localized, user-facing messages

pub mod error;
pub mod phone;
pub mod user;

pub use error::Error;
pub use phone::{PhoneError, PhoneNumber};
pub use user::{ProfileData, RandomUserResponse, SessionRecord, SESSION_STORAGE_KEY};

/// Result type for phonegate-core operations
pub type Result<T> = std::result::Result<T, Error>;
