//! Error types for phonegate

use thiserror::Error;

/// Localized message for an empty phone field
pub const MSG_PHONE_REQUIRED: &str = "شماره موبایل الزامی است";

/// Localized message for a phone number in an unrecognized shape
pub const MSG_PHONE_FORMAT: &str = "فرمت شماره موبایل صحیح نیست";

/// Localized message for a failed or malformed profile fetch
pub const MSG_PROFILE_FETCH: &str = "خطا در دریافت اطلاعات کاربر";

/// Localized generic failure message
pub const MSG_UNEXPECTED: &str = "خطای غیرمنتظره رخ داد";

/// Localized message when another login attempt holds the guard
pub const MSG_LOGIN_IN_PROGRESS: &str = "درخواست ورود در حال انجام است";

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", MSG_PHONE_REQUIRED)]
    EmptyInput,

    #[error("{}", MSG_PHONE_FORMAT)]
    InvalidFormat,

    #[error("Profile fetch failed: {0}")]
    ProfileFetchFailed(String),

    #[error("Stored session record is corrupt: {0}")]
    StorageCorrupt(String),

    #[error("Failed to save user data: {0}")]
    StorageWrite(String),

    #[error("A login attempt is already in progress")]
    LoginInProgress,
}

impl Error {
    /// The message shown to the person using the login form.
    ///
    /// Validation errors already display their localized text; fetch and
    /// storage failures collapse to a generic banner so internal details
    /// never reach the page.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::EmptyInput => MSG_PHONE_REQUIRED,
            Error::InvalidFormat => MSG_PHONE_FORMAT,
            Error::ProfileFetchFailed(_) => MSG_PROFILE_FETCH,
            Error::StorageCorrupt(_) | Error::StorageWrite(_) => MSG_UNEXPECTED,
            Error::LoginInProgress => MSG_LOGIN_IN_PROGRESS,
        }
    }

    /// Whether this error belongs to the phone input field rather than the
    /// whole form.
    pub fn is_field_error(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::InvalidFormat)
    }
}
