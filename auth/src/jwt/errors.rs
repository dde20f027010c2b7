use thiserror::Error;

/// Outcome of a token that could not be issued or accepted.
///
/// `Invalid` and `Expired` are kept apart so callers can tell a user to
/// log in again rather than report a malformed token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token is expired")]
    Expired,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Error for signing secrets that cannot be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Signing secret is missing")]
    Missing,

    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },
}
