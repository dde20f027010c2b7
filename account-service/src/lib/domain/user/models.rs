use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::NicknameError;

/// User aggregate entity.
///
/// Represents a registered identity. The password hash is opaque and never
/// leaves the service boundary.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub nickname: Nickname,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User data ready for insertion. The store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub nickname: Nickname,
    pub password_hash: String,
}

/// User unique identifier type, assigned by the credential store at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Stored exactly as given (case-sensitive) and used as the stable lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `Empty` - Email is blank
    /// * `InvalidFormat` - Email does not have a `local@domain` shape
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.trim().is_empty() {
            return Err(EmailError::Empty);
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name type
///
/// Unique across all users. Only required to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    /// Create a new nickname.
    ///
    /// # Errors
    /// * `Empty` - Nickname is blank
    pub fn new(nickname: String) -> Result<Self, NicknameError> {
        if nickname.trim().is_empty() {
            return Err(NicknameError::Empty);
        }
        Ok(Self(nickname))
    }

    /// Get nickname as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw signup fields as received from the caller.
///
/// Any field may be missing; the signup validator reports each one.
#[derive(Debug, Clone, Default)]
pub struct SignupCommand {
    pub email: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
}

impl SignupCommand {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            nickname: Some(nickname.into()),
        }
    }
}
