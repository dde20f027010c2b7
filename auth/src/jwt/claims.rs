use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Identity asserted by a token.
///
/// Exactly four claims are carried: the subject email, the numeric user id,
/// and the issued-at / expiration instants as Unix timestamps (seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Numeric user identifier
    pub user_id: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring `ttl` after `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - The TTL is not positive or the expiration is not representable
    pub fn for_user(
        email: impl ToString,
        user_id: i64,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::EncodingFailed(format!(
                "token lifetime must be positive, got {}s",
                ttl.num_seconds()
            )));
        }

        let expiration = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::EncodingFailed("token expiration is out of range".to_string())
        })?;

        Ok(Self {
            sub: email.to_string(),
            user_id,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Get the subject email.
    pub fn email(&self) -> &str {
        &self.sub
    }

    /// Check if token is expired.
    ///
    /// A token is still valid during the second named by `exp`; no skew
    /// tolerance is applied.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
