use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;
use super::secret::SigningSecret;

/// Creates signed, time-bounded tokens asserting a user's identity.
///
/// Uses HS256 (HMAC with SHA-256). Every token expires a fixed TTL after
/// it was issued.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new issuer.
    ///
    /// # Arguments
    /// * `secret` - Process-wide signing secret
    /// * `ttl` - Lifetime of every issued token
    pub fn new(secret: &SigningSecret, ttl: Duration) -> Self {
        Self {
            encoding_key: secret.encoding_key(),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Lifetime applied to issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for a user, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, email: &str, user_id: i64) -> Result<String, TokenError> {
        self.issue_at(email, user_id, Utc::now())
    }

    /// Issue a token for a user as if it had been issued at `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed, or the TTL cannot produce an expiration
    pub fn issue_at(
        &self,
        email: &str,
        user_id: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::for_user(email, user_id, issued_at, self.ttl)?;
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}
