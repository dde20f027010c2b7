use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::SigningSecret;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Provides high-level authentication operations by coordinating
/// password hashing, token issuance and token validation.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
    decoy_hash: Option<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-subjects";

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(secret: &SigningSecret, token_ttl: Duration) -> Self {
        let password_hasher = PasswordHasher::new();

        Self {
            decoy_hash: password_hasher.hash(DECOY_PASSWORD).ok(),
            password_hasher,
            token_issuer: TokenIssuer::new(secret, token_ttl),
            token_validator: TokenValidator::new(secret),
        }
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `email` - Subject email for the token
    /// * `user_id` - User identifier for the token
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or stored hash is corrupt)
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        email: &str,
        user_id: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(email, user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for a subject that does not exist.
    ///
    /// Runs one password verification against a decoy hash so the call
    /// costs the same as a wrong password for a known subject.
    pub fn reject_unknown_subject(&self, password: &str) -> AuthenticationError {
        if let Some(decoy_hash) = &self.decoy_hash {
            let _ = self.password_hasher.verify(password, decoy_hash);
        }

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// Used right after signup, where the caller has just chosen the password.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn generate_token(&self, email: &str, user_id: i64) -> Result<String, TokenError> {
        self.token_issuer.issue(email, user_id)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Invalid` - Signature mismatch or malformed claims
    /// * `Expired` - Token has expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_validator.validate(token)
    }

    /// Access the underlying issuer.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }
}
