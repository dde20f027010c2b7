use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use super::secret::SigningSecret;

/// Verifies token signatures and expiration and extracts the claimed identity.
///
/// Validation is pure: it never consults the credential store. Whether the
/// claimed account still exists is the caller's concern.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a new validator sharing the issuer's secret.
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the server clock in `validate_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: secret.decoding_key(),
            validation,
        }
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// * `Invalid` - Signature mismatch or malformed claims
    /// * `Expired` - Expiration time has passed
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token against an explicit instant.
    ///
    /// Steps run in order: signature, claim decoding, expiration.
    ///
    /// # Errors
    /// * `Invalid` - Signature mismatch or malformed claims
    /// * `Expired` - `exp` is before `now`
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
