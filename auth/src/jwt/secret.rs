use std::fmt;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::SecretError;

/// Process-wide HMAC key shared by the token issuer and validator.
///
/// Loaded once at startup. The bytes are never printed: `Debug` is redacted.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// HS256 keys shorter than the digest size (256 bits) are rejected.
    pub const MIN_LENGTH: usize = 32;

    /// Wrap raw secret bytes.
    ///
    /// # Errors
    /// * `Missing` - Secret is empty
    /// * `TooShort` - Secret is shorter than 32 bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SecretError::Missing);
        }
        if secret.len() < Self::MIN_LENGTH {
            return Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }
        Ok(Self(secret))
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.0)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.0)
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
