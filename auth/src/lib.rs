//! Stateless authentication primitives.
//!
//! Provides the building blocks a service needs to authenticate callers
//! without server-side sessions:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded token issuance and validation (HS256)
//! - Authentication coordination
//!
//! Nothing here touches HTTP or storage. Services adapt these pieces to
//! their own request pipeline and credential store.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("password123").unwrap();
//! assert!(hasher.verify("password123", &hash));
//! assert!(!hasher.verify("password456", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningSecret, TokenIssuer, TokenValidator};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let issuer = TokenIssuer::new(&secret, Duration::hours(24));
//! let validator = TokenValidator::new(&secret);
//!
//! let token = issuer.issue("a@b.com", 1).unwrap();
//! let claims = validator.validate(&token).unwrap();
//! assert_eq!(claims.email(), "a@b.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, SigningSecret};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret, Duration::hours(24));
//!
//! // Register: hash password
//! let hash = PasswordHasher::new().hash("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "a@b.com", 1).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.user_id, 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::SecretError;
pub use jwt::SigningSecret;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;
