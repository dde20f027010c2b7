pub mod claims;
pub mod errors;
pub mod issuer;
pub mod secret;
pub mod validator;

pub use claims::Claims;
pub use errors::SecretError;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
pub use secret::SigningSecret;
pub use validator::TokenValidator;
