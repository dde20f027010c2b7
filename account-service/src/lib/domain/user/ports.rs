use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::validation::FieldErrors;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Check a signup request without writing anything.
    ///
    /// # Arguments
    /// * `command` - Raw signup fields
    ///
    /// # Returns
    /// Field name to message mapping; empty means valid
    ///
    /// # Errors
    /// * `StoreUnavailable` - Uniqueness lookups failed
    async fn validate_signup(&self, command: &SignupCommand) -> Result<FieldErrors, UserError>;

    /// Validate, hash the password and create the user.
    ///
    /// # Arguments
    /// * `command` - Raw signup fields
    ///
    /// # Returns
    /// Created user entity with its assigned identifier
    ///
    /// # Errors
    /// * `Validation` - Field errors, including a uniqueness conflict raised by the store
    /// * `Password` - Password hashing failed
    /// * `StoreUnavailable` - Credential store operation failed
    async fn create_user(&self, command: SignupCommand) -> Result<User, UserError>;

    /// Retrieve user by email.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No user with this email
    /// * `StoreUnavailable` - Credential store operation failed
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Retrieve user by email, treating absence as a normal outcome.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Credential store operation failed
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}

/// Credential store: persistence operations over identity records.
///
/// `create` is the single authority on uniqueness. Implementations must
/// reject a duplicate email or nickname atomically, even when two inserts
/// race with each other.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string, compared exactly
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Check whether an email is already registered.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError>;

    /// Check whether a nickname is already taken.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed
    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, UserError>;

    /// Persist a new user and assign its identifier.
    ///
    /// # Arguments
    /// * `user` - User data to insert
    ///
    /// # Returns
    /// Created user entity with id and timestamps
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `NicknameAlreadyExists` - Nickname is already taken
    /// * `StoreUnavailable` - Store operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;
}
