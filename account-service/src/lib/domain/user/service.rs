use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Nickname;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::validation::FieldErrors;
use crate::domain::user::validation::SignupValidator;
use crate::domain::user::validation::EMAIL_FIELD;
use crate::domain::user::validation::EMAIL_IN_USE;
use crate::domain::user::validation::NICKNAME_FIELD;
use crate::domain::user::validation::NICKNAME_IN_USE;
use crate::user::errors::UserError;
use crate::user::ports::CredentialStore;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    validator: SignupValidator,
    password_hasher: auth::PasswordHasher,
}

impl<CS> UserService<CS>
where
    CS: CredentialStore,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential store implementation
    /// * `validator` - Signup rules
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(store: Arc<CS>, validator: SignupValidator) -> Self {
        Self {
            store,
            validator,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Create the user unless one already exists for its email.
    ///
    /// Returns `Ok(None)` when the email was already registered.
    pub async fn ensure_user(&self, command: SignupCommand) -> Result<Option<User>, UserError> {
        if let Some(email) = command.email.as_deref() {
            if self.store.exists_by_email(email).await? {
                return Ok(None);
            }
        }

        match self.create_user(command).await {
            Ok(user) => Ok(Some(user)),
            Err(UserError::Validation(errors))
                if errors.get(EMAIL_FIELD).map(String::as_str) == Some(EMAIL_IN_USE) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<CS> UserServicePort for UserService<CS>
where
    CS: CredentialStore,
{
    async fn validate_signup(&self, command: &SignupCommand) -> Result<FieldErrors, UserError> {
        self.validator.validate(self.store.as_ref(), command).await
    }

    async fn create_user(&self, command: SignupCommand) -> Result<User, UserError> {
        let errors = self.validate_signup(&command).await?;
        if !errors.is_empty() {
            return Err(UserError::Validation(errors));
        }

        let email = EmailAddress::new(command.email.unwrap_or_default())?;
        let nickname = Nickname::new(command.nickname.unwrap_or_default())?;
        let password = command.password.unwrap_or_default();

        // Hash password using auth library
        let password_hash = self.password_hasher.hash(&password)?;

        let new_user = NewUser {
            email,
            nickname,
            password_hash,
        };

        // The pre-check above is advisory; the store's verdict is final.
        let created_user = self.store.create(new_user).await.map_err(|e| match e {
            UserError::EmailAlreadyExists(email) => {
                tracing::info!(email = %email, "Signup lost uniqueness race on email");
                conflict(EMAIL_FIELD, EMAIL_IN_USE)
            }
            UserError::NicknameAlreadyExists(nickname) => {
                tracing::info!(nickname = %nickname, "Signup lost uniqueness race on nickname");
                conflict(NICKNAME_FIELD, NICKNAME_IN_USE)
            }
            other => other,
        })?;

        tracing::info!(
            user_id = %created_user.id,
            email = %created_user.email,
            "User created"
        );

        Ok(created_user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.store.find_by_email(email).await
    }
}

fn conflict(field: &str, message: &str) -> UserError {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), message.to_string());
    UserError::Validation(errors)
}
