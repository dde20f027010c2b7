use std::collections::BTreeMap;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::EmailError;
use crate::user::errors::UserError;

/// Field name to human-readable message. Empty means the request is valid.
pub type FieldErrors = BTreeMap<String, String>;

pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";
pub const NICKNAME_FIELD: &str = "nickname";

pub const EMAIL_REQUIRED: &str = "이메일은 필수입니다.";
pub const EMAIL_INVALID: &str = "올바른 이메일 형식이 아닙니다.";
pub const EMAIL_IN_USE: &str = "이미 사용 중인 이메일입니다.";
pub const PASSWORD_REQUIRED: &str = "비밀번호는 필수입니다.";
pub const NICKNAME_REQUIRED: &str = "닉네임은 필수입니다.";
pub const NICKNAME_IN_USE: &str = "이미 사용 중인 닉네임입니다.";

/// Checks a signup request against static rules and current store state.
///
/// Each field is checked independently and reports at most one message: the
/// first rule it fails. The uniqueness checks are advisory only. Nothing is
/// written, so two concurrent signups can both pass here; the store's insert
/// settles the race.
#[derive(Debug, Clone)]
pub struct SignupValidator {
    min_password_length: usize,
}

impl SignupValidator {
    pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

    pub fn new(min_password_length: usize) -> Self {
        Self {
            min_password_length,
        }
    }

    pub fn min_password_length(&self) -> usize {
        self.min_password_length
    }

    /// Validate all signup fields.
    ///
    /// # Errors
    /// * `StoreUnavailable` - An existence lookup failed
    pub async fn validate<CS>(
        &self,
        store: &CS,
        command: &SignupCommand,
    ) -> Result<FieldErrors, UserError>
    where
        CS: CredentialStore + ?Sized,
    {
        let mut errors = FieldErrors::new();

        if let Some(message) = self.check_email(store, command.email.as_deref()).await? {
            errors.insert(EMAIL_FIELD.to_string(), message);
        }

        if let Some(message) = self.check_password(command.password.as_deref()) {
            errors.insert(PASSWORD_FIELD.to_string(), message);
        }

        if let Some(message) = self
            .check_nickname(store, command.nickname.as_deref())
            .await?
        {
            errors.insert(NICKNAME_FIELD.to_string(), message);
        }

        Ok(errors)
    }

    async fn check_email<CS>(
        &self,
        store: &CS,
        email: Option<&str>,
    ) -> Result<Option<String>, UserError>
    where
        CS: CredentialStore + ?Sized,
    {
        let Some(email) = email else {
            return Ok(Some(EMAIL_REQUIRED.to_string()));
        };

        match EmailAddress::new(email.to_string()) {
            Err(EmailError::Empty) => return Ok(Some(EMAIL_REQUIRED.to_string())),
            Err(EmailError::InvalidFormat(_)) => return Ok(Some(EMAIL_INVALID.to_string())),
            Ok(_) => {}
        }

        if store.exists_by_email(email).await? {
            return Ok(Some(EMAIL_IN_USE.to_string()));
        }

        Ok(None)
    }

    fn check_password(&self, password: Option<&str>) -> Option<String> {
        match password {
            None => Some(PASSWORD_REQUIRED.to_string()),
            Some(password) if password.trim().is_empty() => Some(PASSWORD_REQUIRED.to_string()),
            Some(password) if password.chars().count() < self.min_password_length => Some(
                format!("비밀번호는 {}자 이상이어야 합니다.", self.min_password_length),
            ),
            Some(_) => None,
        }
    }

    async fn check_nickname<CS>(
        &self,
        store: &CS,
        nickname: Option<&str>,
    ) -> Result<Option<String>, UserError>
    where
        CS: CredentialStore + ?Sized,
    {
        let nickname = match nickname {
            Some(nickname) if !nickname.trim().is_empty() => nickname,
            _ => return Ok(Some(NICKNAME_REQUIRED.to_string())),
        };

        if store.exists_by_nickname(nickname).await? {
            return Ok(Some(NICKNAME_IN_USE.to_string()));
        }

        Ok(None)
    }
}

impl Default for SignupValidator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_PASSWORD_LENGTH)
    }
}
