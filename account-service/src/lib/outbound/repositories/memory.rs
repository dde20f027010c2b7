use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
struct Records {
    /// Map of email -> user
    by_email: HashMap<String, User>,
    next_id: i64,
}

/// Credential store held in process memory.
///
/// Uniqueness check and insert happen under one write lock, so concurrent
/// inserts of the same email or nickname cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    records: Arc<RwLock<Records>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user by email. Returns the removed record, if any.
    pub async fn remove(&self, email: &str) -> Option<User> {
        self.records.write().await.by_email.remove(email)
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.by_email.len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self.records.read().await.by_email.get(email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        Ok(self.records.read().await.by_email.contains_key(email))
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, UserError> {
        Ok(self
            .records
            .read()
            .await
            .by_email
            .values()
            .any(|user| user.nickname.as_str() == nickname))
    }

    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut records = self.records.write().await;

        if records.by_email.contains_key(user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        if records
            .by_email
            .values()
            .any(|existing| existing.nickname == user.nickname)
        {
            return Err(UserError::NicknameAlreadyExists(user.nickname.to_string()));
        }

        records.next_id += 1;
        let now = Utc::now();
        let created = User {
            id: UserId(records.next_id),
            email: user.email,
            nickname: user.nickname,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };

        records
            .by_email
            .insert(created.email.as_str().to_string(), created.clone());

        Ok(created)
    }
}
