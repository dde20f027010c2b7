use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Nickname;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;

const EMAIL_CONSTRAINT: &str = "users_email_key";
const NICKNAME_CONSTRAINT: &str = "users_nickname_key";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    nickname: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(r.email).map_err(|e| corrupt_row(r.id, e))?;
        let nickname = Nickname::new(r.nickname).map_err(|e| corrupt_row(r.id, e))?;

        Ok(User {
            id: UserId(r.id),
            email,
            nickname,
            password_hash: r.password_hash,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// A stored record that no longer satisfies the domain rules is a storage
/// fault, not caller input.
fn corrupt_row(id: i64, e: impl std::fmt::Display) -> UserError {
    tracing::error!(user_id = id, error = %e, "Stored user record is invalid");
    UserError::StoreUnavailable(format!("stored user {} is invalid: {}", id, e))
}

fn store_error(e: sqlx::Error) -> UserError {
    UserError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, nickname, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, UserError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE nickname = $1)")
            .bind(nickname)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, nickname, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, nickname, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.email.as_str())
        .bind(user.nickname.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    match db_err.constraint() {
                        Some(NICKNAME_CONSTRAINT) => {
                            return UserError::NicknameAlreadyExists(user.nickname.to_string());
                        }
                        Some(EMAIL_CONSTRAINT) => {
                            return UserError::EmailAlreadyExists(user.email.to_string());
                        }
                        constraint => tracing::error!(
                            constraint = ?constraint,
                            "Unique violation on unexpected constraint"
                        ),
                    }
                }
            }
            store_error(e)
        })?;

        User::try_from(row)
    }
}
