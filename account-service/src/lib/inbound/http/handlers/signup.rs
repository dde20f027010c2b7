use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::CredentialStore;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup<CS>(
    State(state): State<AppState<CS>>,
    Json(body): Json<SignupRequestBody>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError>
where
    CS: CredentialStore,
{
    let user = state.user_service.create_user(body.into()).await?;

    let token = state
        .authenticator
        .generate_token(user.email.as_str(), user.id.value())
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AuthResponseData {
            token,
            user: (&user).into(),
        },
    ))
}

/// HTTP request body for signing up (raw JSON). Missing fields are reported
/// by the validator rather than rejected by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequestBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    nickname: Option<String>,
}

impl From<SignupRequestBody> for SignupCommand {
    fn from(body: SignupRequestBody) -> Self {
        SignupCommand {
            email: body.email,
            password: body.password,
            nickname: body.nickname,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub token: String,
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            email: user.email.as_str().to_string(),
            nickname: user.nickname.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
