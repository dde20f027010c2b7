use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::signup::AuthResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::LOGIN_FAILED;
use crate::domain::user::ports::CredentialStore;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub const EMAIL_MISSING: &str = "이메일을 입력해주세요.";
pub const PASSWORD_MISSING: &str = "비밀번호를 입력해주세요.";

pub async fn login<CS>(
    State(state): State<AppState<CS>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError>
where
    CS: CredentialStore,
{
    let email = body
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(EMAIL_MISSING.to_string()))?;
    let password = body
        .password
        .filter(|password| !password.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(PASSWORD_MISSING.to_string()))?;

    // Get user from the credential store
    let user = state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByEmail(_) => {
                // Same verification cost as a wrong password
                let error = state.authenticator.reject_unknown_subject(&password);
                tracing::info!(error = %error, "Login attempt for unknown email");
                ApiError::Unauthorized(LOGIN_FAILED.to_string())
            }
            _ => ApiError::from(e),
        })?;

    // Verify password and issue token
    let result = state
        .authenticator
        .authenticate(
            &password,
            &user.password_hash,
            user.email.as_str(),
            user.id.value(),
        )
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                tracing::info!(user_id = %user.id, "Login rejected: wrong password");
                ApiError::Unauthorized(LOGIN_FAILED.to_string())
            }
            auth::AuthenticationError::Token(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthResponseData {
            token: result.access_token,
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}
