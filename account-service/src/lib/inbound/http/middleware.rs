use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::AUTHENTICATION_REQUIRED;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialStore;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity resolved for the current request.
///
/// Stored in request extensions by [`authenticate`]. Built from the stored
/// record at request time, not from token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: EmailAddress,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Middleware that resolves the caller's identity from a bearer token.
///
/// Never rejects a request for missing, invalid or expired tokens: the
/// request continues without a [`Principal`] and route-level layers decide
/// whether that is acceptable. Only a credential store failure aborts the
/// request, since the caller's identity cannot be determined.
pub async fn authenticate<CS>(
    State(state): State<AppState<CS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    CS: CredentialStore,
{
    if req.extensions().get::<Principal>().is_some() {
        return Ok(next.run(req).await);
    }

    let principal = resolve_principal(&state, req.headers())
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    if let Some(principal) = principal {
        req.extensions_mut().insert(principal);
    }

    Ok(next.run(req).await)
}

/// Route layer rejecting requests that carry no [`Principal`].
pub async fn require_principal(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<Principal>().is_none() {
        return Err(ApiError::Unauthorized(AUTHENTICATION_REQUIRED.to_string()));
    }

    Ok(next.run(req).await)
}

async fn resolve_principal<CS>(
    state: &AppState<CS>,
    headers: &HeaderMap,
) -> Result<Option<Principal>, UserError>
where
    CS: CredentialStore,
{
    let Some(token) = extract_bearer_token(headers) else {
        return Ok(None);
    };

    let claims = match state.authenticator.validate_token(token) {
        Ok(claims) => claims,
        Err(TokenError::Expired) => {
            tracing::debug!("Bearer token expired, continuing unauthenticated");
            return Ok(None);
        }
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected, continuing unauthenticated");
            return Ok(None);
        }
    };

    let user = state
        .user_service
        .find_user_by_email(claims.email())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Credential store lookup failed during authentication");
            e
        })?;

    match user {
        Some(user) => Ok(Some(Principal::from(&user))),
        None => {
            tracing::warn!(
                user_id = claims.user_id,
                "Token subject no longer exists, continuing unauthenticated"
            );
            Ok(None)
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}
