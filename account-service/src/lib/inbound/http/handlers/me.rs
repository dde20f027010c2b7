use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::Principal;

pub async fn me(Extension(principal): Extension<Principal>) -> ApiSuccess<PrincipalData> {
    ApiSuccess::new(StatusCode::OK, (&principal).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalData {
    pub id: i64,
    pub email: String,
}

impl From<&Principal> for PrincipalData {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.user_id.value(),
            email: principal.email.as_str().to_string(),
        }
    }
}
