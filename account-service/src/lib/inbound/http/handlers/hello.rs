use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::Principal;

pub async fn hello(principal: Option<Extension<Principal>>) -> ApiSuccess<HelloResponseData> {
    let data = match principal {
        Some(Extension(principal)) => HelloResponseData {
            message: format!("Hello, {}", principal.email),
            authenticated: true,
        },
        None => HelloResponseData {
            message: "Hello, guest".to_string(),
            authenticated: false,
        },
    };

    ApiSuccess::new(StatusCode::OK, data)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelloResponseData {
    pub message: String,
    pub authenticated: bool,
}
