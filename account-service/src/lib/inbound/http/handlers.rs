use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::validation::FieldErrors;
use crate::domain::user::validation::EMAIL_FIELD;
use crate::domain::user::validation::EMAIL_IN_USE;
use crate::domain::user::validation::NICKNAME_FIELD;
use crate::domain::user::validation::NICKNAME_IN_USE;
use crate::user::errors::UserError;

pub mod hello;
pub mod login;
pub mod logout;
pub mod me;
pub mod signup;

pub const VALIDATION_FAILED: &str = "입력값에 오류가 있습니다.";
pub const LOGIN_FAILED: &str = "이메일 또는 비밀번호가 올바르지 않습니다.";
pub const AUTHENTICATION_REQUIRED: &str = "인증이 필요합니다.";
pub const INTERNAL_ERROR: &str = "요청 처리 중 오류가 발생했습니다.";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Validation(FieldErrors),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponseBody::new_error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        INTERNAL_ERROR.to_string(),
                    ),
                )
            }
            ApiError::Validation(field_errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponseBody::new_field_errors(StatusCode::BAD_REQUEST, field_errors),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiResponseBody::new_error(StatusCode::BAD_REQUEST, msg),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ApiResponseBody::new_error(StatusCode::NOT_FOUND, msg),
            ),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ApiResponseBody::new_error(StatusCode::UNAUTHORIZED, msg),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(field_errors) => ApiError::Validation(field_errors),
            UserError::EmailAlreadyExists(_) => {
                ApiError::Validation(single_field(EMAIL_FIELD, EMAIL_IN_USE))
            }
            UserError::NicknameAlreadyExists(_) => {
                ApiError::Validation(single_field(NICKNAME_FIELD, NICKNAME_IN_USE))
            }
            UserError::NotFoundByEmail(_) => ApiError::NotFound(err.to_string()),
            UserError::InvalidEmail(_) | UserError::InvalidNickname(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::Password(_) | UserError::StoreUnavailable(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

fn single_field(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), message.to_string());
    errors
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                message,
                field_errors: None,
            },
        }
    }

    pub fn new_field_errors(status_code: StatusCode, field_errors: FieldErrors) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                message: VALIDATION_FAILED.to_string(),
                field_errors: Some(field_errors),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

/// Body for endpoints that only acknowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}
