use axum::http::StatusCode;

use super::ApiSuccess;
use super::MessageData;

pub const LOGOUT_COMPLETED: &str = "로그아웃이 완료되었습니다.";

/// Acknowledge a logout.
///
/// Tokens are self-contained and there is no revocation list, so nothing is
/// invalidated server-side; the client discards its token.
pub async fn logout() -> ApiSuccess<MessageData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: LOGOUT_COMPLETED.to_string(),
        },
    )
}
