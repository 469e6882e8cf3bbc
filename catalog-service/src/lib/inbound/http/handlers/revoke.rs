use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::refresh::RefreshTokenRequestBody;
use super::ApiError;
use super::ApiErrorData;
use super::ApiResponseBody;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/revoke",
    tag = "user",
    request_body = RefreshTokenRequestBody,
    responses(
        (status = 204, description = "Refresh token revoked, or already revoked"),
        (status = 401, description = "Refresh token unknown", body = ApiResponseBody<ApiErrorData>)
    )
)]
pub async fn revoke(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequestBody>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .user_service
        .logout(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
