use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiErrorData;
use super::ApiResponseBody;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a refresh token for a new access token.
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    tag = "user",
    request_body = RefreshTokenRequestBody,
    responses(
        (status = 200, description = "New access token", body = ApiResponseBody<RefreshResponseData>),
        (status = 401, description = "Refresh token unknown, expired or revoked", body = ApiResponseBody<ApiErrorData>)
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequestBody>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    state
        .user_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, RefreshResponseData { token }))
}

/// Body shared by the refresh and revoke endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct RefreshTokenRequestBody {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RefreshResponseData {
    pub token: String,
}
