use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use super::create_user::UserData;
use super::ApiError;
use super::ApiErrorData;
use super::ApiResponseBody;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "user",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Access and refresh token issued", body = ApiResponseBody<LoginResponseData>),
        (status = 401, description = "Invalid credentials", body = ApiResponseBody<ApiErrorData>)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A malformed email cannot belong to anyone; answer like a wrong password.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let outcome = state
        .user_service
        .login(&email, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&outcome.user).into(),
            token: outcome.access_token,
            refresh_token: outcome.refresh_token,
            refresh_token_expires_at: outcome.refresh_token_expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LoginResponseData {
    pub user: UserData,
    pub token: String,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
}
