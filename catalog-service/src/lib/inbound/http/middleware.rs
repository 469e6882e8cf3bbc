use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::auth::errors::AuthError;
use crate::inbound::http::router::AppState;

/// Middleware that runs the auth gate and stores the resulting
/// [`Identity`](crate::domain::auth::models::Identity) in request extensions.
///
/// Handlers behind this layer never run on a rejected request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = authorization_header(req.headers()).map_err(reject)?;

    let identity = state
        .auth_gate
        .authenticate(header)
        .await
        .map_err(reject)?;

    tracing::debug!(
        user_id = %identity.user_id,
        role = %identity.role,
        "Request authenticated"
    );

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Raw `Authorization` value, `None` when the header is absent.
///
/// A header that is present but not visible ASCII cannot carry a bearer
/// token and is rejected as malformed.
fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedCredential))
        .transpose()
}

fn reject(err: AuthError) -> Response {
    match &err {
        AuthError::MalformedSubject(_) => {
            tracing::error!(error = %err, "Token subject could not be parsed")
        }
        _ => tracing::warn!(error = %err, "Authentication rejected"),
    }
    ApiError::from(err).into_response()
}
