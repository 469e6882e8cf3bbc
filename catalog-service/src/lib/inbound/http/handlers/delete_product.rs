use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::auth::models::Identity;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::handlers::ApiResponseBody;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    delete,
    path = "/api/v1/product/{product_id}",
    tag = "product",
    params(("product_id" = String, Path, description = "Product id (UUID)")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Missing or invalid access token", body = ApiResponseBody<ApiErrorData>),
        (status = 403, description = "Caller neither owns the product nor is an admin", body = ApiResponseBody<ApiErrorData>),
        (status = 404, description = "No such product", body = ApiResponseBody<ApiErrorData>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let product_id = ProductId::from_string(&id).map_err(ProductError::from)?;

    state
        .product_service
        .delete_product(&identity, &product_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
