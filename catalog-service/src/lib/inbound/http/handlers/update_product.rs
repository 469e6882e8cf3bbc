use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::create_product::ProductData;
use super::create_product::ProductRequest;
use super::ApiError;
use super::ApiErrorData;
use super::ApiResponseBody;
use super::ApiSuccess;
use crate::domain::auth::models::Identity;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    put,
    path = "/api/v1/product/{product_id}",
    tag = "product",
    params(("product_id" = String, Path, description = "Product id (UUID)")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product replaced", body = ApiResponseBody<ProductData>),
        (status = 401, description = "Missing or invalid access token", body = ApiResponseBody<ApiErrorData>),
        (status = 403, description = "Caller neither owns the product nor is an admin", body = ApiResponseBody<ApiErrorData>),
        (status = 404, description = "No such product", body = ApiResponseBody<ApiErrorData>),
        (status = 422, description = "Invalid name or price", body = ApiResponseBody<ApiErrorData>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<ProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = ProductId::from_string(&id).map_err(ProductError::from)?;

    state
        .product_service
        .update_product(&identity, &product_id, body.into_update_command())
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
