use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_product::ProductData;
use super::ApiError;
use super::ApiErrorData;
use super::ApiResponseBody;
use super::ApiSuccess;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/product/{product_id}",
    tag = "product",
    params(("product_id" = String, Path, description = "Product id (UUID)")),
    responses(
        (status = 200, description = "Product", body = ApiResponseBody<ProductData>),
        (status = 400, description = "Malformed product id", body = ApiResponseBody<ApiErrorData>),
        (status = 404, description = "No such product", body = ApiResponseBody<ApiErrorData>)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = ProductId::from_string(&product_id).map_err(ProductError::from)?;

    state
        .product_service
        .get_product(&product_id)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
