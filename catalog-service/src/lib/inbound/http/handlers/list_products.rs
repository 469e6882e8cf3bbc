use axum::extract::State;
use axum::http::StatusCode;

use super::create_product::ProductData;
use super::ApiError;
use super::ApiResponseBody;
use super::ApiSuccess;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/product",
    tag = "product",
    responses(
        (status = 200, description = "All products, newest first", body = ApiResponseBody<Vec<ProductData>>)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProductData>>, ApiError> {
    state
        .product_service
        .list_products()
        .await
        .map_err(ApiError::from)
        .map(|products| {
            ApiSuccess::new(
                StatusCode::OK,
                products.iter().map(ProductData::from).collect(),
            )
        })
}
