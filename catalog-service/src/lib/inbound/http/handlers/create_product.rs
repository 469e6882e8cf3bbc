use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiErrorData;
use super::ApiResponseBody;
use super::ApiSuccess;
use crate::domain::auth::models::Identity;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/product",
    tag = "product",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created, owned by the caller", body = ApiResponseBody<ProductData>),
        (status = 401, description = "Missing or invalid access token", body = ApiResponseBody<ApiErrorData>),
        (status = 422, description = "Invalid name or price", body = ApiResponseBody<ApiErrorData>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<ProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let (name, price) = body.try_into_parts()?;

    state
        .product_service
        .create_product(&identity, CreateProductCommand { name, price })
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

/// HTTP request body for creating or replacing a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct ProductRequest {
    name: String,
    #[schema(value_type = String, example = "19.99")]
    price: Decimal,
}

impl ProductRequest {
    pub(super) fn try_into_parts(self) -> Result<(ProductName, Price), ProductError> {
        Ok((ProductName::new(self.name)?, Price::new(self.price)?))
    }

    /// Replacement values, checked by the service after authorization.
    pub(super) fn into_update_command(self) -> UpdateProductCommand {
        UpdateProductCommand {
            name: self.name,
            price: self.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductData {
    pub id: String,
    pub name: String,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub posted_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.as_str().to_string(),
            price: product.price.amount(),
            posted_by: product.posted_by.to_string(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
