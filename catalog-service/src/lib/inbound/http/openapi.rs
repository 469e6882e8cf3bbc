//! OpenAPI description of the HTTP API.
//!
//! Schemas come from `#[derive(ToSchema)]` on request and response types,
//! paths from `#[utoipa::path]` on each handler. The document is served as
//! JSON at [`OPENAPI_JSON_PATH`].

use axum::Json;
use utoipa::openapi::security::HttpAuthScheme;
use utoipa::openapi::security::HttpBuilder;
use utoipa::openapi::security::SecurityScheme;
use utoipa::Modify;
use utoipa::OpenApi;

use super::handlers::create_product::ProductData;
use super::handlers::create_product::ProductRequest;
use super::handlers::create_user::CreateUserRequest;
use super::handlers::create_user::UserData;
use super::handlers::login::LoginRequestBody;
use super::handlers::login::LoginResponseData;
use super::handlers::refresh::RefreshResponseData;
use super::handlers::refresh::RefreshTokenRequestBody;
use super::handlers::ApiErrorData;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Name of the security scheme protected routes refer to.
pub const BEARER_AUTH: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Service API",
        description = r#"
Users register and log in, then post, edit and delete the products they own.
Administrators may edit or delete any product.

## Authentication

Write endpoints require an access token: `Authorization: Bearer <token>`.
Tokens come from `POST /api/v1/login` and are renewed with
`POST /api/v1/refresh`.
"#
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "user", description = "Registration and credentials"),
        (name = "product", description = "Product catalog")
    ),
    components(schemas(
        ApiErrorData,
        CreateUserRequest,
        UserData,
        LoginRequestBody,
        LoginResponseData,
        RefreshTokenRequestBody,
        RefreshResponseData,
        ProductRequest,
        ProductData,
    )),
    paths(
        crate::inbound::http::router::health,
        crate::inbound::http::handlers::create_user::create_user,
        crate::inbound::http::handlers::login::login,
        crate::inbound::http::handlers::refresh::refresh,
        crate::inbound::http::handlers::revoke::revoke,
        crate::inbound::http::handlers::list_products::list_products,
        crate::inbound::http::handlers::get_product::get_product,
        crate::inbound::http::handlers::create_product::create_product,
        crate::inbound::http::handlers::update_product::update_product,
        crate::inbound::http::handlers::delete_product::delete_product,
    ),
    modifiers(&BearerSecurity)
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_AUTH,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
