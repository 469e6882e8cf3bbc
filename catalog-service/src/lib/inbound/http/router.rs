use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_product::create_product;
use super::handlers::create_user::create_user;
use super::handlers::delete_product::delete_product;
use super::handlers::get_product::get_product;
use super::handlers::list_products::list_products;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::revoke::revoke;
use super::handlers::update_product::update_product;
use super::middleware::authenticate as auth_middleware;
use super::openapi::openapi_json;
use super::openapi::OPENAPI_JSON_PATH;
use crate::domain::auth::gate::AuthGate;
use crate::domain::product::service::ProductService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::PostgresProductRepository;
use crate::outbound::repositories::PostgresRefreshTokenRepository;
use crate::outbound::repositories::PostgresUserRepository;

pub type CatalogUserService = UserService<PostgresUserRepository, PostgresRefreshTokenRepository>;
pub type CatalogProductService = ProductService<PostgresProductRepository>;
pub type CatalogAuthGate = AuthGate<PostgresUserRepository>;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<CatalogUserService>,
    pub product_service: Arc<CatalogProductService>,
    pub auth_gate: Arc<CatalogAuthGate>,
}

pub fn create_router(
    user_service: Arc<CatalogUserService>,
    product_service: Arc<CatalogProductService>,
    auth_gate: Arc<CatalogAuthGate>,
) -> Router {
    let state = AppState {
        user_service,
        product_service,
        auth_gate,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route(OPENAPI_JSON_PATH, get(openapi_json))
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/login", post(login))
        .route("/api/v1/refresh", post(refresh))
        .route("/api/v1/revoke", post(revoke))
        .route("/api/v1/product", get(list_products))
        .route("/api/v1/product/:product_id", get(get_product));

    let protected_routes = Router::new()
        .route("/api/v1/product", post(create_product))
        .route(
            "/api/v1/product/:product_id",
            put(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> StatusCode {
    StatusCode::OK
}
