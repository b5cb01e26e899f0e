use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authentication::login;
use super::handlers::authentication::register;
use super::handlers::datasets::csv_to_json;
use super::handlers::health::health;
use super::handlers::health::root;
use super::handlers::products::create_product;
use super::handlers::products::delete_product;
use super::handlers::products::get_product;
use super::handlers::products::list_products;
use super::handlers::products::update_product;
use super::handlers::users::delete_user;
use super::handlers::users::get_current_user;
use super::handlers::users::get_user;
use super::handlers::users::list_users;
use super::handlers::users::update_user;
use super::handlers::weather::get_weather;
use super::handlers::ApiError;
use super::middleware::authenticate as auth_middleware;
use super::middleware::envelope_framework_errors;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::domain::weather::ports::WeatherProvider;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub weather_provider: Arc<dyn WeatherProvider>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/products", get(list_products))
        .route("/api/products/:product_id", get(get_product))
        .route("/api/weather", get(get_weather))
        .route("/api/datasets/csv-to-json", post(csv_to_json));

    let protected_routes = Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/me", get(get_current_user))
        .route(
            "/api/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/api/products", post(create_product))
        .route(
            "/api/products/:product_id",
            patch(update_product).delete(delete_product),
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
        .fallback(|| async { ApiError::not_found() })
        .layer(middleware::from_fn(envelope_framework_errors))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
