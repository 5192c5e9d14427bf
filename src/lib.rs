// src/lib.rs
//! NeuroDetect accounts API: signup, JWT login and test-account seeding

use axum::{extract::Extension, http::HeaderValue, middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod common;
pub mod logging_middleware;
pub mod seed;
pub mod services;

use common::SharedState;

/// Full application router with shared state and middleware layers
///
/// Auth routes are served both at the root and under `/api`, where the
/// dashboard frontend posts.
pub fn build_app(shared: SharedState, cors_origins: &[String]) -> Router {
    Router::new()
        // ====================================================================
        // AUTHENTICATION ROUTES
        // ====================================================================
        .merge(auth::auth_routes())
        .nest("/api", auth::auth_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([axum::http::Method::POST, axum::http::Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
}
