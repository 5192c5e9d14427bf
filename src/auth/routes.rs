//! Authentication routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /signup/` - Create an account
/// - `POST /login/` - Exchange credentials for an access/refresh pair
pub fn auth_routes() -> Router {
    Router::new()
        .route("/signup/", post(handlers::signup_handler))
        .route("/login/", post(handlers::login_handler))
}
