pub mod create_user;
pub mod health;
pub mod token;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for public endpoints (no auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/users", post(create_user::create_user))
        .route("/api/token", post(token::create_token))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create_user::create_user,
        token::create_token,
        health::health,
    ),
    components(schemas(
        create_user::CreateUserRequest,
        token::TokenRequest,
        token::TokenResponse,
        health::HealthResponse,
    ))
)]
pub struct ApiDoc;
