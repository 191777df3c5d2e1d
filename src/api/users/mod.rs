pub mod me;

use crate::models::User;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Public representation of a user account. The password hash never leaves
/// the database layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Returns the router for the authenticated user's own profile
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/users/me",
        get(me::get_me).put(me::update_me).patch(me::update_me),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(me::get_me, me::update_me),
    components(schemas(UserResponse, me::UpdateMeRequest))
)]
pub struct ApiDoc;
