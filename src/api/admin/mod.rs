pub mod recipes;
pub mod users;

use crate::AppState;
use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the staff-only admin endpoints (mounted at
/// /api/admin). Every handler authorizes through the `StaffUser` extractor.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/recipes", get(recipes::list_recipes))
        .route("/recipes/{id}", delete(recipes::delete_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        recipes::list_recipes,
        recipes::delete_recipe,
    ),
    components(schemas(
        users::AdminUserItem,
        users::ListUsersResponse,
        users::AdminUpdateUserRequest,
        recipes::AdminRecipeItem,
        recipes::ListAdminRecipesResponse,
    ))
)]
pub struct ApiDoc;
