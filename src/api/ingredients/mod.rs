pub mod delete;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Wire representation of an ingredient
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientItem {
    pub id: i32,
    pub name: String,
}

/// Returns the router for ingredient endpoints (mounted at /api/ingredients).
/// As with tags, ingredients are only created through recipe nested writes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_ingredients))
        .route(
            "/{id}",
            axum::routing::put(update::update_ingredient)
                .patch(update::update_ingredient)
                .delete(delete::delete_ingredient),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_ingredients,
        update::update_ingredient,
        delete::delete_ingredient
    ),
    components(schemas(
        IngredientItem,
        list::ListIngredientsResponse,
        update::UpdateIngredientRequest
    ))
)]
pub struct ApiDoc;
