pub mod delete;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Wire representation of a tag
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagItem {
    pub id: i32,
    pub name: String,
}

/// Returns the router for tag endpoints (mounted at /api/tags).
/// There is no create endpoint: tags come into existence through recipe
/// nested writes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_tags))
        .route(
            "/{id}",
            axum::routing::put(update::update_tag)
                .patch(update::update_tag)
                .delete(delete::delete_tag),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_tags, update::update_tag, delete::delete_tag),
    components(schemas(TagItem, list::ListTagsResponse, update::UpdateTagRequest))
)]
pub struct ApiDoc;
