use crate::api::{parse_assigned_only, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{recipe_tags, tags};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::TagItem;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTagsParams {
    /// When 1, only tags attached to at least one recipe are returned
    pub assigned_only: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListTagsResponse {
    pub tags: Vec<TagItem>,
}

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    params(ListTagsParams),
    responses(
        (status = 200, description = "List of the user's tags, reverse name order", body = ListTagsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_tags(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListTagsParams>,
) -> impl IntoResponse {
    let assigned_only = match parse_assigned_only(params.assigned_only.as_deref()) {
        Ok(v) => v,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response()
        }
    };

    let mut query = tags::table
        .filter(tags::user_id.eq(user.id))
        .select((tags::id, tags::name))
        .distinct()
        .order(tags::name.desc())
        .into_boxed();

    if assigned_only {
        let linked = recipe_tags::table.select(recipe_tags::tag_id);
        query = query.filter(tags::id.eq_any(linked));
    }

    let mut conn = get_conn!(pool);

    let rows: Vec<(i32, String)> = match query.load(&mut conn) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch tags: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch tags".to_string(),
                }),
            )
                .into_response();
        }
    };

    let tags = rows
        .into_iter()
        .map(|(id, name)| TagItem { id, name })
        .collect();

    (StatusCode::OK, Json(ListTagsResponse { tags })).into_response()
}
