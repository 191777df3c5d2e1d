use crate::api::{parse_assigned_only, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{ingredients, recipe_ingredients};
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

use super::IngredientItem;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListIngredientsParams {
    /// When 1, only ingredients attached to at least one recipe are returned
    pub assigned_only: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<IngredientItem>,
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(ListIngredientsParams),
    responses(
        (status = 200, description = "List of the user's ingredients, reverse name order", body = ListIngredientsResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_ingredients(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListIngredientsParams>,
) -> impl IntoResponse {
    let assigned_only = match parse_assigned_only(params.assigned_only.as_deref()) {
        Ok(v) => v,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response()
        }
    };

    let mut query = ingredients::table
        .filter(ingredients::user_id.eq(user.id))
        .select((ingredients::id, ingredients::name))
        .distinct()
        .order(ingredients::name.desc())
        .into_boxed();

    if assigned_only {
        let linked = recipe_ingredients::table.select(recipe_ingredients::ingredient_id);
        query = query.filter(ingredients::id.eq_any(linked));
    }

    let mut conn = get_conn!(pool);

    let rows: Vec<(i32, String)> = match query.load(&mut conn) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch ingredients: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch ingredients".to_string(),
                }),
            )
                .into_response();
        }
    };

    let ingredients = rows
        .into_iter()
        .map(|(id, name)| IngredientItem { id, name })
        .collect();

    (StatusCode::OK, Json(ListIngredientsResponse { ingredients })).into_response()
}
