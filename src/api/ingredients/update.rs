use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::ingredients;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::IngredientItem;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateIngredientRequest {
    pub name: String,
}

#[utoipa::path(
    put,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    request_body = UpdateIngredientRequest,
    responses(
        (status = 200, description = "Ingredient renamed successfully", body = IngredientItem),
        (status = 400, description = "Invalid request (empty name)", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 409, description = "Ingredient with that name already exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_ingredient(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateIngredientRequest>,
) -> impl IntoResponse {
    let new_name = request.name.trim();

    if new_name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Ingredient name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let result: Result<(i32, String), _> = diesel::update(
        ingredients::table
            .filter(ingredients::id.eq(id))
            .filter(ingredients::user_id.eq(user.id)),
    )
    .set((
        ingredients::name.eq(new_name),
        ingredients::updated_at.eq(Utc::now()),
    ))
    .returning((ingredients::id, ingredients::name))
    .get_result(&mut conn);

    match result {
        Ok((id, name)) => (StatusCode::OK, Json(IngredientItem { id, name })).into_response(),
        Err(diesel::result::Error::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Ingredient not found".to_string(),
            }),
        )
            .into_response(),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Ingredient with that name already exists".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to rename ingredient: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to rename ingredient".to_string(),
                }),
            )
                .into_response()
        }
    }
}
