use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::assoc::{replace_ingredients, replace_tags, IngredientInput, TagInput};
use super::create::validate_nested_names;
use super::detail::load_detail;

/// All fields optional: absent fields are left unchanged. When `tags` or
/// `ingredients` is present the existing associations are cleared and the
/// submitted list re-attached.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub time_minutes: Option<i32>,
    #[schema(value_type = String, example = "5.50")]
    pub price: Option<BigDecimal>,
    pub link: Option<String>,
    pub tags: Option<Vec<TagInput>>,
    pub ingredients: Option<Vec<IngredientInput>>,
}

#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
struct RecipeChanges<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    time_minutes: Option<i32>,
    price: Option<BigDecimal>,
    link: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = super::detail::RecipeDetail),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    if let Some(ref title) = request.title {
        if title.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Title cannot be empty".to_string(),
                }),
            )
                .into_response();
        }
    }

    if let Err(e) = validate_nested_names(request.tags.as_deref(), request.ingredients.as_deref())
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    // Owner-scoped existence check; another user's recipe is a 404
    let exists: Option<i32> = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(user.id))
        .select(recipes::id)
        .first(&mut conn)
        .optional()
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    if exists.is_none() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    let result: Result<(), diesel::result::Error> = conn.transaction(|conn| {
        let changes = RecipeChanges {
            title: request.title.as_deref(),
            description: request.description.as_deref(),
            time_minutes: request.time_minutes,
            price: request.price.clone(),
            link: request.link.as_deref(),
            updated_at: Utc::now(),
        };

        diesel::update(recipes::table.find(id))
            .set(&changes)
            .execute(conn)?;

        if let Some(ref tags) = request.tags {
            replace_tags(conn, user.id, id, tags)?;
        }
        if let Some(ref ingredients) = request.ingredients {
            replace_ingredients(conn, user.id, id, ingredients)?;
        }

        Ok(())
    });

    if let Err(e) = result {
        tracing::error!("Failed to update recipe: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to update recipe".to_string(),
            }),
        )
            .into_response();
    }

    match load_detail(&mut conn, user.id, id) {
        Ok(Some(detail)) => (StatusCode::OK, Json(detail)).into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to load updated recipe".to_string(),
            }),
        )
            .into_response(),
    }
}
