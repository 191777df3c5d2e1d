use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewRecipe;
use crate::schema::recipes;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::assoc::{attach_ingredients, attach_tags, IngredientInput, TagInput};
use super::detail::load_detail;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.50")]
    pub price: BigDecimal,
    pub link: Option<String>,
    pub tags: Option<Vec<TagInput>>,
    pub ingredients: Option<Vec<IngredientInput>>,
}

pub(super) fn validate_nested_names(
    tags: Option<&[TagInput]>,
    ingredients: Option<&[IngredientInput]>,
) -> Result<(), &'static str> {
    if let Some(tags) = tags {
        if tags.iter().any(|t| t.name.trim().is_empty()) {
            return Err("Tag name cannot be empty");
        }
    }
    if let Some(ingredients) = ingredients {
        if ingredients.iter().any(|i| i.name.trim().is_empty()) {
            return Err("Ingredient name cannot be empty");
        }
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = super::detail::RecipeDetail),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if request.title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Title cannot be empty".to_string(),
            }),
        )
            .into_response();
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

    let result: Result<i32, diesel::result::Error> = conn.transaction(|conn| {
        let recipe_id: i32 = diesel::insert_into(recipes::table)
            .values(&NewRecipe {
                user_id: user.id,
                title: request.title.trim(),
                description: request.description.as_deref(),
                time_minutes: request.time_minutes,
                price: request.price.clone(),
                link: request.link.as_deref(),
            })
            .returning(recipes::id)
            .get_result(conn)?;

        if let Some(ref tags) = request.tags {
            attach_tags(conn, user.id, recipe_id, tags)?;
        }
        if let Some(ref ingredients) = request.ingredients {
            attach_ingredients(conn, user.id, recipe_id, ingredients)?;
        }

        Ok(recipe_id)
    });

    let recipe_id = match result {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    match load_detail(&mut conn, user.id, recipe_id) {
        Ok(Some(detail)) => (StatusCode::CREATED, Json(detail)).into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to load created recipe".to_string(),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<TagInput> {
        names
            .iter()
            .map(|n| TagInput {
                name: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_nested_names_accepted() {
        let t = tags(&["Dinner", "Quick"]);
        assert!(validate_nested_names(Some(&t), None).is_ok());
    }

    #[test]
    fn test_empty_tag_name_rejected() {
        let t = tags(&["Dinner", "  "]);
        assert_eq!(
            validate_nested_names(Some(&t), None),
            Err("Tag name cannot be empty")
        );
    }

    #[test]
    fn test_empty_ingredient_name_rejected() {
        let i = vec![IngredientInput {
            name: String::new(),
        }];
        assert_eq!(
            validate_nested_names(None, Some(&i)),
            Err("Ingredient name cannot be empty")
        );
    }

    #[test]
    fn test_absent_lists_accepted() {
        assert!(validate_nested_names(None, None).is_ok());
    }
}
