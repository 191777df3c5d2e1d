use crate::api::ingredients::IngredientItem;
use crate::api::tags::TagItem;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{recipe_ingredients, recipe_tags, recipes};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Comma-separated tag IDs; keeps recipes linked to at least one of them
    pub tags: Option<String>,
    /// Comma-separated ingredient IDs; keeps recipes linked to at least one of them
    pub ingredients: Option<String>,
}

fn parse_id_list(raw: &str) -> Result<Vec<i32>, String> {
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i32>()
                .map_err(|_| format!("Invalid ID in list: {:?}", part))
        })
        .collect()
}

/// Reduced representation used by the list endpoint: no description, no
/// image. The detail endpoint returns the full set.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i32,
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.50")]
    pub price: BigDecimal,
    pub link: Option<String>,
    pub tags: Vec<TagItem>,
    pub ingredients: Vec<IngredientItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = recipes)]
struct SummaryRow {
    id: i32,
    title: String,
    time_minutes: i32,
    price: BigDecimal,
    link: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "List of the user's recipes, newest first", body = ListRecipesResponse),
        (status = 400, description = "Invalid filter parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let mut query = recipes::table
        .filter(recipes::user_id.eq(user.id))
        .select(SummaryRow::as_select())
        .distinct()
        .order(recipes::id.desc())
        .into_boxed();

    if let Some(ref raw) = params.tags {
        let tag_ids = match parse_id_list(raw) {
            Ok(ids) => ids,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e }))
                    .into_response()
            }
        };
        let linked = recipe_tags::table
            .filter(recipe_tags::tag_id.eq_any(tag_ids))
            .select(recipe_tags::recipe_id);
        query = query.filter(recipes::id.eq_any(linked));
    }

    if let Some(ref raw) = params.ingredients {
        let ingredient_ids = match parse_id_list(raw) {
            Ok(ids) => ids,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e }))
                    .into_response()
            }
        };
        let linked = recipe_ingredients::table
            .filter(recipe_ingredients::ingredient_id.eq_any(ingredient_ids))
            .select(recipe_ingredients::recipe_id);
        query = query.filter(recipes::id.eq_any(linked));
    }

    let mut conn = get_conn!(pool);

    let rows: Vec<SummaryRow> = match query.load(&mut conn) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

    let (mut tags_by_recipe, mut ingredients_by_recipe) = match (
        super::assoc::tags_for_recipes(&mut conn, &ids),
        super::assoc::ingredients_for_recipes(&mut conn, &ids),
    ) {
        (Ok(t), Ok(i)) => (t, i),
        _ => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response()
        }
    };

    let recipes = rows
        .into_iter()
        .map(|row| RecipeSummary {
            tags: tags_by_recipe.remove(&row.id).unwrap_or_default(),
            ingredients: ingredients_by_recipe.remove(&row.id).unwrap_or_default(),
            id: row.id,
            title: row.title,
            time_minutes: row.time_minutes,
            price: row.price,
            link: row.link,
        })
        .collect();

    (StatusCode::OK, Json(ListRecipesResponse { recipes })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_id() {
        assert_eq!(parse_id_list("7"), Ok(vec![7]));
    }

    #[test]
    fn test_parse_multiple_ids() {
        assert_eq!(parse_id_list("1,2,3"), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_parse_ids_with_spaces() {
        assert_eq!(parse_id_list(" 1 , 2 "), Ok(vec![1, 2]));
    }

    #[test]
    fn test_parse_empty_rejected() {
        assert!(parse_id_list("").is_err());
    }

    #[test]
    fn test_parse_trailing_comma_rejected() {
        assert!(parse_id_list("1,2,").is_err());
    }

    #[test]
    fn test_parse_non_numeric_rejected() {
        assert!(parse_id_list("1,dinner").is_err());
    }
}
