use crate::api::ErrorResponse;
use crate::auth::StaffUser;
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
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Operator view of a recipe, including its owner
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminRecipeItem {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.50")]
    pub price: BigDecimal,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListAdminRecipesResponse {
    pub recipes: Vec<AdminRecipeItem>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = recipes)]
struct AdminRecipeRow {
    id: i32,
    user_id: i32,
    title: String,
    time_minutes: i32,
    price: BigDecimal,
    link: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/admin/recipes",
    tag = "admin",
    responses(
        (status = 200, description = "All recipes across users, id order", body = ListAdminRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Staff access required", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    StaffUser(_staff): StaffUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<AdminRecipeRow> = match recipes::table
        .select(AdminRecipeRow::as_select())
        .order(recipes::id.asc())
        .load(&mut conn)
    {
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

    let recipes = rows
        .into_iter()
        .map(|row| AdminRecipeItem {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            time_minutes: row.time_minutes,
            price: row.price,
            link: row.link,
        })
        .collect();

    (StatusCode::OK, Json(ListAdminRecipesResponse { recipes })).into_response()
}

#[utoipa::path(
    delete,
    path = "/api/admin/recipes/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Staff access required", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    StaffUser(_staff): StaffUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let deleted = match diesel::delete(recipes::table.find(id)).execute(&mut conn) {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to delete recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    if deleted == 0 {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}
