use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::recipes;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

fn image_response(content_type: &str, data: Vec<u8>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(data))
        .unwrap()
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/image",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Stored image bytes", content_type = "image/*"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found or has no image", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_image(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let row: Option<(Option<Vec<u8>>, Option<String>)> = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(user.id))
        .select((recipes::image_data, recipes::image_content_type))
        .first(&mut conn)
        .optional()
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch image: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch image".to_string(),
                }),
            )
                .into_response();
        }
    };

    match row {
        Some((Some(data), Some(content_type))) => image_response(&content_type, data),
        Some(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe has no image".to_string(),
            }),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response(),
    }
}
