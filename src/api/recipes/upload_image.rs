use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::images::{validate_image, MAX_IMAGE_BYTES};
use crate::schema::recipes;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use utoipa::ToSchema;

use super::detail::load_detail;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/upload-image",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body(content_type = "multipart/form-data", content = UploadImageRequest),
    responses(
        (status = 200, description = "Image uploaded successfully", body = super::detail::RecipeDetail),
        (status = 400, description = "Missing or invalid image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_image(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Get the file from multipart
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No image file provided".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("Multipart read error: {}", e);
            let error_msg = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                format!("File too large. Maximum size is {} bytes", MAX_IMAGE_BYTES)
            } else {
                format!("Failed to read multipart data: {}", e.body_text())
            };
            return (e.status(), Json(ErrorResponse { error: error_msg })).into_response();
        }
    };

    // Read file data
    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            let error_msg = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                format!("File too large. Maximum size is {} bytes", MAX_IMAGE_BYTES)
            } else {
                format!("Failed to read file data: {}", e.body_text())
            };
            return (e.status(), Json(ErrorResponse { error: error_msg })).into_response();
        }
    };

    if data.len() > MAX_IMAGE_BYTES {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("File too large. Maximum size is {} bytes", MAX_IMAGE_BYTES),
            }),
        )
            .into_response();
    }

    // Validate before touching the row, so a bad payload leaves any
    // previously stored image in place
    let content_type = match validate_image(&data) {
        Ok(ct) => ct,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response()
        }
    };

    let mut conn = get_conn!(pool);

    let updated = match diesel::update(
        recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::user_id.eq(user.id)),
    )
    .set((
        recipes::image_data.eq(Some(data.to_vec())),
        recipes::image_content_type.eq(Some(content_type)),
        recipes::updated_at.eq(Utc::now()),
    ))
    .execute(&mut conn)
    {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to store image: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to store image".to_string(),
                }),
            )
                .into_response();
        }
    };

    if updated == 0 {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    match load_detail(&mut conn, user.id, id) {
        Ok(Some(detail)) => (StatusCode::OK, Json(detail)).into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to load recipe".to_string(),
            }),
        )
            .into_response(),
    }
}
