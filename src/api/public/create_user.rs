use crate::api::users::UserResponse;
use crate::api::ErrorResponse;
use crate::auth::{hash_password, MIN_PASSWORD_LEN};
use crate::db::DbPool;
use crate::email::normalize_email;
use crate::get_conn;
use crate::models::{NewUser, User};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body(content = CreateUserRequest, example = json!({
        "email": "user@example.com",
        "password": "secret",
        "name": "Example User"
    })),
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateUserRequest>,
) -> impl IntoResponse {
    let email = match normalize_email(&request.email) {
        Some(e) => e,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Enter a valid email address".to_string(),
                }),
            )
                .into_response()
        }
    };

    if request.password.len() < MIN_PASSWORD_LEN {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            }),
        )
            .into_response();
    }

    if request.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let password_hash = match hash_password(&request.password) {
        Ok(h) => h,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to hash password".to_string(),
                }),
            )
                .into_response()
        }
    };

    let mut conn = get_conn!(pool);

    let new_user = NewUser {
        email: &email,
        name: request.name.trim(),
        password_hash: &password_hash,
    };

    let user: User = match diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: "A user with that email already exists".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create user".to_string(),
                }),
            )
                .into_response();
        }
    };

    (StatusCode::CREATED, Json(UserResponse::from(user))).into_response()
}
