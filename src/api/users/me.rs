use crate::api::users::UserResponse;
use crate::api::ErrorResponse;
use crate::auth::{hash_password, AuthUser, MIN_PASSWORD_LEN};
use crate::db::DbPool;
use crate::email::normalize_email;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateMeRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    /// New password; re-hashed before storage, never returned.
    pub password: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct UserChanges<'a> {
    email: Option<&'a str>,
    name: Option<&'a str>,
    password_hash: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "The authenticated user's profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(AuthUser(user): AuthUser) -> impl IntoResponse {
    (StatusCode::OK, Json(UserResponse::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "users",
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_me(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<UpdateMeRequest>,
) -> impl IntoResponse {
    let email = match request.email {
        Some(ref raw) => match normalize_email(raw) {
            Some(e) => Some(e),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Enter a valid email address".to_string(),
                    }),
                )
                    .into_response()
            }
        },
        None => None,
    };

    if let Some(ref name) = request.name {
        if name.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Name cannot be empty".to_string(),
                }),
            )
                .into_response();
        }
    }

    let password_hash = match request.password {
        Some(ref password) => {
            if password.len() < MIN_PASSWORD_LEN {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!(
                            "Password must be at least {} characters",
                            MIN_PASSWORD_LEN
                        ),
                    }),
                )
                    .into_response();
            }
            match hash_password(password) {
                Ok(h) => Some(h),
                Err(_) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse {
                            error: "Failed to hash password".to_string(),
                        }),
                    )
                        .into_response()
                }
            }
        }
        None => None,
    };

    let mut conn = get_conn!(pool);

    let changes = UserChanges {
        email: email.as_deref(),
        name: request.name.as_deref(),
        password_hash: password_hash.as_deref(),
        updated_at: Utc::now(),
    };

    let updated: User = match diesel::update(users::table.find(user.id))
        .set(&changes)
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
            tracing::error!("Failed to update profile: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update profile".to_string(),
                }),
            )
                .into_response();
        }
    };

    (StatusCode::OK, Json(UserResponse::from(updated))).into_response()
}
