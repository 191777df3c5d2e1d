use crate::api::ErrorResponse;
use crate::auth::{hash_password, StaffUser, MIN_PASSWORD_LEN};
use crate::db::DbPool;
use crate::email::normalize_email;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Operator view of an account, including the permission flags
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminUserItem {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl From<User> for AdminUserItem {
    fn from(user: User) -> Self {
        AdminUserItem {
            id: user.id,
            email: user.email,
            name: user.name,
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub users: Vec<AdminUserItem>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdminUpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    /// Reset the account password
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct AdminUserChanges<'a> {
    email: Option<&'a str>,
    name: Option<&'a str>,
    password_hash: Option<&'a str>,
    is_active: Option<bool>,
    is_staff: Option<bool>,
    is_superuser: Option<bool>,
    updated_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "All user accounts, id order", body = ListUsersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Staff access required", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    StaffUser(_staff): StaffUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<User> = match users::table
        .select(User::as_select())
        .order(users::id.asc())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch users: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch users".to_string(),
                }),
            )
                .into_response();
        }
    };

    let users = rows.into_iter().map(AdminUserItem::from).collect();

    (StatusCode::OK, Json(ListUsersResponse { users })).into_response()
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User account", body = AdminUserItem),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Staff access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_user(
    StaffUser(_staff): StaffUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match users::table
        .find(id)
        .select(User::as_select())
        .first(&mut conn)
        .optional()
    {
        Ok(Some(user)) => (StatusCode::OK, Json(AdminUserItem::from(user))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "User not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch user".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = AdminUpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = AdminUserItem),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Staff access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user(
    StaffUser(_staff): StaffUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(request): Json<AdminUpdateUserRequest>,
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

    let changes = AdminUserChanges {
        email: email.as_deref(),
        name: request.name.as_deref(),
        password_hash: password_hash.as_deref(),
        is_active: request.is_active,
        is_staff: request.is_staff,
        is_superuser: request.is_superuser,
        updated_at: Utc::now(),
    };

    match diesel::update(users::table.find(id))
        .set(&changes)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(user) => (StatusCode::OK, Json(AdminUserItem::from(user))).into_response(),
        Err(diesel::result::Error::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "User not found".to_string(),
            }),
        )
            .into_response(),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "A user with that email already exists".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update user".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted; owned recipes, tags and ingredients cascade"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Staff access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_user(
    StaffUser(_staff): StaffUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let deleted = match diesel::delete(users::table.find(id)).execute(&mut conn) {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to delete user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete user".to_string(),
                }),
            )
                .into_response();
        }
    };

    if deleted == 0 {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "User not found".to_string(),
            }),
        )
            .into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}
