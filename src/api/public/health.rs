use crate::db::DbPool;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database are reachable", body = HealthResponse),
        (status = 503, description = "Database unavailable", body = HealthResponse)
    )
)]
pub async fn health(State(pool): State<Arc<DbPool>>) -> impl IntoResponse {
    let db_ok = pool
        .get()
        .ok()
        .map(|mut conn| diesel::sql_query("SELECT 1").execute(&mut conn).is_ok())
        .unwrap_or(false);

    if db_ok {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable".to_string(),
            }),
        )
    }
}
