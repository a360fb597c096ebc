use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::db::SqlitePool;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    security(()),
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<SqlitePool>) -> Json<HealthResp> {
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .is_ok();
    let status = if db_ok { "ok" } else { "degraded" };
    Json(HealthResp {
        status,
        timestamp: Utc::now(),
    })
}

pub fn routes(pool: SqlitePool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
