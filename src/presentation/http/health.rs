use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub app: &'static str,
    pub status: &'static str,
}

#[derive(Clone)]
pub struct HealthState {
    pub pool: PgPool,
    pub app: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(state): State<HealthState>) -> Json<HealthResp> {
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();
    let status = if db_ok { "ok" } else { "degraded" };
    Json(HealthResp {
        app: state.app,
        status,
    })
}

pub fn routes(pool: PgPool, app: &'static str) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(HealthState { pool, app })
}
