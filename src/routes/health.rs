use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime: u64,
    database: bool,
    llm: bool,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime: state.uptime_seconds(),
        database: state.database().is_some(),
        llm: state.llm().is_available(),
    })
}
