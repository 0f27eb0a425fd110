#![allow(dead_code)]

pub mod client;
pub mod config;
pub mod db;
pub mod highlight;
pub mod logging;
pub mod profile;
pub mod quiz;
pub mod response;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod types;
pub mod workers;

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::services::llm_provider::GeminiProvider;
use crate::state::AppState;

pub async fn create_app() -> axum::Router {
    let database = match db::Database::from_env().await {
        Ok(database) => Some(Arc::new(database)),
        Err(_) => None,
    };

    let llm = Arc::new(GeminiProvider::from_env());
    let state = AppState::new(database, llm);

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(routes::cors_layer())
}
