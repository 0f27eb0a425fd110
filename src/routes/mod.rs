mod daily;
mod grading;
mod health;
mod quiz;
mod words;

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/words", get(words::words_by_date))
        .route(
            "/functions/generate-vocab-fill-blank",
            post(quiz::generate_fill_blank),
        )
        .route("/functions/sentence-checker", post(grading::check_sentence))
        .route("/functions/add-daily-words", post(daily::add_daily_words))
        .fallback(fallback_handler)
        .with_state(state)
}

/// Allow-list from `CORS_ALLOWED_ORIGINS`; with none configured any
/// origin is answered.
pub fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = crate::config::cors_allowed_origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "요청한 경로를 찾을 수 없습니다")
        .into_response()
}
