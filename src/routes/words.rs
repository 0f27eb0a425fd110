use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::words::select_words_by_date;
use crate::response::{json_error, AppError};
use crate::state::AppState;
use crate::types::Word;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
pub struct WordsQuery {
    date: Option<String>,
}

/// Words scheduled for one calendar date. Zero rows is the valid
/// "no words for this date" answer, not an error.
pub async fn words_by_date(
    State(state): State<AppState>,
    Query(query): Query<WordsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let raw_date = query.date.unwrap_or_default();
    if raw_date.trim().is_empty() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "'date' 쿼리 파라미터가 필요합니다 (YYYY-MM-DD)",
        ));
    }

    let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d").map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "'date'는 YYYY-MM-DD 형식이어야 합니다",
        )
    })?;

    let Some(database) = state.database() else {
        return Err(json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "단어 저장소를 사용할 수 없습니다",
        ));
    };

    let words: Vec<Word> = select_words_by_date(database.pool(), date)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, %date, "words query failed");
            AppError::internal("words query failed")
        })?;

    Ok(Json(SuccessResponse {
        success: true,
        data: words,
    }))
}
