use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::response::{json_error, AppError};
use crate::services::daily_words::{self, DailyWordsError};
use crate::services::llm_provider::LLMError;
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Serialize)]
struct InsertedResponse {
    inserted: usize,
    message: String,
}

/// Manual trigger for the daily word-addition job; the scheduled worker
/// runs the same service.
pub async fn add_daily_words(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let Some(database) = state.database() else {
        return Err(json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "단어 저장소를 사용할 수 없습니다",
        ));
    };

    let llm = state.llm();
    if !llm.is_available() {
        return Err(json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "LLM_NOT_CONFIGURED",
            "AI 서비스가 설정되지 않았습니다",
        ));
    }

    let inserted = daily_words::run(llm.as_ref(), database.as_ref())
        .await
        .map_err(daily_error)?;

    Ok(Json(SuccessResponse {
        success: true,
        data: InsertedResponse {
            inserted,
            message: format!("{inserted}개의 단어가 성공적으로 추가되었습니다"),
        },
    }))
}

fn daily_error(err: DailyWordsError) -> AppError {
    match err {
        DailyWordsError::Malformed(detail) => {
            tracing::warn!(detail = %detail, "daily word response malformed");
            json_error(
                StatusCode::BAD_GATEWAY,
                "MALFORMED_AI_RESPONSE",
                "AI 응답이 유효한 단어 배열 형식이 아닙니다",
            )
        }
        DailyWordsError::Llm(LLMError::NotConfigured(_)) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "LLM_NOT_CONFIGURED",
            "AI 서비스가 설정되지 않았습니다",
        ),
        DailyWordsError::Llm(err) => {
            tracing::warn!(error = %err, "daily word generation upstream failure");
            json_error(
                StatusCode::BAD_GATEWAY,
                "AI_UPSTREAM_ERROR",
                "AI 요청에 실패했습니다. 잠시 후 다시 시도해 주세요",
            )
        }
        DailyWordsError::Db(err) => {
            tracing::warn!(error = %err, "daily word store operation failed");
            AppError::internal("daily word store operation failed")
        }
    }
}
