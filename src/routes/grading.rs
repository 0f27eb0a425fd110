use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::response::{json_error, AppError};
use crate::services::llm_provider::LLMError;
use crate::services::sentence_grader::{self, GradeError, GradingResult};
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
pub struct CheckSentenceRequest {
    word: String,
    sentence: String,
}

pub async fn check_sentence(
    State(state): State<AppState>,
    Json(payload): Json<CheckSentenceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.word.trim().is_empty() || payload.sentence.trim().is_empty() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "'word'와 'sentence'는 필수 항목입니다",
        ));
    }

    let llm = state.llm();
    if !llm.is_available() {
        return Err(json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "LLM_NOT_CONFIGURED",
            "AI 서비스가 설정되지 않았습니다",
        ));
    }

    let result: GradingResult =
        sentence_grader::grade_sentence(llm.as_ref(), &payload.word, &payload.sentence)
            .await
            .map_err(grade_error)?;

    Ok(Json(SuccessResponse {
        success: true,
        data: result,
    }))
}

fn grade_error(err: GradeError) -> AppError {
    match err {
        GradeError::EmptyInput => json_error(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "'word'와 'sentence'는 필수 항목입니다",
        ),
        GradeError::Malformed(detail) => {
            tracing::warn!(detail = %detail, "sentence evaluation response malformed");
            json_error(
                StatusCode::BAD_GATEWAY,
                "MALFORMED_AI_RESPONSE",
                "AI 응답 형식이 올바르지 않습니다",
            )
        }
        GradeError::Llm(LLMError::NotConfigured(_)) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "LLM_NOT_CONFIGURED",
            "AI 서비스가 설정되지 않았습니다",
        ),
        GradeError::Llm(err) => {
            tracing::warn!(error = %err, "sentence grading upstream failure");
            json_error(
                StatusCode::BAD_GATEWAY,
                "AI_UPSTREAM_ERROR",
                "AI 요청에 실패했습니다. 잠시 후 다시 시도해 주세요",
            )
        }
    }
}
