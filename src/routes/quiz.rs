use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::response::{json_error, AppError};
use crate::services::llm_provider::LLMError;
use crate::services::quiz_generator::{self, QuizGenError, QuizItem};
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Serialize)]
struct QuizData {
    quiz: Vec<QuizItem>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    words: Vec<String>,
}

pub async fn generate_fill_blank(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.words.iter().all(|w| w.trim().is_empty()) {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "'words'는 비어 있지 않은 배열이어야 합니다",
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

    let quiz = quiz_generator::generate_fill_blank_quiz(llm.as_ref(), &payload.words)
        .await
        .map_err(quiz_error)?;

    Ok(Json(SuccessResponse {
        success: true,
        data: QuizData { quiz },
    }))
}

fn quiz_error(err: QuizGenError) -> AppError {
    match err {
        QuizGenError::EmptyWords => json_error(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "'words'는 비어 있지 않은 배열이어야 합니다",
        ),
        QuizGenError::EmptyQuiz => {
            tracing::warn!("quiz generation returned zero items");
            json_error(
                StatusCode::BAD_GATEWAY,
                "EMPTY_QUIZ",
                "AI가 퀴즈를 생성하지 못했습니다. 다시 시도해 주세요",
            )
        }
        QuizGenError::Malformed(detail) => {
            tracing::warn!(detail = %detail, "quiz generation response malformed");
            json_error(
                StatusCode::BAD_GATEWAY,
                "MALFORMED_AI_RESPONSE",
                "AI 응답 형식이 올바르지 않습니다",
            )
        }
        QuizGenError::Llm(LLMError::NotConfigured(_)) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "LLM_NOT_CONFIGURED",
            "AI 서비스가 설정되지 않았습니다",
        ),
        QuizGenError::Llm(err) => {
            tracing::warn!(error = %err, "quiz generation upstream failure");
            json_error(
                StatusCode::BAD_GATEWAY,
                "AI_UPSTREAM_ERROR",
                "AI 요청에 실패했습니다. 잠시 후 다시 시도해 주세요",
            )
        }
    }
}
