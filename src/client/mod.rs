//! Typed client for the remote quiz functions and the word-store read
//! path. Every response is validated against the expected shape before a
//! domain value is constructed; a mismatch is the malformed-response
//! error, never a silent default.

use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::services::quiz_generator::{item_is_well_formed, QuizItem};
use crate::services::sentence_grader::GradingResult;
use crate::types::Word;

const DEFAULT_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response body")]
    Malformed,
    #[error("generation service returned no quiz items")]
    EmptyQuiz,
    #[error("word list is empty")]
    EmptyWords,
    #[error("word and sentence are required")]
    EmptyInput,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
struct QuizData {
    quiz: Vec<QuizItem>,
}

#[derive(Clone)]
pub struct FunctionsClient {
    base_url: String,
    http: reqwest::Client,
}

impl FunctionsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn from_env() -> Option<Self> {
        std::env::var("FUNCTIONS_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(Self::new)
    }

    /// Requests cloze items for the given words. Fails on transport
    /// errors, non-success statuses, shape violations and the distinct
    /// empty-result case; the caller decides whether to re-invoke.
    pub async fn generate_fill_blank(&self, words: &[String]) -> Result<Vec<QuizItem>, ClientError> {
        if words.iter().all(|w| w.trim().is_empty()) {
            return Err(ClientError::EmptyWords);
        }

        let payload = serde_json::json!({ "words": words });
        let envelope: Envelope<QuizData> = self
            .post_json("/functions/generate-vocab-fill-blank", &payload)
            .await?;

        let items = envelope.data.quiz;
        if items.is_empty() {
            return Err(ClientError::EmptyQuiz);
        }
        if !items.iter().all(item_is_well_formed) {
            return Err(ClientError::Malformed);
        }
        Ok(items)
    }

    /// Grades one sentence. Empty input is rejected here, before any
    /// network traffic.
    pub async fn check_sentence(
        &self,
        word: &str,
        sentence: &str,
    ) -> Result<GradingResult, ClientError> {
        if word.trim().is_empty() || sentence.trim().is_empty() {
            return Err(ClientError::EmptyInput);
        }

        let payload = serde_json::json!({ "word": word, "sentence": sentence });
        let envelope: Envelope<GradingResult> =
            self.post_json("/functions/sentence-checker", &payload).await?;
        Ok(envelope.data)
    }

    /// Words scheduled for `date`; an empty list is a valid answer, not
    /// an error.
    pub async fn words_for_date(&self, date: NaiveDate) -> Result<Vec<Word>, ClientError> {
        let url = format!(
            "{}/api/words?date={}",
            self.base_url,
            date.format("%Y-%m-%d")
        );
        let response = self.http.get(&url).send().await?;
        let envelope: Envelope<Vec<Word>> = Self::decode(response).await?;
        Ok(envelope.data)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(payload).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|_| ClientError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_word_list_is_rejected_locally() {
        let client = FunctionsClient::new("http://localhost:9");
        let err = client.generate_fill_blank(&[]).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyWords));
        let err = client
            .generate_fill_blank(&["  ".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::EmptyWords));
    }

    #[tokio::test]
    async fn test_empty_sentence_is_rejected_locally() {
        let client = FunctionsClient::new("http://localhost:9");
        let err = client.check_sentence("mitigate", "  ").await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyInput));
        let err = client.check_sentence("", "A sentence.").await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyInput));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = FunctionsClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
