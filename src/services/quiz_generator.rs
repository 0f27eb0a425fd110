use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::llm_provider::{strip_code_fences, GeminiProvider, LLMError};

/// Placeholder the generation contract requires exactly once per sentence.
pub const BLANK_TOKEN: &str = "{{BLANK}}";

/// One cloze question: a sentence template with a single blank and the
/// word that fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub sentence_template: String,
    pub answer: String,
}

#[derive(Debug, Error)]
pub enum QuizGenError {
    #[error("word list is empty")]
    EmptyWords,
    #[error(transparent)]
    Llm(#[from] LLMError),
    #[error("malformed quiz response: {0}")]
    Malformed(String),
    #[error("generation returned zero quiz items")]
    EmptyQuiz,
}

#[derive(Debug, Deserialize)]
struct QuizPayload {
    quiz: Vec<QuizItem>,
}

pub async fn generate_fill_blank_quiz(
    llm: &GeminiProvider,
    words: &[String],
) -> Result<Vec<QuizItem>, QuizGenError> {
    let words = normalize_words(words)?;
    let prompt = build_quiz_prompt(&words);
    let raw = llm.generate_json(&prompt).await?;
    parse_quiz_response(&raw)
}

/// Drops blank entries and rejects an empty list before any network call.
fn normalize_words(words: &[String]) -> Result<Vec<String>, QuizGenError> {
    let normalized: Vec<String> = words
        .iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();
    if normalized.is_empty() {
        return Err(QuizGenError::EmptyWords);
    }
    Ok(normalized)
}

fn build_quiz_prompt(words: &[String]) -> String {
    let word_list = words.join(", ");
    format!(
        r#"You are an English teacher creating a vocabulary quiz for beginner to intermediate learners.
Your task is to create one simple, clear, and common example sentence for each word in the provided list.

For each sentence you create, you MUST replace the target word with the special placeholder token "{BLANK_TOKEN}". Do not use any other format for the blank.

The list of words is: {word_list}

Your response MUST be a single, valid JSON object and nothing else.
The JSON object should have a single key "quiz".
The value of "quiz" should be an array of objects.
Each object in the array must have two keys:
1. "sentence_template": The sentence with the {BLANK_TOKEN} placeholder.
2. "answer": The original word that fits in the blank.

Example for words ["run", "eat"]:
{{
  "quiz": [
    {{
      "sentence_template": "I like to {BLANK_TOKEN} in the park every morning.",
      "answer": "run"
    }},
    {{
      "sentence_template": "What do you want to {BLANK_TOKEN} for dinner?",
      "answer": "eat"
    }}
  ]
}}"#
    )
}

/// Validates the parsed response against the generation contract. A shape
/// violation is the malformed-response error; zero items is reported
/// separately so callers can advise a retry.
pub fn parse_quiz_response(raw: &str) -> Result<Vec<QuizItem>, QuizGenError> {
    let payload: QuizPayload = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| QuizGenError::Malformed(e.to_string()))?;

    if payload.quiz.is_empty() {
        return Err(QuizGenError::EmptyQuiz);
    }

    for item in &payload.quiz {
        if !item_is_well_formed(item) {
            return Err(QuizGenError::Malformed(format!(
                "quiz item violates the blank contract: {:?}",
                item.sentence_template
            )));
        }
    }

    Ok(payload.quiz)
}

/// Contract check: exactly one blank token, non-empty answer.
pub fn item_is_well_formed(item: &QuizItem) -> bool {
    item.sentence_template.matches(BLANK_TOKEN).count() == 1 && !item.answer.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_every_word_and_the_blank_token() {
        let words = vec!["advocate".to_string(), "mitigate".to_string()];
        let prompt = build_quiz_prompt(&words);
        assert!(prompt.contains("advocate, mitigate"));
        assert!(prompt.contains(BLANK_TOKEN));
    }

    #[test]
    fn test_parse_valid_response() {
        let raw = r#"{"quiz":[{"sentence_template":"I {{BLANK}} every day.","answer":"run"}]}"#;
        let items = parse_quiz_response(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer, "run");
    }

    #[test]
    fn test_parse_fenced_response() {
        let raw = "```json\n{\"quiz\":[{\"sentence_template\":\"I {{BLANK}} it.\",\"answer\":\"eat\"}]}\n```";
        let items = parse_quiz_response(raw).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_empty_quiz_is_distinct_error() {
        let err = parse_quiz_response(r#"{"quiz":[]}"#).unwrap_err();
        assert!(matches!(err, QuizGenError::EmptyQuiz));
    }

    #[test]
    fn test_parse_missing_field_is_malformed() {
        let err = parse_quiz_response(r#"{"questions":[]}"#).unwrap_err();
        assert!(matches!(err, QuizGenError::Malformed(_)));
    }

    #[test]
    fn test_parse_rejects_template_without_blank() {
        let raw = r#"{"quiz":[{"sentence_template":"No placeholder here.","answer":"run"}]}"#;
        assert!(matches!(
            parse_quiz_response(raw).unwrap_err(),
            QuizGenError::Malformed(_)
        ));
    }

    #[test]
    fn test_parse_rejects_template_with_two_blanks() {
        let raw =
            r#"{"quiz":[{"sentence_template":"{{BLANK}} and {{BLANK}}.","answer":"run"}]}"#;
        assert!(matches!(
            parse_quiz_response(raw).unwrap_err(),
            QuizGenError::Malformed(_)
        ));
    }

    #[test]
    fn test_normalize_rejects_empty_and_blank_lists() {
        assert!(matches!(
            normalize_words(&[]).unwrap_err(),
            QuizGenError::EmptyWords
        ));
        assert!(matches!(
            normalize_words(&["   ".to_string()]).unwrap_err(),
            QuizGenError::EmptyWords
        ));
    }
}
