use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::highlight;
use crate::services::llm_provider::{strip_code_fences, GeminiProvider, LLMError};

/// Structured outcome of grading one user sentence. `html_highlight` is
/// derived here from the corrected sentence, not returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingResult {
    pub is_correct: bool,
    pub corrected_sentence: String,
    pub score: u8,
    pub feedback_ko: String,
    pub alternative_examples: Vec<String>,
    pub common_collocations: Vec<String>,
    pub html_highlight: String,
}

#[derive(Debug, Error)]
pub enum GradeError {
    #[error("word and sentence are required")]
    EmptyInput,
    #[error(transparent)]
    Llm(#[from] LLMError),
    #[error("malformed evaluation response: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct RawEvaluation {
    is_correct: bool,
    corrected_sentence: String,
    score: f64,
    feedback_ko: String,
    #[serde(default)]
    alternative_examples: Vec<String>,
    #[serde(default)]
    common_collocations: Vec<String>,
}

pub async fn grade_sentence(
    llm: &GeminiProvider,
    word: &str,
    sentence: &str,
) -> Result<GradingResult, GradeError> {
    let word = word.trim();
    let sentence = sentence.trim();
    if word.is_empty() || sentence.is_empty() {
        return Err(GradeError::EmptyInput);
    }

    let prompt = build_ielts_prompt(word, sentence);
    let raw = llm.generate_json(&prompt).await?;
    parse_evaluation(&raw, sentence)
}

fn build_ielts_prompt(word: &str, sentence: &str) -> String {
    format!(
        r#"You are an expert IELTS examiner with over 10 years of experience, specializing in Writing Task 2. Your evaluation is strict, precise, and aligned with the official IELTS band descriptors.

You are assessing a single sentence written by an IELTS candidate.
The candidate was given the vocabulary word: "{word}"
The candidate wrote the following sentence: "{sentence}"

Your task is to analyze this sentence based on IELTS criteria and provide a detailed evaluation. Your response MUST be a single, valid JSON object and nothing else. Do not add any text before or after the JSON object.

The JSON object must have these keys:
- "is_correct": A boolean. True ONLY IF the sentence is grammatically flawless AND the word "{word}" is used perfectly in terms of its meaning, part of speech, and natural collocation.
- "corrected_sentence": A string. If the original sentence has errors (grammar, spelling, awkward phrasing), provide a corrected, more natural version. If the original is perfect, return it unchanged.
- "score": A number from 0 to 100, based on: Grammatical Accuracy (40), Vocabulary Usage & Collocation (40), Naturalness & Structure (20).
- "feedback_ko": A string. Provide constructive, encouraging feedback in Korean. Explain the score, highlight strengths, and clearly point out areas for improvement with specific examples.
- "alternative_examples": An array of 2-3 strings. Provide high-band (Band 8-9) example sentences using "{word}" in different contexts.
- "common_collocations": An array of strings. List common, natural word pairings (collocations) for "{word}"."#
    )
}

/// Parses the examiner output and attaches the word-diff markup computed
/// against the sentence the user actually submitted.
pub fn parse_evaluation(raw: &str, original_sentence: &str) -> Result<GradingResult, GradeError> {
    let parsed: RawEvaluation = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| GradeError::Malformed(e.to_string()))?;

    let html_highlight =
        highlight::render_highlight(original_sentence, &parsed.corrected_sentence);

    Ok(GradingResult {
        is_correct: parsed.is_correct,
        corrected_sentence: parsed.corrected_sentence,
        score: parsed.score.clamp(0.0, 100.0).round() as u8,
        feedback_ko: parsed.feedback_ko,
        alternative_examples: parsed.alternative_examples,
        common_collocations: parsed.common_collocations,
        html_highlight,
    })
}
