use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::db::words::{self, NewWord};
use crate::db::Database;
use crate::services::llm_provider::{strip_code_fences, GeminiProvider, LLMError};

/// How many new words are kept per run, after deduplication.
pub const DAILY_WORD_TARGET: usize = 10;
const GENERATION_CANDIDATES: usize = 15;

#[derive(Debug, Error)]
pub enum DailyWordsError {
    #[error(transparent)]
    Llm(#[from] LLMError),
    #[error("word store query failed: {0}")]
    Db(#[from] sqlx::Error),
    #[error("malformed word-list response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Deserialize)]
struct GeneratedWord {
    word: String,
    meaning: String,
    sentence: String,
}

#[derive(Debug, Deserialize)]
struct GeneratedWords {
    words: Vec<GeneratedWord>,
}

/// One pass of the daily-addition job: ask the model for candidate words,
/// drop everything already in the store, insert at most
/// `DAILY_WORD_TARGET` rows dated today. Returns the inserted count.
pub async fn run(llm: &GeminiProvider, db: &Database) -> Result<usize, DailyWordsError> {
    let existing = words::select_all_spellings(db.pool()).await?;
    let existing_set: HashSet<String> = existing.iter().map(|w| w.trim().to_lowercase()).collect();
    info!(existing = existing_set.len(), "daily word generation starting");

    let prompt = build_daily_words_prompt(&existing);
    let raw = llm.generate_json(&prompt).await?;
    let generated = parse_generated_words(&raw)?;

    let today = chrono::Utc::now().date_naive();
    let fresh = select_new_words(generated, &existing_set, today);

    if fresh.is_empty() {
        info!("no new words to add (model produced only duplicates)");
        return Ok(0);
    }

    words::insert_words(db.pool(), &fresh).await?;
    info!(inserted = fresh.len(), "daily words inserted");
    Ok(fresh.len())
}

fn build_daily_words_prompt(existing: &[String]) -> String {
    format!(
        r#"You are an expert IELTS lexical resource specialist, tasked with creating a vocabulary list for students aiming for Band 7.0 to 8.0.

Your task is to generate {GENERATION_CANDIDATES} English words that fit this specific level.
The words should be "less common lexical items" that demonstrate precision and sophistication, suitable for Writing Task 2 and the Speaking test.
Focus on words that allow for nuanced expression. Avoid overly obscure, academic, or archaic words.

For example, words like: 'advocate', 'discrepancy', 'substantiate', 'proliferation', 'mitigate' are good examples of the target level.

Your response MUST be a single, valid JSON object and nothing else.
The JSON object must have a single key "words", which is an array of objects.
Each object in the array must have three keys: "word" (string), "meaning" (string, in Korean), and "sentence" (string, a clear example).

IMPORTANT: AVOID generating the following words as they are already in the database:
{}"#,
        existing.join(", ")
    )
}

fn parse_generated_words(raw: &str) -> Result<Vec<GeneratedWord>, DailyWordsError> {
    let payload: GeneratedWords = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| DailyWordsError::Malformed(e.to_string()))?;
    Ok(payload.words)
}

/// Case-insensitive dedup against the store and within the batch itself,
/// capped at the daily target.
fn select_new_words(
    generated: Vec<GeneratedWord>,
    existing: &HashSet<String>,
    date: chrono::NaiveDate,
) -> Vec<NewWord> {
    let mut seen: HashSet<String> = HashSet::new();
    generated
        .into_iter()
        .filter_map(|item| {
            let spelling = item.word.trim().to_string();
            if spelling.is_empty() {
                return None;
            }
            let key = spelling.to_lowercase();
            if existing.contains(&key) || !seen.insert(key) {
                return None;
            }
            Some(NewWord {
                id: uuid::Uuid::new_v4().to_string(),
                word: spelling,
                meaning: item.meaning,
                sentence: item.sentence,
                date,
            })
        })
        .take(DAILY_WORD_TARGET)
        .collect()
}
