use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A vocabulary entry scheduled for a calendar date. Owned by the remote
/// word store; sessions work on read-only copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub word: String,
    pub meaning: String,
    pub sentence: String,
    pub date: NaiveDate,
}

impl Word {
    pub fn new(
        id: impl Into<String>,
        word: impl Into<String>,
        meaning: impl Into<String>,
        sentence: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            meaning: meaning.into(),
            sentence: sentence.into(),
            date,
        }
    }
}
