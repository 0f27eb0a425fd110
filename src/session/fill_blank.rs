use thiserror::Error;

use crate::client::{ClientError, FunctionsClient};
use crate::quiz::shuffled;
use crate::services::quiz_generator::{QuizItem, BLANK_TOKEN};
use crate::session::{Outcome, SessionError};
use crate::types::Word;

#[derive(Debug, Error)]
pub enum FillBlankError {
    #[error("no words selected for the quiz")]
    NoWords,
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// What the learner saw after checking an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillFeedback {
    pub is_correct: bool,
    pub answer: String,
}

/// Cloze quiz over items produced by the generation service. The item
/// list is fetched once up front and shuffled; a failed or empty
/// generation never enters the active state.
#[derive(Debug)]
pub struct FillBlankSession {
    items: Vec<QuizItem>,
    index: usize,
    score: usize,
    feedback: Option<FillFeedback>,
}

impl FillBlankSession {
    /// Generates the quiz for `words` and starts the session.
    pub async fn start(
        client: &FunctionsClient,
        words: &[Word],
    ) -> Result<Self, FillBlankError> {
        if words.is_empty() {
            return Err(FillBlankError::NoWords);
        }
        let spellings: Vec<String> = words.iter().map(|w| w.word.clone()).collect();
        let items = client.generate_fill_blank(&spellings).await?;
        Self::from_items(items).map_err(|_| FillBlankError::Client(ClientError::EmptyQuiz))
    }

    /// Starts from already-generated items; used directly by tests and by
    /// `start` after generation.
    pub fn from_items(items: Vec<QuizItem>) -> Result<Self, SessionError> {
        if items.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            items: shuffled(&items),
            index: 0,
            score: 0,
            feedback: None,
        })
    }

    pub fn current_item(&self) -> Option<&QuizItem> {
        self.items.get(self.index)
    }

    /// The sentence around the blank, for rendering the input between the
    /// two halves.
    pub fn prompt_parts(&self) -> Option<(&str, &str)> {
        self.current_item()
            .and_then(|item| item.sentence_template.split_once(BLANK_TOKEN))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.items.len()
    }

    pub fn feedback(&self) -> Option<&FillFeedback> {
        self.feedback.as_ref()
    }

    /// Checks the learner's answer: case-insensitive, surrounding
    /// whitespace ignored.
    pub fn submit(&mut self, answer: &str) -> Result<FillFeedback, SessionError> {
        let Some(item) = self.items.get(self.index) else {
            return Err(SessionError::Completed);
        };
        if self.feedback.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }
        let submitted = answer.trim();
        if submitted.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let is_correct = submitted.to_lowercase() == item.answer.trim().to_lowercase();
        if is_correct {
            self.score += 1;
        }
        let feedback = FillFeedback {
            is_correct,
            answer: item.answer.clone(),
        };
        self.feedback = Some(feedback.clone());
        Ok(feedback)
    }

    pub fn advance(&mut self) -> Result<Outcome, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.feedback.is_none() {
            return Err(SessionError::NotAnswered);
        }

        self.feedback = None;
        self.index += 1;

        if self.index < self.items.len() {
            Ok(Outcome::Continue)
        } else {
            Ok(Outcome::Completed {
                score: self.score,
                total: self.items.len(),
            })
        }
    }
}
