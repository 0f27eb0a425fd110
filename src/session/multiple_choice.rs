use crate::quiz::build_options;
use crate::session::{Outcome, SessionError};
use crate::types::Word;

/// What the learner saw after picking an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceFeedback {
    pub is_correct: bool,
    pub correct_meaning: String,
}

/// Meaning-recognition quiz over a word list. Options are rebuilt from
/// the pool every time the question changes, never carried across
/// questions.
#[derive(Debug)]
pub struct MultipleChoiceSession {
    words: Vec<Word>,
    index: usize,
    score: usize,
    options: Vec<String>,
    feedback: Option<ChoiceFeedback>,
}

impl MultipleChoiceSession {
    pub fn new(words: Vec<Word>) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(SessionError::Empty);
        }
        let options = build_options(&words[0], &words);
        Ok(Self {
            words,
            index: 0,
            score: 0,
            options,
            feedback: None,
        })
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.index)
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.words.len()
    }

    pub fn feedback(&self) -> Option<&ChoiceFeedback> {
        self.feedback.as_ref()
    }

    /// Records the learner's pick. Exact string match against the correct
    /// meaning scores the point; a second pick on the same question is
    /// rejected.
    pub fn choose(&mut self, option: &str) -> Result<ChoiceFeedback, SessionError> {
        let Some(word) = self.words.get(self.index) else {
            return Err(SessionError::Completed);
        };
        if self.feedback.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }

        let is_correct = option == word.meaning;
        if is_correct {
            self.score += 1;
        }
        let feedback = ChoiceFeedback {
            is_correct,
            correct_meaning: word.meaning.clone(),
        };
        self.feedback = Some(feedback.clone());
        Ok(feedback)
    }

    /// Moves to the next question, or completes when the answered
    /// question was the last one.
    pub fn advance(&mut self) -> Result<Outcome, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.feedback.is_none() {
            return Err(SessionError::NotAnswered);
        }

        self.feedback = None;
        self.index += 1;

        if let Some(word) = self.words.get(self.index) {
            self.options = build_options(word, &self.words);
            Ok(Outcome::Continue)
        } else {
            self.options.clear();
            Ok(Outcome::Completed {
                score: self.score,
                total: self.words.len(),
            })
        }
    }
}
