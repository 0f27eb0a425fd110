use thiserror::Error;

use crate::client::{ClientError, FunctionsClient};
use crate::services::sentence_grader::GradingResult;
use crate::session::{Outcome, SessionError};
use crate::types::Word;

#[derive(Debug, Error)]
pub enum WritingError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Free-form writing test: one sentence per word, graded remotely.
/// Submission is two-step: `begin_submission` opens the in-flight gate
/// (mirroring the disabled submit button while grading runs) and
/// `apply_grading` closes it. A grading result arriving when nothing is
/// pending is dropped, so a late response to a question the session has
/// already left is a no-op rather than a crash.
#[derive(Debug)]
pub struct WritingSession {
    words: Vec<Word>,
    index: usize,
    score: usize,
    pending: bool,
    result: Option<GradingResult>,
}

impl WritingSession {
    pub fn new(words: Vec<Word>) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            words,
            index: 0,
            score: 0,
            pending: false,
            result: None,
        })
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.index)
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

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn result(&self) -> Option<&GradingResult> {
        self.result.as_ref()
    }

    /// Validates the sentence and opens the grading gate, returning the
    /// trimmed text to send. Rejected while a grading call is outstanding
    /// or after the question already has a result.
    pub fn begin_submission(&mut self, sentence: &str) -> Result<String, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.result.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }
        if self.pending {
            return Err(SessionError::GradingPending);
        }
        let trimmed = sentence.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyInput);
        }
        self.pending = true;
        Ok(trimmed.to_string())
    }

    /// Stores the grading outcome for the pending submission. Returns
    /// `false` (and changes nothing) when no submission is pending.
    pub fn apply_grading(&mut self, result: GradingResult) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        if result.is_correct {
            self.score += 1;
        }
        self.result = Some(result);
        true
    }

    /// Re-opens the question after a failed grading call so the learner
    /// can submit again.
    pub fn cancel_submission(&mut self) {
        self.pending = false;
    }

    /// Grades the sentence through the remote service and records the
    /// result.
    pub async fn submit(
        &mut self,
        client: &FunctionsClient,
        sentence: &str,
    ) -> Result<GradingResult, WritingError> {
        let sentence = self.begin_submission(sentence)?;
        let word = match self.current_word() {
            Some(word) => word.word.clone(),
            None => return Err(SessionError::Completed.into()),
        };

        match client.check_sentence(&word, &sentence).await {
            Ok(result) => {
                self.apply_grading(result.clone());
                Ok(result)
            }
            Err(err) => {
                self.cancel_submission();
                Err(err.into())
            }
        }
    }

    pub fn advance(&mut self) -> Result<Outcome, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.result.is_none() {
            return Err(SessionError::NotAnswered);
        }

        self.result = None;
        self.index += 1;

        if self.index < self.words.len() {
            Ok(Outcome::Continue)
        } else {
            Ok(Outcome::Completed {
                score: self.score,
                total: self.words.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn words() -> Vec<Word> {
        let date = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        vec![
            Word::new("id-0", "mitigate", "완화하다", "Trees mitigate heat.", date),
            Word::new("id-1", "advocate", "옹호하다", "She advocates change.", date),
        ]
    }

    fn grading(is_correct: bool) -> GradingResult {
        GradingResult {
            is_correct,
            corrected_sentence: "Fine.".to_string(),
            score: if is_correct { 90 } else { 40 },
            feedback_ko: "피드백".to_string(),
            alternative_examples: Vec::new(),
            common_collocations: Vec::new(),
            html_highlight: "Fine.".to_string(),
        }
    }

    #[test]
    fn test_empty_word_list_never_starts() {
        assert_eq!(
            WritingSession::new(Vec::new()).unwrap_err(),
            SessionError::Empty
        );
    }

    #[test]
    fn test_empty_sentence_rejected_before_any_call() {
        let mut session = WritingSession::new(words()).unwrap();
        assert_eq!(
            session.begin_submission("   ").unwrap_err(),
            SessionError::EmptyInput
        );
        assert!(!session.is_pending());
    }

    #[test]
    fn test_second_begin_while_pending_is_gated() {
        let mut session = WritingSession::new(words()).unwrap();
        session.begin_submission("I mitigate the risk.").unwrap();
        assert_eq!(
            session.begin_submission("again").unwrap_err(),
            SessionError::GradingPending
        );
    }

    #[test]
    fn test_grading_without_pending_submission_is_a_noop() {
        let mut session = WritingSession::new(words()).unwrap();
        assert!(!session.apply_grading(grading(true)));
        assert!(session.result().is_none());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_failed_call_reopens_the_question() {
        let mut session = WritingSession::new(words()).unwrap();
        session.begin_submission("I mitigate the risk.").unwrap();
        session.cancel_submission();
        assert!(session.begin_submission("I mitigate the risk.").is_ok());
    }

    #[test]
    fn test_correct_grading_scores_and_blocks_resubmission() {
        let mut session = WritingSession::new(words()).unwrap();
        session.begin_submission("I mitigate the risk.").unwrap();
        assert!(session.apply_grading(grading(true)));
        assert_eq!(session.score(), 1);
        assert_eq!(
            session.begin_submission("again").unwrap_err(),
            SessionError::AlreadyAnswered
        );
    }

    #[test]
    fn test_full_run_reaches_complete() {
        let mut session = WritingSession::new(words()).unwrap();
        let total = session.total();
        let mut last = Outcome::Continue;
        for i in 0..total {
            session.begin_submission("A sentence.").unwrap();
            session.apply_grading(grading(i == 0));
            last = session.advance().unwrap();
        }
        assert_eq!(last, Outcome::Completed { score: 1, total });
        assert_eq!(session.advance().unwrap_err(), SessionError::Completed);
    }

    #[test]
    fn test_advance_requires_a_result() {
        let mut session = WritingSession::new(words()).unwrap();
        assert_eq!(session.advance().unwrap_err(), SessionError::NotAnswered);
        session.begin_submission("A sentence.").unwrap();
        assert_eq!(session.advance().unwrap_err(), SessionError::NotAnswered);
    }
}
