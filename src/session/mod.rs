//! Quiz-session state machines. Each session owns its item list, a 0-based
//! question index and a running score, and advances strictly forward until
//! the index reaches the item count.

pub mod fill_blank;
pub mod multiple_choice;
pub mod writing;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session has no items")]
    Empty,
    #[error("current question is already answered")]
    AlreadyAnswered,
    #[error("current question has no recorded answer yet")]
    NotAnswered,
    #[error("session is already complete")]
    Completed,
    #[error("input is empty")]
    EmptyInput,
    #[error("a grading request is already pending")]
    GradingPending,
}

/// Result of an `advance` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Completed { score: usize, total: usize },
}
