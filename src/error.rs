//! Error types shared by every part of the solver.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Error)]
pub enum SolverError {
    /// Guess or feedback length differs from the configured word length.
    #[error("expected {expected} letters, got a guess of {guess} and feedback of {feedback}")]
    InvalidInputLength {
        expected: usize,
        guess: usize,
        feedback: usize,
    },

    #[error("'{word}' contains characters other than ascii letters")]
    InvalidCharacter { word: String },

    /// No word is consistent with the feedback received so far.
    #[error("no candidate words remain")]
    EmptyCandidateSet,

    #[error("the dictionary is empty")]
    EmptyDictionary,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("session is already {0}")]
    SessionFinished(SessionState),

    #[error("failed to read dictionary {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SolverError>;
