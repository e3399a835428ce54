//! # Wordle CSP
//!
//! A constraint-propagation solver for Wordle-style puzzles.
//!
//! Feedback on each guess is folded into per-letter knowledge that narrows a
//! dictionary down to the words still possible. The next guess is chosen by
//! maximising the entropy of the feedback it would produce, by minimising the
//! worst-case number of survivors, or by a positional letter-frequency
//! heuristic.

pub mod analysis;
pub mod candidates;
pub mod config;
pub mod constraints;
pub mod dictionary;
pub mod error;
pub mod feedback;
pub mod optimizer;
pub mod session;

pub use analysis::{analyze_patterns, PatternAnalysis};
pub use candidates::CandidateStore;
pub use config::SolverConfig;
pub use constraints::{ConstraintTracker, Knowledge};
pub use dictionary::Dictionary;
pub use error::{Result, SolverError};
pub use feedback::{Feedback, FeedbackPattern};
pub use optimizer::{GuessAnalysis, Optimizer, Strategy};
pub use session::{GuessAdvisor, GuessHistory, Session, SessionState, SessionStats};

/// Longest supported word; 3^20 feedback patterns still fit in a `u32`.
pub const MAX_WORD_LENGTH: usize = 20;
