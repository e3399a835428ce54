//! Tunable knobs for a solving session.

use crate::error::{Result, SolverError};
use crate::MAX_WORD_LENGTH;

/// Configuration shared by the constraint tracker, the optimizer and the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub word_length: usize,
    pub max_attempts: usize,
    /// Largest guess pool the minimax strategy scores. `None` scores everything.
    pub minimax_pool_cap: Option<usize>,
    /// Dictionary prefix scored when no preferred opener is available.
    pub opening_prefix: usize,
    /// Upper bound on `pool * candidates` comparisons before entropy
    /// degrades to frequency scoring. `None` never degrades.
    pub entropy_work_limit: Option<usize>,
    /// Let entropy and minimax consider words that can no longer be the answer.
    pub explore_dictionary: bool,
    /// Answer the first entropy request from the list of known openers.
    pub use_opening_book: bool,
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            word_length: 5,
            max_attempts: 6,
            minimax_pool_cap: Some(50),
            opening_prefix: 100,
            entropy_work_limit: Some(25_000_000),
            explore_dictionary: true,
            use_opening_book: true,
            seed: 0x5eed,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_word_length(mut self, word_length: usize) -> Self {
        self.word_length = word_length;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_minimax_pool_cap(mut self, cap: Option<usize>) -> Self {
        self.minimax_pool_cap = cap;
        self
    }

    pub fn with_opening_prefix(mut self, prefix: usize) -> Self {
        self.opening_prefix = prefix;
        self
    }

    pub fn with_entropy_work_limit(mut self, limit: Option<usize>) -> Self {
        self.entropy_work_limit = limit;
        self
    }

    pub fn with_explore_dictionary(mut self, explore: bool) -> Self {
        self.explore_dictionary = explore;
        self
    }

    pub fn with_opening_book(mut self, enabled: bool) -> Self {
        self.use_opening_book = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.word_length == 0 || self.word_length > MAX_WORD_LENGTH {
            return Err(SolverError::InvalidConfig(format!(
                "word length must be between 1 and {}, got {}",
                MAX_WORD_LENGTH, self.word_length
            )));
        }
        if self.max_attempts == 0 {
            return Err(SolverError::InvalidConfig(
                "at least one attempt is required".to_string(),
            ));
        }
        if self.minimax_pool_cap == Some(0) {
            return Err(SolverError::InvalidConfig(
                "minimax pool cap must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
