//! Constraint propagation.
//!
//! The tracker folds every `(guess, feedback)` pair into four pieces of
//! knowledge about the secret word and narrows the candidate store to the
//! words that agree with all of it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::{debug, warn};

use crate::candidates::CandidateStore;
use crate::dictionary::Dictionary;
use crate::error::{Result, SolverError};
use crate::feedback::Feedback;

/// Read-only view of what is known about the secret word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Knowledge {
    fixed: BTreeMap<usize, char>,
    required: BTreeSet<char>,
    excluded: BTreeSet<char>,
    excluded_positions: BTreeMap<char, BTreeSet<usize>>,
    contradicted: bool,
}

impl Knowledge {
    /// Letters known to sit at a given position (green).
    pub fn fixed(&self) -> &BTreeMap<usize, char> {
        &self.fixed
    }

    /// Letters known to occur somewhere in the word.
    pub fn required(&self) -> &BTreeSet<char> {
        &self.required
    }

    /// Letters known not to occur anywhere in the word.
    pub fn excluded(&self) -> &BTreeSet<char> {
        &self.excluded
    }

    /// Positions a letter is known not to occupy.
    pub fn excluded_positions(&self) -> &BTreeMap<char, BTreeSet<usize>> {
        &self.excluded_positions
    }

    /// Whether a required letter was later graded absent. No word is
    /// consistent with contradictory feedback.
    pub fn is_contradicted(&self) -> bool {
        self.contradicted
    }

    pub fn is_empty(&self) -> bool {
        !self.contradicted
            && self.fixed.is_empty()
            && self.required.is_empty()
            && self.excluded.is_empty()
            && self.excluded_positions.is_empty()
    }

    /// Whether `word` agrees with everything known so far.
    pub fn is_consistent(&self, word: &str) -> bool {
        if self.contradicted {
            return false;
        }

        let bytes = word.as_bytes();
        let letter_at = |pos: usize| bytes.get(pos).map(|&b| b as char);

        for (&pos, &letter) in &self.fixed {
            if letter_at(pos) != Some(letter) {
                return false;
            }
        }

        for &letter in &self.required {
            if !word.contains(letter) {
                return false;
            }
        }

        for &letter in &self.excluded {
            if word.contains(letter) {
                return false;
            }
        }

        for (&letter, positions) in &self.excluded_positions {
            if positions.iter().any(|&pos| letter_at(pos) == Some(letter)) {
                return false;
            }
        }

        true
    }

    fn record(&mut self, guess: &str, feedback: &[Feedback]) {
        // A letter graded Absent may still be in the word when another copy
        // in the same guess was graded Correct or Present.
        let confirmed: BTreeSet<char> = guess
            .chars()
            .zip(feedback)
            .filter(|(_, fb)| **fb != Feedback::Absent)
            .map(|(letter, _)| letter)
            .collect();

        for (pos, (letter, fb)) in guess.chars().zip(feedback).enumerate() {
            match fb {
                Feedback::Correct => {
                    self.fixed.insert(pos, letter);
                    self.require(letter);
                }
                Feedback::Present => {
                    self.require(letter);
                    self.exclude_position(letter, pos);
                }
                Feedback::Absent if confirmed.contains(&letter) => {}
                Feedback::Absent if self.required.contains(&letter) => {
                    warn!("'{}' was required but is now graded absent", letter);
                    self.contradicted = true;
                }
                Feedback::Absent => {
                    self.excluded.insert(letter);
                }
            }
        }
    }

    fn require(&mut self, letter: char) {
        if self.excluded.remove(&letter) {
            warn!("'{}' was excluded but is now graded in the word", letter);
        }
        self.required.insert(letter);
    }

    fn exclude_position(&mut self, letter: char, pos: usize) {
        self.excluded_positions
            .entry(letter)
            .or_default()
            .insert(pos);
    }
}

/// Accumulates feedback and keeps the candidate store filtered against it.
#[derive(Debug, Clone)]
pub struct ConstraintTracker {
    word_length: usize,
    knowledge: Knowledge,
    store: CandidateStore,
}

impl ConstraintTracker {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self {
            word_length: dictionary.word_length(),
            knowledge: Knowledge::default(),
            store: CandidateStore::new(dictionary),
        }
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    /// Fold one graded guess into the knowledge and re-filter the candidates.
    ///
    /// Input is validated before anything changes, so a rejected call leaves
    /// the tracker untouched.
    pub fn add_feedback(&mut self, guess: &str, feedback: &[Feedback]) -> Result<()> {
        let guess_len = guess.chars().count();
        if guess_len != self.word_length || feedback.len() != self.word_length {
            return Err(SolverError::InvalidInputLength {
                expected: self.word_length,
                guess: guess_len,
                feedback: feedback.len(),
            });
        }
        if !guess.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SolverError::InvalidCharacter {
                word: guess.to_string(),
            });
        }

        let guess = guess.to_ascii_lowercase();
        self.knowledge.record(&guess, feedback);

        let before = self.store.len();
        let knowledge = &self.knowledge;
        self.store.retain(|word| knowledge.is_consistent(word));
        debug!(
            "'{}' narrowed candidates {} -> {} (fixed {:?}, required {:?}, excluded {:?})",
            guess,
            before,
            self.store.len(),
            self.knowledge.fixed,
            self.knowledge.required,
            self.knowledge.excluded
        );
        Ok(())
    }

    pub fn is_consistent(&self, word: &str) -> bool {
        self.knowledge.is_consistent(word)
    }

    /// Words still consistent with every feedback received.
    pub fn possible_words(&self) -> &[String] {
        self.store.candidates()
    }

    pub fn reset(&mut self) {
        self.knowledge = Knowledge::default();
        self.store.reset();
    }
}
