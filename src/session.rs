//! A single solving session.
//!
//! [`Session`] ties the constraint tracker, its candidate store and the
//! optimizer together. Automated play and external advisors drive it through
//! the same feedback and guess operations as an interactive caller.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::config::SolverConfig;
use crate::constraints::{ConstraintTracker, Knowledge};
use crate::dictionary::Dictionary;
use crate::error::{Result, SolverError};
use crate::feedback::{Feedback, FeedbackPattern};
use crate::optimizer::{GuessAnalysis, Optimizer, Strategy};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No feedback yet; every dictionary word is a candidate.
    Fresh,
    /// At least one feedback applied and the puzzle is still open.
    Active,
    /// The last guess was graded all correct.
    Solved,
    /// The attempt budget ran out.
    Exhausted,
    /// No candidate is consistent with the feedback.
    Stuck,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Solved | SessionState::Exhausted | SessionState::Stuck
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Fresh => "fresh",
            SessionState::Active => "active",
            SessionState::Solved => "solved",
            SessionState::Exhausted => "exhausted",
            SessionState::Stuck => "stuck",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub total_words: usize,
    pub possible_words: usize,
    pub fixed_positions: usize,
    pub required_letters: usize,
    pub excluded_letters: usize,
    pub attempts: usize,
    pub max_attempts: usize,
    /// `1 - possible / total`, or 0 for an empty dictionary.
    pub elimination_rate: f64,
    pub state: SessionState,
}

/// Something that proposes the next guess by looking at a session.
///
/// Advisors only get a shared reference; the session changes solely through
/// the feedback the driving loop applies.
pub trait GuessAdvisor {
    fn suggest(&mut self, session: &Session) -> Option<String>;
}

impl GuessAdvisor for Strategy {
    fn suggest(&mut self, session: &Session) -> Option<String> {
        session.best_guess(*self)
    }
}

/// Guesses made during automated play, each with the feedback it received.
pub type GuessHistory = Vec<(String, FeedbackPattern)>;

#[derive(Debug, Clone)]
pub struct Session {
    config: SolverConfig,
    optimizer: Optimizer,
    tracker: ConstraintTracker,
    attempts: GuessHistory,
    state: SessionState,
}

impl Session {
    pub fn new(dictionary: Arc<Dictionary>, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        if dictionary.word_length() != config.word_length {
            return Err(SolverError::InvalidConfig(format!(
                "dictionary holds {}-letter words but the session expects {}",
                dictionary.word_length(),
                config.word_length
            )));
        }
        Ok(Self {
            optimizer: Optimizer::new(&config),
            tracker: ConstraintTracker::new(dictionary),
            attempts: Vec::new(),
            state: SessionState::Fresh,
            config,
        })
    }

    /// Build a session over `words`, filtered to the configured length.
    pub fn from_words<I, S>(words: I, config: SolverConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dictionary = Dictionary::from_words(config.word_length, words);
        Self::new(Arc::new(dictionary), config)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        self.tracker.store().dictionary()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn attempts(&self) -> &[(String, FeedbackPattern)] {
        &self.attempts
    }

    pub fn knowledge(&self) -> &Knowledge {
        self.tracker.knowledge()
    }

    /// Words still consistent with every feedback received, in dictionary order.
    pub fn possible_words(&self) -> &[String] {
        self.tracker.possible_words()
    }

    pub fn remaining_count(&self) -> usize {
        self.tracker.store().len()
    }

    pub fn is_consistent(&self, word: &str) -> bool {
        self.tracker.is_consistent(word)
    }

    /// Record the feedback a guess received and narrow the candidates.
    pub fn apply_feedback(&mut self, guess: &str, feedback: &[Feedback]) -> Result<SessionState> {
        if self.state.is_terminal() {
            return Err(SolverError::SessionFinished(self.state));
        }

        self.tracker.add_feedback(guess, feedback)?;
        let pattern = FeedbackPattern::new(feedback);
        self.attempts.push((guess.to_ascii_lowercase(), pattern));

        self.state = if pattern.is_win() {
            SessionState::Solved
        } else if self.tracker.store().is_empty() {
            SessionState::Stuck
        } else if self.attempts.len() >= self.config.max_attempts {
            SessionState::Exhausted
        } else {
            SessionState::Active
        };

        match self.state {
            SessionState::Stuck => warn!(
                "no candidates left after {} attempts; the feedback is contradictory",
                self.attempts.len()
            ),
            SessionState::Active => debug!(
                "attempt {}: {} candidates remain",
                self.attempts.len(),
                self.remaining_count()
            ),
            state => info!("session {} after {} attempts", state, self.attempts.len()),
        }
        Ok(self.state)
    }

    pub fn apply_pattern(&mut self, guess: &str, pattern: FeedbackPattern) -> Result<SessionState> {
        self.apply_feedback(guess, &pattern.to_feedbacks())
    }

    /// The next guess according to `strategy`, or `None` when nothing is
    /// consistent with the feedback.
    pub fn best_guess(&self, strategy: Strategy) -> Option<String> {
        let candidates = self.candidate_refs();
        if candidates.is_empty() {
            return None;
        }

        if self.state == SessionState::Fresh
            && self.config.use_opening_book
            && strategy == Strategy::Entropy
            && candidates.len() > 1
        {
            return self.optimizer.strategic_first_guess(&candidates);
        }

        let pool = self.guess_pool(strategy, &candidates);
        let seed = self.config.seed.wrapping_add(self.attempts.len() as u64);
        self.optimizer
            .select(strategy, &candidates, pool.as_deref(), seed)
    }

    /// The `n` best guesses by entropy, best first.
    pub fn top_guesses(&self, n: usize) -> Vec<GuessAnalysis> {
        let candidates = self.candidate_refs();
        let pool = self.guess_pool(Strategy::Entropy, &candidates);
        self.optimizer
            .rank_by_entropy(&candidates, pool.as_deref(), n)
    }

    pub fn stats(&self) -> SessionStats {
        let total_words = self.dictionary().len();
        let possible_words = self.remaining_count();
        let elimination_rate = if total_words == 0 {
            0.0
        } else {
            1.0 - possible_words as f64 / total_words as f64
        };
        let knowledge = self.knowledge();

        SessionStats {
            total_words,
            possible_words,
            fixed_positions: knowledge.fixed().len(),
            required_letters: knowledge.required().len(),
            excluded_letters: knowledge.excluded().len(),
            attempts: self.attempts.len(),
            max_attempts: self.config.max_attempts,
            elimination_rate,
            state: self.state,
        }
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.attempts.clear();
        self.state = SessionState::Fresh;
    }

    /// Play until the session reaches a terminal state, asking `advisor` for
    /// each guess and `get_feedback` for its grading. Returns the guesses
    /// made by this call.
    pub fn solve_with_advisor<A, F>(
        &mut self,
        advisor: &mut A,
        mut get_feedback: F,
    ) -> Result<GuessHistory>
    where
        A: GuessAdvisor + ?Sized,
        F: FnMut(&str) -> FeedbackPattern,
    {
        let mut guesses = Vec::new();

        while !self.state.is_terminal() {
            let guess = match advisor.suggest(self) {
                Some(g) => g,
                None => break,
            };

            let pattern = get_feedback(&guess);
            self.apply_pattern(&guess, pattern)?;
            guesses.push((guess, pattern));
        }

        Ok(guesses)
    }

    /// Play automatically with a built-in strategy.
    pub fn solve_with_feedback<F>(
        &mut self,
        strategy: Strategy,
        get_feedback: F,
    ) -> Result<GuessHistory>
    where
        F: FnMut(&str) -> FeedbackPattern,
    {
        let mut advisor = strategy;
        self.solve_with_advisor(&mut advisor, get_feedback)
    }

    /// Solve a puzzle knowing the target word (for testing/benchmarking)
    pub fn solve_for_target(&mut self, strategy: Strategy, target: &str) -> Result<GuessHistory> {
        let target = target.to_ascii_lowercase();
        self.solve_with_feedback(strategy, |guess| FeedbackPattern::calculate(guess, &target))
    }

    /// Play every dictionary word as the secret and count how many guesses
    /// each took. Unsolved games land in the `max_attempts + 1` bucket.
    pub fn benchmark(&self, strategy: Strategy) -> Vec<(usize, usize)> {
        let mut fresh = self.clone();
        fresh.reset();
        let failed = self.config.max_attempts + 1;

        let guess_counts: Vec<usize> = self
            .dictionary()
            .words()
            .par_iter()
            .map(|target| {
                let mut session = fresh.clone();
                match session.solve_for_target(strategy, target) {
                    Ok(_) if session.state() == SessionState::Solved => session.attempts().len(),
                    _ => failed,
                }
            })
            .collect();

        let mut distribution = vec![0usize; failed + 1];
        for count in guess_counts {
            distribution[count] += 1;
        }

        distribution
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    fn candidate_refs(&self) -> Vec<&str> {
        self.possible_words().iter().map(String::as_str).collect()
    }

    // Candidates first so that ties go to words that can still win, then the
    // rest of the dictionary.
    fn guess_pool<'a>(
        &'a self,
        strategy: Strategy,
        candidates: &[&'a str],
    ) -> Option<Vec<&'a str>> {
        if !(strategy.explores() && self.config.explore_dictionary) {
            return None;
        }
        let store = self.tracker.store();
        let mut pool = candidates.to_vec();
        pool.extend(
            self.dictionary()
                .words()
                .iter()
                .map(String::as_str)
                .filter(|w| !store.contains(w)),
        );
        Some(pool)
    }
}
