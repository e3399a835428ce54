//! The dictionary together with the words still possible.

use std::sync::Arc;

use crate::dictionary::Dictionary;

#[derive(Debug, Clone)]
pub struct CandidateStore {
    dictionary: Arc<Dictionary>,
    candidates: Vec<String>,
}

impl CandidateStore {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self {
            candidates: dictionary.words().to_vec(),
            dictionary,
        }
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Live candidates, in dictionary order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.candidates
            .binary_search_by(|w| w.as_str().cmp(word))
            .is_ok()
    }

    /// Keep only the candidates accepted by `keep`. Already eliminated words
    /// are never looked at again.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.candidates.retain(|word| keep(word));
    }

    pub fn reset(&mut self) {
        self.candidates.clear();
        self.candidates.extend_from_slice(self.dictionary.words());
    }
}
