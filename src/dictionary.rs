//! Word lists.
//!
//! A [`Dictionary`] is the validated, immutable input to a session: lowercase,
//! alphabetic, fixed-length, sorted and free of duplicates.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Result, SolverError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    word_length: usize,
    words: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary, dropping entries of the wrong length or with
    /// non-alphabetic characters.
    pub fn from_words<I, S>(word_length: usize, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self {
            word_length,
            words: Vec::new(),
        };
        dictionary.add_words(words);
        dictionary
    }

    /// Load a dictionary with one word per line.
    pub fn load(path: impl AsRef<Path>, word_length: usize) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SolverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::from_words(word_length, contents.lines());
        debug!(
            "loaded {} words of length {} from {}",
            dictionary.len(),
            word_length,
            path.display()
        );
        Ok(dictionary)
    }

    /// The five-letter word list bundled with the crate.
    pub fn embedded() -> Self {
        Self::from_words(5, include_str!("../dictionary/words.txt").lines())
    }

    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let word_length = self.word_length;
        self.words.extend(
            words
                .into_iter()
                .filter_map(|w| normalize(w.as_ref(), word_length)),
        );
        self.words.sort_unstable();
        self.words.dedup();
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.words.binary_search(&word).is_ok()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn normalize(raw: &str, word_length: usize) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if word.len() == word_length && word.bytes().all(|b| b.is_ascii_lowercase()) {
        Some(word)
    } else {
        None
    }
}
