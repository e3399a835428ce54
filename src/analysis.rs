//! Descriptive statistics over a word list.
//!
//! Nothing here influences which guess is chosen; the numbers only explain
//! what a candidate set looks like.

use std::collections::BTreeMap;

use itertools::Itertools;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternAnalysis {
    pub total_words: usize,
    /// Five most common letters at each position.
    pub position_letters: BTreeMap<usize, Vec<(char, usize)>>,
    /// Ten most common letters overall, counting repeats.
    pub common_letters: Vec<(char, usize)>,
    /// How many words carry a vowel at each position.
    pub vowel_positions: BTreeMap<usize, usize>,
    pub common_prefixes: Vec<(String, usize)>,
    pub common_suffixes: Vec<(String, usize)>,
}

/// Summarise `words`, or `None` for an empty list. Counts that tie are
/// ordered alphabetically.
pub fn analyze_patterns(words: &[&str]) -> Option<PatternAnalysis> {
    let word_length = words.iter().map(|w| w.chars().count()).max()?;

    let position_letters = (0..word_length)
        .map(|pos| {
            let letters = words.iter().filter_map(|w| w.chars().nth(pos));
            (pos, most_common(letters, 5))
        })
        .collect();

    let common_letters = most_common(words.iter().flat_map(|w| w.chars()), 10);

    let mut vowel_positions: BTreeMap<usize, usize> = (0..word_length).map(|p| (p, 0)).collect();
    for word in words {
        for (pos, letter) in word.chars().enumerate() {
            if VOWELS.contains(&letter) {
                *vowel_positions.entry(pos).or_insert(0) += 1;
            }
        }
    }

    let common_prefixes = most_common(
        words.iter().map(|w| w.chars().take(2).collect::<String>()),
        5,
    );
    let common_suffixes = most_common(
        words.iter().map(|w| {
            let chars: Vec<char> = w.chars().collect();
            chars[chars.len().saturating_sub(2)..].iter().collect::<String>()
        }),
        5,
    );

    Some(PatternAnalysis {
        total_words: words.len(),
        position_letters,
        common_letters,
        vowel_positions,
        common_prefixes,
        common_suffixes,
    })
}

fn most_common<T, I>(items: I, n: usize) -> Vec<(T, usize)>
where
    T: Ord + std::hash::Hash,
    I: Iterator<Item = T>,
{
    items
        .counts()
        .into_iter()
        .sorted_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)))
        .take(n)
        .collect()
}
