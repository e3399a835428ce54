//! Guess selection.
//!
//! Every strategy scores a pool of guesses against the live candidate set.
//! Entropy maximises the expected information of the feedback, minimax
//! minimises the largest group of candidates a guess can leave behind, and
//! frequency is a cheap positional heuristic used for hard mode and as a
//! fallback when the entropy pass would be too expensive.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::SolverConfig;
use crate::feedback::FeedbackPattern;

/// Openers known to split common word lists well, in order of preference.
pub const PREFERRED_OPENERS: [&str; 10] = [
    "arose", "slate", "crane", "soare", "trace", "crate", "irate", "stare", "adieu", "audio",
];

/// Score added once for every distinct letter of a word.
pub const DISTINCT_LETTER_BONUS: f64 = 0.1;

/// Patterns are counted in a flat array up to this many; beyond it a hash map is used.
const DENSE_PATTERN_LIMIT: usize = 2187;

/// How the next guess is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Maximise the Shannon entropy of the feedback distribution.
    Entropy,
    /// Minimise the largest group of remaining candidates.
    Minimax,
    /// Pick the candidate with the most common letters per position (hard mode).
    Frequency,
    /// Take the first remaining candidate.
    First,
    /// Take a seeded random candidate.
    Random,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Entropy,
        Strategy::Minimax,
        Strategy::Frequency,
        Strategy::First,
        Strategy::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Entropy => "entropy",
            Strategy::Minimax => "minimax",
            Strategy::Frequency => "frequency",
            Strategy::First => "first",
            Strategy::Random => "random",
        }
    }

    /// Whether the strategy may guess words that are no longer candidates.
    pub fn explores(self) -> bool {
        matches!(self, Strategy::Entropy | Strategy::Minimax)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "entropy" | "max_info" | "info" => Ok(Strategy::Entropy),
            "minimax" => Ok(Strategy::Minimax),
            "frequency" | "freq" | "hard" => Ok(Strategy::Frequency),
            "first" => Ok(Strategy::First),
            "random" => Ok(Strategy::Random),
            other => Err(format!(
                "unknown strategy '{}', expected one of entropy, minimax, frequency, first, random",
                other
            )),
        }
    }
}

/// Result of analyzing a potential guess
#[derive(Debug, Clone, PartialEq)]
pub struct GuessAnalysis {
    pub word: String,
    pub entropy: f64,
    pub expected_remaining: f64,
    pub is_possible_answer: bool,
}

/// Normalised frequency of each `(position, letter)` pair.
pub type FrequencyTable = FxHashMap<(usize, char), f64>;

/// Sizes of the groups `candidates` splits into under the feedback of
/// `guess`, largest first.
pub fn partition_sizes(guess: &str, candidates: &[&str]) -> Vec<usize> {
    let pattern_count = FeedbackPattern::count_for_length(guess.len().min(crate::MAX_WORD_LENGTH));

    let mut sizes: Vec<usize> = if pattern_count <= DENSE_PATTERN_LIMIT {
        let mut counts = vec![0usize; pattern_count];
        for answer in candidates {
            counts[FeedbackPattern::calculate(guess, answer).code() as usize] += 1;
        }
        counts.into_iter().filter(|&c| c > 0).collect()
    } else {
        let mut counts: FxHashMap<u32, usize> = FxHashMap::default();
        for answer in candidates {
            *counts
                .entry(FeedbackPattern::calculate(guess, answer).code())
                .or_insert(0) += 1;
        }
        counts.into_values().collect()
    };

    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

/// Shannon entropy, in bits, of the feedback `guess` produces over `candidates`.
pub fn calculate_entropy(guess: &str, candidates: &[&str]) -> f64 {
    let n = candidates.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let mut entropy = 0.0;
    for count in partition_sizes(guess, candidates) {
        let p = count as f64 / n;
        entropy -= p * p.log2();
    }
    entropy.max(0.0)
}

/// Size of the largest group `guess` can leave behind.
pub fn max_partition(guess: &str, candidates: &[&str]) -> usize {
    partition_sizes(guess, candidates)
        .first()
        .copied()
        .unwrap_or(0)
}

pub fn letter_frequencies(words: &[&str]) -> FrequencyTable {
    let mut counts: FxHashMap<(usize, char), usize> = FxHashMap::default();
    for word in words {
        for (pos, letter) in word.chars().enumerate() {
            *counts.entry((pos, letter)).or_insert(0) += 1;
        }
    }

    let total = words.len() as f64;
    counts
        .into_iter()
        .map(|(key, count)| (key, count as f64 / total))
        .collect()
}

/// Sum of the word's positional letter frequencies plus a bonus per
/// distinct letter.
pub fn score_by_frequency(word: &str, frequencies: &FrequencyTable) -> f64 {
    let mut seen = FxHashSet::default();
    let mut score = 0.0;
    for (pos, letter) in word.chars().enumerate() {
        score += frequencies.get(&(pos, letter)).copied().unwrap_or(0.0);
        if seen.insert(letter) {
            score += DISTINCT_LETTER_BONUS;
        }
    }
    score
}

/// Highest frequency score among `candidates`; the first one wins ties.
pub fn best_by_frequency(candidates: &[&str]) -> Option<String> {
    let frequencies = letter_frequencies(candidates);
    let mut best: Option<(&str, f64)> = None;
    for &word in candidates {
        let score = score_by_frequency(word, &frequencies);
        trace!("frequency {} = {:.4}", word, score);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((word, score));
        }
    }
    best.map(|(word, _)| word.to_string())
}

/// Strategy scorer configured from a [`SolverConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optimizer {
    minimax_pool_cap: Option<usize>,
    opening_prefix: usize,
    entropy_work_limit: Option<usize>,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(&SolverConfig::default())
    }
}

impl Optimizer {
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            minimax_pool_cap: config.minimax_pool_cap,
            opening_prefix: config.opening_prefix.max(1),
            entropy_work_limit: config.entropy_work_limit,
        }
    }

    /// Choose a guess with `strategy`.
    ///
    /// `pool` holds the guesses the exploring strategies may score; the
    /// others only ever return a candidate. `seed` drives [`Strategy::Random`].
    pub fn select(
        &self,
        strategy: Strategy,
        candidates: &[&str],
        pool: Option<&[&str]>,
        seed: u64,
    ) -> Option<String> {
        match strategy {
            Strategy::Entropy => self.best_by_entropy(candidates, pool),
            Strategy::Minimax => self.best_by_minimax(candidates, pool),
            Strategy::Frequency => best_by_frequency(candidates),
            Strategy::First => candidates.first().map(|w| w.to_string()),
            Strategy::Random => {
                let mut rng = StdRng::seed_from_u64(seed);
                candidates.choose(&mut rng).map(|w| w.to_string())
            }
        }
    }

    /// The guess with the highest entropy over `candidates`.
    ///
    /// The pool is only consulted while more than two candidates remain;
    /// otherwise guessing a candidate is at least as good. The first word in
    /// pool order wins ties.
    pub fn best_by_entropy(&self, candidates: &[&str], pool: Option<&[&str]>) -> Option<String> {
        match candidates {
            [] => return None,
            [only] => return Some(only.to_string()),
            _ => {}
        }

        let pool = effective_pool(candidates, pool);
        if self.entropy_too_costly(pool.len(), candidates.len()) {
            debug!(
                "entropy over {} x {} exceeds the work limit, using frequency",
                pool.len(),
                candidates.len()
            );
            return best_by_frequency(candidates);
        }

        pool.par_iter()
            .enumerate()
            .map(|(idx, word)| (idx, calculate_entropy(word, candidates)))
            .reduce_with(|a, b| {
                if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
                    b
                } else {
                    a
                }
            })
            .map(|(idx, entropy)| {
                debug!("entropy picked {} ({:.3} bits)", pool[idx], entropy);
                pool[idx].to_string()
            })
    }

    /// The `n` highest-entropy guesses, best first. Equal entropies favour
    /// possible answers, then pool order.
    pub fn rank_by_entropy(
        &self,
        candidates: &[&str],
        pool: Option<&[&str]>,
        n: usize,
    ) -> Vec<GuessAnalysis> {
        match candidates {
            [] => return vec![],
            [only] => {
                return vec![GuessAnalysis {
                    word: only.to_string(),
                    entropy: 0.0,
                    expected_remaining: 1.0,
                    is_possible_answer: true,
                }]
            }
            _ => {}
        }

        let possible: FxHashSet<&str> = candidates.iter().copied().collect();
        let pool = effective_pool(candidates, pool);
        let total = candidates.len() as f64;

        let mut analyses: Vec<GuessAnalysis> = pool
            .par_iter()
            .map(|&word| {
                let entropy = calculate_entropy(word, candidates);
                GuessAnalysis {
                    word: word.to_string(),
                    entropy,
                    expected_remaining: total / 2_f64.powf(entropy),
                    is_possible_answer: possible.contains(word),
                }
            })
            .collect();

        analyses.sort_by(|a, b| match b.entropy.partial_cmp(&a.entropy) {
            Some(std::cmp::Ordering::Equal) => b.is_possible_answer.cmp(&a.is_possible_answer),
            Some(ord) => ord,
            None => std::cmp::Ordering::Equal,
        });

        analyses.truncate(n);
        analyses
    }

    /// The guess whose largest resulting group is smallest. Only the first
    /// `minimax_pool_cap` words of the pool are scored.
    pub fn best_by_minimax(&self, candidates: &[&str], pool: Option<&[&str]>) -> Option<String> {
        if candidates.len() <= 2 {
            return candidates.first().map(|w| w.to_string());
        }

        let pool = pool.filter(|p| !p.is_empty()).unwrap_or(candidates);
        let pool = match self.minimax_pool_cap {
            Some(cap) => &pool[..pool.len().min(cap)],
            None => pool,
        };

        pool.par_iter()
            .enumerate()
            .map(|(idx, word)| (max_partition(word, candidates), idx))
            .min()
            .map(|(worst, idx)| {
                debug!("minimax picked {} (worst case {})", pool[idx], worst);
                pool[idx].to_string()
            })
    }

    /// The first preferred opener present in `dictionary`, or the best
    /// entropy guess among the dictionary's leading words.
    pub fn strategic_first_guess(&self, dictionary: &[&str]) -> Option<String> {
        if let Some(opener) = PREFERRED_OPENERS
            .iter()
            .find(|&&opener| dictionary.contains(&opener))
        {
            return Some(opener.to_string());
        }

        let prefix = &dictionary[..dictionary.len().min(self.opening_prefix)];
        self.best_by_entropy(dictionary, Some(prefix))
    }

    fn entropy_too_costly(&self, pool: usize, candidates: usize) -> bool {
        self.entropy_work_limit
            .map_or(false, |limit| pool.saturating_mul(candidates) > limit)
    }
}

fn effective_pool<'a>(candidates: &'a [&'a str], pool: Option<&'a [&'a str]>) -> &'a [&'a str] {
    match pool {
        Some(pool) if candidates.len() > 2 && !pool.is_empty() => pool,
        _ => candidates,
    }
}
