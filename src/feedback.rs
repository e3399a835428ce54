//! Feedback calculation for guesses.
//!
//! A guess graded against a secret produces one [`Feedback`] per letter. The
//! whole vector packs into a [`FeedbackPattern`], a base-3 number that is cheap
//! to hash and count when partitioning a candidate set.

use std::fmt;

use crate::MAX_WORD_LENGTH;

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Correct,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word once duplicates are accounted for (gray)
    Absent,
}

impl Feedback {
    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse from a character (g=green, y=yellow, b/x=gray)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Feedback::Correct),
            'y' | '1' => Some(Feedback::Present),
            'b' | 'x' | '0' => Some(Feedback::Absent),
            _ => None,
        }
    }

    fn digit(self) -> u32 {
        match self {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Correct => 2,
        }
    }

    fn from_digit(digit: u32) -> Self {
        match digit {
            0 => Feedback::Absent,
            1 => Feedback::Present,
            2 => Feedback::Correct,
            _ => unreachable!("base-3 digit out of range"),
        }
    }
}

/// A complete feedback pattern for a guess.
///
/// Position `i` contributes `d * 3^i` where `d` is 0 (absent), 1 (present)
/// or 2 (correct). Twenty positions still fit in a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackPattern {
    code: u32,
    len: u8,
}

impl FeedbackPattern {
    /// Create a new pattern from individual feedback values
    pub fn new(feedbacks: &[Feedback]) -> Self {
        debug_assert!(feedbacks.len() <= MAX_WORD_LENGTH);
        let mut code = 0;
        let mut multiplier = 1;
        for fb in feedbacks {
            code += fb.digit() * multiplier;
            multiplier *= 3;
        }
        Self {
            code,
            len: feedbacks.len() as u8,
        }
    }

    /// The pattern indicating every letter is correct.
    pub fn all_correct(len: usize) -> Self {
        Self::new(&vec![Feedback::Correct; len])
    }

    /// Number of distinct patterns for words of `len` letters (3^len).
    pub fn count_for_length(len: usize) -> usize {
        3usize.pow(len as u32)
    }

    pub fn code(self) -> u32 {
        self.code
    }

    pub fn len(self) -> usize {
        self.len as usize
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Calculate the feedback pattern for a guess against a target word.
    ///
    /// Exact matches are marked first and consume their target letter. The
    /// remaining guess letters, left to right, each consume one unmatched
    /// occurrence in the target to become Present; anything left over is
    /// Absent. Both words must be lowercase ascii of equal length; letters
    /// past [`MAX_WORD_LENGTH`] are ignored.
    pub fn calculate(guess: &str, target: &str) -> Self {
        let guess_bytes = guess.as_bytes();
        let target_bytes = target.as_bytes();

        debug_assert_eq!(guess_bytes.len(), target_bytes.len());

        let len = guess_bytes
            .len()
            .min(target_bytes.len())
            .min(MAX_WORD_LENGTH);
        let mut digits = [0u32; MAX_WORD_LENGTH];
        let mut target_remaining = [0u8; 26];

        for i in 0..len {
            if guess_bytes[i] == target_bytes[i] {
                digits[i] = 2;
            } else {
                target_remaining[letter_index(target_bytes[i])] += 1;
            }
        }

        for i in 0..len {
            if digits[i] != 2 {
                let idx = letter_index(guess_bytes[i]);
                if target_remaining[idx] > 0 {
                    digits[i] = 1;
                    target_remaining[idx] -= 1;
                }
            }
        }

        let mut code = 0;
        let mut multiplier = 1;
        for digit in &digits[..len] {
            code += digit * multiplier;
            multiplier *= 3;
        }
        Self {
            code,
            len: len as u8,
        }
    }

    /// Convert pattern to its per-position feedback values
    pub fn to_feedbacks(self) -> Vec<Feedback> {
        let mut code = self.code;
        (0..self.len)
            .map(|_| {
                let fb = Feedback::from_digit(code % 3);
                code /= 3;
                fb
            })
            .collect()
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(self) -> bool {
        self == Self::all_correct(self.len())
    }

    /// Parse a pattern from a string like "gybbb" or "21000"
    pub fn parse(s: &str) -> Option<Self> {
        let feedbacks: Option<Vec<_>> = s.chars().map(Feedback::from_char).collect();
        let feedbacks = feedbacks?;
        if feedbacks.is_empty() || feedbacks.len() > MAX_WORD_LENGTH {
            return None;
        }
        Some(Self::new(&feedbacks))
    }

    /// Display as emoji string
    pub fn to_emoji_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_char()).collect()
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

// Out-of-range bytes clamp to the last slot; callers pass validated words.
fn letter_index(b: u8) -> usize {
    (b.wrapping_sub(b'a') as usize).min(25)
}
