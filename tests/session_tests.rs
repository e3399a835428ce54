use std::sync::Arc;

use wordle_csp::{
    Dictionary, Feedback, FeedbackPattern, GuessAdvisor, Session, SessionState, SolverConfig,
    SolverError, Strategy,
};

use Feedback::{Absent, Correct};

fn get_test_words() -> Vec<&'static str> {
    vec![
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ]
}

fn session(words: &[&str]) -> Session {
    Session::from_words(words, SolverConfig::default()).unwrap()
}

#[test]
fn test_session_creation() {
    let words = get_test_words();
    let session = session(&words);
    assert_eq!(session.remaining_count(), words.len());
    assert_eq!(session.state(), SessionState::Fresh);
}

#[test]
fn test_mismatched_config_rejected() {
    let dictionary = Arc::new(Dictionary::from_words(5, get_test_words()));
    let config = SolverConfig::default().with_word_length(6);
    assert!(matches!(
        Session::new(dictionary.clone(), config),
        Err(SolverError::InvalidConfig(_))
    ));

    let config = SolverConfig::default().with_max_attempts(0);
    assert!(matches!(
        Session::new(dictionary, config),
        Err(SolverError::InvalidConfig(_))
    ));
}

#[test]
fn test_apply_feedback() {
    let mut session = session(&get_test_words());

    let pattern = FeedbackPattern::calculate("crane", "crate");
    let state = session.apply_pattern("crane", pattern).unwrap();

    assert_eq!(state, SessionState::Active);
    assert!(session.remaining_count() < 10);
    assert!(session.possible_words().contains(&"crate".to_string()));
    assert_eq!(session.attempts().len(), 1);
}

#[test]
fn test_invalid_feedback_is_all_or_nothing() {
    let mut session = session(&get_test_words());
    let err = session.apply_feedback("crane", &[Correct; 3]).unwrap_err();
    assert!(matches!(err, SolverError::InvalidInputLength { .. }));
    assert_eq!(session.state(), SessionState::Fresh);
    assert!(session.attempts().is_empty());
    assert!(session.knowledge().is_empty());
}

#[test]
fn test_find_best_guess() {
    let session = session(&get_test_words());
    for strategy in Strategy::ALL {
        let best = session.best_guess(strategy);
        assert!(best.is_some(), "{} gave no guess", strategy);
    }
}

#[test]
fn test_first_guess_uses_opening_book() {
    let session = session(&get_test_words());
    assert_eq!(session.best_guess(Strategy::Entropy), Some("slate".to_string()));

    let config = SolverConfig::default().with_opening_book(false);
    let session = Session::from_words(get_test_words(), config).unwrap();
    let best = session.best_guess(Strategy::Entropy).unwrap();
    assert!(get_test_words().contains(&best.as_str()));
}

#[test]
fn test_find_best_guess_single_answer() {
    let session = session(&["crane"]);
    for strategy in Strategy::ALL {
        assert_eq!(session.best_guess(strategy), Some("crane".to_string()));
    }
}

#[test]
fn test_two_remaining_words() {
    let session = session(&["crane", "trace"]);
    let best = session.best_guess(Strategy::Entropy).unwrap();
    assert!(best == "crane" || best == "trace");
}

#[test]
fn test_empty_possible_answers() {
    let mut session = session(&get_test_words());

    let state = session
        .apply_feedback("zzzzz", &[Correct, Absent, Absent, Absent, Absent])
        .unwrap();

    assert_eq!(state, SessionState::Stuck);
    for strategy in Strategy::ALL {
        assert!(session.best_guess(strategy).is_none());
    }
    assert!(session.top_guesses(5).is_empty());

    let err = session.apply_feedback("crane", &[Absent; 5]).unwrap_err();
    assert!(matches!(err, SolverError::SessionFinished(SessionState::Stuck)));
}

#[test]
fn test_contradictory_feedback_is_stuck() {
    let mut session = session(&["arose", "bland", "wacky"]);
    session
        .apply_feedback("arose", &[Feedback::Present, Absent, Absent, Absent, Absent])
        .unwrap();
    assert_eq!(session.state(), SessionState::Active);

    let state = session.apply_feedback("bland", &[Absent; 5]).unwrap();
    assert_eq!(state, SessionState::Stuck);
    assert_eq!(session.remaining_count(), 0);
}

#[test]
fn test_solved_state() {
    let mut session = session(&get_test_words());
    let state = session
        .apply_pattern("crate", FeedbackPattern::all_correct(5))
        .unwrap();
    assert_eq!(state, SessionState::Solved);
    assert_eq!(session.possible_words(), &["crate".to_string()]);
}

#[test]
fn test_exhausted_state() {
    let config = SolverConfig::default().with_max_attempts(2);
    let mut session = Session::from_words(get_test_words(), config).unwrap();

    let pattern = FeedbackPattern::calculate("beast", "crate");
    assert_eq!(session.apply_pattern("beast", pattern).unwrap(), SessionState::Active);
    let pattern = FeedbackPattern::calculate("roast", "crate");
    assert_eq!(session.apply_pattern("roast", pattern).unwrap(), SessionState::Exhausted);
    assert!(matches!(
        session.apply_pattern("crate", FeedbackPattern::all_correct(5)),
        Err(SolverError::SessionFinished(SessionState::Exhausted))
    ));
}

#[test]
fn test_stats() {
    let words = get_test_words();
    let mut session = session(&words);

    let stats = session.stats();
    assert_eq!(stats.total_words, words.len());
    assert_eq!(stats.possible_words, words.len());
    assert_eq!(stats.elimination_rate, 0.0);
    assert_eq!(stats.state, SessionState::Fresh);

    let mut previous = stats.elimination_rate;
    for guess in ["beast", "roast", "crane"] {
        let pattern = FeedbackPattern::calculate(guess, "crate");
        session.apply_pattern(guess, pattern).unwrap();
        let stats = session.stats();
        assert!((0.0..=1.0).contains(&stats.elimination_rate));
        assert!(stats.elimination_rate >= previous);
        previous = stats.elimination_rate;
    }
    assert_eq!(session.remaining_count(), 1);
    assert!((previous - 0.9).abs() < 1e-12);
}

#[test]
fn test_stats_empty_dictionary() {
    let session = session(&[]);
    let stats = session.stats();
    assert_eq!(stats.total_words, 0);
    assert_eq!(stats.elimination_rate, 0.0);
    assert_eq!(session.best_guess(Strategy::Entropy), None);
}

#[test]
fn test_reset() {
    let words = get_test_words();
    let mut session = session(&words);

    let pattern = FeedbackPattern::calculate("crane", "toast");
    session.apply_pattern("crane", pattern).unwrap();
    assert!(session.remaining_count() < words.len());

    session.reset();
    assert_eq!(session.state(), SessionState::Fresh);
    assert_eq!(session.possible_words(), session.dictionary().words());
    assert!(session.knowledge().is_empty());
    assert!(session.attempts().is_empty());
    assert_eq!(session.stats().elimination_rate, 0.0);
}

#[test]
fn test_solve_for_target() {
    let mut session = session(&get_test_words());

    let guesses = session.solve_for_target(Strategy::Entropy, "crate").unwrap();

    assert!(!guesses.is_empty());
    assert!(guesses.len() <= 6);

    let (final_guess, final_pattern) = guesses.last().unwrap();
    assert!(final_pattern.is_win());
    assert_eq!(final_guess, "crate");
    assert_eq!(session.state(), SessionState::Solved);
}

#[test]
fn test_solve_various_targets() {
    let words = get_test_words();

    for strategy in [Strategy::Entropy, Strategy::Frequency, Strategy::First] {
        for target in &words {
            let mut session = session(&words);
            let guesses = session.solve_for_target(strategy, target).unwrap();

            assert!(!guesses.is_empty(), "{}: no guesses for {}", strategy, target);
            assert!(guesses.len() <= 6, "{}: too many guesses for {}", strategy, target);

            let (final_guess, final_pattern) = guesses.last().unwrap();
            assert!(final_pattern.is_win(), "{}: didn't win for {}", strategy, target);
            assert_eq!(final_guess, target);
        }
    }
}

#[test]
fn test_with_embedded_dictionary() {
    let dictionary = Arc::new(Dictionary::embedded());
    let mut session = Session::new(dictionary, SolverConfig::default()).unwrap();

    let guesses = session.solve_for_target(Strategy::Entropy, "snail").unwrap();
    assert!(!guesses.is_empty());
    assert!(guesses.len() <= 6);
    assert_eq!(guesses[0].0, "arose");
    assert!(guesses.last().unwrap().1.is_win());
}

#[test]
fn test_top_guesses() {
    let session = session(&get_test_words());

    let top = session.top_guesses(5);
    assert_eq!(top.len(), 5);
    for pair in top.windows(2) {
        assert!(pair[0].entropy >= pair[1].entropy);
    }
}

#[test]
fn test_hard_mode_guesses_stay_consistent() {
    let mut session = session(&get_test_words());
    let pattern = FeedbackPattern::calculate("crane", "crate");
    session.apply_pattern("crane", pattern).unwrap();

    let guess = session.best_guess(Strategy::Frequency).unwrap();
    assert!(guess.starts_with("cra"), "hard mode violation: {}", guess);
    assert!(session.is_consistent(&guess));
}

#[test]
fn test_benchmark_distribution() {
    let words = get_test_words();
    let session = session(&words);
    let distribution = session.benchmark(Strategy::Entropy);

    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    assert_eq!(total, words.len());
    assert!(distribution.iter().all(|(g, _)| *g >= 1 && *g <= 6));
}

struct Scripted(Vec<&'static str>);

impl GuessAdvisor for Scripted {
    fn suggest(&mut self, _session: &Session) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0).to_string())
        }
    }
}

#[test]
fn test_external_advisor() {
    let mut session = session(&get_test_words());
    let mut advisor = Scripted(vec!["beast", "crate", "toast"]);

    let guesses = session
        .solve_with_advisor(&mut advisor, |guess| FeedbackPattern::calculate(guess, "crate"))
        .unwrap();

    assert_eq!(guesses.len(), 2);
    assert_eq!(session.state(), SessionState::Solved);
    assert_eq!(advisor.0, vec!["toast"]);
}

#[test]
fn test_sessions_share_a_dictionary_across_threads() {
    let dictionary = Arc::new(Dictionary::from_words(5, get_test_words()));
    let handles: Vec<_> = ["crate", "toast", "arise"]
        .into_iter()
        .map(|target| {
            let dictionary = Arc::clone(&dictionary);
            std::thread::spawn(move || {
                let mut session = Session::new(dictionary, SolverConfig::default()).unwrap();
                session.solve_for_target(Strategy::Entropy, target).unwrap();
                session.state()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), SessionState::Solved);
    }
}
