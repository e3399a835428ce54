use std::fs;

use wordle_csp::{Dictionary, SolverError};

#[test]
fn test_from_words_normalizes() {
    let dictionary = Dictionary::from_words(5, ["Crane", " slate ", "crane", "toolong", "ab1de", "four"]);
    assert_eq!(dictionary.words(), &["crane".to_string(), "slate".to_string()]);
    assert_eq!(dictionary.len(), 2);
    assert!(dictionary.contains("CRANE"));
    assert!(!dictionary.contains("trace"));
}

#[test]
fn test_add_words_keeps_order() {
    let mut dictionary = Dictionary::from_words(5, ["slate"]);
    dictionary.add_words(["arose", "slate", "zebra"]);
    assert_eq!(
        dictionary.words(),
        &["arose".to_string(), "slate".to_string(), "zebra".to_string()]
    );
}

#[test]
fn test_embedded_dictionary() {
    let dictionary = Dictionary::embedded();
    assert_eq!(dictionary.word_length(), 5);
    assert!(dictionary.len() > 500);
    assert!(dictionary.contains("arose"));
    assert!(dictionary.words().iter().all(|w| w.len() == 5));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("wordle-csp-{}.txt", std::process::id()));
    fs::write(&path, "maison\nCHAISE\nchat\n\ntable1\nfleurs\n").unwrap();

    let dictionary = Dictionary::load(&path, 6).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(dictionary.word_length(), 6);
    assert_eq!(
        dictionary.words(),
        &["chaise".to_string(), "fleurs".to_string(), "maison".to_string()]
    );
}

#[test]
fn test_load_missing_file() {
    let err = Dictionary::load("/definitely/not/here.txt", 5).unwrap_err();
    assert!(matches!(err, SolverError::Io { .. }));
}
