// src/phrases.rs
// The phrase pool a card is drawn from.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::defs::{FREE_SPACE, PHRASESPERCARD};
use crate::error::BingoError;

const DEFAULT_PHRASES: &str = include_str!("../assets/bingo-phrases.json");

/// Ordered list of candidate phrases, validated to be non-empty,
/// unique and long enough to fill a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePool {
    phrases: Vec<String>,
}

impl PhrasePool {
    pub fn new(phrases: Vec<String>) -> Result<Self, BingoError> {
        let mut seen = HashSet::new();
        for (index, phrase) in phrases.iter().enumerate() {
            if phrase.trim().is_empty() {
                return Err(BingoError::EmptyPhrase { index });
            }
            // The center cell shows this text; a phrase must never look like it.
            if phrase.trim().eq_ignore_ascii_case(FREE_SPACE) {
                return Err(BingoError::ReservedPhrase { index });
            }
            if !seen.insert(phrase.as_str()) {
                return Err(BingoError::DuplicatePhrase { phrase: phrase.clone() });
            }
        }

        if phrases.len() < PHRASESPERCARD {
            return Err(BingoError::NotEnoughPhrases {
                required: PHRASESPERCARD,
                found: phrases.len(),
            });
        }

        Ok(Self { phrases })
    }

    /// The pool shipped with the binary.
    pub fn builtin() -> Result<Self, BingoError> {
        Self::from_json_str(DEFAULT_PHRASES)
    }

    pub fn from_json_str(content: &str) -> Result<Self, BingoError> {
        let phrases: Vec<String> = serde_json::from_str(content)?;
        Self::new(phrases)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BingoError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BingoError::PhraseFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.iter().any(|p| p == phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("Phrase {i}")).collect()
    }

    #[test]
    fn test_builtin_pool_is_valid() {
        let pool = PhrasePool::builtin().unwrap();
        assert!(pool.len() >= PHRASESPERCARD);
        assert!(pool.contains("Ship it"));
    }

    #[test]
    fn test_exactly_enough_phrases() {
        let pool = PhrasePool::new(numbered(PHRASESPERCARD)).unwrap();
        assert_eq!(pool.len(), 24);
    }

    #[test]
    fn test_too_few_phrases() {
        let err = PhrasePool::new(numbered(23)).unwrap_err();
        match err {
            BingoError::NotEnoughPhrases { required, found } => {
                assert_eq!(required, 24);
                assert_eq!(found, 23);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_phrase_rejected() {
        let mut phrases = numbered(25);
        phrases[10] = "Phrase 3".to_string();
        let err = PhrasePool::new(phrases).unwrap_err();
        assert!(matches!(err, BingoError::DuplicatePhrase { ref phrase } if phrase == "Phrase 3"));
    }

    #[test]
    fn test_free_space_phrase_rejected() {
        let mut phrases = numbered(23);
        phrases.push("FREE SPACE".to_string());
        let err = PhrasePool::new(phrases).unwrap_err();
        assert!(matches!(err, BingoError::ReservedPhrase { index: 23 }));

        let mut phrases = numbered(30);
        phrases[2] = "  free space ".to_string();
        let err = PhrasePool::new(phrases).unwrap_err();
        assert!(matches!(err, BingoError::ReservedPhrase { index: 2 }));
    }

    #[test]
    fn test_blank_phrase_rejected() {
        let mut phrases = numbered(25);
        phrases[4] = "   ".to_string();
        let err = PhrasePool::new(phrases).unwrap_err();
        assert!(matches!(err, BingoError::EmptyPhrase { index: 4 }));
    }

    #[test]
    fn test_malformed_json() {
        let err = PhrasePool::from_json_str("{\"not\": \"a list\"}").unwrap_err();
        assert!(matches!(err, BingoError::PhraseFormat(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PhrasePool::from_file("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
