use crate::consts::MAX_WORD_LENGTH;
use rand::{seq::IndexedRandom, Rng};
use std::fmt;
use thiserror::Error;

/// Words used when the configuration does not supply its own list
static DEFAULT_WORDS: &[&str] = &[
    "APPLE", "BRIDGE", "CACTUS", "DRAGON", "EAGLE", "FOREST", "GARDEN", "HARBOR", "ISLAND",
    "JUNGLE", "KETTLE", "LEMON", "MARBLE", "NEEDLE", "ORANGE", "PLANET", "QUARTZ", "RIVER",
    "SNAKE", "TIGER", "UMBRELLA", "VIOLIN", "WALRUS", "YELLOW", "ZEBRA", "CODE", "GAME", "WORD",
];

/// A target word: a nonempty sequence of uppercase ASCII letters
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Word(Vec<char>);

impl Word {
    pub(crate) fn letters(&self) -> &[char] {
        &self.0
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Return the letter at index `i`, if any
    pub(crate) fn get(&self, i: usize) -> Option<char> {
        self.0.get(i).copied()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Word {
    type Err = ParseWordError;

    /// Parse a word, converting it to uppercase
    fn from_str(s: &str) -> Result<Word, ParseWordError> {
        if s.is_empty() {
            return Err(ParseWordError::Empty);
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(ParseWordError::BadChar(c));
        }
        if s.len() > MAX_WORD_LENGTH {
            return Err(ParseWordError::TooLong(s.len()));
        }
        Ok(Word(s.chars().map(|c| c.to_ascii_uppercase()).collect()))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParseWordError {
    #[error("words cannot be empty")]
    Empty,
    #[error("words may only contain ASCII letters, found {0:?}")]
    BadChar(char),
    #[error("words may be at most {max} letters long, got {0}", max = MAX_WORD_LENGTH)]
    TooLong(usize),
}

/// The catalog of words to choose from
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WordList(Vec<Word>);

impl WordList {
    /// Create a word list from the given words.  Returns `None` if `words` is
    /// empty.
    pub(crate) fn new(words: Vec<Word>) -> Option<WordList> {
        (!words.is_empty()).then_some(WordList(words))
    }

    /// Pick a word uniformly at random
    ///
    /// # Panics
    ///
    /// Never; [`WordList::new()`] refuses to build an empty list.
    pub(crate) fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        self.0
            .choose(rng)
            .expect("word list should be nonempty")
            .clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl Default for WordList {
    fn default() -> WordList {
        WordList(
            DEFAULT_WORDS
                .iter()
                .map(|s| Word(s.chars().collect()))
                .collect(),
        )
    }
}
