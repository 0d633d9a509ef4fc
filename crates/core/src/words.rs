//! Word pool - the vocabulary asteroids are labelled with.
//!
//! The pool is loaded once per session from a line-oriented text resource.
//! Draws are uniform over the words not yet used in the current cycle; the
//! caller owns the exclusion set and clears it once every word has appeared
//! (see [`WordCycle`]).

use std::collections::HashSet;

use thiserror::Error;

use crate::rng::SimpleRng;

/// Failure to obtain a usable vocabulary. Fatal to the session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("word source `{source_name}` is unreachable")]
    Unreachable {
        source_name: String,
        #[source]
        io: std::io::Error,
    },
    #[error("word source `{source_name}` contains no usable words")]
    Empty { source_name: String },
}

/// Immutable, de-duplicated, non-empty list of words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Build a pool from text: one word per line, trimmed, blank lines dropped.
    ///
    /// Repeated lines keep their first occurrence so the cycle length equals
    /// the number of distinct words.
    pub fn from_text(source_name: &str, text: &str) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        let words: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(*w))
            .map(str::to_owned)
            .collect();

        if words.is_empty() {
            return Err(LoadError::Empty {
                source_name: source_name.to_owned(),
            });
        }

        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Pick uniformly among words not in `excluding`.
    ///
    /// Returns `None` when every word is excluded; the caller must clear the
    /// exclusion set first.
    pub fn next<'a>(&'a self, excluding: &HashSet<String>, rng: &mut SimpleRng) -> Option<&'a str> {
        let available = self.words.iter().filter(|w| !excluding.contains(*w)).count();
        if available == 0 {
            return None;
        }

        let pick = rng.next_range(available as u32) as usize;
        self.words
            .iter()
            .filter(|w| !excluding.contains(*w))
            .nth(pick)
            .map(String::as_str)
    }
}

/// Tracks the words used in the current cycle.
#[derive(Debug, Clone, Default)]
pub struct WordCycle {
    used: HashSet<String>,
}

impl WordCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the next word, resetting the cycle once the pool is exhausted.
    pub fn draw(&mut self, pool: &WordPool, rng: &mut SimpleRng) -> Option<String> {
        if self.used.len() >= pool.len() {
            self.used.clear();
        }
        let word = pool.next(&self.used, rng)?.to_owned();
        self.used.insert(word.clone());
        Some(word)
    }

    pub fn used(&self) -> &HashSet<String> {
        &self.used
    }
}
