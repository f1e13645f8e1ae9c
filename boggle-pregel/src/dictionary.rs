//! Case-normalized word set with prefix queries
//!
//! Words are stored lowercase in a `BTreeSet`, so a prefix query is a single
//! ordered range lookup: the smallest entry not below the prefix is the only
//! candidate that can start with it.
//!
//! Records are newline-delimited; the first whitespace-delimited field of
//! each line is the word. Blank lines are skipped.

use std::collections::BTreeSet;
use std::io::BufRead;
use std::ops::Bound;
use std::path::Path;
use tracing::debug;

use crate::error::DictionaryError;

/// Demonstration word list used when no dictionary source is configured
pub const BUILTIN_WORDS: [&str; 5] = ["geeks", "social", "network", "analysis", "quiz"];

/// Immutable-after-load ordered set of lowercase words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: BTreeSet<String>,
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from in-memory words, lowercasing each
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// The built-in demonstration dictionary
    pub fn builtin() -> Self {
        Self::from_words(BUILTIN_WORDS)
    }

    /// Parse newline-delimited records, keeping the first field of each line
    pub fn parse(text: &str) -> Self {
        Self {
            words: text.lines().filter_map(first_field).collect(),
        }
    }

    /// Load a dictionary file
    ///
    /// An unreadable file, invalid UTF-8, or a file without a single word is
    /// an error; the caller never receives a silently empty dictionary.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DictionaryError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let dictionary = Self::parse(&text);
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), words = dictionary.len(), "Dictionary loaded");
        Ok(dictionary)
    }

    /// Load records from a reader
    ///
    /// `origin` names the source in errors. A read failure part-way through
    /// fails the whole load.
    pub fn from_reader<R: BufRead>(reader: R, origin: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let origin = origin.as_ref();
        let mut words = BTreeSet::new();
        for line in reader.lines() {
            let line = line.map_err(|source| DictionaryError::Read {
                path: origin.to_path_buf(),
                source,
            })?;
            if let Some(word) = first_field(&line) {
                words.insert(word);
            }
        }

        if words.is_empty() {
            return Err(DictionaryError::Empty {
                path: origin.to_path_buf(),
            });
        }
        Ok(Self { words })
    }

    /// Exact membership; `word` must already be lowercase
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// True iff some entry starts with `prefix`
    ///
    /// The empty prefix only matches when the empty string was loaded as an
    /// entry.
    pub fn has_prefix_match(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return self.words.contains("");
        }
        self.words
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .next()
            .is_some_and(|entry| entry.starts_with(prefix))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate entries in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Length in characters of the longest entry
    pub fn longest_word_len(&self) -> usize {
        self.words.iter().map(|w| w.chars().count()).max().unwrap_or(0)
    }
}

fn first_field(line: &str) -> Option<String> {
    line.split_whitespace().next().map(str::to_lowercase)
}
