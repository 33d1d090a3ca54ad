use serde::{Deserialize, Serialize};

use crate::error::WordListError;

/// Ordered, uppercase, non-empty words a session draws from.
///
/// The only way in is through [`WordList::from_words`] or [`parse_words`],
/// so every entry is already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct WordList(Vec<String>);

impl WordList {
    /// Normalize a sequence of raw entries. Each entry is itself split on the
    /// delimiter class, so `["cat, dog"]` yields two words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            words
                .into_iter()
                .flat_map(|w| tokenize(w.as_ref()).collect::<Vec<_>>())
                .collect(),
        )
    }

    /// Like [`WordList::from_words`] but rejects a list with nothing left in it
    pub fn non_empty<I, S>(words: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = Self::from_words(words);
        if list.is_empty() {
            Err(WordListError::Empty)
        } else {
            Ok(list)
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for WordList {
    fn from(words: Vec<String>) -> Self {
        Self::from_words(words)
    }
}

impl From<WordList> for Vec<String> {
    fn from(list: WordList) -> Self {
        list.0
    }
}

fn is_delimiter(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(is_delimiter)
        .filter(|token| !token.is_empty())
        .map(str::to_uppercase)
}

/// Turn free text such as `"cat, dog  bird"` into a word list
pub fn parse_words(text: &str) -> WordList {
    WordList(tokenize(text).collect())
}
