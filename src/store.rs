use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::StoreError;
use crate::word_list::WordList;

/// The single saved slot for the player's own words
pub trait WordListStore {
    /// Missing or unreadable data comes back as an empty list
    fn load(&self) -> WordList;
    fn save(&self, words: &WordList) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct FileWordListStore {
    path: PathBuf,
}

impl FileWordListStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::custom_words_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileWordListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WordListStore for FileWordListStore {
    fn load(&self) -> WordList {
        let Ok(bytes) = fs::read(&self.path) else {
            return WordList::default();
        };
        match serde_json::from_slice::<WordList>(&bytes) {
            Ok(words) => words,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable custom word list");
                WordList::default()
            }
        }
    }

    fn save(&self, words: &WordList) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(words)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Keeps the slot in memory; for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryWordListStore {
    words: RefCell<WordList>,
}

impl MemoryWordListStore {
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: RefCell::new(WordList::from_words(words)),
        }
    }
}

impl WordListStore for MemoryWordListStore {
    fn load(&self) -> WordList {
        self.words.borrow().clone()
    }

    fn save(&self, words: &WordList) -> Result<(), StoreError> {
        *self.words.borrow_mut() = words.clone();
        Ok(())
    }
}
