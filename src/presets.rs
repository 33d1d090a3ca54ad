use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::PresetError;
use crate::store::WordListStore;
use crate::word_list::WordList;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

/// Word lists the player can switch between
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Preset {
    #[default]
    Safari,
    Animals,
    Fruits,
    Colors,
    /// The player's own saved list
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Safari,
        Preset::Animals,
        Preset::Fruits,
        Preset::Colors,
        Preset::Custom,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Resolve to playable words; `Custom` reads the saved slot
    pub fn words(&self, store: &dyn WordListStore) -> Result<WordList, PresetError> {
        match self {
            Preset::Custom => Ok(store.load()),
            builtin => Ok(WordList::from_words(
                read_list(&format!("{builtin}.json"))?.words,
            )),
        }
    }
}

/// A list shipped inside the binary
#[derive(Deserialize, Clone, Debug)]
pub struct BuiltinList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

fn read_list(file_name: &str) -> Result<BuiltinList, PresetError> {
    let file = WORDS_DIR
        .get_file(file_name)
        .ok_or_else(|| PresetError::NotFound(file_name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| PresetError::Encoding(file_name.to_string()))?;

    from_str(contents).map_err(|source| PresetError::Parse {
        name: file_name.to_string(),
        source,
    })
}
