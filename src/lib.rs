// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod game;
pub mod jumble;
pub mod logging;
pub mod presets;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod store;
pub mod word_list;

pub use error::{PresetError, StoreError, WordListError};
pub use game::Game;
pub use presets::Preset;
pub use session::{GameStatus, RoundState, SessionConfig, SessionState};
pub use word_list::{parse_words, WordList};
