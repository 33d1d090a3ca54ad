use std::time::Duration;

use itertools::Itertools;

/// Lives a player starts every session with
pub const STARTING_LIVES: u8 = 3;
/// Points shown per solved word
pub const POINTS_PER_WORD: u32 = 10;

/// Feedback pacing for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Pause on the success panel before the next word
    pub success_delay: Duration,
    /// Pause after a wrong guess before the letters go back into the pool
    pub retry_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            success_delay: Duration::from_millis(1500),
            retry_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub score_correct: u32,
    pub score_total: u32,
    pub lives: u8,
    /// Position in the shuffled traversal order
    pub word_index: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score_correct: 0,
            score_total: 0,
            lives: STARTING_LIVES,
            word_index: 0,
        }
    }
}

impl SessionState {
    /// Share of correct guesses, rounded to the nearest whole percent
    pub fn score_percent(&self) -> u32 {
        if self.score_total == 0 {
            return 0;
        }
        ((self.score_correct as f64 / self.score_total as f64) * 100.0).round() as u32
    }

    pub fn points(&self) -> u32 {
        self.score_correct * POINTS_PER_WORD
    }
}

/// The word being solved and where each of its letters currently sits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    pub current_word: String,
    pub jumbled_letters: Vec<char>,
    pub user_input: Vec<char>,
}

impl RoundState {
    pub fn is_cleared(&self) -> bool {
        self.current_word.is_empty() && self.jumbled_letters.is_empty() && self.user_input.is_empty()
    }

    pub fn guess(&self) -> String {
        self.user_input.iter().collect()
    }

    /// First pool slot holding `c`
    pub fn position_in_pool(&self, c: char) -> Option<usize> {
        self.jumbled_letters.iter().position(|&l| l == c)
    }

    /// Pool and answer together hold exactly the word's letters
    pub fn letters_accounted_for(&self) -> bool {
        self.jumbled_letters
            .iter()
            .chain(self.user_input.iter())
            .copied()
            .counts()
            == self.current_word.chars().counts()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameStatus {
    Playing,
    Success,
    GameOver,
    AllWordsDone,
    AwaitingWordInput,
}

impl GameStatus {
    /// Statuses only a restart or a new word list can leave
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::AllWordsDone)
    }
}
