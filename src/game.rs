use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::WordListError;
use crate::jumble::{jumble, traversal_order};
use crate::schedule::{Scheduler, TimerAction};
use crate::session::{GameStatus, RoundState, SessionConfig, SessionState};
use crate::word_list::WordList;

pub const MSG_CORRECT: &str = "Correct!";
pub const MSG_TRY_AGAIN: &str = "Not quite, try again!";
pub const MSG_ALL_DONE: &str = "You solved every word in this list!";

/// The game controller: owns every piece of mutable game state.
///
/// All writes go through the operations below; anything attempted in the
/// wrong status is ignored and reported back as `false`.
#[derive(Debug)]
pub struct Game {
    words: WordList,
    order: Vec<usize>,
    round: RoundState,
    session: SessionState,
    status: GameStatus,
    message: Option<String>,
    config: SessionConfig,
    timers: Scheduler,
    generation: u64,
    rng: StdRng,
}

impl Game {
    pub fn new(words: WordList, config: SessionConfig) -> Self {
        Self::with_rng(words, config, StdRng::from_entropy())
    }

    pub fn with_seed(words: WordList, config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(words, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(words: WordList, config: SessionConfig, rng: StdRng) -> Self {
        let mut game = Self {
            words,
            order: vec![],
            round: RoundState::default(),
            session: SessionState::default(),
            status: GameStatus::AwaitingWordInput,
            message: None,
            config,
            timers: Scheduler::new(),
            generation: 0,
            rng,
        };
        game.begin_session();
        game
    }

    // read models

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn word_list(&self) -> &WordList {
        &self.words
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Words in the order this session presents them
    pub fn traversal(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().filter_map(|&i| self.words.get(i))
    }

    pub fn score_percent(&self) -> u32 {
        self.session.score_percent()
    }

    pub fn points(&self) -> u32 {
        self.session.points()
    }

    /// True while a feedback pause for the current round is still running
    pub fn is_locked(&self) -> bool {
        self.timers.has_pending(self.generation)
    }

    fn accepts_input(&self, op: &str) -> bool {
        if self.status != GameStatus::Playing {
            debug!(op, status = %self.status, "ignored: not playing");
            return false;
        }
        if self.is_locked() {
            debug!(op, "ignored: feedback pending");
            return false;
        }
        true
    }

    // write surface

    /// Replace the word list wholesale and start a fresh session on it.
    ///
    /// A list with nothing left after normalization leaves the current list
    /// and scores alone and parks the game in `AwaitingWordInput`.
    pub fn select_word_list<I, S>(&mut self, words: I) -> Result<usize, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match WordList::non_empty(words) {
            Ok(list) => {
                info!(words = list.len(), "word list selected");
                self.words = list;
                self.begin_session();
                Ok(self.words.len())
            }
            Err(err) => {
                info!("empty word list rejected");
                self.cancel_pending();
                self.round = RoundState::default();
                self.status = GameStatus::AwaitingWordInput;
                self.message = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn start_round(&mut self) {
        self.generation += 1;

        if self.order.is_empty() {
            self.round = RoundState::default();
            self.status = GameStatus::AwaitingWordInput;
            self.message = Some(WordListError::Empty.to_string());
            return;
        }

        let next = self
            .order
            .get(self.session.word_index)
            .and_then(|&i| self.words.get(i))
            .map(str::to_owned);

        match next {
            Some(word) => {
                let jumbled_letters = jumble(&word, &mut self.rng);
                debug!(index = self.session.word_index, "round started");
                self.round = RoundState {
                    current_word: word,
                    jumbled_letters,
                    user_input: vec![],
                };
                self.message = None;
                self.status = GameStatus::Playing;
            }
            None => {
                info!(
                    correct = self.session.score_correct,
                    total = self.session.score_total,
                    "all words done"
                );
                self.round = RoundState::default();
                self.status = GameStatus::AllWordsDone;
                self.message = Some(MSG_ALL_DONE.to_string());
            }
        }
    }

    /// Move the pool letter at `index` to the end of the answer
    pub fn pick_letter(&mut self, index: usize) -> bool {
        if !self.accepts_input("pick_letter") {
            return false;
        }
        if index >= self.round.jumbled_letters.len() {
            debug!(index, "ignored: no such tile");
            return false;
        }
        let letter = self.round.jumbled_letters.remove(index);
        self.round.user_input.push(letter);
        true
    }

    pub fn clear_guess(&mut self) -> bool {
        if !self.accepts_input("clear_guess") {
            return false;
        }
        self.reshuffle();
        true
    }

    pub fn submit_guess(&mut self) -> bool {
        if !self.accepts_input("submit_guess") {
            return false;
        }
        if self.round.user_input.is_empty() {
            debug!("ignored: empty guess");
            return false;
        }

        let guess = self.round.guess();
        self.session.score_total += 1;

        if guess == self.round.current_word {
            self.session.score_correct += 1;
            self.status = GameStatus::Success;
            self.message = Some(MSG_CORRECT.to_string());
            info!(correct = self.session.score_correct, "word solved");
            self.timers.schedule(
                self.config.success_delay,
                self.generation,
                TimerAction::AdvanceWord,
            );
            return true;
        }

        self.session.lives = self.session.lives.saturating_sub(1);
        if self.session.lives > 0 {
            info!(lives = self.session.lives, "wrong guess");
            self.message = Some(MSG_TRY_AGAIN.to_string());
            self.timers.schedule(
                self.config.retry_delay,
                self.generation,
                TimerAction::Reshuffle,
            );
        } else {
            info!(
                correct = self.session.score_correct,
                total = self.session.score_total,
                "game over"
            );
            self.status = GameStatus::GameOver;
            self.message = Some(format!(
                "Game Over! The word was {}.",
                self.round.current_word
            ));
        }
        true
    }

    /// Fresh session over the current word list
    pub fn restart(&mut self) {
        info!("restart");
        self.begin_session();
    }

    /// Let `elapsed` pass on the feedback clock, running whatever comes due.
    ///
    /// Timers read the state as it is when they fire. One scheduled before a
    /// restart, a word-list change, or a newer round is dropped.
    pub fn advance(&mut self, elapsed: Duration) {
        for fired in self.timers.advance(elapsed) {
            if fired.generation != self.generation {
                debug!(action = ?fired.action, "discarding stale timer");
                continue;
            }
            match fired.action {
                TimerAction::AdvanceWord if self.status == GameStatus::Success => {
                    self.session.word_index += 1;
                    self.start_round();
                }
                TimerAction::Reshuffle if self.status == GameStatus::Playing => {
                    self.reshuffle();
                }
                action => debug!(?action, status = %self.status, "timer no longer applies"),
            }
        }
    }

    fn begin_session(&mut self) {
        self.cancel_pending();
        self.session = SessionState::default();
        self.order = traversal_order(self.words.len(), &mut self.rng);
        self.start_round();
    }

    fn cancel_pending(&mut self) {
        self.timers.cancel_all();
        self.generation += 1;
    }

    fn reshuffle(&mut self) {
        self.round.jumbled_letters = jumble(&self.round.current_word, &mut self.rng);
        self.round.user_input.clear();
    }
}
