mod ui;

use std::{
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};

use safari::{
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    store::{FileWordListStore, WordListStore},
    Game, GameStatus, Preset, SessionConfig, WordList,
};

pub const MSG_WORDS_SAVED: &str = "Your new word list has been saved! Get ready!";
pub const MSG_NEED_A_WORD: &str = "Please enter at least one word.";

/// unscramble jumbled letters to spell the word
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Spelling safari: pick the jumbled letters in the right order to spell each word. Three lives per session, built-in word lists, and your own saved list."
)]
pub struct Cli {
    /// word list to play (defaults to the last one used)
    #[clap(short = 'p', long, value_enum)]
    preset: Option<Preset>,

    /// play your own words, separated by commas or spaces; they are saved as the custom list
    #[clap(short = 'w', long)]
    words: Option<String>,

    /// seed the shuffles for a reproducible game
    #[clap(long)]
    seed: Option<u64>,

    /// pause after a correct word before the next one, in milliseconds
    #[clap(long)]
    success_delay_ms: Option<u64>,

    /// pause after a wrong guess before the letters are reshuffled, in milliseconds
    #[clap(long)]
    retry_delay_ms: Option<u64>,

    /// write logs to this file (also enabled by SAFARI_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log at debug level
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Flags win over the saved settings
    fn to_settings(&self, cfg: &Config) -> Settings {
        let merged = Config {
            preset: cfg.preset.clone(),
            success_delay_ms: self.success_delay_ms.unwrap_or(cfg.success_delay_ms),
            retry_delay_ms: self.retry_delay_ms.unwrap_or(cfg.retry_delay_ms),
        };
        Settings {
            preset: self.preset.unwrap_or_else(|| cfg.preset()),
            pacing: SessionConfig::from(&merged),
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub preset: Preset,
    pub pacing: SessionConfig,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Board,
    WordEntry,
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Presentation state around the game controller
pub struct App {
    pub game: Game,
    pub preset: Preset,
    pub state: AppState,
    pub entry: String,
    pub entry_error: Option<String>,
    pub notice: Option<String>,
    settings: Settings,
    store: Box<dyn WordListStore>,
}

impl App {
    pub fn new(settings: Settings, store: Box<dyn WordListStore>) -> Self {
        let words = load_preset(settings.preset, store.as_ref());
        let game = match settings.seed {
            Some(seed) => Game::with_seed(words, settings.pacing.clone(), seed),
            None => Game::new(words, settings.pacing.clone()),
        };

        Self {
            game,
            preset: settings.preset,
            state: AppState::Board,
            entry: String::new(),
            entry_error: None,
            notice: None,
            settings,
            store,
        }
    }

    /// Settings worth remembering for next time
    pub fn config(&self) -> Config {
        Config {
            preset: self.preset.to_string(),
            success_delay_ms: self.settings.pacing.success_delay.as_millis() as u64,
            retry_delay_ms: self.settings.pacing.retry_delay.as_millis() as u64,
        }
    }

    pub fn select_preset(&mut self, preset: Preset) {
        info!(%preset, "switching word list");
        self.preset = preset;
        self.notice = None;
        let words = load_preset(preset, self.store.as_ref());
        // an empty list parks the game waiting for words
        let _ = self.game.select_word_list(words.iter());
    }

    /// Save free-text words as the custom list and start playing them.
    /// Nothing changes when the text holds no words.
    pub fn submit_custom_words(&mut self, text: &str) -> bool {
        let words = safari::parse_words(text);
        if words.is_empty() {
            self.entry_error = Some(MSG_NEED_A_WORD.to_string());
            return false;
        }

        self.notice = Some(match self.store.save(&words) {
            Ok(()) => MSG_WORDS_SAVED.to_string(),
            Err(err) => {
                warn!(%err, "custom words not saved");
                format!("Playing your words, but they could not be saved: {err}")
            }
        });
        self.preset = Preset::Custom;
        let _ = self.game.select_word_list(words.iter());
        self.close_entry();
        true
    }

    /// Fresh session over the list on screen. While waiting for words there
    /// is nothing to restart: the game may still hold the previous list.
    pub fn restart(&mut self) {
        if self.game.status() == GameStatus::AwaitingWordInput {
            return;
        }
        self.notice = None;
        self.game.restart();
    }

    pub fn open_entry(&mut self) {
        self.entry = self.store.load().iter().join(", ");
        self.entry_error = None;
        self.state = AppState::WordEntry;
    }

    fn close_entry(&mut self) {
        self.entry.clear();
        self.entry_error = None;
        self.state = AppState::Board;
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        self.game.advance(elapsed);
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.state {
            AppState::Rules => {
                self.state = AppState::Board;
                Flow::Continue
            }
            AppState::WordEntry => {
                self.on_entry_key(key);
                Flow::Continue
            }
            AppState::Board => self.on_board_key(key),
        }
    }

    fn on_entry_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_entry(),
            KeyCode::Enter => {
                let text = self.entry.clone();
                self.submit_custom_words(&text);
            }
            KeyCode::Backspace => {
                self.entry.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.entry.push(c);
                self.entry_error = None;
            }
            _ => {}
        }
    }

    fn on_board_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('r') {
                self.restart();
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Tab => {
                self.select_preset(self.preset.next());
                return Flow::Continue;
            }
            KeyCode::BackTab => {
                self.select_preset(self.preset.prev());
                return Flow::Continue;
            }
            _ => {}
        }

        match self.game.status() {
            GameStatus::Playing => match key.code {
                KeyCode::Enter => {
                    self.notice = None;
                    self.game.submit_guess();
                }
                KeyCode::Backspace | KeyCode::Delete => {
                    self.game.clear_guess();
                }
                KeyCode::Char(c) => {
                    let letter = c.to_uppercase().next().unwrap_or(c);
                    if let Some(idx) = self.game.round().position_in_pool(letter) {
                        self.game.pick_letter(idx);
                    } else if c == '?' {
                        self.state = AppState::Rules;
                    } else if c == '/' {
                        self.open_entry();
                    }
                }
                _ => {}
            },
            GameStatus::Success => {}
            status => match key.code {
                KeyCode::Char('r') | KeyCode::Enter if status.is_terminal() => self.restart(),
                KeyCode::Char('w') | KeyCode::Char('/') => self.open_entry(),
                KeyCode::Char('d') => self.select_preset(Preset::default()),
                KeyCode::Char('?') => self.state = AppState::Rules,
                KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
        }
        Flow::Continue
    }
}

fn load_preset(preset: Preset, store: &dyn WordListStore) -> WordList {
    preset.words(store).unwrap_or_else(|err| {
        warn!(%err, "word list unavailable");
        WordList::default()
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = logging::resolve_log_path(cli.log_file.clone()) {
        if let Err(err) = logging::init(&path, cli.verbose) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config_store = FileConfigStore::new();
    let settings = cli.to_settings(&config_store.load());
    let mut app = App::new(settings, Box::new(FileWordListStore::new()));

    if let Some(text) = &cli.words {
        if !app.submit_custom_words(text) {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, "--words needs at least one word")
                .exit();
        }
    }

    enable_raw_mode().context("failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = config_store.save(&app.config()) {
        warn!(%err, "settings not saved");
    }

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick(elapsed) => app.on_tick(elapsed),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
        }
        terminal.draw(|f| ui::draw(app, f))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use safari::store::MemoryWordListStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn custom_app(words: &[&str]) -> App {
        let settings = Settings {
            preset: Preset::Custom,
            seed: Some(17),
            ..Default::default()
        };
        App::new(
            settings,
            Box::new(MemoryWordListStore::with_words(words.iter().copied())),
        )
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.to_lowercase().chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["safari"]);

        assert_eq!(cli.preset, None);
        assert_eq!(cli.words, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "safari",
            "-p",
            "animals",
            "--seed",
            "9",
            "--success-delay-ms",
            "200",
            "-w",
            "cat, dog",
        ]);
        assert_eq!(cli.preset, Some(Preset::Animals));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.success_delay_ms, Some(200));
        assert_eq!(cli.words.as_deref(), Some("cat, dog"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cfg = Config {
            preset: "colors".into(),
            success_delay_ms: 900,
            retry_delay_ms: 400,
        };

        let settings = Cli::parse_from(["safari"]).to_settings(&cfg);
        assert_eq!(settings.preset, Preset::Colors);
        assert_eq!(settings.pacing.success_delay, Duration::from_millis(900));

        let settings =
            Cli::parse_from(["safari", "-p", "fruits", "--retry-delay-ms", "50"]).to_settings(&cfg);
        assert_eq!(settings.preset, Preset::Fruits);
        assert_eq!(settings.pacing.retry_delay, Duration::from_millis(50));
        assert_eq!(settings.pacing.success_delay, Duration::from_millis(900));
    }

    #[test]
    fn test_app_starts_playing_default_list() {
        let app = App::new(
            Settings {
                seed: Some(1),
                ..Default::default()
            },
            Box::new(MemoryWordListStore::default()),
        );
        assert_eq!(app.game.status(), GameStatus::Playing);
        assert_eq!(app.game.word_list().len(), 11);
        assert_eq!(app.state, AppState::Board);
    }

    #[test]
    fn test_empty_custom_slot_awaits_words() {
        let app = custom_app(&[]);
        assert_eq!(app.game.status(), GameStatus::AwaitingWordInput);
    }

    #[test]
    fn test_typing_solves_word() {
        let mut app = custom_app(&["cat"]);
        type_word(&mut app, "cat");
        assert_eq!(app.game.round().guess(), "CAT");

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.game.status(), GameStatus::Success);

        app.on_tick(Duration::from_millis(1500));
        assert_eq!(app.game.status(), GameStatus::AllWordsDone);
    }

    #[test]
    fn test_letters_not_in_pool_are_ignored() {
        let mut app = custom_app(&["cat"]);
        type_word(&mut app, "cxc");
        assert_eq!(app.game.round().guess(), "C");
    }

    #[test]
    fn test_backspace_clears_guess() {
        let mut app = custom_app(&["panda"]);
        type_word(&mut app, "pa");
        app.on_key(key(KeyCode::Backspace));
        assert!(app.game.round().user_input.is_empty());
        assert_eq!(app.game.round().jumbled_letters.len(), 5);
    }

    #[test]
    fn test_wrong_guess_then_reshuffle() {
        let mut app = custom_app(&["dog"]);
        type_word(&mut app, "god");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.game.session().lives, 2);

        // locked until the pause runs out
        app.on_key(key(KeyCode::Char('d')));
        assert_eq!(app.game.round().guess(), "GOD");

        app.on_tick(Duration::from_millis(1000));
        assert!(app.game.round().user_input.is_empty());
        type_word(&mut app, "dog");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.game.status(), GameStatus::Success);
    }

    #[test]
    fn test_word_entry_flow() {
        let mut app = custom_app(&["owl"]);
        app.on_key(key(KeyCode::Char('/')));
        assert_eq!(app.state, AppState::WordEntry);
        assert_eq!(app.entry, "OWL");

        for _ in 0..3 {
            app.on_key(key(KeyCode::Backspace));
        }
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::WordEntry);
        assert_eq!(app.entry_error.as_deref(), Some(MSG_NEED_A_WORD));

        for c in "emu, yak".chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        assert!(app.entry_error.is_none());
        app.on_key(key(KeyCode::Enter));

        assert_eq!(app.state, AppState::Board);
        assert_eq!(app.preset, Preset::Custom);
        assert_eq!(app.notice.as_deref(), Some(MSG_WORDS_SAVED));
        assert_eq!(app.game.word_list().as_slice(), ["EMU", "YAK"]);
        assert_eq!(app.store.load().as_slice(), ["EMU", "YAK"]);
    }

    #[test]
    fn test_word_entry_cancel() {
        let mut app = custom_app(&["owl"]);
        app.on_key(key(KeyCode::Char('/')));
        app.on_key(key(KeyCode::Char('x')));
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Board);
        assert_eq!(app.game.word_list().as_slice(), ["OWL"]);
        assert_eq!(app.game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_default_words_from_awaiting() {
        let mut app = custom_app(&[]);
        app.on_key(key(KeyCode::Char('d')));
        assert_eq!(app.preset, Preset::Safari);
        assert_eq!(app.game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_tab_cycles_presets() {
        let mut app = custom_app(&["owl"]);
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.preset, Preset::Safari);
        assert_eq!(app.game.word_list().len(), 11);

        app.on_key(key(KeyCode::BackTab));
        assert_eq!(app.preset, Preset::Custom);
        assert_eq!(app.game.word_list().as_slice(), ["OWL"]);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut app = custom_app(&["bee"]);
        for _ in 0..3 {
            type_word(&mut app, "ebe");
            app.on_key(key(KeyCode::Enter));
            app.on_tick(Duration::from_millis(1000));
        }
        assert_eq!(app.game.status(), GameStatus::GameOver);

        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.game.status(), GameStatus::Playing);
        assert_eq!(app.game.session().lives, 3);
    }

    #[test]
    fn test_empty_custom_slot_blocks_restart_of_previous_list() {
        let mut app = App::new(
            Settings {
                preset: Preset::Colors,
                seed: Some(3),
                ..Default::default()
            },
            Box::new(MemoryWordListStore::default()),
        );
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.preset, Preset::Custom);
        assert_eq!(app.game.status(), GameStatus::AwaitingWordInput);

        app.on_key(key(KeyCode::Char('r')));
        app.on_key(key(KeyCode::Enter));
        app.on_key(ctrl('r'));
        assert_eq!(app.game.status(), GameStatus::AwaitingWordInput);
        assert!(app.game.round().current_word.is_empty());
        assert_eq!(app.config().preset, "custom");

        app.on_key(key(KeyCode::Char('d')));
        assert_eq!(app.preset, Preset::Safari);
        assert_eq!(app.game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_ctrl_r_restarts_mid_round() {
        let mut app = custom_app(&["ant", "bee"]);
        type_word(&mut app, "a");
        app.on_key(ctrl('r'));
        assert!(app.game.round().user_input.is_empty());
        assert_eq!(app.game.session().word_index, 0);
    }

    #[test]
    fn test_rules_overlay() {
        let mut app = custom_app(&["owl"]);
        app.on_key(key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Rules);
        app.on_key(key(KeyCode::Char('o')));
        assert_eq!(app.state, AppState::Board);
        assert!(app.game.round().user_input.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = custom_app(&["owl"]);
        assert_eq!(app.on_key(ctrl('c')), Flow::Quit);
        assert_eq!(app.on_key(key(KeyCode::Esc)), Flow::Quit);

        let mut done = custom_app(&[]);
        assert_eq!(done.on_key(key(KeyCode::Char('q'))), Flow::Quit);
    }

    #[test]
    fn test_config_remembers_preset() {
        let mut app = custom_app(&["owl"]);
        app.select_preset(Preset::Colors);
        let cfg = app.config();
        assert_eq!(cfg.preset, "colors");
        assert_eq!(cfg.success_delay_ms, 1500);
    }
}
