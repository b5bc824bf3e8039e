//! TUI application state and logic

use crate::core::MAX_ATTEMPTS;
use crate::engine::{AvailabilityDelta, EngineError, Game, Phase, SubmitOutcome};
use crate::persistence::SessionStore;
use crate::wordlists::WordSource;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::warn;

/// Application state
pub struct App<W, S> {
    pub game: Game<W, S>,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    /// Keys recoloured by the last accepted guess
    pub fresh_keys: AvailabilityDelta,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    pub guess_distribution: [usize; MAX_ATTEMPTS + 1],
}

impl Statistics {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.games_won as f64 / self.total_games as f64 * 100.0
    }
}

impl<W: WordSource, S: SessionStore> App<W, S> {
    #[must_use]
    pub fn new(mut game: Game<W, S>) -> Self {
        // A resumed game reports every known key as fresh; nothing to highlight
        game.take_delta();
        Self {
            game,
            messages: vec![Message {
                text: "Welcome! Type a word and press Enter.".to_string(),
                style: MessageStyle::Info,
            }],
            stats: Statistics::default(),
            should_quit: false,
            fresh_keys: AvailabilityDelta::default(),
        }
    }

    /// Start a game unless one is already in progress
    pub fn ensure_started(&mut self) {
        match self.game.phase() {
            Phase::Initial => self.new_game(),
            Phase::Guessing | Phase::Submitting => {
                if !self.game.ledger().is_empty() {
                    self.add_message("Resumed your saved game.", MessageStyle::Info);
                }
            }
            Phase::Won | Phase::Lost => {
                self.add_message("Press Enter or 'n' for a new game.", MessageStyle::Info);
            }
        }
    }

    pub fn new_game(&mut self) {
        self.fresh_keys = AvailabilityDelta::default();
        let started = match self.game.phase() {
            Phase::Initial => self.game.start_game(),
            _ => self.game.reset().and_then(|()| self.game.start_game()),
        };
        match started {
            Ok(()) => {
                self.messages.clear();
                self.add_message("New game started! Good luck.", MessageStyle::Info);
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Char('n') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.new_game();
            return;
        }

        match self.game.phase() {
            Phase::Guessing => self.handle_guess_key(key.code),
            Phase::Initial | Phase::Won | Phase::Lost => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('n') | KeyCode::Enter => self.new_game(),
                _ => {}
            },
            Phase::Submitting => {}
        }
    }

    fn handle_guess_key(&mut self, code: KeyCode) {
        let result = match code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                self.game.type_letter(c.to_ascii_lowercase()).map(drop)
            }
            KeyCode::Backspace => self.game.backspace().map(drop),
            KeyCode::Enter => self.submit(),
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.report(&err);
        }
    }

    fn submit(&mut self) -> Result<(), EngineError> {
        match self.game.submit_draft()? {
            SubmitOutcome::Rejected(rejection) => {
                self.add_message(&format!("{rejection}!"), MessageStyle::Error);
            }
            SubmitOutcome::Accepted {
                feedback,
                phase,
                revealed,
                ..
            } => {
                self.fresh_keys = self.game.take_delta();
                match phase {
                    Phase::Won => self.record_win(),
                    Phase::Lost => {
                        self.stats.total_games += 1;
                        let secret = revealed.map_or_else(String::new, |w| w.text().to_uppercase());
                        self.add_message(
                            &format!("Out of attempts! The word was {secret}."),
                            MessageStyle::Error,
                        );
                        self.add_message("Press Enter or 'n' for a new game.", MessageStyle::Info);
                    }
                    _ => self.add_message(&feedback.to_emoji(), MessageStyle::Info),
                }
            }
        }
        Ok(())
    }

    fn record_win(&mut self) {
        let guess_count = self.game.ledger().len();
        self.stats.games_won += 1;
        self.stats.total_games += 1;
        if let Some(slot) = self.stats.guess_distribution.get_mut(guess_count) {
            *slot += 1;
        }

        let celebration = match guess_count {
            1 => "🎯 HOLE IN ONE! Extraordinary! 🌟",
            2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
            3 => "✨ SPLENDID! Three guesses! ✨",
            4 => "👏 GREAT JOB! Four guesses! 👏",
            5 => "🎉 NICE WORK! Five guesses! 🎉",
            _ => "😅 PHEW! Got it in six! 😅",
        };
        self.add_message(celebration, MessageStyle::Success);
        self.add_message("Press Enter or 'n' for a new game, 'q' to quit.", MessageStyle::Info);
    }

    fn report(&mut self, err: &EngineError) {
        warn!(error = %err, "Engine error in TUI");
        let text = if err.is_retryable() {
            format!("{err}. Try again.")
        } else {
            err.to_string()
        };
        self.add_message(&text, MessageStyle::Error);
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<W: WordSource, S: SessionStore>(app: App<W, S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B, W, S>(terminal: &mut Terminal<B>, mut app: App<W, S>) -> Result<()>
where
    B: ratatui::backend::Backend,
    W: WordSource,
    S: SessionStore,
{
    app.ensure_started();

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
