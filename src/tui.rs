//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! - `EnteringGuess` → (guess submitted) → `EnteringGuess` while the round runs
//! - `RoundOver` after a win or loss, waiting for the play-again answer
//! - `Fetching` while a new word is being retrieved

use crate::game_state::{GameInterface, GameSummary, PlayAgain, UserAction};
use crate::session::{GameSession, GuessOutcome, MAX_INCORRECT_GUESSES};
use crate::stages::StageArt;
use crate::wordbank::WordOrigin;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const WARNING_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    Fetching,
    EnteringGuess,
    RoundOver,
}

/// What the board shows for the current round.
#[derive(Debug, Default)]
struct RoundSnapshot {
    stage: &'static str,
    progress: String,
    missed: Vec<String>,
    remaining: usize,
}

impl RoundSnapshot {
    fn from_session(art: &StageArt, session: &GameSession) -> Self {
        Self {
            stage: art.stage(session.incorrect_count()),
            progress: session.progress(),
            missed: session.missed_guesses().to_vec(),
            remaining: session.remaining_guesses(),
        }
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and round display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    art: StageArt,
    state: TuiState,
    round: RoundSnapshot,
    current_input: String,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new(art: StageArt) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            art,
            state: TuiState::Fetching,
            round: RoundSnapshot::default(),
            current_input: String::new(),
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let Self {
            terminal,
            state,
            round,
            current_input,
            message,
            message_style,
            error_message,
            status,
            ..
        } = self;

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),  // Title
                    Constraint::Length(11), // Gallows and word
                    Constraint::Min(4),     // Messages
                    Constraint::Length(3),  // Status line
                    Constraint::Length(3),  // Instructions
                ])
                .split(f.area());

            render_title(f, chunks[0]);
            render_board(f, chunks[1], round, current_input, *state);
            render_messages(f, chunks[2], message, *message_style, error_message);
            render_status(f, chunks[3], status);
            render_instructions(f, chunks[4], *state);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn set_message(&mut self, message: impl Into<String>, style: Style) {
        self.message = message.into();
        self.message_style = style;
    }

    /// Blocks until a key press arrives. Non-key events and releases are skipped.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            if !event::poll(EVENT_POLL_TIMEOUT)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
                Event::Resize(_, _) => self.draw_or_log(),
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        if has_modifier_keys(&key) {
            debug_log!("handle_guess_input() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }

        match edit_guess(&mut self.current_input, &key) {
            GuessKey::Exit => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            GuessKey::Submit(guess) => {
                self.error_message.clear();
                Some(UserAction::Guess(guess))
            }
            GuessKey::Empty => {
                self.error_message = "Type a guess first!".to_string();
                None
            }
            GuessKey::Edited => {
                self.error_message.clear();
                None
            }
            GuessKey::Ignored => None,
        }
    }
}

/// What a key press did to the guess being typed.
#[derive(Debug, PartialEq)]
enum GuessKey {
    Exit,
    Submit(String),
    Empty,
    Edited,
    Ignored,
}

/// Applies a key to the input line. The line is submitted exactly as typed.
fn edit_guess(input: &mut String, key: &KeyEvent) -> GuessKey {
    match key.code {
        KeyCode::Esc => GuessKey::Exit,
        KeyCode::Enter if input.is_empty() => GuessKey::Empty,
        KeyCode::Enter => GuessKey::Submit(std::mem::take(input)),
        KeyCode::Backspace => {
            input.pop();
            GuessKey::Ignored
        }
        KeyCode::Char(c) if c.is_control() || c == '\u{FFFD}' => {
            debug_log!("edit_guess() - Ignoring control character {:?}", c);
            GuessKey::Ignored
        }
        KeyCode::Char(c) => {
            input.push(c);
            GuessKey::Edited
        }
        _ => GuessKey::Ignored,
    }
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

fn play_again_for_key(key: &KeyEvent) -> Option<PlayAgain> {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(PlayAgain::Yes),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(PlayAgain::No),
        _ => None,
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("HANGMAN")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, round: &RoundSnapshot, input: &str, state: TuiState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(20)])
        .split(area);

    let gallows = Paragraph::new(round.stage)
        .block(Block::default().title("Gallows").borders(Borders::ALL));
    f.render_widget(gallows, columns[0]);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Word:   "),
            Span::styled(round.progress.clone(), WORD_STYLE),
        ]),
        Line::from(""),
        Line::from(format!(
            "Missed: {}",
            if round.missed.is_empty() {
                "-".to_string()
            } else {
                round.missed.join(", ")
            }
        )),
        Line::from(format!(
            "Left:   {} of {}",
            round.remaining, MAX_INCORRECT_GUESSES
        )),
        Line::from(""),
    ];
    if state == TuiState::EnteringGuess {
        lines.push(Line::from(vec![
            Span::raw("Guess:  "),
            Span::styled(
                format!("{input}_"),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
        ]));
    }

    let word = Paragraph::new(lines).block(Block::default().title("Round").borders(Borders::ALL));
    f.render_widget(word, columns[1]);
}

fn render_messages(f: &mut Frame, area: Rect, message: &str, style: Style, error_message: &str) {
    let mut lines = Vec::new();
    if !message.is_empty() {
        lines.push(Line::from(vec![Span::styled(message, style)]));
    }
    if !error_message.is_empty() {
        lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
    let text = match state {
        TuiState::Fetching => "Fetching a random word...",
        TuiState::EnteringGuess => "Type a letter | ENTER: Submit | BACKSPACE: Delete | ESC: Quit",
        TuiState::RoundOver => "Y/ENTER: Play again | N/ESC: Quit",
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self) {
        self.state = TuiState::Fetching;
        self.round = RoundSnapshot::default();
        self.current_input.clear();
        self.error_message.clear();
        self.set_message("Welcome to API-powered Hangman!", MESSAGE_STYLE);
        self.status = "Fetching a random word from the API...".to_string();
        self.draw_or_log();
    }

    fn display_word_origin(&mut self, origin: &WordOrigin) {
        match origin {
            WordOrigin::Remote => {}
            WordOrigin::Offline => self.set_message("Offline mode, using a fallback word.", WARNING_STYLE),
            WordOrigin::Fallback(e) => self.set_message(
                format!("Error fetching word: {e}. Using a fallback word."),
                WARNING_STYLE,
            ),
        }
    }

    fn display_round(&mut self, session: &GameSession) {
        self.state = TuiState::EnteringGuess;
        self.round = RoundSnapshot::from_session(&self.art, session);
        self.status = "Enter your guess".to_string();
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_guess() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            let key = match self.next_key() {
                Ok(key) => key,
                Err(_e) => {
                    info_log!("read_guess() - Error reading input, returning Exit");
                    return Some(UserAction::Exit);
                }
            };
            if let Some(action) = self.handle_guess_input(key) {
                info_log!("read_guess() - Action received: {:?}", action);
                return Some(action);
            }
        }
    }

    fn display_outcome(&mut self, outcome: GuessOutcome, guess: &str) {
        match outcome {
            GuessOutcome::Correct => self.set_message(format!("Correct guess: '{guess}'"), SUCCESS_STYLE),
            GuessOutcome::AlreadyGuessed => {
                self.set_message(format!("You've already guessed '{guess}'."), WARNING_STYLE);
            }
            GuessOutcome::Incorrect => self.set_message(format!("Incorrect guess: '{guess}'"), ERROR_STYLE),
        }
    }

    fn display_win(&mut self, session: &GameSession) {
        self.round = RoundSnapshot::from_session(&self.art, session);
        self.state = TuiState::RoundOver;
        self.set_message(format!("You win! The word was '{}'.", session.secret()), SUCCESS_STYLE);
        self.status = "Round won".to_string();
        self.draw_or_log();
    }

    fn display_loss(&mut self, session: &GameSession) {
        self.round = RoundSnapshot::from_session(&self.art, session);
        self.round.stage = self.art.final_stage();
        self.state = TuiState::RoundOver;
        self.set_message(format!("Game over! The word was '{}'.", session.secret()), ERROR_STYLE);
        self.status = "Round lost".to_string();
        self.draw_or_log();
    }

    fn read_play_again(&mut self) -> PlayAgain {
        self.status = "Play again?".to_string();
        loop {
            if self.draw().is_err() {
                return PlayAgain::No;
            }
            match self.next_key() {
                Ok(key) => {
                    if let Some(answer) = play_again_for_key(&key) {
                        return answer;
                    }
                }
                Err(_e) => return PlayAgain::No,
            }
        }
    }

    fn display_goodbye(&mut self, summary: &GameSummary) {
        self.status = format!(
            "Goodbye! Rounds: {}, wins: {}, losses: {}",
            summary.rounds, summary.wins, summary.losses
        );
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
