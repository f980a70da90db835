use clap::Parser;
use crate::game_state::{GameInterface, GameSummary, PlayAgain, UserAction};
use crate::session::{GameSession, GuessOutcome, MAX_INCORRECT_GUESSES};
use crate::stages::StageArt;
use crate::wordbank::{DEFAULT_TIMEOUT, DEFAULT_WORD_URL, WordOrigin};
use std::io::BufRead;

/// Hangman with words from an online word list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited fallback word list (at least 3 words)
    #[arg(short = 'i', long = "input")]
    pub wordlist_path: Option<String>,

    /// Endpoint returning a JSON array with one random word
    #[arg(long, default_value = DEFAULT_WORD_URL)]
    pub url: String,

    /// Seconds to wait for the word endpoint
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Never contact the word endpoint, always use the fallback list
    #[arg(long)]
    pub offline: bool,

    /// Play in the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum GuessInput {
    Valid(String),
    Blank,
    Eof,
}

/// Reads one line without its terminator, `None` on end of input or a read error.
fn read_raw_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// Guesses are taken verbatim apart from the line terminator.
pub fn read_guess<R: BufRead>(reader: &mut R) -> GuessInput {
    println!("🔠 Enter your guess: ");
    match read_raw_line(reader) {
        None => GuessInput::Eof,
        Some(input) if input.is_empty() => GuessInput::Blank,
        Some(input) => GuessInput::Valid(input),
    }
}

pub fn read_play_again<R: BufRead>(reader: &mut R) -> PlayAgain {
    println!("🔁 Play again? (yes/no): ");
    match read_raw_line(reader) {
        Some(answer) if answer.trim().eq_ignore_ascii_case("yes") => PlayAgain::Yes,
        _ => PlayAgain::No,
    }
}

pub fn display_welcome() {
    println!("🎮 Welcome to API-powered Hangman!");
    println!("Fetching a random word from the API...");
}

pub fn display_word_origin(origin: &WordOrigin) {
    match origin {
        WordOrigin::Remote => {}
        WordOrigin::Offline => println!("📴 Offline mode, using a fallback word."),
        WordOrigin::Fallback(e) => println!("❌ Error fetching word: {e}. Using a fallback word."),
    }
}

pub fn display_round(art: &StageArt, session: &GameSession) {
    println!("{}", art.stage(session.incorrect_count()));
    println!("📖 Current Progress:  {}", session.progress());
    if !session.missed_guesses().is_empty() {
        println!(
            "Missed: {} ({} of {} left)",
            session.missed_guesses().join(", "),
            session.remaining_guesses(),
            MAX_INCORRECT_GUESSES
        );
    }
}

pub fn display_outcome(outcome: GuessOutcome) {
    match outcome {
        GuessOutcome::Correct => println!("✅ Correct guess!"),
        GuessOutcome::AlreadyGuessed => println!("⚠️ You've already guessed that letter."),
        GuessOutcome::Incorrect => println!("❌ Incorrect guess."),
    }
}

pub fn display_win(session: &GameSession) {
    println!("🎊 You win! The word was '{}'.", session.secret());
}

pub fn display_loss(art: &StageArt, session: &GameSession) {
    println!("{}", art.final_stage());
    println!("💀 Game over! The word was '{}'.", session.secret());
}

pub fn display_goodbye(summary: &GameSummary) {
    if summary.rounds > 0 {
        println!(
            "Rounds: {}, wins: {}, losses: {}",
            summary.rounds, summary.wins, summary.losses
        );
    }
    println!("Goodbye! 👋");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for line-based play
pub struct CliInterface<R: BufRead> {
    reader: R,
    art: StageArt,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self::with_art(reader, StageArt::classic())
    }

    pub fn with_art(reader: R, art: StageArt) -> Self {
        Self { reader, art }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_welcome(&mut self) {
        display_welcome();
    }

    fn display_word_origin(&mut self, origin: &WordOrigin) {
        display_word_origin(origin);
    }

    fn display_round(&mut self, session: &GameSession) {
        display_round(&self.art, session);
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        match read_guess(&mut self.reader) {
            GuessInput::Valid(guess) => Some(UserAction::Guess(guess)),
            GuessInput::Eof => Some(UserAction::Exit),
            GuessInput::Blank => None,
        }
    }

    fn display_outcome(&mut self, outcome: GuessOutcome, _guess: &str) {
        display_outcome(outcome);
    }

    fn display_win(&mut self, session: &GameSession) {
        display_win(session);
    }

    fn display_loss(&mut self, session: &GameSession) {
        display_loss(&self.art, session);
    }

    fn read_play_again(&mut self) -> PlayAgain {
        read_play_again(&mut self.reader)
    }

    fn display_goodbye(&mut self, summary: &GameSummary) {
        display_goodbye(summary);
    }
}
