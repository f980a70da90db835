// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod stages;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{NetworkFailure, WordListError};
pub use game_state::{GameInterface, GameSummary, PlayAgain, RoundEnd, UserAction, game_loop, play_round};
pub use session::{
    GameSession, GuessOutcome, MAX_INCORRECT_GUESSES, PLACEHOLDER, RoundStatus, SecretWord,
};
pub use stages::StageArt;
pub use wordbank::{
    FallbackWords, RemoteWordSource, WordOrigin, WordProvider, WordSource,
    load_fallback_words_from_file, parse_word_response,
};
