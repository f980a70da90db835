use hangman::cli::{CliInterface, display_goodbye, parse_cli};
use hangman::logging::{init_logging, level_for, log_target_for};
use hangman::stages::StageArt;
use hangman::tui::TuiInterface;
use hangman::wordbank::{FallbackWords, RemoteWordSource, WordProvider, load_fallback_words_from_file};
use hangman::game_loop;
use std::io;
use std::time::Duration;

fn main() {
    let cli = parse_cli();

    if let Err(e) = init_logging(log_target_for(cli.tui), level_for(cli.verbose)) {
        eprintln!("Failed to set up logging: {e}");
    }

    let fallback = match &cli.wordlist_path {
        Some(path) => match load_fallback_words_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load word list from '{path}': {e}");
                return;
            }
        },
        None => FallbackWords::default(),
    };

    let provider = if cli.offline {
        WordProvider::offline(fallback)
    } else {
        match RemoteWordSource::new(cli.url.as_str(), Duration::from_secs(cli.timeout)) {
            Ok(source) => WordProvider::new(source, fallback),
            Err(e) => {
                log::warn!("Could not build HTTP client: {e}");
                WordProvider::offline(fallback)
            }
        }
    };

    if cli.tui {
        let summary = match TuiInterface::new(StageArt::classic()) {
            Ok(mut interface) => game_loop(&provider, &mut interface),
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return;
            }
        };
        // the TUI has left the alternate screen by now
        display_goodbye(&summary);
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&provider, &mut interface);
    }
}
