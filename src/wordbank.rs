//! Where secret words come from: a remote word endpoint, backed by a fixed
//! fallback list whenever the endpoint cannot deliver.

use crate::error::{NetworkFailure, WordListError};
use crate::session::SecretWord;
use crate::{debug_log, info_log};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_WORD_URL: &str = "https://random-word-api.herokuapp.com/word?number=1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_FALLBACK_WORDS: [&str; 3] = ["fallback", "default", "backup"];
pub const MIN_FALLBACK_WORDS: usize = 3;

/// A single attempt at producing a word.
pub trait WordSource {
    fn fetch(&self) -> Result<SecretWord, NetworkFailure>;
}

impl<F> WordSource for F
where
    F: Fn() -> Result<SecretWord, NetworkFailure>,
{
    fn fetch(&self) -> Result<SecretWord, NetworkFailure> {
        self()
    }
}

/// Word endpoint answering with a JSON array whose first element is the word.
pub struct RemoteWordSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl RemoteWordSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NetworkFailure> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl WordSource for RemoteWordSource {
    fn fetch(&self) -> Result<SecretWord, NetworkFailure> {
        debug_log!("GET {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .text()?;
        parse_word_response(&body)
    }
}

pub fn parse_word_response(body: &str) -> Result<SecretWord, NetworkFailure> {
    let words: Vec<String> = serde_json::from_str(body)?;
    let first = words.into_iter().next().ok_or(NetworkFailure::EmptyResponse)?;
    SecretWord::new(first).map_err(|_| NetworkFailure::BlankWord)
}

/// Fixed set of words used when the remote source fails. Always holds at
/// least [`MIN_FALLBACK_WORDS`] entries.
#[derive(Debug, Clone)]
pub struct FallbackWords(Vec<SecretWord>);

impl FallbackWords {
    pub fn new<I, S>(words: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<SecretWord> = words
            .into_iter()
            .filter_map(|w| SecretWord::new(w).ok())
            .collect();
        if words.len() < MIN_FALLBACK_WORDS {
            return Err(WordListError::TooFewWords {
                found: words.len(),
                required: MIN_FALLBACK_WORDS,
            });
        }
        Ok(Self(words))
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> SecretWord {
        self.0
            .choose(rng)
            .cloned()
            .expect("fallback list holds at least MIN_FALLBACK_WORDS entries")
    }

    pub fn contains(&self, word: &SecretWord) -> bool {
        self.0.contains(word)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl Default for FallbackWords {
    fn default() -> Self {
        Self(
            DEFAULT_FALLBACK_WORDS
                .iter()
                .filter_map(|w| SecretWord::new(*w).ok())
                .collect(),
        )
    }
}

pub fn load_wordlist_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn load_fallback_words_from_file<P: AsRef<Path>>(path: P) -> Result<FallbackWords, WordListError> {
    let data = fs::read_to_string(path)?;
    FallbackWords::new(load_wordlist_from_str(&data))
}

/// Where the word for a round came from.
#[derive(Debug)]
pub enum WordOrigin {
    Remote,
    Offline,
    Fallback(NetworkFailure),
}

#[derive(Debug)]
pub struct WordSelection {
    pub word: SecretWord,
    pub origin: WordOrigin,
}

/// Hands out one secret word per round. Never fails: if the remote source errors
/// the word is drawn from the fallback list instead.
pub struct WordProvider {
    source: Option<Box<dyn WordSource>>,
    fallback: FallbackWords,
}

impl WordProvider {
    pub fn new(source: impl WordSource + 'static, fallback: FallbackWords) -> Self {
        Self {
            source: Some(Box::new(source)),
            fallback,
        }
    }

    /// Provider that never touches the network.
    pub fn offline(fallback: FallbackWords) -> Self {
        Self {
            source: None,
            fallback,
        }
    }

    pub fn fallback_words(&self) -> &FallbackWords {
        &self.fallback
    }

    pub fn fetch_word(&self) -> SecretWord {
        self.select_word().word
    }

    pub fn select_word(&self) -> WordSelection {
        self.select_word_with(&mut rand::thread_rng())
    }

    pub fn select_word_with<R: Rng + ?Sized>(&self, rng: &mut R) -> WordSelection {
        let Some(source) = &self.source else {
            log::debug!("Offline, choosing from {} fallback words", self.fallback.len());
            return WordSelection {
                word: self.fallback.choose(rng),
                origin: WordOrigin::Offline,
            };
        };

        match source.fetch() {
            Ok(word) => {
                info_log!("Fetched word of length {}", word.as_str().chars().count());
                WordSelection {
                    word,
                    origin: WordOrigin::Remote,
                }
            }
            Err(e) => {
                log::warn!("Error fetching word: {e}. Using a fallback word.");
                WordSelection {
                    word: self.fallback.choose(rng),
                    origin: WordOrigin::Fallback(e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn failing() -> Result<SecretWord, NetworkFailure> {
        Err(NetworkFailure::EmptyResponse)
    }

    #[test]
    fn test_parse_word_response_takes_first_word() {
        let word = parse_word_response(r#"["zebra", "other"]"#).unwrap();
        assert_eq!(word.as_str(), "zebra");
    }

    #[test]
    fn test_parse_word_response_rejects_empty_array() {
        assert!(matches!(
            parse_word_response("[]"),
            Err(NetworkFailure::EmptyResponse)
        ));
    }

    #[test]
    fn test_parse_word_response_rejects_blank_word() {
        assert!(matches!(
            parse_word_response(r#"["  "]"#),
            Err(NetworkFailure::BlankWord)
        ));
    }

    #[test]
    fn test_parse_word_response_rejects_malformed_json() {
        assert!(matches!(
            parse_word_response(r#"{"word": "zebra"}"#),
            Err(NetworkFailure::Malformed(_))
        ));
        assert!(matches!(
            parse_word_response("<html>503</html>"),
            Err(NetworkFailure::Malformed(_))
        ));
        assert!(matches!(
            parse_word_response(""),
            Err(NetworkFailure::Malformed(_))
        ));
    }

    #[test]
    fn test_default_fallback_words() {
        let words = FallbackWords::default();
        assert_eq!(words.len(), 3);
        for w in DEFAULT_FALLBACK_WORDS {
            assert!(words.contains(&SecretWord::new(w).unwrap()));
        }
    }

    #[test]
    fn test_fallback_words_require_minimum() {
        let err = FallbackWords::new(["one", "two", "  "]).unwrap_err();
        assert!(matches!(
            err,
            WordListError::TooFewWords { found: 2, required: 3 }
        ));
        assert!(FallbackWords::new(["one", "two", "three"]).is_ok());
    }

    #[test]
    fn test_network_failure_uses_fallback() {
        let provider = WordProvider::new(failing, FallbackWords::default());
        for _ in 0..20 {
            let selection = provider.select_word();
            assert!(!selection.word.as_str().is_empty());
            assert!(provider.fallback_words().contains(&selection.word));
            assert!(matches!(selection.origin, WordOrigin::Fallback(_)));
        }
    }

    #[test]
    fn test_fallback_choice_covers_every_word() {
        let provider = WordProvider::new(failing, FallbackWords::default());
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(provider.select_word_with(&mut rng).word.to_string());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_remote_word_is_used_when_available() {
        let provider = WordProvider::new(
            || SecretWord::new("Quartz").map_err(|_| NetworkFailure::BlankWord),
            FallbackWords::default(),
        );
        let selection = provider.select_word();
        assert_eq!(selection.word.as_str(), "Quartz");
        assert!(matches!(selection.origin, WordOrigin::Remote));
        assert_eq!(provider.fetch_word().as_str(), "Quartz");
    }

    #[test]
    fn test_offline_provider_never_calls_source() {
        let provider = WordProvider::offline(FallbackWords::default());
        let selection = provider.select_word();
        assert!(matches!(selection.origin, WordOrigin::Offline));
        assert!(provider.fallback_words().contains(&selection.word));
    }

    #[test]
    fn test_unreachable_endpoint_falls_back() {
        // nothing listens on the discard port locally
        let source =
            RemoteWordSource::new("http://127.0.0.1:9/word", Duration::from_millis(500)).unwrap();
        assert!(source.fetch().is_err());

        let provider = WordProvider::new(source, FallbackWords::default());
        let word = provider.fetch_word();
        assert!(provider.fallback_words().contains(&word));
    }

    /// Answers `connections` requests on a local port with a canned response.
    fn serve(response: &'static str, delay: Duration, connections: usize) -> String {
        use std::io::{BufRead, BufReader, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for stream in listener.incoming().take(connections) {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                while reader.read_line(&mut line).is_ok_and(|n| n > 0) && line != "\r\n" {
                    line.clear();
                }
                std::thread::sleep(delay);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/word")
    }

    #[test]
    fn test_server_error_status_falls_back() {
        let url = serve(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            Duration::ZERO,
            2,
        );
        let source = RemoteWordSource::new(url, Duration::from_secs(2)).unwrap();
        assert!(matches!(source.fetch(), Err(NetworkFailure::Transport(_))));

        let provider = WordProvider::new(source, FallbackWords::default());
        let selection = provider.select_word();
        assert!(provider.fallback_words().contains(&selection.word));
        assert!(matches!(
            selection.origin,
            WordOrigin::Fallback(NetworkFailure::Transport(_))
        ));
    }

    #[test]
    fn test_slow_endpoint_times_out_and_falls_back() {
        let url = serve(
            "HTTP/1.1 200 OK\r\nContent-Length: 9\r\nConnection: close\r\n\r\n[\"Zebra\"]",
            Duration::from_secs(2),
            1,
        );
        let source = RemoteWordSource::new(url, Duration::from_millis(300)).unwrap();
        let provider = WordProvider::new(source, FallbackWords::default());

        let started = std::time::Instant::now();
        let selection = provider.select_word();
        assert!(started.elapsed() < Duration::from_millis(1500));
        assert!(provider.fallback_words().contains(&selection.word));
        assert!(matches!(selection.origin, WordOrigin::Fallback(_)));
    }

    #[test]
    fn test_remote_endpoint_word_is_used() {
        let url = serve(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 9\r\nConnection: close\r\n\r\n[\"Zebra\"]",
            Duration::ZERO,
            1,
        );
        let source = RemoteWordSource::new(url, Duration::from_secs(2)).unwrap();
        let provider = WordProvider::new(source, FallbackWords::default());

        let selection = provider.select_word();
        assert_eq!(selection.word.as_str(), "Zebra");
        assert!(matches!(selection.origin, WordOrigin::Remote));
    }

    #[test]
    fn test_load_wordlist_from_str_skips_blank_and_comments() {
        let words = load_wordlist_from_str("# animals\n  otter \n\nbadger\n#x\nlynx");
        assert_eq!(words, vec!["otter", "badger", "lynx"]);
    }

    #[test]
    fn test_load_fallback_words_from_file() {
        use std::io::Write;

        let path = std::env::temp_dir().join("hangman_fallback_words_test.txt");
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "# custom list").unwrap();
            writeln!(file, "Maple").unwrap();
            writeln!(file, "cedar").unwrap();
            writeln!(file).unwrap();
            writeln!(file, "birch").unwrap();
        }

        let words = load_fallback_words_from_file(&path).unwrap();
        assert_eq!(words.len(), 3);
        assert!(words.contains(&SecretWord::new("Maple").unwrap()));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_fallback_words_missing_file() {
        let err = load_fallback_words_from_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, WordListError::Io(_)));
    }
}
