use std::fmt;

use thiserror::Error;

/// Incorrect guesses allowed before a round is lost.
pub const MAX_INCORRECT_GUESSES: usize = 6;

/// Symbol shown for positions that have not been revealed yet.
pub const PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("secret word must not be empty")]
pub struct EmptySecretWord;

/// The word a round's player must guess. Case is preserved and it is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretWord(String);

impl SecretWord {
    pub fn new(word: impl Into<String>) -> Result<Self, EmptySecretWord> {
        let word = word.into();
        if word.trim().is_empty() {
            return Err(EmptySecretWord);
        }
        Ok(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    AlreadyGuessed,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    /// Status a round should move to after the latest guess.
    pub fn evaluate(session: &GameSession) -> Self {
        if session.is_won() {
            Self::Won
        } else if session.is_lost() {
            Self::Lost
        } else {
            Self::InProgress
        }
    }
}

/// State of a single round: the secret, what has been revealed and the misses so far.
#[derive(Debug, Clone)]
pub struct GameSession {
    secret: SecretWord,
    letters: Vec<char>,
    mask: Vec<Option<char>>,
    // lower-cased, in guess order; never holds duplicates
    missed: Vec<String>,
}

impl GameSession {
    pub fn new(secret: SecretWord) -> Self {
        let letters: Vec<char> = secret.as_str().chars().collect();
        let mask = vec![None; letters.len()];
        Self {
            secret,
            letters,
            mask,
            missed: Vec::new(),
        }
    }

    /// Applies a guess token and reports how it was classified.
    ///
    /// Tokens are compared whole and case-insensitively: a token is correct only
    /// when it equals one of the secret's characters, in which case every matching
    /// position is revealed with the secret's own casing.
    pub fn classify_guess(&mut self, token: &str) -> GuessOutcome {
        let folded = token.to_lowercase();

        if self.missed.contains(&folded) {
            return GuessOutcome::AlreadyGuessed;
        }

        let mut matched = false;
        for (slot, &letter) in self.mask.iter_mut().zip(&self.letters) {
            if fold_char(letter) == folded {
                *slot = Some(letter);
                matched = true;
            }
        }

        if matched {
            GuessOutcome::Correct
        } else {
            self.missed.push(folded);
            GuessOutcome::Incorrect
        }
    }

    pub fn is_won(&self) -> bool {
        self.mask.iter().all(Option::is_some)
    }

    pub fn is_lost(&self) -> bool {
        self.incorrect_count() >= MAX_INCORRECT_GUESSES
    }

    pub fn incorrect_count(&self) -> usize {
        self.missed.len()
    }

    pub fn remaining_guesses(&self) -> usize {
        MAX_INCORRECT_GUESSES.saturating_sub(self.incorrect_count())
    }

    pub fn secret(&self) -> &SecretWord {
        &self.secret
    }

    pub fn missed_guesses(&self) -> &[String] {
        &self.missed
    }

    /// Reveal mask with hidden positions rendered as [`PLACEHOLDER`].
    pub fn mask(&self) -> Vec<char> {
        self.mask
            .iter()
            .map(|slot| slot.unwrap_or(PLACEHOLDER))
            .collect()
    }

    /// Reveal mask joined by spaces, e.g. `_ a t`.
    pub fn progress(&self) -> String {
        self.mask()
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn fold_char(c: char) -> String {
    c.to_lowercase().collect()
}
