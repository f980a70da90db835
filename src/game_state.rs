use crate::session::{GameSession, GuessOutcome, RoundStatus};
use crate::wordbank::{WordOrigin, WordProvider};
use crate::{debug_log, info_log};

/// What the player asked for when prompted for a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Exit,
}

/// Answer to the play-again prompt at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAgain {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Won,
    Lost,
    Abandoned,
}

/// Tally of the rounds played in one run of the program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub rounds: usize,
    pub wins: usize,
    pub losses: usize,
}

impl GameSummary {
    fn record(&mut self, end: RoundEnd) {
        self.rounds += 1;
        match end {
            RoundEnd::Won => self.wins += 1,
            RoundEnd::Lost => self.losses += 1,
            RoundEnd::Abandoned => {}
        }
    }
}

/// Everything the game loop needs from a front end.
///
/// `read_guess` returning `None` means the input was unusable and the player
/// should simply be asked again.
pub trait GameInterface {
    fn display_welcome(&mut self);
    fn display_word_origin(&mut self, origin: &WordOrigin);
    fn display_round(&mut self, session: &GameSession);
    fn read_guess(&mut self) -> Option<UserAction>;
    fn display_outcome(&mut self, outcome: GuessOutcome, guess: &str);
    fn display_win(&mut self, session: &GameSession);
    fn display_loss(&mut self, session: &GameSession);
    fn read_play_again(&mut self) -> PlayAgain;
    fn display_goodbye(&mut self, summary: &GameSummary);
}

pub fn game_loop<I: GameInterface + ?Sized>(
    provider: &WordProvider,
    interface: &mut I,
) -> GameSummary {
    let mut summary = GameSummary::default();

    loop {
        interface.display_welcome();
        let selection = provider.select_word();
        interface.display_word_origin(&selection.origin);

        let mut session = GameSession::new(selection.word);
        let end = play_round(&mut session, interface);
        summary.record(end);
        info_log!("Round {} ended: {:?}", summary.rounds, end);

        if end == RoundEnd::Abandoned {
            break;
        }
        if interface.read_play_again() == PlayAgain::No {
            break;
        }
    }

    interface.display_goodbye(&summary);
    summary
}

/// Drives one round until it is won, lost or the player walks away.
pub fn play_round<I: GameInterface + ?Sized>(
    session: &mut GameSession,
    interface: &mut I,
) -> RoundEnd {
    loop {
        interface.display_round(session);

        let guess = match interface.read_guess() {
            Some(UserAction::Guess(g)) => g,
            Some(UserAction::Exit) => return RoundEnd::Abandoned,
            None => continue,
        };

        let outcome = session.classify_guess(&guess);
        debug_log!("Guess {:?} -> {:?}", guess, outcome);
        interface.display_outcome(outcome, &guess);

        match RoundStatus::evaluate(session) {
            RoundStatus::Won => {
                interface.display_win(session);
                return RoundEnd::Won;
            }
            RoundStatus::Lost => {
                interface.display_loss(session);
                return RoundEnd::Lost;
            }
            RoundStatus::InProgress => {}
        }
    }
}
