//! The round state machine: phases, turn rotation, win resolution.

use rand::Rng;
use wordbottle_model::{
    unix_millis, GamePhase, Guess, Room, RoomCode, DEFAULT_MAX_PLAYERS,
};

use crate::RoundError;

/// What a submission did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The guess matched the secret word. The round is over and the
    /// guesser won.
    Correct { winner: String },
    /// The round continues; it is now `next_guesser`'s turn. Also
    /// returned after a quit that leaves eligible guessers behind.
    Incorrect { next_guesser: String },
    /// No eligible guesser remains. The round is over with no winner;
    /// the puzzle master wins by default.
    RoundOver,
}

/// One round of the guessing game, driving a [`Room`] record through the
/// phase machine.
///
/// ```text
/// Setup → WordInput → PuzzleCreation → Guessing → Results
/// ```
///
/// A `Round` owns nothing but the record: local games build one with
/// [`Round::local`] and keep it for the whole evening; online games load
/// the stored room with [`Round::from_room`], apply one move, and write
/// [`Round::into_room`] back through the store.
///
/// The turn rotation is a single pass over the roster in original order,
/// skipping the puzzle master and anyone who has quit. There is no
/// wrapping: once the last eligible guesser has had their turn, the round
/// is over.
pub struct Round {
    room: Room,
}

impl Round {
    /// Builds a round for a local (pass-the-phone) game.
    ///
    /// Names are trimmed; the roster order given here is the turn order.
    ///
    /// # Errors
    /// [`RoundError::EmptyPlayerName`] for a blank name,
    /// [`RoundError::DuplicatePlayer`] for a repeated one,
    /// [`RoundError::NotEnoughPlayers`] for fewer than two.
    pub fn local<I, S>(players: I) -> Result<Self, RoundError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster: Vec<String> = Vec::new();
        for raw in players {
            let name = raw.into().trim().to_owned();
            if name.is_empty() {
                return Err(RoundError::EmptyPlayerName);
            }
            if roster.contains(&name) {
                return Err(RoundError::DuplicatePlayer(name));
            }
            roster.push(name);
        }
        if roster.len() < 2 {
            return Err(RoundError::NotEnoughPlayers(roster.len()));
        }

        let mut room = Room::new(RoomCode::generate(), roster[0].clone(), unix_millis());
        // A living-room game is not bound by the online room capacity.
        room.max_players = roster.len().max(DEFAULT_MAX_PLAYERS);
        room.players = roster;
        Ok(Self { room })
    }

    /// Wraps a stored room for online play.
    pub fn from_room(room: Room) -> Self {
        Self { room }
    }

    /// The record in its current state.
    pub fn room(&self) -> &Room {
        &self.room
    }

    /// Unwraps the record, typically to persist it.
    pub fn into_room(self) -> Room {
        self.room
    }

    /// The puzzle master's name.
    pub fn master(&self) -> &str {
        &self.room.players[self.room.puzzle_master]
    }

    /// The name of the player whose turn it is.
    pub fn current_guesser(&self) -> &str {
        &self.room.players[self.room.current_guesser]
    }

    /// Fixes the roster and draws the puzzle master, entering `WordInput`.
    ///
    /// The draw is a single uniform pick over the roster; any roulette
    /// shown to players beforehand is presentation only. Returns the
    /// drawn index. The first guesser is the first non-master player in
    /// roster order.
    pub fn start(&mut self) -> Result<usize, RoundError> {
        self.ensure_phase(GamePhase::Setup)?;
        let count = self.room.players.len();
        if count < 2 {
            return Err(RoundError::NotEnoughPlayers(count));
        }
        let master = rand::rng().random_range(0..count);
        self.assign_master(master);
        Ok(master)
    }

    /// Like [`Round::start`] but with a caller-chosen puzzle master.
    pub fn start_with_master(&mut self, master: usize) -> Result<(), RoundError> {
        self.ensure_phase(GamePhase::Setup)?;
        let count = self.room.players.len();
        if count < 2 {
            return Err(RoundError::NotEnoughPlayers(count));
        }
        if master >= count {
            return Err(RoundError::InvalidMaster(master));
        }
        self.assign_master(master);
        Ok(())
    }

    fn assign_master(&mut self, master: usize) {
        self.room.puzzle_master = master;
        self.room.current_guesser = if master == 0 { 1 } else { 0 };
        self.room.phase = GamePhase::WordInput;
    }

    /// Records the secret word and its clue, entering `PuzzleCreation`.
    ///
    /// Both are trimmed and must be non-empty afterwards.
    pub fn set_secret(&mut self, word: &str, clue: &str) -> Result<(), RoundError> {
        self.ensure_phase(GamePhase::WordInput)?;
        let word = word.trim();
        if word.is_empty() {
            return Err(RoundError::EmptyWord);
        }
        let clue = clue.trim();
        if clue.is_empty() {
            return Err(RoundError::EmptyClue);
        }
        self.room.secret_word = word.to_owned();
        self.room.clue = clue.to_owned();
        self.room.phase = GamePhase::PuzzleCreation;
        Ok(())
    }

    /// Publishes the clue and opens the guessing phase.
    pub fn open_guessing(&mut self) -> Result<&str, RoundError> {
        self.ensure_phase(GamePhase::PuzzleCreation)?;
        self.room.phase = GamePhase::Guessing;
        Ok(&self.room.clue)
    }

    /// Submits a guess for the current guesser.
    ///
    /// The comparison trims both sides and ignores case. The guess is
    /// appended to the history as typed, with its correctness flag; a
    /// wrong guess passes the turn to the next eligible player.
    pub fn submit_guess(&mut self, text: &str) -> Result<TurnOutcome, RoundError> {
        self.ensure_phase(GamePhase::Guessing)?;

        let guesser = self.current_guesser().to_owned();
        let correct = matches_secret(text, &self.room.secret_word);
        self.room.guesses.push(Guess {
            player: guesser.clone(),
            guess: text.to_owned(),
            correct,
        });

        if correct {
            self.room.winner = Some(guesser.clone());
            self.room.phase = GamePhase::Results;
            return Ok(TurnOutcome::Correct { winner: guesser });
        }
        self.advance()
    }

    /// Removes the current guesser from the rest of the round.
    ///
    /// When every non-master player has quit, the round ends with no
    /// winner and the secret is revealed in the results.
    pub fn quit_current(&mut self) -> Result<TurnOutcome, RoundError> {
        self.ensure_phase(GamePhase::Guessing)?;

        let name = self.current_guesser().to_owned();
        if !self.room.quit_players.contains(&name) {
            self.room.quit_players.push(name);
        }
        self.advance()
    }

    /// Ends the round immediately: no winner, secret exposed in the
    /// results. The escape hatch when everyone has given up.
    pub fn reveal(&mut self) -> Result<TurnOutcome, RoundError> {
        self.ensure_phase(GamePhase::Guessing)?;
        self.room.phase = GamePhase::Results;
        Ok(TurnOutcome::RoundOver)
    }

    /// Re-enters `Setup` for another round. The roster survives; the
    /// secret, clue, history, quit list and winner do not.
    pub fn play_again(&mut self) -> Result<(), RoundError> {
        if self.room.phase != GamePhase::Results {
            return Err(RoundError::WrongPhase {
                expected: GamePhase::Results,
                found: self.room.phase,
            });
        }
        self.room.secret_word.clear();
        self.room.clue.clear();
        self.room.guesses.clear();
        self.room.quit_players.clear();
        self.room.winner = None;
        self.room.puzzle_master = 0;
        self.room.current_guesser = 0;
        self.room.phase = GamePhase::Setup;
        Ok(())
    }

    /// Moves `current_guesser` to the next eligible player, or ends the
    /// round when the single pass is exhausted.
    fn advance(&mut self) -> Result<TurnOutcome, RoundError> {
        match self.next_eligible(self.room.current_guesser) {
            Some(next) => {
                self.room.current_guesser = next;
                Ok(TurnOutcome::Incorrect {
                    next_guesser: self.room.players[next].clone(),
                })
            }
            None => {
                self.room.phase = GamePhase::Results;
                Ok(TurnOutcome::RoundOver)
            }
        }
    }

    /// First index after `after` that is neither the master nor a
    /// quitter. No wrapping.
    fn next_eligible(&self, after: usize) -> Option<usize> {
        self.room
            .players
            .iter()
            .enumerate()
            .skip(after + 1)
            .find(|(i, name)| {
                *i != self.room.puzzle_master && !self.room.quit_players.contains(name)
            })
            .map(|(i, _)| i)
    }

    fn ensure_phase(&self, expected: GamePhase) -> Result<(), RoundError> {
        let found = self.room.phase;
        if found == expected {
            return Ok(());
        }
        if found.is_terminal() {
            return Err(RoundError::RoundOver);
        }
        Err(RoundError::WrongPhase { expected, found })
    }
}

/// Trimmed, case-insensitive equality between a guess and the secret.
fn matches_secret(guess: &str, secret: &str) -> bool {
    guess.trim().to_lowercase() == secret.trim().to_lowercase()
}
