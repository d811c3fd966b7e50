//! Partial room updates.

use crate::{GamePhase, Guess, Room};

/// A set of fields to merge into a stored room.
///
/// Every field is optional; `None` leaves the stored value untouched.
/// The roster is deliberately absent — membership changes only through
/// the store's join/leave operations, so a patch can never violate the
/// capacity or uniqueness invariants.
///
/// `winner` is doubly optional: `Some(Some(name))` sets the winner,
/// `Some(None)` clears it (a new round), `None` leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub phase: Option<GamePhase>,
    pub secret_word: Option<String>,
    pub clue: Option<String>,
    pub puzzle_master: Option<usize>,
    pub current_guesser: Option<usize>,
    pub guesses: Option<Vec<Guess>>,
    pub quit_players: Option<Vec<String>>,
    pub winner: Option<Option<String>>,
}

impl RoomPatch {
    /// Captures every patchable field of `room`.
    ///
    /// Used when a round has been advanced in memory and the full result
    /// should be written back through the store's single update path.
    pub fn from_room(room: &Room) -> Self {
        Self {
            phase: Some(room.phase),
            secret_word: Some(room.secret_word.clone()),
            clue: Some(room.clue.clone()),
            puzzle_master: Some(room.puzzle_master),
            current_guesser: Some(room.current_guesser),
            guesses: Some(room.guesses.clone()),
            quit_players: Some(room.quit_players.clone()),
            winner: Some(room.winner.clone()),
        }
    }

    /// Merges this patch into `room`.
    pub fn apply_to(&self, room: &mut Room) {
        if let Some(phase) = self.phase {
            room.phase = phase;
        }
        if let Some(word) = &self.secret_word {
            room.secret_word = word.clone();
        }
        if let Some(clue) = &self.clue {
            room.clue = clue.clone();
        }
        if let Some(master) = self.puzzle_master {
            room.puzzle_master = master;
        }
        if let Some(guesser) = self.current_guesser {
            room.current_guesser = guesser;
        }
        if let Some(guesses) = &self.guesses {
            room.guesses = guesses.clone();
        }
        if let Some(quit) = &self.quit_players {
            room.quit_players = quit.clone();
        }
        if let Some(winner) = &self.winner {
            room.winner = winner.clone();
        }
    }
}
