//! Error types for the round rules.

use wordbottle_model::GamePhase;

/// Errors from round operations.
///
/// Everything here is user-correctable — add a player, type a word,
/// wait your turn. A failed operation never half-applies.
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    /// A round needs at least two players.
    #[error("need at least 2 players, have {0}")]
    NotEnoughPlayers(usize),

    /// The same display name was given twice.
    #[error("duplicate player name: {0:?}")]
    DuplicatePlayer(String),

    /// A player name is empty after trimming.
    #[error("empty player name")]
    EmptyPlayerName,

    /// The secret word is empty after trimming.
    #[error("secret word must not be empty")]
    EmptyWord,

    /// The clue is empty after trimming.
    #[error("clue must not be empty")]
    EmptyClue,

    /// The puzzle-master index is outside the roster.
    #[error("invalid puzzle master index: {0}")]
    InvalidMaster(usize),

    /// The operation is not valid in the room's current phase.
    #[error("wrong phase: expected {expected}, found {found}")]
    WrongPhase {
        expected: GamePhase,
        found: GamePhase,
    },

    /// The round already ended; submissions no longer mutate anything.
    #[error("round is over")]
    RoundOver,
}
