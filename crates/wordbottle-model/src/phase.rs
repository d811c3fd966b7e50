//! The round lifecycle state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The coarse phase a room is in.
///
/// Transitions are strictly ordered — no skipping phases:
///
/// ```text
/// Setup → WordInput → PuzzleCreation → Guessing → Results
/// ```
///
/// - **Setup**: players are gathering; the roster is still changing.
/// - **WordInput**: the puzzle master has been drawn; waiting for the
///   secret word and clue.
/// - **PuzzleCreation**: word and clue are locked in; the clue is about
///   to be published.
/// - **Guessing**: guessers take turns, one pass through the roster.
/// - **Results**: the round is over. Terminal — starting a new round
///   re-enters `Setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Setup,
    WordInput,
    PuzzleCreation,
    Guessing,
    Results,
}

impl GamePhase {
    /// Returns the next phase in the fixed order, or `None` from `Results`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Setup => Some(Self::WordInput),
            Self::WordInput => Some(Self::PuzzleCreation),
            Self::PuzzleCreation => Some(Self::Guessing),
            Self::Guessing => Some(Self::Results),
            Self::Results => None,
        }
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Returns `true` once the round has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Results)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::WordInput => write!(f, "word_input"),
            Self::PuzzleCreation => write!(f, "puzzle_creation"),
            Self::Guessing => write!(f, "guessing"),
            Self::Results => write!(f, "results"),
        }
    }
}
