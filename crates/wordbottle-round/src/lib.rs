//! Turn rotation and win resolution for wordbottle.
//!
//! Pure rules, no storage and no timers: a [`Round`] wraps a room record
//! and advances it through the phase machine. Local games use a `Round`
//! directly; online games load the stored room into one, apply a move,
//! and write the result back.

mod error;
mod round;

pub use error::RoundError;
pub use round::{Round, TurnOutcome};
