//! Shared data model for wordbottle.
//!
//! This crate defines the record that every other layer passes around:
//!
//! - **Room** ([`Room`], [`Guess`]) — the persisted game session record.
//! - **Phases** ([`GamePhase`]) — the round lifecycle state machine.
//! - **Codes** ([`RoomCode`]) — short join codes with a constant tag.
//! - **Patches** ([`RoomPatch`]) — partial updates merged into a room.
//!
//! The serialized `Room` is the external interface of the whole system:
//! whatever backing store is in use, the JSON shape of this record is what
//! gets persisted and what observers receive. Its field names are pinned by
//! tests in `room.rs`.

mod code;
mod patch;
mod phase;
mod room;

pub use code::{CodeParseError, RoomCode, CODE_TAG};
pub use patch::RoomPatch;
pub use phase::GamePhase;
pub use room::{unix_millis, Guess, Room, DEFAULT_MAX_PLAYERS};
