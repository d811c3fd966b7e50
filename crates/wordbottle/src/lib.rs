//! # wordbottle
//!
//! The core of a word-guessing party game with a puzzle-master role:
//! room synchronization over a local key-value store, a polling change
//! notifier, and the turn/win rules.
//!
//! One player hosts a room, the others join with its code. The puzzle
//! master picks a secret word and a clue; everyone else gets one guess
//! each, in joining order. First correct guess wins; if the whole pass
//! misses, the puzzle master does.
//!
//! There is no server and no wire protocol. Clients converge through a
//! shared backing store and a poll loop: every mutation is a synchronous
//! store write, and every subscriber sees the new state within one poll
//! interval.
//!
//! ## Quick start
//!
//! ```no_run
//! use wordbottle::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ClientError> {
//!     let client = GameClient::in_memory();
//!
//!     let room = client.create_room("alice")?;
//!     println!("share this code: {}", room.code);
//!     client.join_room(&room.code, "bob")?;
//!
//!     client.on_room_update(|room| {
//!         println!("[{}] {} players", room.phase, room.players.len());
//!     });
//!
//!     client.start_game()?;
//!     client.set_secret("rainbow", "seven colours, no pot of gold")?;
//!     client.open_guessing()?;
//!
//!     let (_, outcome) = client.submit(Submission::Guess("rainbow".into()))?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! For a durable game that survives restarts, open the client over a
//! [`JsonFileBackend`](wordbottle_store::JsonFileBackend) instead.

mod client;
mod error;

pub use client::{GameClient, Submission};
pub use error::ClientError;

/// One-stop imports for applications built on wordbottle.
pub mod prelude {
    pub use crate::{ClientError, GameClient, Submission};
    pub use wordbottle_model::{GamePhase, Guess, Room, RoomCode, RoomPatch};
    pub use wordbottle_round::{Round, RoundError, TurnOutcome};
    pub use wordbottle_store::{
        JsonFileBackend, MemoryBackend, RoomStore, StoreConfig, StoreError,
    };
    pub use wordbottle_watch::{RoomWatcher, SubscriptionId, WatchConfig, ROOM_UPDATE};
}
