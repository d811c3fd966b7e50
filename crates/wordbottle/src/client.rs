//! The `GameClient`: one object per player process.
//!
//! It ties the layers together: store → watcher → rules. Every
//! game-level command here follows the same shape: load the current
//! room, apply the rules to a copy, persist the result in one update.
//! The poll loop then carries the new state to every subscriber within
//! one interval.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use wordbottle_model::{Room, RoomCode, RoomPatch};
use wordbottle_round::{Round, RoundError, TurnOutcome};
use wordbottle_store::{MemoryBackend, RoomStore, StorageBackend, StoreConfig};
use wordbottle_watch::{PollHandle, RoomWatcher, SubscriptionId, WatchConfig, ROOM_UPDATE};

use crate::ClientError;

/// What a player sends during the guessing phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Submission {
    /// An attempt at the secret word.
    Guess(String),
    /// The current guesser gives up their remaining turns.
    Quit,
    /// End the round now and expose the secret to everyone.
    Reveal,
}

/// A player's handle on the game.
///
/// Owns the room store and the polling watcher. Creating or joining a
/// room starts the poll loop; leaving it (or [`GameClient::disconnect`])
/// stops the loop and drops every subscription. Commands are synchronous;
/// the async part of this crate is only the poll task, so a `GameClient`
/// must live inside a Tokio runtime.
pub struct GameClient<B: StorageBackend> {
    store: Arc<RoomStore<B>>,
    watcher: RoomWatcher,
    poll: Mutex<Option<PollHandle>>,
}

impl GameClient<MemoryBackend> {
    /// A client over a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: StorageBackend> GameClient<B> {
    /// Creates a client over `backend` with default settings.
    pub fn new(backend: B) -> Self {
        Self::with_configs(backend, StoreConfig::default(), WatchConfig::default())
    }

    pub fn with_configs(backend: B, store: StoreConfig, watch: WatchConfig) -> Self {
        Self {
            store: Arc::new(RoomStore::with_config(backend, store)),
            watcher: RoomWatcher::new(watch),
            poll: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------
    // Room lifecycle
    // -----------------------------------------------------------------

    /// Creates a room with `host` as its sole player and starts polling
    /// it.
    pub fn create_room(&self, host: &str) -> Result<Room, ClientError> {
        let room = self.store.create_room(host)?;
        self.start_polling();
        Ok(room)
    }

    /// Joins the room under `code` and starts polling it.
    pub fn join_room(&self, code: &RoomCode, name: &str) -> Result<Room, ClientError> {
        let room = self.store.join_room(code, name)?;
        self.start_polling();
        Ok(room)
    }

    /// Removes `name` from the room under `code`.
    ///
    /// When that was the room this client is watching, the poll loop
    /// stops and all subscriptions are dropped.
    pub fn leave_room(&self, code: &RoomCode, name: &str) -> Result<(), ClientError> {
        let was_current =
            matches!(self.store.current_room()?, Some(ref room) if &room.code == code);
        self.store.leave_room(code, name)?;
        if was_current {
            self.stop_watching();
        }
        Ok(())
    }

    /// Stops watching and forgets the current room without mutating it.
    ///
    /// The room lives on for the other players; this client just stops
    /// participating. Safe to call when not in a room.
    pub fn disconnect(&self) {
        self.stop_watching();
        self.store.detach();
        tracing::debug!("client disconnected");
    }

    /// The latest persisted state of the joined room.
    pub fn current_room(&self) -> Result<Option<Room>, ClientError> {
        Ok(self.store.current_room()?)
    }

    /// Merges `patch` into the joined room and persists it.
    ///
    /// The game commands below are the usual way in; this is the raw
    /// escape hatch for collaborators that compute their own patches.
    pub fn update_room(&self, patch: &RoomPatch) -> Result<Room, ClientError> {
        Ok(self.store.update_room(patch)?)
    }

    /// A join URL for the current room, with the code as query
    /// parameter: `https://host/path?room=GAME-7QX2`.
    pub fn share_link(&self, base_url: &str) -> Result<String, ClientError> {
        let room = self.store.current_room()?.ok_or(ClientError::NoRoom)?;
        Ok(format!("{}?room={}", base_url.trim_end_matches('/'), room.code))
    }

    // -----------------------------------------------------------------
    // Game commands
    // -----------------------------------------------------------------

    /// Fixes the roster and draws the puzzle master.
    pub fn start_game(&self) -> Result<Room, ClientError> {
        let (room, _) = self.with_round(|round| round.start())?;
        Ok(room)
    }

    /// Records the secret word and its clue.
    pub fn set_secret(&self, word: &str, clue: &str) -> Result<Room, ClientError> {
        let (room, ()) = self.with_round(|round| round.set_secret(word, clue))?;
        Ok(room)
    }

    /// Publishes the clue and opens the guessing phase.
    pub fn open_guessing(&self) -> Result<Room, ClientError> {
        let (room, _) = self.with_round(|round| round.open_guessing().map(str::to_owned))?;
        Ok(room)
    }

    /// Applies a guessing-phase submission for the current guesser.
    ///
    /// Returns the persisted room along with what the submission did,
    /// so callers can drive their notifications without re-deriving the
    /// rules.
    pub fn submit(&self, submission: Submission) -> Result<(Room, TurnOutcome), ClientError> {
        self.with_round(|round| match &submission {
            Submission::Guess(text) => round.submit_guess(text),
            Submission::Quit => round.quit_current(),
            Submission::Reveal => round.reveal(),
        })
    }

    /// Resets the finished round for another game with the same roster.
    pub fn play_again(&self) -> Result<Room, ClientError> {
        let (room, ()) = self.with_round(|round| round.play_again())?;
        Ok(room)
    }

    // -----------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------

    /// Registers `callback` for room snapshots; it fires on every poll
    /// tick while a room exists, whether or not anything changed.
    pub fn on_room_update(
        &self,
        callback: impl Fn(&Room) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.watcher.subscribe(ROOM_UPDATE, callback)
    }

    /// Removes one subscription, or all of them with `None`.
    pub fn unsubscribe(&self, id: Option<SubscriptionId>) {
        self.watcher.unsubscribe(ROOM_UPDATE, id);
    }

    /// Whether the poll loop is currently running.
    pub fn is_watching(&self) -> bool {
        self.lock_poll().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Loads the current room, applies `f` to a copy, and persists the
    /// result in a single update. A rules failure writes nothing.
    fn with_round<T>(
        &self,
        f: impl FnOnce(&mut Round) -> Result<T, RoundError>,
    ) -> Result<(Room, T), ClientError> {
        let room = self.store.current_room()?.ok_or(ClientError::NoRoom)?;
        let mut round = Round::from_room(room);
        let outcome = f(&mut round)?;
        let updated = self.store.update_room(&RoomPatch::from_room(round.room()))?;
        Ok((updated, outcome))
    }

    /// (Re)starts the poll loop. Replacing the handle stops any loop
    /// from a previously joined room.
    fn start_polling(&self) {
        let handle = self.watcher.spawn(self.store.clone());
        *self.lock_poll() = Some(handle);
    }

    fn stop_watching(&self) {
        if let Some(handle) = self.lock_poll().take() {
            handle.stop();
        }
        self.watcher.unsubscribe(ROOM_UPDATE, None);
    }

    fn lock_poll(&self) -> std::sync::MutexGuard<'_, Option<PollHandle>> {
        self.poll.lock().expect("poll mutex poisoned")
    }
}
