//! The room store: create, join, leave, update.
//!
//! One `RoomStore` per client process. It owns its backend outright and
//! additionally remembers which room this client has joined, so callers
//! can read "the current room" without threading the code everywhere —
//! the poll loop in the watch crate relies on exactly that.
//!
//! All mutation happens synchronously inside a single store call and is
//! all-or-nothing: a patch is applied to a copy and only then written.
//! The interior mutex is there so the Tokio poll task can share the
//! store with the caller; there is never a second writer.

use std::sync::Mutex;

use wordbottle_model::{unix_millis, Room, RoomCode, RoomPatch, DEFAULT_MAX_PLAYERS};

use crate::{StorageBackend, StoreError};

/// Store settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity given to rooms created by this store.
    pub max_players: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_players: DEFAULT_MAX_PLAYERS }
    }
}

struct Inner<B> {
    backend: B,
    /// The room this client has joined, if any.
    current: Option<RoomCode>,
}

/// Registry of game rooms over a [`StorageBackend`].
pub struct RoomStore<B> {
    inner: Mutex<Inner<B>>,
    config: StoreConfig,
}

impl<B: StorageBackend> RoomStore<B> {
    /// Creates a store over `backend` with default settings.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self {
            inner: Mutex::new(Inner { backend, current: None }),
            config,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<B>> {
        self.inner.lock().expect("store mutex poisoned")
    }

    /// Creates a fresh room with `host_name` as its sole player and marks
    /// it as this client's current room.
    ///
    /// # Errors
    /// [`StoreError::InvalidPlayerName`] if the name is empty after
    /// trimming.
    pub fn create_room(&self, host_name: &str) -> Result<Room, StoreError> {
        let host = valid_name(host_name)?;
        let mut inner = self.lock();

        // Draw codes until one is unused. With a 4-character suffix the
        // first draw wins virtually always; the loop covers the rest.
        let code = loop {
            let candidate = RoomCode::generate();
            if inner.backend.get(&candidate)?.is_none() {
                break candidate;
            }
        };

        let mut room = Room::new(code.clone(), host, unix_millis());
        room.max_players = self.config.max_players;
        inner.backend.put(&room)?;
        inner.current = Some(code.clone());

        tracing::info!(%code, host = %room.players[0], "room created");
        Ok(room)
    }

    /// Adds `player_name` to the room under `code` and marks that room
    /// as this client's current room.
    ///
    /// Joining a room the player is already in succeeds without change.
    ///
    /// # Errors
    /// [`StoreError::RoomNotFound`] for an unknown code,
    /// [`StoreError::RoomFull`] at capacity,
    /// [`StoreError::InvalidPlayerName`] for an empty name.
    pub fn join_room(&self, code: &RoomCode, player_name: &str) -> Result<Room, StoreError> {
        let name = valid_name(player_name)?;
        let mut inner = self.lock();

        let mut room = inner
            .backend
            .get(code)?
            .ok_or_else(|| StoreError::RoomNotFound(code.clone()))?;

        if !room.contains_player(&name) {
            if room.is_full() {
                return Err(StoreError::RoomFull(code.clone()));
            }
            room.players.push(name.clone());
            inner.backend.put(&room)?;
            tracing::info!(%code, player = %name, players = room.players.len(), "player joined");
        }

        inner.current = Some(code.clone());
        Ok(room)
    }

    /// Removes `player_name` from the room under `code`.
    ///
    /// Deletes the room (and its registry entry) when the last player
    /// leaves. Clears the current-room marker when it pointed here.
    pub fn leave_room(&self, code: &RoomCode, player_name: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();

        let mut room = inner
            .backend
            .get(code)?
            .ok_or_else(|| StoreError::RoomNotFound(code.clone()))?;

        room.players.retain(|p| p != player_name);

        if room.players.is_empty() {
            inner.backend.delete(code)?;
            tracing::info!(%code, "last player left, room deleted");
        } else {
            inner.backend.put(&room)?;
            tracing::info!(%code, player = player_name, players = room.players.len(), "player left");
        }

        if inner.current.as_ref() == Some(code) {
            inner.current = None;
        }
        Ok(())
    }

    /// Merges `patch` into the currently-joined room and persists it.
    ///
    /// The patch is applied to a copy and written in one `put`, so a
    /// backend failure leaves the stored record untouched.
    ///
    /// # Errors
    /// [`StoreError::NotJoined`] when no room is joined;
    /// [`StoreError::RoomNotFound`] when the joined room has vanished
    /// from the backend (deleted by its last leaver).
    pub fn update_room(&self, patch: &RoomPatch) -> Result<Room, StoreError> {
        let mut inner = self.lock();

        let code = inner.current.clone().ok_or(StoreError::NotJoined)?;
        let mut room = inner
            .backend
            .get(&code)?
            .ok_or_else(|| StoreError::RoomNotFound(code.clone()))?;

        patch.apply_to(&mut room);
        inner.backend.put(&room)?;

        tracing::debug!(%code, phase = %room.phase, "room updated");
        Ok(room)
    }

    /// The latest persisted state of the joined room, or `None` when
    /// nothing is joined (or the room has since been deleted).
    pub fn current_room(&self) -> Result<Option<Room>, StoreError> {
        let inner = self.lock();
        match &inner.current {
            Some(code) => Ok(inner.backend.get(code)?),
            None => Ok(None),
        }
    }

    /// The persisted registry of known room codes.
    pub fn room_codes(&self) -> Result<Vec<RoomCode>, StoreError> {
        Ok(self.lock().backend.list()?)
    }

    /// Forgets the current room without mutating it.
    pub fn detach(&self) {
        let mut inner = self.lock();
        if inner.current.take().is_some() {
            tracing::debug!("detached from room");
        }
    }
}

fn valid_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidPlayerName(name.to_owned()));
    }
    Ok(trimmed.to_owned())
}
