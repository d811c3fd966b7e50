//! Durable JSON-file backend.
//!
//! One pretty-printed JSON file per room, named by its code, inside a
//! single directory. A registry of known codes is persisted alongside in
//! `index.json` so the set of rooms survives a restart without scanning
//! the directory.
//!
//! Writes serialize fully in memory before touching the final path, so a
//! failed encode leaves the old record intact. A missing room file is
//! treated as an absent room even if the registry still lists the code;
//! the stale entry disappears on the next delete.

use std::fs;
use std::path::{Path, PathBuf};

use wordbottle_model::{Room, RoomCode};

use crate::{BackendError, StorageBackend};

const INDEX_FILE: &str = "index.json";

/// A directory of room records.
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
    index: Vec<RoomCode>,
}

impl JsonFileBackend {
    /// Opens (creating if needed) the store directory and loads the code
    /// registry.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, BackendError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let index_path = dir.join(INDEX_FILE);
        let index = match fs::read(&index_path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(BackendError::Decode)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(dir = %dir.display(), rooms = index.len(), "file store opened");
        Ok(Self { dir, index })
    }

    fn room_path(&self, code: &RoomCode) -> PathBuf {
        self.dir.join(format!("{code}.json"))
    }

    fn persist_index(&self) -> Result<(), BackendError> {
        let bytes = serde_json::to_vec_pretty(&self.index).map_err(BackendError::Encode)?;
        fs::write(self.dir.join(INDEX_FILE), bytes)?;
        Ok(())
    }

    /// The directory this backend writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StorageBackend for JsonFileBackend {
    fn get(&self, code: &RoomCode) -> Result<Option<Room>, BackendError> {
        match fs::read(self.room_path(code)) {
            Ok(bytes) => {
                let room = serde_json::from_slice(&bytes).map_err(BackendError::Decode)?;
                Ok(Some(room))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, room: &Room) -> Result<(), BackendError> {
        let bytes = serde_json::to_vec_pretty(room).map_err(BackendError::Encode)?;
        fs::write(self.room_path(&room.code), bytes)?;

        if !self.index.contains(&room.code) {
            self.index.push(room.code.clone());
            self.persist_index()?;
        }
        Ok(())
    }

    fn delete(&mut self, code: &RoomCode) -> Result<(), BackendError> {
        match fs::remove_file(self.room_path(code)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        if let Some(pos) = self.index.iter().position(|c| c == code) {
            self.index.remove(pos);
            self.persist_index()?;
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<RoomCode>, BackendError> {
        Ok(self.index.clone())
    }
}
