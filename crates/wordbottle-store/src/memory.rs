//! In-memory backend.

use std::collections::HashMap;

use wordbottle_model::{Room, RoomCode};

use crate::{BackendError, StorageBackend};

/// A `HashMap`-backed store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rooms: HashMap<RoomCode, Room>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, code: &RoomCode) -> Result<Option<Room>, BackendError> {
        Ok(self.rooms.get(code).cloned())
    }

    fn put(&mut self, room: &Room) -> Result<(), BackendError> {
        self.rooms.insert(room.code.clone(), room.clone());
        Ok(())
    }

    fn delete(&mut self, code: &RoomCode) -> Result<(), BackendError> {
        self.rooms.remove(code);
        Ok(())
    }

    fn list(&self) -> Result<Vec<RoomCode>, BackendError> {
        Ok(self.rooms.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordbottle_model::Room;

    fn room(code: &str) -> Room {
        Room::new(code.parse().unwrap(), "host", 0)
    }

    #[test]
    fn test_put_get_round_trip() {
        let mut b = MemoryBackend::new();
        let r = room("GAME-ABCD");
        b.put(&r).unwrap();
        assert_eq!(b.get(&r.code).unwrap(), Some(r));
    }

    #[test]
    fn test_get_missing_is_none() {
        let b = MemoryBackend::new();
        let code = "GAME-ABCD".parse().unwrap();
        assert_eq!(b.get(&code).unwrap(), None);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut b = MemoryBackend::new();
        let r = room("GAME-ABCD");
        b.put(&r).unwrap();
        b.delete(&r.code).unwrap();
        b.delete(&r.code).unwrap();
        assert_eq!(b.get(&r.code).unwrap(), None);
    }

    #[test]
    fn test_list_returns_live_codes() {
        let mut b = MemoryBackend::new();
        b.put(&room("GAME-AAAA")).unwrap();
        b.put(&room("GAME-BBBB")).unwrap();
        let mut codes: Vec<String> =
            b.list().unwrap().iter().map(|c| c.to_string()).collect();
        codes.sort();
        assert_eq!(codes, vec!["GAME-AAAA", "GAME-BBBB"]);
    }
}
