//! The storage capability set.

use wordbottle_model::{Room, RoomCode};

use crate::BackendError;

/// A key-value backing store for room records.
///
/// This is the seam between the synchronization core and persistence:
/// the [`RoomStore`](crate::RoomStore) speaks only this trait and cannot
/// tell a `HashMap` from a directory of JSON files. Every operation is
/// synchronous and non-blocking by contract — implementations must not
/// wait on anything slower than local disk.
pub trait StorageBackend: Send + 'static {
    /// Reads the room stored under `code`, if any.
    fn get(&self, code: &RoomCode) -> Result<Option<Room>, BackendError>;

    /// Writes `room` under its own code, replacing any previous record.
    fn put(&mut self, room: &Room) -> Result<(), BackendError>;

    /// Removes the record under `code`. Removing an absent code is not
    /// an error.
    fn delete(&mut self, code: &RoomCode) -> Result<(), BackendError>;

    /// Lists every known room code.
    fn list(&self) -> Result<Vec<RoomCode>, BackendError>;
}
