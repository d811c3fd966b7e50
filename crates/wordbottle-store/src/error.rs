//! Error types for the storage layer.

use wordbottle_model::RoomCode;

/// Errors from a storage backend.
///
/// The memory backend never fails; these come from the durable backend's
/// filesystem and serialization work.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The underlying filesystem operation failed.
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized for writing.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// A stored record could not be parsed.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}

/// Errors from room store operations.
///
/// Every variant is user-correctable: re-enter a code, pick another
/// room, fix the name. Failed operations leave stored state unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No room exists under this code.
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// The room has no free player slot.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// The player name is unusable (empty after trimming).
    #[error("invalid player name: {0:?}")]
    InvalidPlayerName(String),

    /// The operation needs a joined room, and there is none.
    #[error("no room joined")]
    NotJoined,

    /// The backing store failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
