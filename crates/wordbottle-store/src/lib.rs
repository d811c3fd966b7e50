//! Room persistence for wordbottle.
//!
//! One authoritative storage interface, two implementations:
//!
//! - [`StorageBackend`] — the capability set (get/put/delete/list).
//! - [`MemoryBackend`] — `HashMap`-backed, for tests and throwaway games.
//! - [`JsonFileBackend`] — one JSON file per room plus a persisted code
//!   registry, the durable choice for real use.
//!
//! On top of the backend sits [`RoomStore`]: create/join/leave/update for
//! room records, plus tracking of the one room this client has joined.
//! The store never knows which backing is in use.

mod backend;
mod error;
mod file;
mod memory;
mod store;

pub use backend::StorageBackend;
pub use error::{BackendError, StoreError};
pub use file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use store::{RoomStore, StoreConfig};
