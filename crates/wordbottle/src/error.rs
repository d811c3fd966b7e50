//! Unified error type for the wordbottle facade.

use wordbottle_round::RoundError;
use wordbottle_store::StoreError;

/// Top-level error that wraps the crate-specific errors.
///
/// When using the `wordbottle` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attribute on each variant auto-generates `From` impls, so
/// the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A storage-level error (room not found, room full, backend).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A rules-level error (wrong phase, empty word, round over).
    #[error(transparent)]
    Round(#[from] RoundError),

    /// A command that needs a joined room was issued without one.
    #[error("not in a room")]
    NoRoom,
}
