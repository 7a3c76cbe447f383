//! Error type for edit operations.

/// Errors raised by the transform, selection and history layers.
///
/// Most of these are recoverable: the command dispatcher logs them and keeps
/// the previous state.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Non-finite coordinate in proposed {0}")]
    NonFinite(&'static str),
    #[error("Unknown entity: '{0}'")]
    UnknownEntity(String),
    #[error("Room '{0}' is locked")]
    LockedRoom(String),
    #[error("Another gesture is already active: {0}")]
    GestureConflict(&'static str),
    #[error("No active transform session")]
    NoActiveSession,
    #[error(transparent)]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EditError>;
