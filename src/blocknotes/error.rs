use thiserror::Error;
use uuid::Uuid;

use crate::block::BlockKind;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    #[error("Missing note id")]
    MissingId,

    #[error("Invalid note id format: {0}")]
    InvalidId(String),

    #[error("Stale revision for note {id}: got {got}, stored {stored}")]
    StaleRevision { id: Uuid, got: u64, stored: u64 },

    #[error("Note {0} has no revisions left")]
    RevisionExhausted(Uuid),

    /// The server refused a save because it holds a newer revision.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid note content: {0}")]
    InvalidContent(String),

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("{kind} block {id} has no editable text")]
    NoEditableText { id: String, kind: BlockKind },

    #[error("Block {id} is a {expected} block, cannot hold {got} content")]
    KindMismatch {
        id: String,
        expected: BlockKind,
        got: BlockKind,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any other error response from the notes server.
    #[error("{message} ({status})")]
    Remote { status: u16, message: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NotesError>;
