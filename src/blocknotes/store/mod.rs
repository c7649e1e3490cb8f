//! # Storage Layer
//!
//! Notes are schema-less JSON documents. The [`DataStore`] trait is the whole
//! contract the rest of the crate relies on: whole-document upsert, fetch by id,
//! list, delete. There are no partial updates; a save replaces the document.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - One JSON document per note: `notes/note-{uuid}.json`
//!   - Writes go to a temp file that is renamed into place
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── config.json             # Server configuration (optional)
//! └── notes/
//!     └── note-{uuid}.json    # {id, title, content, createdAt, updatedAt, revision}
//! ```
//!
//! Documents are decoded with [`Note`]'s legacy-aware deserializer, so records with
//! string content read back as block lists.

use crate::error::Result;
use crate::model::Note;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for note storage.
pub trait DataStore {
    /// Save a note (create or full replace)
    fn save_note(&mut self, note: &Note) -> Result<()>;

    /// Get a note by ID
    fn get_note(&self, id: &Uuid) -> Result<Note>;

    /// List all readable notes, in no particular order
    fn list_notes(&self) -> Result<Vec<Note>>;

    /// Delete a note permanently
    fn delete_note(&mut self, id: &Uuid) -> Result<()>;
}
