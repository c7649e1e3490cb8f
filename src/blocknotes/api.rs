//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for note operations, whatever transport sits in front of it (the
//! HTTP router in [`crate::http`], tests, a future CLI).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (raw id strings → UUIDs)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It holds no business logic and knows nothing about HTTP status codes.
//!
//! ## Generic Over DataStore
//!
//! `NotesApi<S: DataStore>` is generic over the storage backend:
//! - Production: `NotesApi<FileStore>`
//! - Testing: `NotesApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::{parse_note_id, NewNote, NoteUpdate};
use crate::store::DataStore;

/// Default cap on the number of notes a listing returns.
pub const DEFAULT_LIST_LIMIT: usize = 20;

pub struct NotesApi<S: DataStore> {
    store: S,
    list_limit: usize,
}

impl<S: DataStore> NotesApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    pub fn list_notes(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, self.list_limit)
    }

    pub fn create_note(&mut self, new_note: NewNote) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, new_note)
    }

    pub fn get_note(&self, id: &str) -> Result<commands::CmdResult> {
        let id = parse_note_id(id)?;
        commands::get::run(&self.store, &id)
    }

    pub fn update_note(&mut self, update: NoteUpdate) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, update)
    }

    pub fn delete_note(&mut self, id: Option<&str>) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotesError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_create_then_get_dispatches() {
        let mut api = NotesApi::new(InMemoryStore::new());
        let created = api.create_note(NewNote::default()).unwrap();
        let id = created.affected_notes[0].id;

        let fetched = api.get_note(&id.to_string()).unwrap();
        assert_eq!(fetched.listed_notes[0].id, id);
    }

    #[test]
    fn test_get_with_malformed_id_is_invalid() {
        let api = NotesApi::new(InMemoryStore::new());
        assert!(matches!(
            api.get_note("zzz"),
            Err(NotesError::InvalidId(_))
        ));
    }

    #[test]
    fn test_list_respects_configured_limit() {
        let api = NotesApi::new(StoreFixture::new().with_notes(5).store).with_list_limit(3);
        assert_eq!(api.list_notes().unwrap().listed_notes.len(), 3);
    }

    #[test]
    fn test_delete_dispatches() {
        let mut api = NotesApi::new(InMemoryStore::new());
        let id = api.create_note(NewNote::default()).unwrap().affected_notes[0].id;
        api.delete_note(Some(&id.to_string())).unwrap();
        assert!(api.list_notes().unwrap().listed_notes.is_empty());
    }
}
