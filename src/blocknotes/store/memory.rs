use super::DataStore;
use crate::error::{NotesError, Result};
use crate::model::Note;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    notes: HashMap<Uuid, Note>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, for exercising error paths.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(NotesError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn save_note(&mut self, note: &Note) -> Result<()> {
        self.check_writable()?;
        self.notes.insert(note.id, note.clone());
        Ok(())
    }

    fn get_note(&self, id: &Uuid) -> Result<Note> {
        self.notes
            .get(id)
            .cloned()
            .ok_or(NotesError::NoteNotFound(*id))
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.notes.values().cloned().collect())
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<()> {
        self.check_writable()?;
        if self.notes.remove(id).is_none() {
            return Err(NotesError::NoteNotFound(*id));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::block::Block;
    use chrono::{Duration, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` notes, each updated one minute after the previous one.
        pub fn with_notes(mut self, count: usize) -> Self {
            let base = Utc::now() - Duration::hours(1);
            for i in 0..count {
                let mut note = Note::new(
                    format!("Test Note {}", i + 1),
                    vec![Block::text(format!("Content for note {}", i + 1))],
                );
                note.updated_at = base + Duration::minutes(i as i64);
                self.store.save_note(&note).unwrap();
            }
            self
        }

        pub fn with_note(mut self, note: Note) -> Self {
            self.store.save_note(&note).unwrap();
            self
        }
    }
}
