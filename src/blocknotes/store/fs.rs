use super::DataStore;
use crate::error::{NotesError, Result};
use crate::model::Note;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const NOTES_DIR: &str = "notes";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: data_dir.into().join(NOTES_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn note_path(&self, id: &Uuid) -> PathBuf {
        self.root.join(format!("note-{}.json", id))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotesError::Io)?;
        }
        Ok(())
    }

    fn read_note(path: &Path) -> Result<Note> {
        let content = fs::read_to_string(path).map_err(NotesError::Io)?;
        serde_json::from_str(&content).map_err(NotesError::Serialization)
    }
}

impl DataStore for FileStore {
    fn save_note(&mut self, note: &Note) -> Result<()> {
        self.ensure_dir()?;

        // Temp file + rename: readers never see a half-written document
        let content = serde_json::to_string_pretty(note).map_err(NotesError::Serialization)?;
        let tmp_path = self.root.join(format!(".note-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(NotesError::Io)?;
        fs::rename(&tmp_path, self.note_path(&note.id)).map_err(NotesError::Io)?;

        Ok(())
    }

    fn get_note(&self, id: &Uuid) -> Result<Note> {
        let path = self.note_path(id);
        if !path.exists() {
            return Err(NotesError::NoteNotFound(*id));
        }
        Self::read_note(&path)
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut notes = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(NotesError::Io)? {
            let path = entry.map_err(NotesError::Io)?.path();
            let is_note = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("note-") && n.ends_with(".json"));
            if !is_note {
                continue;
            }

            // Unreadable documents are logged and left out
            match Self::read_note(&path) {
                Ok(note) => notes.push(note),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable note"),
            }
        }

        Ok(notes)
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<()> {
        match fs::remove_file(self.note_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(NotesError::NoteNotFound(*id)),
            Err(e) => Err(NotesError::Io(e)),
        }
    }
}
