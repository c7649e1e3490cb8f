use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::model::{blocks_from_content, Note, NoteUpdate};
use crate::store::DataStore;
use chrono::Utc;

use super::helpers::require_id;

/// Replaces a stored note wholesale.
///
/// An update carrying a revision must be strictly newer than the stored one;
/// without a revision the write lands and bumps the stored revision, unless the
/// stored revision is already `u64::MAX`.
pub fn run<S: DataStore>(store: &mut S, update: NoteUpdate) -> Result<CmdResult> {
    let id = require_id(update.id.as_deref())?;
    let existing = store.get_note(&id)?;

    let revision = match update.revision {
        Some(got) if got <= existing.revision => {
            return Err(NotesError::StaleRevision {
                id,
                got,
                stored: existing.revision,
            });
        }
        Some(got) => got,
        None => existing
            .revision
            .checked_add(1)
            .ok_or(NotesError::RevisionExhausted(id))?,
    };

    let mut result = CmdResult::default();
    if update.revision.is_none() {
        result.add_message(CmdMessage::warning(format!(
            "Note {} updated without a revision; last write wins",
            id
        )));
    }

    let note = Note {
        id,
        title: update.title,
        content: blocks_from_content(update.content)?,
        created_at: existing.created_at,
        updated_at: Utc::now(),
        revision,
    };
    store.save_note(&note)?;

    result.add_message(CmdMessage::success(format!(
        "Note updated ({}): revision {}",
        id, revision
    )));
    Ok(result.with_affected_notes(vec![note]))
}
