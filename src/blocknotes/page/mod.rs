//! # Note Page Controller
//!
//! [`NotePage`] glues one loaded note to a [`BlockEditor`] and keeps storage in step
//! with it:
//!
//! ```text
//!  editor mutation / set_title
//!        │ (sync) copy into the in-memory note
//!        ▼
//!  Debouncer::schedule ──quiet period──▶ save_now ──▶ NotesClient::save (PUT)
//!        ▲ replaces any not-yet-fired save
//! ```
//!
//! In-memory state is always current; storage lags by at most one quiet period.
//! Each save bumps the note's revision, so the server refuses a save that was
//! overtaken by a newer one.
//!
//! Failures never propagate out of the background save. They land in
//! [`NotePage::banner`], and nothing is retried until the next edit or an explicit
//! [`NotePage::flush`].
//!
//! Dropping the page cancels a save that has not fired yet. Call
//! [`NotePage::flush`] first to keep it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::block::Block;
use crate::editor::BlockEditor;
use crate::error::{NotesError, Result};
use crate::model::Note;

pub mod client;
pub mod debounce;

pub use client::{HttpNotesClient, NotesClient};
pub use debounce::Debouncer;

struct PageState {
    note: Note,
    banner: Option<String>,
}

type SharedState = Arc<Mutex<PageState>>;

pub struct NotePage {
    client: Arc<dyn NotesClient>,
    state: SharedState,
    editor: BlockEditor,
    debouncer: Debouncer,
}

impl NotePage {
    /// Fetches the note `id` and builds an editor over its blocks.
    ///
    /// Legacy or missing content has already been turned into blocks when the note
    /// was decoded; an empty body becomes one empty text block here.
    pub async fn load(
        client: Arc<dyn NotesClient>,
        id: &str,
        save_debounce: Duration,
    ) -> Result<Self> {
        let note = client.get(id).await.map_err(|e| {
            tracing::warn!(note = id, error = %e, "failed to load note");
            e
        })?;
        tracing::info!(note = %note.id, blocks = note.content.len(), "loaded note");

        let mut editor = BlockEditor::new(note.content.clone());
        let state = Arc::new(Mutex::new(PageState {
            note: Note {
                content: editor.blocks().to_vec(),
                ..note
            },
            banner: None,
        }));
        let debouncer = Debouncer::new(save_debounce);

        let listener_state = Arc::clone(&state);
        let listener_client = Arc::clone(&client);
        let listener_debouncer = debouncer.clone();
        editor.on_change(move |blocks: &[Block]| {
            lock(&listener_state).note.content = blocks.to_vec();
            schedule_save(&listener_debouncer, &listener_client, &listener_state);
        });

        Ok(Self {
            client,
            state,
            editor,
            debouncer,
        })
    }

    pub fn editor(&self) -> &BlockEditor {
        &self.editor
    }

    /// Mutations made through the returned editor schedule a save.
    pub fn editor_mut(&mut self) -> &mut BlockEditor {
        &mut self.editor
    }

    /// Snapshot of the in-memory note.
    pub fn note(&self) -> Note {
        lock(&self.state).note.clone()
    }

    pub fn title(&self) -> String {
        lock(&self.state).note.title.clone()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        lock(&self.state).note.title = title.into();
        schedule_save(&self.debouncer, &self.client, &self.state);
    }

    /// The last save error, cleared by the next successful save.
    pub fn banner(&self) -> Option<String> {
        lock(&self.state).banner.clone()
    }

    pub fn is_save_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Cancels the pending save and saves the current state now.
    pub async fn flush(&mut self) -> Result<()> {
        self.debouncer.cancel();
        save_now(self.client.as_ref(), &self.state).await
    }

    /// Deletes the note from storage, dropping any pending save.
    pub async fn delete(self) -> Result<()> {
        self.debouncer.cancel();
        let id = lock(&self.state).note.id;
        let result = self.client.delete(&id).await;
        if let Err(e) = &result {
            lock(&self.state).banner = Some(banner_text(e));
        }
        result
    }

    /// Tears the page down. A save that has not fired yet is discarded.
    pub fn close(self) {}
}

impl Drop for NotePage {
    fn drop(&mut self) {
        if self.debouncer.cancel() {
            tracing::debug!("discarded pending save on close");
        }
    }
}

/// User-facing text for a failed request.
pub fn banner_text(err: &NotesError) -> String {
    match err {
        NotesError::Http(_) => "Could not reach the notes server. Try again.".to_string(),
        NotesError::Conflict(_) => {
            "This note was changed elsewhere. Reload to see the latest version.".to_string()
        }
        other => format!("Something went wrong: {}", other),
    }
}

fn schedule_save(debouncer: &Debouncer, client: &Arc<dyn NotesClient>, state: &SharedState) {
    let client = Arc::clone(client);
    let state = Arc::clone(state);
    debouncer.schedule(async move {
        // The outcome is recorded in the banner
        let _ = save_now(client.as_ref(), &state).await;
    });
}

async fn save_now(client: &dyn NotesClient, state: &Mutex<PageState>) -> Result<()> {
    let note = {
        let mut state = lock(state);
        let Some(revision) = state.note.revision.checked_add(1) else {
            let err = NotesError::RevisionExhausted(state.note.id);
            tracing::warn!(note = %state.note.id, "revision counter exhausted");
            state.banner = Some(banner_text(&err));
            return Err(err);
        };
        state.note.revision = revision;
        state.note.clone()
    };
    tracing::debug!(note = %note.id, revision = note.revision, "saving note");

    let result = client.save(&note).await;
    let mut state = lock(state);
    // A newer save owns the banner once it has started
    if note.revision < state.note.revision {
        tracing::debug!(
            note = %note.id,
            revision = note.revision,
            latest = state.note.revision,
            ok = result.is_ok(),
            "superseded save finished"
        );
        return result;
    }
    match &result {
        Ok(()) => state.banner = None,
        Err(e) => {
            tracing::warn!(note = %note.id, error = %e, "save failed");
            state.banner = Some(banner_text(e));
        }
    }
    result
}

fn lock(state: &Mutex<PageState>) -> MutexGuard<'_, PageState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
