//! # Domain Model: Notes and their Stored Shape
//!
//! A [`Note`] is a title plus an ordered list of [`Block`]s. Order is significant:
//! it is the on-screen sequence.
//!
//! ## Legacy Content
//!
//! Early versions stored a note's body as one plain string. Readers still meet those
//! records, so the `content` field is decoded through [`blocks_from_content`]:
//!
//! | stored `content`       | decoded as                        |
//! |------------------------|-----------------------------------|
//! | `"some text"`          | one text block holding the string |
//! | `""`                   | one empty text block              |
//! | missing / other scalar | one empty text block              |
//! | `[...]`                | each element decoded as a block   |
//!
//! Writers always emit the block-array form, so a legacy record is upgraded the
//! first time it is saved.
//!
//! ## Revisions
//!
//! Every save carries a monotonically increasing `revision`. The store refuses a
//! write whose revision is not newer than the stored one, which keeps a slow,
//! stale save from overwriting a newer one. Records written before revisions
//! existed read as revision 0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::block::Block;
use crate::error::{NotesError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: Vec<Block>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: u64,
}

// Custom deserializer so legacy records (string content, no revision) still load.
impl<'de> Deserialize<'de> for Note {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = NoteHelper::deserialize(deserializer)?;
        let content = blocks_from_content(helper.content).map_err(serde::de::Error::custom)?;

        Ok(Note {
            id: helper.id,
            title: helper.title,
            content,
            created_at: helper.created_at,
            updated_at: helper.updated_at,
            revision: helper.revision,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteHelper {
    id: Uuid,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: Value,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
    #[serde(default)]
    revision: u64,
}

impl Note {
    pub fn new(title: String, content: Vec<Block>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }
}

/// Body of a create request: every note field except the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Value,
}

/// Body of a full-replace request.
///
/// The id stays a string here so that a missing or malformed id can be reported
/// as a client error instead of a generic decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}

impl From<&Note> for NoteUpdate {
    fn from(note: &Note) -> Self {
        NoteUpdate {
            id: Some(note.id.to_string()),
            title: note.title.clone(),
            content: serde_json::to_value(&note.content).unwrap_or(Value::Array(Vec::new())),
            revision: Some(note.revision),
        }
    }
}

/// Decodes a stored `content` field into blocks. See the module docs for the rules.
pub fn blocks_from_content(content: Value) -> Result<Vec<Block>> {
    match content {
        Value::String(text) if text.is_empty() => Ok(vec![Block::empty_text()]),
        Value::String(text) => Ok(vec![Block::text(text)]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| NotesError::InvalidContent(e.to_string()))
            })
            .collect(),
        _ => Ok(vec![Block::empty_text()]),
    }
}

/// Parses a note id supplied by a client.
pub fn parse_note_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| NotesError::InvalidId(raw.to_string()))
}
