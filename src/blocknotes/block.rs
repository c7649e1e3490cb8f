//! # Blocks: the typed units of a note
//!
//! A note's body is an ordered list of [`Block`]s. Each block carries an id and a
//! [`BlockContent`], a closed enum whose variant *is* the block type. That makes
//! "the content shape matches the type tag" a property of the type system rather
//! than something every reader has to check.
//!
//! ## Wire Format
//!
//! ```text
//! {"id": "6f1c…", "type": "todo", "content": {"text": "milk", "checked": false}}
//! ```
//!
//! | type      | content                           |
//! |-----------|-----------------------------------|
//! | `text`    | string                            |
//! | `heading` | string                            |
//! | `todo`    | `{text: string, checked: bool}`   |
//! | `table`   | `string[][]` (rows of cells)      |
//! | `image`   | `{url: string, caption: string}`  |
//!
//! ## Decoding Policy
//!
//! Blocks come back from storage written by older or buggier clients, so decoding
//! goes through [`RawBlock`]:
//!
//! - **Unknown type tag**: rejected with [`NotesError::UnknownBlockType`]. There is no
//!   sensible default for a type we know nothing about.
//! - **Known tag, malformed content**: replaced by the tag's default content and
//!   logged. A todo whose content is a bare string becomes `{text: "", checked: false}`.
//! - **Missing id**: a fresh one is generated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::NotesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Heading,
    Todo,
    Table,
    Image,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Text,
        BlockKind::Heading,
        BlockKind::Todo,
        BlockKind::Table,
        BlockKind::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Heading => "heading",
            BlockKind::Todo => "todo",
            BlockKind::Table => "table",
            BlockKind::Image => "image",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| NotesError::UnknownBlockType(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoContent {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

const DEFAULT_TABLE_ROWS: usize = 2;
const DEFAULT_TABLE_COLS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Text(String),
    Heading(String),
    Todo(TodoContent),
    Table(Vec<Vec<String>>),
    Image(ImageContent),
}

impl BlockContent {
    /// Content a block of `kind` starts with when created or re-typed.
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => BlockContent::Text(String::new()),
            BlockKind::Heading => BlockContent::Heading(String::new()),
            BlockKind::Todo => BlockContent::Todo(TodoContent::default()),
            BlockKind::Table => BlockContent::Table(vec![
                vec![String::new(); DEFAULT_TABLE_COLS];
                DEFAULT_TABLE_ROWS
            ]),
            BlockKind::Image => BlockContent::Image(ImageContent::default()),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Text(_) => BlockKind::Text,
            BlockContent::Heading(_) => BlockKind::Heading,
            BlockContent::Todo(_) => BlockKind::Todo,
            BlockContent::Table(_) => BlockKind::Table,
            BlockContent::Image(_) => BlockKind::Image,
        }
    }

    /// The single line of text the keyboard acts on, if the block has one.
    ///
    /// Tables and images have no such line.
    pub fn editable_text(&self) -> Option<&str> {
        match self {
            BlockContent::Text(s) | BlockContent::Heading(s) => Some(s),
            BlockContent::Todo(todo) => Some(&todo.text),
            BlockContent::Table(_) | BlockContent::Image(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            BlockContent::Text(s) | BlockContent::Heading(s) => Value::String(s.clone()),
            BlockContent::Todo(todo) => serde_json::json!({
                "text": todo.text,
                "checked": todo.checked,
            }),
            BlockContent::Table(rows) => Value::Array(
                rows.iter()
                    .map(|row| Value::Array(row.iter().cloned().map(Value::String).collect()))
                    .collect(),
            ),
            BlockContent::Image(image) => serde_json::json!({
                "url": image.url,
                "caption": image.caption,
            }),
        }
    }

    /// Decodes `value` as content for `kind`.
    ///
    /// Returns `None` when the value has the wrong shape for the kind.
    fn from_value(kind: BlockKind, value: Value) -> Option<Self> {
        match (kind, value) {
            (BlockKind::Text, Value::String(s)) => Some(BlockContent::Text(s)),
            (BlockKind::Heading, Value::String(s)) => Some(BlockContent::Heading(s)),
            (BlockKind::Todo, value @ Value::Object(_)) => {
                serde_json::from_value(value).ok().map(BlockContent::Todo)
            }
            (BlockKind::Table, value @ Value::Array(_)) => {
                serde_json::from_value(value).ok().map(BlockContent::Table)
            }
            (BlockKind::Image, value @ Value::Object(_)) => {
                serde_json::from_value(value).ok().map(BlockContent::Image)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub id: String,
    pub content: BlockContent,
}

impl Block {
    /// A block of `kind` with a fresh id and default content.
    pub fn new(kind: BlockKind) -> Self {
        Self::with_content(BlockContent::default_for(kind))
    }

    pub fn with_content(content: BlockContent) -> Self {
        Self {
            id: new_block_id(),
            content,
        }
    }

    pub fn empty_text() -> Self {
        Self::new(BlockKind::Text)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(BlockContent::Text(text.into()))
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }
}

pub fn new_block_id() -> String {
    Uuid::new_v4().to_string()
}

/// Loosely typed block as it appears on the wire.
#[derive(Serialize, Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Value,
}

impl TryFrom<RawBlock> for Block {
    type Error = NotesError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let kind: BlockKind = raw.kind.parse()?;
        let id = if raw.id.is_empty() {
            new_block_id()
        } else {
            raw.id
        };
        let content = BlockContent::from_value(kind, raw.content).unwrap_or_else(|| {
            tracing::warn!(block = %id, %kind, "malformed block content, using default");
            BlockContent::default_for(kind)
        });
        Ok(Block { id, content })
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        RawBlock {
            kind: block.kind().as_str().to_string(),
            content: block.content.to_value(),
            id: block.id,
        }
    }
}
