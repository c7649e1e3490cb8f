//! Checkbox plus single line of text.

use crate::block::{BlockContent, TodoContent};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoField {
    content: TodoContent,
}

impl TodoField {
    pub fn new(content: TodoContent) -> Self {
        Self { content }
    }

    /// Reads a block's content. Anything but a todo starts unchecked and empty.
    pub fn from_content(content: &BlockContent) -> Self {
        match content {
            BlockContent::Todo(todo) => Self::new(todo.clone()),
            _ => Self::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.content.text
    }

    pub fn checked(&self) -> bool {
        self.content.checked
    }

    /// Flips the checkbox and returns the whole new content.
    pub fn toggle(&mut self) -> TodoContent {
        self.content.checked = !self.content.checked;
        self.content.clone()
    }

    /// Replaces the text, keeping the checkbox, and returns the whole new content.
    pub fn set_text(&mut self, text: impl Into<String>) -> TodoContent {
        self.content.text = text.into();
        self.content.clone()
    }

    pub fn content(&self) -> &TodoContent {
        &self.content
    }
}
