//! Multi-line text widget with space indentation.
//!
//! Positions are byte offsets into the buffer and always sit on char boundaries.
//! Indentation is spaces only, [`INDENT_WIDTH`] per level:
//!
//! - Tab replaces the selection with one indent.
//! - Shift+Tab removes one indent from the end of the line's leading spaces.
//! - Backspace right after aligned leading spaces removes all of them.
//!
//! Each edit yields the complete new string, which the caller writes back into
//! the block.

use std::ops::Range;

use super::keys::{Key, KeyInput};

pub const INDENT_WIDTH: usize = 2;
const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Changed(String),
    Unchanged,
    /// The widget has nothing to do; the block editor owns this key.
    Delegate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    text: String,
    selection: Range<usize>,
}

impl TextField {
    /// A field holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn cursor(&self) -> usize {
        self.selection.start
    }

    pub fn set_selection(&mut self, selection: Range<usize>) {
        let start = self.clamp(selection.start);
        let end = self.clamp(selection.end).max(start);
        self.selection = start..end;
    }

    pub fn set_cursor(&mut self, at: usize) {
        self.set_selection(at..at);
    }

    pub fn handle_key(&mut self, input: KeyInput) -> FieldOutcome {
        let changed = match input.key {
            Key::Tab if input.shift => self.outdent(),
            Key::Tab => {
                self.insert(INDENT);
                true
            }
            Key::Backspace => {
                if self.text.is_empty() {
                    return FieldOutcome::Delegate;
                }
                self.backspace()
            }
            Key::Enter if input.shift => return FieldOutcome::Delegate,
            Key::Enter => {
                self.insert("\n");
                true
            }
            Key::Char(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                true
            }
            Key::Escape | Key::Other => false,
        };

        if changed {
            FieldOutcome::Changed(self.text.clone())
        } else {
            FieldOutcome::Unchanged
        }
    }

    fn insert(&mut self, s: &str) {
        let Range { start, end } = self.selection.clone();
        self.text.replace_range(start..end, s);
        let at = start + s.len();
        self.selection = at..at;
    }

    fn outdent(&mut self) -> bool {
        let cursor = self.selection.start;
        let line_start = self.line_start(cursor);
        let run = self.text[line_start..cursor]
            .bytes()
            .take_while(|b| *b == b' ')
            .count();

        if run < INDENT_WIDTH {
            return false;
        }
        let run_end = line_start + run;
        // Cursor inside the indentation but off the indent grid
        if run_end == cursor && run % INDENT_WIDTH != 0 {
            return false;
        }

        self.text.replace_range(run_end - INDENT_WIDTH..run_end, "");
        let Range { start, end } = self.selection.clone();
        self.selection = start - INDENT_WIDTH..end - INDENT_WIDTH;
        true
    }

    fn backspace(&mut self) -> bool {
        let Range { start, end } = self.selection.clone();
        if start != end {
            self.text.replace_range(start..end, "");
            self.selection = start..start;
            return true;
        }
        if start == 0 {
            return false;
        }

        let line_start = self.line_start(start);
        let prefix = &self.text[line_start..start];
        let aligned_indent = prefix.len() >= INDENT_WIDTH
            && prefix.len() % INDENT_WIDTH == 0
            && prefix.bytes().all(|b| b == b' ');

        let from = if aligned_indent {
            line_start
        } else {
            self.text[..start]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i)
        };
        self.text.replace_range(from..start, "");
        self.selection = from..from;
        true
    }

    fn line_start(&self, at: usize) -> usize {
        self.text[..at].rfind('\n').map_or(0, |i| i + 1)
    }

    fn clamp(&self, at: usize) -> usize {
        let mut at = at.min(self.text.len());
        while !self.text.is_char_boundary(at) {
            at -= 1;
        }
        at
    }
}
