//! Block-level keyboard handling.
//!
//! The editor sees a key before the focused block's widget does. It only claims
//! the few keys that change the block structure:
//!
//! | key         | condition                          | effect                                    |
//! |-------------|------------------------------------|-------------------------------------------|
//! | Shift+Enter | always                             | new empty text block below, focused       |
//! | Backspace   | block text empty, >1 block         | delete block, focus previous (or next)    |
//! | `/`         | block text empty                   | open the block menu on this block         |
//! | Escape      | menu open                          | close the menu                            |
//!
//! Everything else comes back as [`KeyOutcome::Default`] and belongs to the widget.
//! Tables and images have no editable line, so the text conditions never hold for
//! them.

use super::menu::Point;
use super::BlockEditor;
use crate::block::BlockKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Tab,
    Escape,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not claimed; let the widget apply its default editing.
    Default,
    /// Claimed; the default action must be suppressed.
    Handled,
}

impl BlockEditor {
    /// Interprets a key pressed in the block at `index`.
    ///
    /// `anchor` is the block's on-screen position, used if the key opens the menu.
    pub fn handle_key(&mut self, index: usize, input: KeyInput, anchor: Point) -> KeyOutcome {
        let Some(block) = self.block(index) else {
            return KeyOutcome::Default;
        };
        let text_empty = block.content.editable_text().is_some_and(str::is_empty);

        match input.key {
            Key::Escape if self.menu().is_some() => {
                self.close_menu();
                KeyOutcome::Handled
            }
            Key::Enter if input.shift => {
                if let Some(id) = self.insert_after(index, BlockKind::Text) {
                    self.set_active(&id);
                }
                KeyOutcome::Handled
            }
            Key::Backspace if text_empty && self.len() > 1 => {
                self.delete(index);
                let focus = index.saturating_sub(1).min(self.len() - 1);
                let id = self.blocks()[focus].id.clone();
                self.set_active(&id);
                KeyOutcome::Handled
            }
            Key::Char('/') if text_empty => {
                self.open_menu(index, anchor);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Default,
        }
    }
}
