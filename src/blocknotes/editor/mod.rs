//! # Block Editor
//!
//! A headless editing model for one note body. [`BlockEditor`] owns the ordered
//! block list and the focused ("active") block; a UI layer renders it and feeds
//! input events back in.
//!
//! ```text
//!  key event ──▶ BlockEditor::handle_key ──Default──▶ TextField / TodoField
//!                   │ Handled                              │ Changed(new value)
//!                   ▼                                      ▼
//!            structural edit                      BlockEditor::set_text / update
//!                   └──────────────┬───────────────────────┘
//!                                  ▼
//!                      change listener(&[Block])
//! ```
//!
//! ## Invariants
//!
//! - The list is never empty. An empty list handed to [`BlockEditor::new`] becomes a
//!   single empty text block, and deleting the last block is refused.
//! - Block ids are unique. Duplicate ids in loaded data are replaced with fresh ones.
//! - The active id is either `None` or the id of a block in the list.
//!
//! Every mutation hands the complete block list to the change listener; there is
//! no diffing.
//!
//! ## Submodules
//!
//! - [`keys`]: block-level keyboard handling (Shift+Enter, Backspace, `/`)
//! - [`menu`]: the slash-command block type menu
//! - [`text`]: the text block widget (indentation-aware)
//! - [`todo`]: the todo block widget

use std::collections::HashSet;
use std::fmt;

use crate::block::{new_block_id, Block, BlockContent, BlockKind};
use crate::error::{NotesError, Result};

pub mod keys;
pub mod menu;
pub mod text;
pub mod todo;

use menu::{BlockMenu, Point};

pub type ChangeListener = Box<dyn FnMut(&[Block]) + Send>;

pub struct BlockEditor {
    blocks: Vec<Block>,
    active: Option<String>,
    menu: Option<BlockMenu>,
    listener: Option<ChangeListener>,
}

impl fmt::Debug for BlockEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockEditor")
            .field("blocks", &self.blocks)
            .field("active", &self.active)
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

impl BlockEditor {
    pub fn new(blocks: Vec<Block>) -> Self {
        let mut blocks = blocks;
        if blocks.is_empty() {
            blocks.push(Block::empty_text());
        }

        let mut seen = HashSet::new();
        for block in &mut blocks {
            if !seen.insert(block.id.clone()) {
                block.id = new_block_id();
                seen.insert(block.id.clone());
            }
        }

        Self {
            blocks,
            active: None,
            menu: None,
            listener: None,
        }
    }

    /// Registers the listener called with the full block list after every mutation.
    pub fn on_change(&mut self, listener: impl FnMut(&[Block]) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.as_deref().and_then(|id| self.index_of(id))
    }

    /// Focuses a block. Unknown ids are ignored and leave focus unchanged.
    pub fn set_active(&mut self, id: &str) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        self.active = Some(id.to_string());
        true
    }

    /// Inserts a fresh block of `kind` right after `index` and returns its id.
    pub fn insert_after(&mut self, index: usize, kind: BlockKind) -> Option<String> {
        if index >= self.blocks.len() {
            return None;
        }
        let block = Block::new(kind);
        let id = block.id.clone();
        self.blocks.insert(index + 1, block);
        self.menu = None;
        self.notify();
        Some(id)
    }

    /// Swaps the block at `index` for a fresh block of `kind`.
    ///
    /// The old content is discarded. Focus follows the replacement if the old block
    /// had it.
    pub fn replace(&mut self, index: usize, kind: BlockKind) -> Option<String> {
        let slot = self.blocks.get_mut(index)?;
        let block = Block::new(kind);
        let id = block.id.clone();
        let old = std::mem::replace(slot, block);
        if self.active.as_deref() == Some(old.id.as_str()) {
            self.active = Some(id.clone());
        }
        self.notify();
        Some(id)
    }

    /// Removes the block at `index`. Refused when it is the only block.
    pub fn delete(&mut self, index: usize) -> bool {
        if self.blocks.len() <= 1 || index >= self.blocks.len() {
            return false;
        }
        let removed = self.blocks.remove(index);
        if self.active.as_deref() == Some(removed.id.as_str()) {
            self.active = None;
        }
        // Positions shift, so an open menu no longer points at its block
        self.menu = None;
        self.notify();
        true
    }

    /// Replaces a block's content in place. The new content must be of the same kind.
    pub fn update(&mut self, id: &str, content: BlockContent) -> Result<()> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| NotesError::BlockNotFound(id.to_string()))?;
        if block.kind() != content.kind() {
            return Err(NotesError::KindMismatch {
                id: id.to_string(),
                expected: block.kind(),
                got: content.kind(),
            });
        }
        block.content = content;
        self.notify();
        Ok(())
    }

    /// Replaces the editable text of a text, heading or todo block.
    pub fn set_text(&mut self, id: &str, text: String) -> Result<()> {
        let index = self
            .index_of(id)
            .ok_or_else(|| NotesError::BlockNotFound(id.to_string()))?;
        let content = match &self.blocks[index].content {
            BlockContent::Text(_) => BlockContent::Text(text),
            BlockContent::Heading(_) => BlockContent::Heading(text),
            BlockContent::Todo(todo) => BlockContent::Todo(crate::block::TodoContent {
                text,
                checked: todo.checked,
            }),
            other => {
                return Err(NotesError::NoEditableText {
                    id: id.to_string(),
                    kind: other.kind(),
                })
            }
        };
        self.update(id, content)
    }

    pub fn menu(&self) -> Option<&BlockMenu> {
        self.menu.as_ref()
    }

    pub fn menu_mut(&mut self) -> Option<&mut BlockMenu> {
        self.menu.as_mut()
    }

    pub fn open_menu(&mut self, index: usize, anchor: Point) {
        if index < self.blocks.len() {
            self.menu = Some(BlockMenu::new(index, anchor));
        }
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// Applies a menu choice: the targeted block becomes a fresh block of `kind`,
    /// gains focus, and the menu closes.
    pub fn select_menu_entry(&mut self, kind: BlockKind) -> Option<String> {
        let menu = self.menu.take()?;
        let id = self.replace(menu.target(), kind)?;
        self.active = Some(id.clone());
        Some(id)
    }

    /// A pointer click anywhere in the editor. Clicks outside the open menu close it.
    pub fn click(&mut self, point: Point) {
        if let Some(menu) = &self.menu {
            if !menu.bounds().contains(point) {
                self.menu = None;
            }
        }
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.blocks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::TodoContent;
    use std::sync::{Arc, Mutex};

    fn editor_with(n: usize) -> BlockEditor {
        BlockEditor::new((0..n).map(|i| Block::text(format!("b{}", i))).collect())
    }

    fn assert_invariants(editor: &BlockEditor) {
        assert!(!editor.is_empty());
        let ids: HashSet<_> = editor.blocks().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), editor.len(), "block ids must be unique");
        if let Some(active) = editor.active() {
            assert!(ids.contains(active), "active id must be in the list");
        }
    }

    #[test]
    fn test_empty_document_gets_one_empty_text_block() {
        let editor = BlockEditor::new(Vec::new());
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.blocks()[0].content, BlockContent::Text(String::new()));
    }

    #[test]
    fn test_duplicate_ids_are_replaced() {
        let a = Block::text("a");
        let mut b = Block::text("b");
        b.id = a.id.clone();
        let editor = BlockEditor::new(vec![a, b]);
        assert_invariants(&editor);
        assert_eq!(editor.blocks()[1].content, BlockContent::Text("b".into()));
    }

    #[test]
    fn test_delete_last_block_is_noop() {
        let mut editor = editor_with(1);
        assert!(!editor.delete(0));
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_insert_after_position() {
        let mut editor = editor_with(2);
        let id = editor.insert_after(0, BlockKind::Todo).unwrap();
        assert_eq!(editor.index_of(&id), Some(1));
        assert_eq!(editor.blocks()[1].kind(), BlockKind::Todo);
        assert_eq!(editor.blocks()[2].content, BlockContent::Text("b1".into()));
        assert!(editor.insert_after(9, BlockKind::Text).is_none());
    }

    #[test]
    fn test_replace_discards_content_and_matches_kind() {
        let mut editor = editor_with(2);
        for kind in BlockKind::ALL {
            let old_id = editor.blocks()[1].id.clone();
            let id = editor.replace(1, kind).unwrap();
            assert_ne!(id, old_id);
            assert_eq!(editor.blocks()[1].content, BlockContent::default_for(kind));
        }
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn test_replace_moves_focus_to_new_block() {
        let mut editor = editor_with(2);
        let old = editor.blocks()[0].id.clone();
        editor.set_active(&old);
        let id = editor.replace(0, BlockKind::Heading).unwrap();
        assert_eq!(editor.active(), Some(id.as_str()));
    }

    #[test]
    fn test_delete_clears_focus_of_removed_block() {
        let mut editor = editor_with(3);
        let id = editor.blocks()[1].id.clone();
        editor.set_active(&id);
        assert!(editor.delete(1));
        assert_eq!(editor.active(), None);
        assert_invariants(&editor);
    }

    #[test]
    fn test_update_in_place() {
        let mut editor = editor_with(3);
        let id = editor.blocks()[1].id.clone();
        editor
            .update(&id, BlockContent::Text("changed".into()))
            .unwrap();
        assert_eq!(editor.index_of(&id), Some(1));
        assert_eq!(editor.blocks()[1].content, BlockContent::Text("changed".into()));
    }

    #[test]
    fn test_update_rejects_kind_change() {
        let mut editor = editor_with(1);
        let id = editor.blocks()[0].id.clone();
        let err = editor
            .update(&id, BlockContent::Todo(TodoContent::default()))
            .unwrap_err();
        assert!(matches!(err, NotesError::KindMismatch { .. }));
        assert_eq!(editor.blocks()[0].content, BlockContent::Text("b0".into()));
    }

    #[test]
    fn test_set_text_keeps_todo_checked() {
        let mut editor = BlockEditor::new(vec![Block::with_content(BlockContent::Todo(
            TodoContent {
                text: "old".into(),
                checked: true,
            },
        ))]);
        let id = editor.blocks()[0].id.clone();
        editor.set_text(&id, "new".into()).unwrap();
        assert_eq!(
            editor.blocks()[0].content,
            BlockContent::Todo(TodoContent {
                text: "new".into(),
                checked: true,
            })
        );
    }

    #[test]
    fn test_unknown_block_and_uneditable_block_errors() {
        let mut editor = editor_with(1);
        assert!(matches!(
            editor.set_text("missing", "x".into()),
            Err(NotesError::BlockNotFound(id)) if id == "missing"
        ));
        assert!(matches!(
            editor.update("missing", BlockContent::Text("x".into())),
            Err(NotesError::BlockNotFound(_))
        ));

        let id = editor.replace(0, BlockKind::Image).unwrap();
        assert!(matches!(
            editor.set_text(&id, "x".into()),
            Err(NotesError::NoEditableText { kind: BlockKind::Image, .. })
        ));
    }

    #[test]
    fn test_set_active_ignores_unknown_ids() {
        let mut editor = editor_with(2);
        assert!(!editor.set_active("nope"));
        assert_eq!(editor.active(), None);
    }

    #[test]
    fn test_every_mutation_notifies_with_full_list() {
        let seen: Arc<Mutex<Vec<usize>>> = Arc::default();
        let mut editor = editor_with(1);
        let sink = seen.clone();
        editor.on_change(move |blocks| sink.lock().unwrap().push(blocks.len()));

        editor.insert_after(0, BlockKind::Text);
        editor.insert_after(1, BlockKind::Todo);
        editor.delete(0);
        let id = editor.blocks()[0].id.clone();
        editor.update(&id, BlockContent::Text("x".into())).unwrap();
        editor.replace(1, BlockKind::Image);
        editor.delete(0);
        editor.delete(0); // refused, no notification

        assert_eq!(*seen.lock().unwrap(), vec![2, 3, 2, 2, 2, 1]);
    }

    #[test]
    fn test_invariants_hold_over_operation_sequence() {
        let mut editor = editor_with(1);
        let kinds = BlockKind::ALL;
        for step in 0..60usize {
            let len = editor.len();
            match step % 5 {
                0 | 1 => {
                    let id = editor.insert_after(step % len, kinds[step % kinds.len()]);
                    if let Some(id) = id {
                        editor.set_active(&id);
                    }
                }
                2 => {
                    editor.delete((step * 7) % len);
                }
                3 => {
                    editor.replace(step % len, kinds[(step / 5) % kinds.len()]);
                }
                _ => {
                    let id = editor.blocks()[step % len].id.clone();
                    let _ = editor.set_text(&id, format!("step {}", step));
                }
            }
            assert_invariants(&editor);
        }
    }

    #[test]
    fn test_menu_selection_replaces_target_and_closes() {
        let mut editor = editor_with(2);
        editor.open_menu(1, Point::new(10.0, 40.0));
        let id = editor.select_menu_entry(BlockKind::Todo).unwrap();
        assert!(editor.menu().is_none());
        assert_eq!(editor.index_of(&id), Some(1));
        assert_eq!(
            editor.blocks()[1].content,
            BlockContent::Todo(TodoContent::default())
        );
        assert_eq!(editor.active(), Some(id.as_str()));
    }

    #[test]
    fn test_click_outside_menu_closes_without_changes() {
        let mut editor = editor_with(2);
        let before = editor.blocks().to_vec();
        editor.open_menu(0, Point::new(100.0, 100.0));

        editor.click(Point::new(110.0, 120.0));
        assert!(editor.menu().is_some());

        editor.click(Point::new(5.0, 5.0));
        assert!(editor.menu().is_none());
        assert_eq!(editor.blocks(), before.as_slice());
    }

    #[test]
    fn test_select_without_menu_does_nothing() {
        let mut editor = editor_with(1);
        assert!(editor.select_menu_entry(BlockKind::Table).is_none());
        assert_eq!(editor.blocks()[0].kind(), BlockKind::Text);
    }
}
