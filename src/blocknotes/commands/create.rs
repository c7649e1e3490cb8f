use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{blocks_from_content, NewNote, Note};
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, new_note: NewNote) -> Result<CmdResult> {
    let content = blocks_from_content(new_note.content)?;
    let note = Note::new(new_note.title, content);
    store.save_note(&note)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Note created: {}", note.id)));
    Ok(result.with_affected_notes(vec![note]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockContent;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    #[test]
    fn test_creates_empty_note_with_one_empty_text_block() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, NewNote::default()).unwrap();

        let note = &result.affected_notes[0];
        assert_eq!(note.title, "");
        assert_eq!(note.content.len(), 1);
        assert_eq!(note.content[0].content, BlockContent::Text(String::new()));
        assert_eq!(store.get_note(&note.id).unwrap(), *note);
    }

    #[test]
    fn test_accepts_legacy_string_body() {
        let mut store = InMemoryStore::new();
        let new_note = NewNote {
            title: "Legacy".into(),
            content: json!("hello"),
        };
        let result = run(&mut store, new_note).unwrap();
        assert_eq!(
            result.affected_notes[0].content[0].content,
            BlockContent::Text("hello".into())
        );
    }

    #[test]
    fn test_storage_failure_propagates() {
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        assert!(run(&mut store, NewNote::default()).is_err());
    }
}
