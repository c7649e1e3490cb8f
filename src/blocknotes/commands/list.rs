use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Lists notes, most recently updated first, at most `limit` of them.
pub fn run<S: DataStore>(store: &S, limit: usize) -> Result<CmdResult> {
    let mut notes = store.list_notes()?;
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let mut result = CmdResult::default();
    if notes.len() > limit {
        result.add_message(CmdMessage::info(format!(
            "Showing {} of {} notes",
            limit,
            notes.len()
        )));
        notes.truncate(limit);
    }
    Ok(result.with_listed_notes(notes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_lists_newest_first() {
        let fixture = StoreFixture::new().with_notes(3);
        let result = run(&fixture.store, 20).unwrap();

        let titles: Vec<_> = result.listed_notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Test Note 3", "Test Note 2", "Test Note 1"]);
    }

    #[test]
    fn test_caps_at_limit() {
        let fixture = StoreFixture::new().with_notes(25);
        let result = run(&fixture.store, 20).unwrap();
        assert_eq!(result.listed_notes.len(), 20);
        assert_eq!(result.listed_notes[0].title, "Test Note 25");
        assert_eq!(result.messages[0].content, "Showing 20 of 25 notes");
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let fixture = StoreFixture::new();
        assert!(run(&fixture.store, 20).unwrap().listed_notes.is_empty());
    }
}
