use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;
use uuid::Uuid;

pub fn run<S: DataStore>(store: &S, id: &Uuid) -> Result<CmdResult> {
    let note = store.get_note(id)?;
    Ok(CmdResult::default().with_listed_notes(vec![note]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::error::NotesError;
    use crate::model::Note;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_gets_note_by_id() {
        let note = Note::new("One".into(), vec![Block::text("body")]);
        let fixture = StoreFixture::new().with_note(note.clone());

        let result = run(&fixture.store, &note.id).unwrap();
        assert_eq!(result.listed_notes, vec![note]);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let fixture = StoreFixture::new().with_notes(2);
        assert!(matches!(
            run(&fixture.store, &Uuid::new_v4()),
            Err(NotesError::NoteNotFound(_))
        ));
    }
}
