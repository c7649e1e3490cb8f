use crate::error::{NotesError, Result};
use crate::model::parse_note_id;
use uuid::Uuid;

/// Resolves an optional client-supplied id, distinguishing "absent" from "malformed".
pub fn require_id(raw: Option<&str>) -> Result<Uuid> {
    match raw.map(str::trim) {
        None | Some("") => Err(NotesError::MissingId),
        Some(id) => parse_note_id(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_ids_are_missing() {
        assert!(matches!(require_id(None), Err(NotesError::MissingId)));
        assert!(matches!(require_id(Some("  ")), Err(NotesError::MissingId)));
    }

    #[test]
    fn test_malformed_id_is_invalid() {
        assert!(matches!(
            require_id(Some("123")),
            Err(NotesError::InvalidId(_))
        ));
    }

    #[test]
    fn test_valid_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(require_id(Some(&id.to_string())).unwrap(), id);
    }
}
