use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

use super::helpers::require_id;

pub fn run<S: DataStore>(store: &mut S, id: Option<&str>) -> Result<CmdResult> {
    let id = require_id(id)?;
    let note = store.get_note(&id)?;
    store.delete_note(&id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Note deleted: {}", id)));
    Ok(result.with_affected_notes(vec![note]))
}
