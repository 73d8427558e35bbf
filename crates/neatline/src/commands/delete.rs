use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordId;
use crate::store::ExhibitStore;

/// Delete a record. Its children lose their parent in the same write.
pub fn run<S: ExhibitStore>(store: &mut S, record_id: RecordId) -> Result<CmdResult> {
    let record = store.get_record(record_id)?;
    let orphaned = store.delete_record(record_id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record deleted: {}",
        record.id
    )));
    for child in &orphaned {
        result.add_message(CmdMessage::info(format!(
            "Record {} no longer has a parent",
            child
        )));
    }
    Ok(result.with_affected_records(vec![record]))
}
