use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ExhibitId, ItemId, Record};
use crate::store::ExhibitStore;

/// Create an empty record in an exhibit, optionally linked to a catalog item.
///
/// Nothing is copied from the item: with no own title, description or dates the record
/// resolves them from the item until the editor saves its own values.
pub fn run<S: ExhibitStore>(
    store: &mut S,
    exhibit_id: ExhibitId,
    item_id: Option<ItemId>,
) -> Result<CmdResult> {
    store.get_exhibit(exhibit_id)?;

    let mut record = Record::new(store.next_record_id()?).in_exhibit(exhibit_id);
    record.item_id = item_id;
    store.save_record(&record)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Record created: {}", record.id)));
    Ok(result.with_affected_records(vec![record]))
}
