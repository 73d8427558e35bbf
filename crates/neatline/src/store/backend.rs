use crate::error::Result;
use crate::model::{Exhibit, ExhibitId, Record, RecordId};
use std::collections::BTreeMap;

/// Abstract interface for raw storage I/O.
///
/// This trait handles the "how" of storage (files vs memory), while
/// [`RecordStore`](super::record_store::RecordStore) handles the "what" (exhibit
/// timestamps, re-parenting on delete).
///
/// Each table is written whole. A single `save_*` call is the unit of atomicity: it
/// either replaces the table or fails and leaves it as it was.
pub trait StorageBackend {
    // --- Exhibit Table ---

    /// Load every exhibit. A missing table is empty, not an error.
    fn load_exhibits(&self) -> Result<BTreeMap<ExhibitId, Exhibit>>;

    fn save_exhibits(&self, exhibits: &BTreeMap<ExhibitId, Exhibit>) -> Result<()>;

    // --- Record Table ---

    /// Load every record. A missing table is empty, not an error.
    fn load_records(&self) -> Result<BTreeMap<RecordId, Record>>;

    /// MUST be atomic (e.g. write to tmp then rename) so a failed write never leaves a
    /// partially re-parented table.
    fn save_records(&self, records: &BTreeMap<RecordId, Record>) -> Result<()>;
}
