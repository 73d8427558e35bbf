use super::backend::StorageBackend;
use super::mem_backend::MemBackend;
use super::record_store::RecordStore;
use crate::error::Result;
use crate::model::{Exhibit, ExhibitId, Record, RecordId};
use std::collections::BTreeMap;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_backend(MemBackend::new())
    }

    /// A store preloaded with the given tables, in one write per table.
    pub fn with_contents(exhibits: Vec<Exhibit>, records: Vec<Record>) -> Result<Self> {
        let store = Self::new();
        let exhibits: BTreeMap<ExhibitId, Exhibit> =
            exhibits.into_iter().map(|e| (e.id, e)).collect();
        let records: BTreeMap<RecordId, Record> =
            records.into_iter().map(|r| (r.id, r)).collect();
        store.backend.save_exhibits(&exhibits)?;
        store.backend.save_records(&records)?;
        Ok(store)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::ExhibitStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_exhibit(mut self, id: ExhibitId, title: &str) -> Self {
            let slug = title.to_lowercase().replace(' ', "-");
            self.store.save_exhibit(&Exhibit::new(id, title, slug)).unwrap();
            self
        }

        /// A record on the map and the timeline, titled "Record {id}".
        pub fn with_record(mut self, id: RecordId, exhibit_id: ExhibitId) -> Self {
            let mut record = Record::new(id).in_exhibit(exhibit_id);
            record.title = Some(format!("Record {}", id));
            record.space_active = true;
            record.time_active = true;
            self.store.save_record(&record).unwrap();
            self
        }

        pub fn with_child(
            mut self,
            id: RecordId,
            parent_id: RecordId,
            exhibit_id: ExhibitId,
        ) -> Self {
            let mut record = Record::new(id)
                .in_exhibit(exhibit_id)
                .with_parent(parent_id);
            record.title = Some(format!("Record {}", id));
            record.space_active = true;
            record.time_active = true;
            self.store.save_record(&record).unwrap();
            self
        }

        pub fn with_saved(mut self, record: Record) -> Self {
            self.store.save_record(&record).unwrap();
            self
        }
    }
}
