use super::backend::StorageBackend;
use super::ExhibitStore;
use crate::error::{NeatlineError, Result};
use crate::model::{Exhibit, ExhibitId, Record, RecordId};
use tracing::{info, warn};

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    fn touch_exhibit(&self, exhibit_id: ExhibitId) -> Result<()> {
        let mut exhibits = self.backend.load_exhibits()?;
        match exhibits.get_mut(&exhibit_id) {
            Some(exhibit) => {
                exhibit.touch();
                self.backend.save_exhibits(&exhibits)
            }
            None => {
                warn!(exhibit = exhibit_id, "Record points at a missing exhibit");
                Ok(())
            }
        }
    }
}

impl<B: StorageBackend> ExhibitStore for RecordStore<B> {
    fn get_exhibit(&self, id: ExhibitId) -> Result<Exhibit> {
        self.backend
            .load_exhibits()?
            .remove(&id)
            .ok_or(NeatlineError::ExhibitNotFound(id))
    }

    fn list_exhibits(&self) -> Result<Vec<Exhibit>> {
        Ok(self.backend.load_exhibits()?.into_values().collect())
    }

    fn save_exhibit(&mut self, exhibit: &Exhibit) -> Result<()> {
        let mut exhibits = self.backend.load_exhibits()?;
        exhibits.insert(exhibit.id, exhibit.clone());
        self.backend.save_exhibits(&exhibits)
    }

    fn get_record(&self, id: RecordId) -> Result<Record> {
        self.backend
            .load_records()?
            .remove(&id)
            .ok_or(NeatlineError::RecordNotFound(id))
    }

    fn load_records_for_exhibit(&self, exhibit_id: ExhibitId) -> Result<Vec<Record>> {
        Ok(self
            .backend
            .load_records()?
            .into_values()
            .filter(|r| r.exhibit_id == Some(exhibit_id))
            .collect())
    }

    fn save_record(&mut self, record: &Record) -> Result<()> {
        // A record is only written once its exhibit has been marked modified.
        if let Some(exhibit_id) = record.exhibit_id {
            self.touch_exhibit(exhibit_id)?;
        }

        let mut records = self.backend.load_records()?;
        records.insert(record.id, record.clone());
        self.backend.save_records(&records)
    }

    fn delete_record(&mut self, id: RecordId) -> Result<Vec<RecordId>> {
        let mut records = self.backend.load_records()?;
        if records.remove(&id).is_none() {
            return Err(NeatlineError::RecordNotFound(id));
        }

        let mut orphaned = Vec::new();
        for child in records.values_mut() {
            if child.parent_record_id == Some(id) {
                child.parent_record_id = None;
                orphaned.push(child.id);
            }
        }

        // Removal and re-parenting land in one write or not at all.
        self.backend.save_records(&records)?;

        info!(
            record = id,
            reparented = orphaned.len(),
            "Deleted record"
        );
        Ok(orphaned)
    }

    fn next_record_id(&self) -> Result<RecordId> {
        Ok(self
            .backend
            .load_records()?
            .keys()
            .next_back()
            .map_or(1, |max| max + 1))
    }
}
