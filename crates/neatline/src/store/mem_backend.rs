use super::backend::StorageBackend;
use crate::error::{NeatlineError, Result};
use crate::model::{Exhibit, ExhibitId, Record, RecordId};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory storage backend for tests and for bundles loaded whole.
///
/// Uses `RefCell` for interior mutability since rendering is single-threaded.
/// This keeps every `StorageBackend` method on `&self`.
#[derive(Default)]
pub struct MemBackend {
    exhibits: RefCell<BTreeMap<ExhibitId, Exhibit>>,
    records: RefCell<BTreeMap<RecordId, Record>>,
    simulate_write_error: RefCell<bool>,
    simulate_exhibit_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Fail only writes of the exhibits table.
    pub fn set_simulate_exhibit_write_error(&self, simulate: bool) {
        *self.simulate_exhibit_write_error.borrow_mut() = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(NeatlineError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_exhibits(&self) -> Result<BTreeMap<ExhibitId, Exhibit>> {
        Ok(self.exhibits.borrow().clone())
    }

    fn save_exhibits(&self, exhibits: &BTreeMap<ExhibitId, Exhibit>) -> Result<()> {
        self.check_writable()?;
        if *self.simulate_exhibit_write_error.borrow() {
            return Err(NeatlineError::Store(
                "Simulated exhibits write error".to_string(),
            ));
        }
        *self.exhibits.borrow_mut() = exhibits.clone();
        Ok(())
    }

    fn load_records(&self) -> Result<BTreeMap<RecordId, Record>> {
        Ok(self.records.borrow().clone())
    }

    fn save_records(&self, records: &BTreeMap<RecordId, Record>) -> Result<()> {
        self.check_writable()?;
        *self.records.borrow_mut() = records.clone();
        Ok(())
    }
}
