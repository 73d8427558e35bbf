//! # Storage Layer
//!
//! Persistence is an external collaborator: the engine only needs to load an exhibit's
//! records, save one record, and delete one record. The [`ExhibitStore`] trait is that
//! contract.
//!
//! ## Split Responsibilities
//!
//! - [`backend::StorageBackend`]: raw table I/O. One call loads or replaces a whole table.
//! - [`record_store::RecordStore`]: the rules on top of the tables.
//!
//! ## Store Rules
//!
//! - **Saving a record touches its exhibit.** The owning exhibit's `modified` timestamp
//!   moves forward on every record save, before the record itself is written.
//! - **Deleting a record re-parents its children.** Children of the deleted record get
//!   no parent; nothing cascades. Removal and re-parenting are a single table write, so a
//!   failed write leaves the record and its children exactly as they were.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: `RecordStore<MemBackend>`, for tests and bundles loaded
//!   whole.
//! - `RecordStore<FsBackend>`: a bundle directory of JSON tables.
//!
//! ## Storage Layout
//!
//! ```text
//! bundle/
//! ├── exhibits.json
//! ├── records.json
//! └── catalog.json
//! ```

use crate::error::Result;
use crate::model::{Exhibit, ExhibitId, Record, RecordId};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

/// Abstract interface for exhibit and record storage.
pub trait ExhibitStore {
    fn get_exhibit(&self, id: ExhibitId) -> Result<Exhibit>;

    fn list_exhibits(&self) -> Result<Vec<Exhibit>>;

    fn save_exhibit(&mut self, exhibit: &Exhibit) -> Result<()>;

    fn get_record(&self, id: RecordId) -> Result<Record>;

    /// All records of one exhibit, ordered by id.
    fn load_records_for_exhibit(&self, exhibit_id: ExhibitId) -> Result<Vec<Record>>;

    /// Create or update a record, then touch the owning exhibit.
    fn save_record(&mut self, record: &Record) -> Result<()>;

    /// Delete a record and clear the parent of each of its children, atomically.
    ///
    /// Returns the ids of the re-parented children.
    fn delete_record(&mut self, id: RecordId) -> Result<Vec<RecordId>>;

    fn next_record_id(&self) -> Result<RecordId>;
}
