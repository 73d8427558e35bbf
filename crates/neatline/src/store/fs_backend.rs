use super::backend::StorageBackend;
use crate::error::{NeatlineError, Result};
use crate::model::{Exhibit, ExhibitId, Record, RecordId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXHIBITS_FILE: &str = "exhibits.json";
pub const RECORDS_FILE: &str = "records.json";

/// File-based backend. One JSON array per table inside a bundle directory:
///
/// ```text
/// bundle/
/// ├── exhibits.json   # [Exhibit]
/// ├── records.json    # [Record]
/// └── catalog.json    # read by the CLI, not by the store
/// ```
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NeatlineError::Io)?;
        }
        Ok(())
    }

    fn read_table<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(NeatlineError::Io)?;
        serde_json::from_str(&content).map_err(NeatlineError::Serialization)
    }

    fn write_table<T: Serialize>(&self, name: &str, rows: &[&T]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(rows).map_err(NeatlineError::Serialization)?;

        // Atomic write: a failed write leaves the old table in place.
        let tmp_file = self
            .root
            .join(format!(".{}-{}.tmp", name, std::process::id()));
        fs::write(&tmp_file, content).map_err(NeatlineError::Io)?;
        fs::rename(&tmp_file, self.root.join(name)).map_err(NeatlineError::Io)?;
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_exhibits(&self) -> Result<BTreeMap<ExhibitId, Exhibit>> {
        let rows: Vec<Exhibit> = self.read_table(EXHIBITS_FILE)?;
        Ok(rows.into_iter().map(|e| (e.id, e)).collect())
    }

    fn save_exhibits(&self, exhibits: &BTreeMap<ExhibitId, Exhibit>) -> Result<()> {
        let rows: Vec<&Exhibit> = exhibits.values().collect();
        self.write_table(EXHIBITS_FILE, &rows)
    }

    fn load_records(&self) -> Result<BTreeMap<RecordId, Record>> {
        let rows: Vec<Record> = self.read_table(RECORDS_FILE)?;
        Ok(rows.into_iter().map(|r| (r.id, r)).collect())
    }

    fn save_records(&self, records: &BTreeMap<RecordId, Record>) -> Result<()> {
        let rows: Vec<&Record> = records.values().collect();
        self.write_table(RECORDS_FILE, &rows)
    }
}
