//! # Record Graph Index
//!
//! Records form a forest through `parent_record_id`. Styles and visibility dates inherit
//! along that forest, so resolving one record needs its whole ancestor chain. Looking each
//! parent up in storage per record turns chains into O(n²) lookups across an exhibit.
//!
//! [`RecordGraphIndex`] loads an exhibit's records into an arena keyed by id and links
//! every record to its resolved parent once. Resolution then walks ids in memory.
//!
//! ## Broken Links
//!
//! The stored graph is not trusted. While building:
//!
//! - a parent id that points at the record itself becomes "no parent"
//! - a parent id that is not in the loaded set becomes "no parent"
//! - a record whose chain revisits a record (a cycle) becomes a root
//!
//! Each repair is logged with `warn!` and the render carries on. After `build` every
//! lineage is finite.
//!
//! ## Lifetime
//!
//! Build one index per render pass and drop it afterwards. Records change between
//! requests, and a stale index would serve outdated inherited values.

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::model::{Record, RecordId};

#[derive(Debug, Clone, Default)]
pub struct RecordGraphIndex {
    arena: HashMap<RecordId, Record>,
    order: Vec<RecordId>,
    parents: HashMap<RecordId, RecordId>,
}

impl RecordGraphIndex {
    pub fn build(records: Vec<Record>) -> Self {
        let mut arena = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());
        for record in records {
            if arena.contains_key(&record.id) {
                warn!(record = record.id, "Duplicate record id, keeping the first");
                continue;
            }
            order.push(record.id);
            arena.insert(record.id, record);
        }

        let mut links: HashMap<RecordId, RecordId> = HashMap::new();
        for id in &order {
            let Some(parent_id) = arena.get(id).and_then(|r| r.parent_record_id) else {
                continue;
            };
            if parent_id == *id {
                warn!(record = id, "Record lists itself as parent, treating as root");
            } else if !arena.contains_key(&parent_id) {
                warn!(
                    record = id,
                    parent = parent_id,
                    "Parent record not loaded, treating as root"
                );
            } else {
                links.insert(*id, parent_id);
            }
        }

        let cyclic: Vec<RecordId> = order
            .iter()
            .copied()
            .filter(|id| reaches_cycle(&links, *id))
            .collect();
        for id in &cyclic {
            warn!(record = id, "Parent chain contains a cycle, treating as root");
            links.remove(id);
        }

        debug!(
            records = order.len(),
            linked = links.len(),
            "Built record graph index"
        );

        Self {
            arena,
            order,
            parents: links,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.arena.get(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.arena.contains_key(&id)
    }

    /// All records, in the order they were loaded.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.order.iter().filter_map(|id| self.arena.get(id))
    }

    /// The resolved parent, after broken-link repair.
    pub fn parent(&self, id: RecordId) -> Option<&Record> {
        self.parents.get(&id).and_then(|pid| self.arena.get(pid))
    }

    /// Ancestors of `id`, nearest first. Empty for roots and unknown ids.
    pub fn lineage(&self, id: RecordId) -> Vec<&Record> {
        self.lineage_from(self.parents.get(&id).copied())
    }

    /// `start` followed by its ancestors, nearest first.
    ///
    /// Used when a record is not in the index (yet) but would hang under `start`.
    pub fn lineage_from(&self, start: Option<RecordId>) -> Vec<&Record> {
        let mut lineage = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = start;
        while let Some(id) = cursor {
            if !seen.insert(id) {
                break;
            }
            let Some(record) = self.arena.get(&id) else {
                break;
            };
            lineage.push(record);
            cursor = self.parents.get(&id).copied();
        }
        lineage
    }

    /// Whether `ancestor` appears in the lineage of `id`.
    pub fn is_ancestor(&self, ancestor: RecordId, id: RecordId) -> bool {
        self.lineage(id).iter().any(|r| r.id == ancestor)
    }

    /// Records that `record` could be re-parented under without creating a cycle.
    ///
    /// Excludes the record itself and every record whose ancestor chain includes it.
    /// With `None` (a record not yet saved) every record is selectable.
    pub fn selectable_parents(&self, record: Option<RecordId>) -> Vec<&Record> {
        self.records()
            .filter(|candidate| match record {
                Some(id) => candidate.id != id && !self.is_ancestor(id, candidate.id),
                None => true,
            })
            .collect()
    }
}

/// Whether walking raw parent links from `start` revisits a record.
fn reaches_cycle(links: &HashMap<RecordId, RecordId>, start: RecordId) -> bool {
    let mut seen = HashSet::new();
    let mut cursor = Some(start);
    while let Some(id) = cursor {
        if !seen.insert(id) {
            return true;
        }
        cursor = links.get(&id).copied();
    }
    false
}
