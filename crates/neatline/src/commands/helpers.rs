use crate::catalog::{CatalogSnapshot, ItemCatalog};
use crate::config::StyleDefaults;
use crate::error::{NeatlineError, Result};
use crate::index::RecordGraphIndex;
use crate::model::{Exhibit, ExhibitId, ItemId, Record};
use crate::serialize::Serializer;
use crate::store::ExhibitStore;
use tracing::warn;

/// Everything one pass over an exhibit needs, loaded once.
pub struct ExhibitContext {
    pub exhibit: Option<Exhibit>,
    pub index: RecordGraphIndex,
    pub catalog: CatalogSnapshot,
}

impl ExhibitContext {
    /// Load the exhibit, its records and their catalog data.
    ///
    /// `extra_items` are prefetched alongside the records' items (e.g. the item a new
    /// record is being created from). A missing exhibit is logged and treated as absent.
    pub fn load<S, C>(
        store: &S,
        catalog: &C,
        exhibit_id: Option<ExhibitId>,
        extra_items: &[ItemId],
    ) -> Result<Self>
    where
        S: ExhibitStore,
        C: ItemCatalog + ?Sized,
    {
        let exhibit = match exhibit_id {
            Some(id) => match store.get_exhibit(id) {
                Ok(exhibit) => Some(exhibit),
                Err(NeatlineError::ExhibitNotFound(_)) => {
                    warn!(exhibit = id, "Exhibit not found, resolving without it");
                    None
                }
                Err(e) => return Err(e),
            },
            None => None,
        };

        let records = match exhibit_id {
            Some(id) => store.load_records_for_exhibit(id)?,
            None => Vec::new(),
        };
        Self::assemble(catalog, exhibit, records, extra_items)
    }

    /// Like [`ExhibitContext::load`], but a missing exhibit is an error.
    pub fn load_existing<S, C>(
        store: &S,
        catalog: &C,
        exhibit_id: ExhibitId,
        extra_items: &[ItemId],
    ) -> Result<Self>
    where
        S: ExhibitStore,
        C: ItemCatalog + ?Sized,
    {
        let exhibit = store.get_exhibit(exhibit_id)?;
        let records = store.load_records_for_exhibit(exhibit_id)?;
        Self::assemble(catalog, Some(exhibit), records, extra_items)
    }

    fn assemble<C>(
        catalog: &C,
        exhibit: Option<Exhibit>,
        records: Vec<Record>,
        extra_items: &[ItemId],
    ) -> Result<Self>
    where
        C: ItemCatalog + ?Sized,
    {
        let item_ids: Vec<ItemId> = records
            .iter()
            .filter_map(|r| r.item_id)
            .chain(extra_items.iter().copied())
            .collect();
        let catalog = CatalogSnapshot::for_items(catalog, item_ids)?;

        Ok(Self {
            exhibit,
            index: RecordGraphIndex::build(records),
            catalog,
        })
    }

    pub fn serializer<'a>(&'a self, defaults: &'a StyleDefaults) -> Serializer<'a> {
        Serializer::new(&self.index, self.exhibit.as_ref(), &self.catalog, defaults)
    }
}
