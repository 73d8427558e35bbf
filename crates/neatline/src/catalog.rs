//! # External Catalog
//!
//! Records may link to an item in an external catalog. The catalog supplies three kinds of
//! data: descriptive metadata (title, description, date, coverage), WMS layer info, and
//! optionally a list of feature shapes when a feature source is installed.
//!
//! The engine never queries the catalog while serializing. [`CatalogSnapshot::prefetch`]
//! does one lookup per *distinct* linked item before a render pass starts, so the number
//! of round-trips is bounded by the number of items, not the number of records.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::error::Result;
use crate::model::{ItemId, Record};

/// Descriptive metadata for one catalog item. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-text date, typically `start` or `start/end`.
    #[serde(default)]
    pub date: String,
    /// Free-text geometry.
    #[serde(default)]
    pub coverage: String,
}

/// WMS layer service attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WmsInfo {
    pub address: String,
    pub layers: String,
}

/// One shape from the feature source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFeature {
    #[serde(default)]
    pub wkt: Option<String>,
}

/// Lookup contract for the external catalog.
pub trait ItemCatalog {
    fn fetch_item_metadata(&self, item_id: ItemId) -> Result<Option<ItemMetadata>>;

    fn fetch_wms_info(&self, item_id: ItemId) -> Result<Option<WmsInfo>>;

    /// Whether a feature source is installed. When it is not, geocoverage falls back to
    /// the item's coverage field.
    fn features_enabled(&self) -> bool {
        false
    }

    fn fetch_item_features(&self, _item_id: ItemId) -> Result<Vec<ItemFeature>> {
        Ok(Vec::new())
    }
}

/// A catalog held entirely in memory, as loaded from an exhibit bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    pub items: HashMap<ItemId, ItemMetadata>,
    #[serde(default)]
    pub wms: HashMap<ItemId, WmsInfo>,
    /// `None` means no feature source is installed.
    #[serde(default)]
    pub features: Option<HashMap<ItemId, Vec<ItemFeature>>>,
}

impl ItemCatalog for StaticCatalog {
    fn fetch_item_metadata(&self, item_id: ItemId) -> Result<Option<ItemMetadata>> {
        Ok(self.items.get(&item_id).cloned())
    }

    fn fetch_wms_info(&self, item_id: ItemId) -> Result<Option<WmsInfo>> {
        Ok(self.wms.get(&item_id).cloned())
    }

    fn features_enabled(&self) -> bool {
        self.features.is_some()
    }

    fn fetch_item_features(&self, item_id: ItemId) -> Result<Vec<ItemFeature>> {
        Ok(self
            .features
            .as_ref()
            .and_then(|features| features.get(&item_id))
            .cloned()
            .unwrap_or_default())
    }
}

/// Catalog data for every item linked from one set of records.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    items: HashMap<ItemId, ItemMetadata>,
    wms: HashMap<ItemId, WmsInfo>,
    features: Option<HashMap<ItemId, Vec<ItemFeature>>>,
}

impl CatalogSnapshot {
    /// Fetch everything the given records link to, once per distinct item.
    pub fn prefetch<'r, C, I>(catalog: &C, records: I) -> Result<Self>
    where
        C: ItemCatalog + ?Sized,
        I: IntoIterator<Item = &'r Record>,
    {
        Self::for_items(catalog, records.into_iter().filter_map(|r| r.item_id))
    }

    pub fn for_items<C>(catalog: &C, item_ids: impl IntoIterator<Item = ItemId>) -> Result<Self>
    where
        C: ItemCatalog + ?Sized,
    {
        let mut snapshot = CatalogSnapshot {
            features: catalog.features_enabled().then(HashMap::new),
            ..Default::default()
        };

        let distinct: BTreeSet<ItemId> = item_ids.into_iter().collect();
        for item_id in distinct {
            if let Some(meta) = catalog.fetch_item_metadata(item_id)? {
                snapshot.items.insert(item_id, meta);
            }
            if let Some(wms) = catalog.fetch_wms_info(item_id)? {
                snapshot.wms.insert(item_id, wms);
            }
            if let Some(features) = snapshot.features.as_mut() {
                features.insert(item_id, catalog.fetch_item_features(item_id)?);
            }
        }

        debug!(
            items = snapshot.items.len(),
            wms = snapshot.wms.len(),
            "Prefetched catalog data"
        );
        Ok(snapshot)
    }

    pub fn item(&self, item_id: Option<ItemId>) -> Option<&ItemMetadata> {
        item_id.and_then(|id| self.items.get(&id))
    }

    pub fn wms(&self, item_id: Option<ItemId>) -> Option<&WmsInfo> {
        item_id.and_then(|id| self.wms.get(&id))
    }

    /// `None` when no feature source is installed, else the item's shapes (possibly none).
    pub fn features(&self, item_id: Option<ItemId>) -> Option<&[ItemFeature]> {
        let features = self.features.as_ref()?;
        Some(
            item_id
                .and_then(|id| features.get(&id))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        )
    }
}
