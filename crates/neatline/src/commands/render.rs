use crate::catalog::ItemCatalog;
use crate::config::StyleDefaults;
use crate::error::Result;
use crate::model::ExhibitId;
use crate::serialize::{MapFeature, TimelineEvent};
use crate::store::ExhibitStore;
use serde::Serialize;
use tracing::debug;

use super::helpers::ExhibitContext;

/// Everything the exhibit viewer draws.
#[derive(Debug, Clone, Serialize)]
pub struct ExhibitPayload {
    pub map: Vec<MapFeature>,
    pub timeline: Vec<TimelineEvent>,
}

/// Render every record of an exhibit in one pass.
///
/// Records are loaded once, indexed once, and catalog data is fetched once per distinct
/// item. Nothing is cached across calls.
pub fn run<S, C>(
    store: &S,
    catalog: &C,
    defaults: &StyleDefaults,
    exhibit_id: ExhibitId,
) -> Result<ExhibitPayload>
where
    S: ExhibitStore,
    C: ItemCatalog + ?Sized,
{
    // Rendering an exhibit that does not exist is an error, not a fallback.
    let context = ExhibitContext::load_existing(store, catalog, exhibit_id, &[])?;
    let serializer = context.serializer(defaults);
    let payload = ExhibitPayload {
        map: serializer.map_features(),
        timeline: serializer.timeline_events(),
    };

    debug!(
        exhibit = exhibit_id,
        records = context.index.len(),
        map = payload.map.len(),
        timeline = payload.timeline.len(),
        "Rendered exhibit"
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::StyleValue;
    use crate::catalog::{ItemMetadata, StaticCatalog};
    use crate::error::NeatlineError;
    use crate::model::Record;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn renders_map_and_timeline() {
        let mut hidden = Record::new(3).in_exhibit(1);
        hidden.time_active = true;
        let fixture = StoreFixture::new()
            .with_exhibit(1, "Gettysburg")
            .with_record(1, 1)
            .with_child(2, 1, 1)
            .with_saved(hidden)
            .with_record(4, 2);

        let payload = run(
            &fixture.store,
            &StaticCatalog::default(),
            &StyleDefaults::default(),
            1,
        )
        .unwrap();

        let map: Vec<u64> = payload.map.iter().map(|f| f.id).collect();
        let timeline: Vec<u64> = payload.timeline.iter().map(|e| e.event_id).collect();
        assert_eq!(map, vec![1, 2]);
        assert_eq!(timeline, vec![1, 2, 3]);
    }

    #[test]
    fn children_inherit_parent_styles() {
        let mut parent = Record::new(1).in_exhibit(1);
        parent.space_active = true;
        parent.styles.stroke_color = Some("#222222".into());
        let mut child = Record::new(2).in_exhibit(1).with_parent(1);
        child.space_active = true;

        let fixture = StoreFixture::new()
            .with_exhibit(1, "Gettysburg")
            .with_saved(parent)
            .with_saved(child);
        let payload = run(
            &fixture.store,
            &StaticCatalog::default(),
            &StyleDefaults::default(),
            1,
        )
        .unwrap();

        assert_eq!(payload.map[1].styles.stroke_color, StyleValue::from("#222222"));
    }

    #[test]
    fn linked_items_feed_text() {
        let mut record = Record::new(1).in_exhibit(1).for_item(50);
        record.space_active = true;
        let mut catalog = StaticCatalog::default();
        catalog.items.insert(
            50,
            ItemMetadata {
                title: "Battle map".into(),
                ..Default::default()
            },
        );

        let fixture = StoreFixture::new()
            .with_exhibit(1, "Gettysburg")
            .with_saved(record);
        let payload = run(&fixture.store, &catalog, &StyleDefaults::default(), 1).unwrap();
        assert_eq!(payload.map[0].title, "Battle map");
    }

    #[test]
    fn missing_exhibit_is_an_error() {
        let fixture = StoreFixture::new();
        let result = run(
            &fixture.store,
            &StaticCatalog::default(),
            &StyleDefaults::default(),
            9,
        );
        assert!(matches!(result, Err(NeatlineError::ExhibitNotFound(9))));
    }
}
