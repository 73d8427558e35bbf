use crate::catalog::ItemCatalog;
use crate::config::StyleDefaults;
use crate::error::Result;
use crate::model::{ExhibitId, ItemId, RecordId};
use crate::serialize::{new_record_defaults, EditForm, RecordFormDefaults};
use crate::store::ExhibitStore;

use super::helpers::ExhibitContext;

/// The edit form for a saved record.
pub fn run<S, C>(
    store: &S,
    catalog: &C,
    defaults: &StyleDefaults,
    record_id: RecordId,
) -> Result<EditForm>
where
    S: ExhibitStore,
    C: ItemCatalog + ?Sized,
{
    let record = store.get_record(record_id)?;
    let extra: Vec<ItemId> = record.item_id.into_iter().collect();
    let context = ExhibitContext::load(store, catalog, record.exhibit_id, &extra)?;
    Ok(context.serializer(defaults).edit_form(&record))
}

/// Starting values for a record about to be created from a catalog item.
pub fn new_record<S, C>(
    store: &S,
    catalog: &C,
    defaults: &StyleDefaults,
    exhibit_id: ExhibitId,
    item_id: ItemId,
) -> Result<RecordFormDefaults>
where
    S: ExhibitStore,
    C: ItemCatalog + ?Sized,
{
    let context = ExhibitContext::load_existing(store, catalog, exhibit_id, &[item_id])?;
    let parents = context.serializer(defaults).parent_options(None);
    Ok(new_record_defaults(
        context.catalog.item(Some(item_id)),
        context.exhibit.as_ref(),
        defaults,
        parents,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::StyleValue;
    use crate::catalog::{ItemMetadata, StaticCatalog};
    use crate::error::NeatlineError;
    use crate::model::{Exhibit, ParentRef, Record};
    use crate::store::memory::fixtures::StoreFixture;

    fn catalog() -> StaticCatalog {
        let mut catalog = StaticCatalog::default();
        catalog.items.insert(
            20,
            ItemMetadata {
                title: "Cemetery Ridge".into(),
                description: "Union position".into(),
                date: "1863-07-02/1863-07-03".into(),
                coverage: "POINT(-77.23 39.81)".into(),
            },
        );
        catalog
    }

    #[test]
    fn edit_form_excludes_self_and_descendants() {
        let fixture = StoreFixture::new()
            .with_exhibit(1, "Gettysburg")
            .with_record(1, 1)
            .with_child(2, 1, 1)
            .with_child(3, 2, 1)
            .with_record(4, 1);

        let form = run(&fixture.store, &catalog(), &StyleDefaults::default(), 2).unwrap();
        let choices: Vec<RecordId> = form.records.iter().map(|o| o.id).collect();
        assert_eq!(choices, vec![1, 4]);
        assert_eq!(form.parent_record_id, ParentRef::Record(1));
        assert_eq!(form.title, "Record 2");
    }

    #[test]
    fn edit_form_resolves_item_fields() {
        let fixture = StoreFixture::new()
            .with_exhibit(1, "Gettysburg")
            .with_saved(Record::new(1).in_exhibit(1).for_item(20));

        let form = run(&fixture.store, &catalog(), &StyleDefaults::default(), 1).unwrap();
        assert_eq!(form.title, "Cemetery Ridge");
        assert_eq!(form.description, "Union position");
        assert_eq!(form.start_date, "1863-07-02");
        assert_eq!(form.end_date, "1863-07-03");
        assert_eq!(form.geocoverage, "POINT(-77.23 39.81)");
    }

    #[test]
    fn edit_form_for_record_without_exhibit() {
        let fixture = StoreFixture::new().with_saved(Record::new(5));
        let form = run(&fixture.store, &catalog(), &StyleDefaults::default(), 5).unwrap();
        assert!(form.records.is_empty());
        assert_eq!(form.styles.point_radius, StyleValue::from(6));
    }

    #[test]
    fn edit_form_missing_record() {
        let fixture = StoreFixture::new();
        let result = run(&fixture.store, &catalog(), &StyleDefaults::default(), 5);
        assert!(matches!(result, Err(NeatlineError::RecordNotFound(5))));
    }

    #[test]
    fn new_record_form_seeds_from_item_and_exhibit() {
        let mut exhibit = Exhibit::new(1, "Gettysburg", "gettysburg");
        exhibit.styles.vector_color = Some("#334455".into());
        let mut fixture = StoreFixture::new().with_record(1, 1);
        fixture.store.save_exhibit(&exhibit).unwrap();

        let form = new_record(&fixture.store, &catalog(), &StyleDefaults::default(), 1, 20).unwrap();
        assert_eq!(form.title, "Cemetery Ridge");
        assert_eq!(form.start_date, "1863-07-02");
        assert_eq!(form.end_date, "1863-07-03");
        assert_eq!(form.styles.vector_color, StyleValue::from("#334455"));
        assert_eq!(form.parent_record_id, ParentRef::None);
        assert_eq!(form.records.len(), 1);
    }

    #[test]
    fn new_record_form_needs_exhibit() {
        let fixture = StoreFixture::new().with_exhibit(1, "Gettysburg");
        let result = new_record(&fixture.store, &catalog(), &StyleDefaults::default(), 4, 20);
        assert!(matches!(result, Err(NeatlineError::ExhibitNotFound(4))));
    }

    #[test]
    fn new_record_form_with_unknown_item() {
        let fixture = StoreFixture::new().with_exhibit(1, "Gettysburg");
        let form = new_record(&fixture.store, &catalog(), &StyleDefaults::default(), 1, 99).unwrap();
        assert_eq!(form.title, "");
        assert_eq!(form.start_date, "");
    }
}
