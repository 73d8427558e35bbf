//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry point
//! for every neatline operation, whatever client is driving it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the store, the catalog and the system style defaults for a session
//! - **Dispatches** to the matching command function
//! - **Returns structured types** (payloads or `Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or formatting
//! - **Caching**: Every render and form call rebuilds its record graph index
//!
//! ## Generic Over Store and Catalog
//!
//! `NeatlineApi<S: ExhibitStore, C: ItemCatalog>`:
//! - CLI: `NeatlineApi<RecordStore<FsBackend>, StaticCatalog>`
//! - Testing: `NeatlineApi<InMemoryStore, StaticCatalog>`

use crate::catalog::ItemCatalog;
use crate::commands::{self, render::ExhibitPayload, update::RecordUpdate, CmdResult};
use crate::config::StyleDefaults;
use crate::error::Result;
use crate::model::{Exhibit, ExhibitId, ItemId, RecordId};
use crate::serialize::{EditForm, RecordFormDefaults};
use crate::store::ExhibitStore;

pub struct NeatlineApi<S: ExhibitStore, C: ItemCatalog> {
    store: S,
    catalog: C,
    defaults: StyleDefaults,
}

impl<S: ExhibitStore, C: ItemCatalog> NeatlineApi<S, C> {
    pub fn new(store: S, catalog: C, defaults: StyleDefaults) -> Self {
        Self {
            store,
            catalog,
            defaults,
        }
    }

    pub fn exhibits(&self) -> Result<Vec<Exhibit>> {
        self.store.list_exhibits()
    }

    pub fn render(&self, exhibit_id: ExhibitId) -> Result<ExhibitPayload> {
        commands::render::run(&self.store, &self.catalog, &self.defaults, exhibit_id)
    }

    pub fn edit_form(&self, record_id: RecordId) -> Result<EditForm> {
        commands::form::run(&self.store, &self.catalog, &self.defaults, record_id)
    }

    pub fn new_record_form(
        &self,
        exhibit_id: ExhibitId,
        item_id: ItemId,
    ) -> Result<RecordFormDefaults> {
        commands::form::new_record(
            &self.store,
            &self.catalog,
            &self.defaults,
            exhibit_id,
            item_id,
        )
    }

    pub fn create_record(
        &mut self,
        exhibit_id: ExhibitId,
        item_id: Option<ItemId>,
    ) -> Result<CmdResult> {
        commands::create::run(&mut self.store, exhibit_id, item_id)
    }

    pub fn update_record(&mut self, record_id: RecordId, update: &RecordUpdate) -> Result<CmdResult> {
        commands::update::run(&mut self.store, &self.defaults, record_id, update)
    }

    pub fn delete_record(&mut self, record_id: RecordId) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, record_id)
    }

    pub fn defaults(&self) -> &StyleDefaults {
        &self.defaults
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemMetadata, StaticCatalog};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn make_api() -> NeatlineApi<InMemoryStore, StaticCatalog> {
        let fixture = StoreFixture::new()
            .with_exhibit(1, "Chancellorsville")
            .with_record(1, 1)
            .with_child(2, 1, 1);
        let mut catalog = StaticCatalog::default();
        catalog.items.insert(
            9,
            ItemMetadata {
                title: "Hazel Grove".into(),
                date: "1863-05-02".into(),
                ..Default::default()
            },
        );
        NeatlineApi::new(fixture.store, catalog, StyleDefaults::default())
    }

    #[test]
    fn render_dispatches() {
        let api = make_api();
        let payload = api.render(1).unwrap();
        assert_eq!(payload.map.len(), 2);
        assert_eq!(payload.timeline.len(), 2);
    }

    #[test]
    fn create_then_edit() {
        let mut api = make_api();
        let created = api.create_record(1, Some(9)).unwrap();
        let id = created.affected_records[0].id;

        let form = api.edit_form(id).unwrap();
        assert_eq!(form.title, "Hazel Grove");
        assert_eq!(form.start_date, "1863-05-02");
        assert_eq!(form.records.len(), 2);
    }

    #[test]
    fn update_and_delete_dispatch() {
        let mut api = make_api();
        let update: RecordUpdate = serde_json::from_str(r#"{"title": "Jackson's flank"}"#).unwrap();
        api.update_record(2, &update).unwrap();
        assert_eq!(
            api.store().get_record(2).unwrap().title.as_deref(),
            Some("Jackson's flank")
        );

        let result = api.delete_record(1).unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(api.store().get_record(2).unwrap().parent_record_id, None);
    }

    #[test]
    fn new_record_form_dispatches() {
        let api = make_api();
        let form = api.new_record_form(1, 9).unwrap();
        assert_eq!(form.title, "Hazel Grove");
        assert_eq!(form.styles.vector_color, api.defaults().get(crate::attributes::StyleName::VectorColor));
    }
}
