use std::collections::HashMap;

use neatline::api::NeatlineApi;
use neatline::attributes::StyleValue;
use neatline::catalog::{ItemFeature, ItemMetadata, StaticCatalog, WmsInfo};
use neatline::commands::update::RecordUpdate;
use neatline::config::StyleDefaults;
use neatline::model::{Exhibit, Record};
use neatline::store::fs_backend::FsBackend;
use neatline::store::memory::InMemoryStore;
use neatline::store::record_store::RecordStore;
use neatline::store::ExhibitStore;
use serde_json::Value;
use tempfile::TempDir;

fn catalog() -> StaticCatalog {
    let mut catalog = StaticCatalog::default();
    catalog.items.insert(
        100,
        ItemMetadata {
            title: "Hotchkiss Map".into(),
            description: "Topographic survey".into(),
            date: "1862/1863".into(),
            coverage: "POLYGON((0 0,1 0,1 1,0 0))".into(),
        },
    );
    catalog.wms.insert(
        100,
        WmsInfo {
            address: "http://maps.example.org/wms".into(),
            layers: "hotchkiss".into(),
        },
    );
    catalog
}

fn records() -> Vec<Record> {
    let mut root = Record::new(1).in_exhibit(1);
    root.title = Some("Valley Campaign".into());
    root.start_date = Some("1862-03-23".into());
    root.space_active = true;
    root.time_active = true;
    root.styles.vector_color = Some("#224466".into());

    let mut linked = Record::new(2).in_exhibit(1).with_parent(1).for_item(100);
    linked.space_active = true;
    linked.time_active = true;

    let mut undated = Record::new(3).in_exhibit(1).with_parent(1);
    undated.title = Some("  Port Republic  ".into());
    undated.time_active = true;

    vec![root, linked, undated]
}

fn api() -> NeatlineApi<InMemoryStore, StaticCatalog> {
    let store = InMemoryStore::with_contents(
        vec![Exhibit::new(1, "Jackson in the Valley", "valley")],
        records(),
    )
    .unwrap();
    NeatlineApi::new(store, catalog(), StyleDefaults::default())
}

#[test]
fn render_builds_both_projections() {
    let payload = api().render(1).unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    let map = json["map"].as_array().unwrap();
    assert_eq!(map.len(), 2);
    let linked = &map[1];
    assert_eq!(linked["id"], 2);
    assert_eq!(linked["title"], "Hotchkiss Map");
    assert_eq!(linked["vector_color"], "#224466");
    assert_eq!(linked["wkt"], "POLYGON((0 0,1 0,1 1,0 0))");
    assert_eq!(linked["wmsAddress"], "http://maps.example.org/wms");
    assert_eq!(linked["layers"], "hotchkiss");
    assert_eq!(linked["start_date"], "1862");
    assert_eq!(linked["end_date"], "1863");
    assert_eq!(linked["show_bubble"], 1);
    assert_eq!(map[0]["wmsAddress"], Value::Null);

    let timeline = json["timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline[0]["eventID"], 1);
    assert_eq!(timeline[0]["start"], "1862-03-23");
    assert!(timeline[0].get("end").is_none());
    assert_eq!(timeline[0]["textColor"], "#000000");

    let undated = &timeline[2];
    assert_eq!(undated["title"], "Port Republic");
    assert!(undated.get("start").is_none());
    assert!(undated.get("end").is_none());
}

#[test]
fn render_is_idempotent() {
    let api = api();
    let first = serde_json::to_string(&api.render(1).unwrap()).unwrap();
    let second = serde_json::to_string(&api.render(1).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn space_active_flip_only_adds_the_feature() {
    let mut api = api();
    let before = api.render(1).unwrap();
    assert!(before.map.iter().all(|f| f.id != 3));

    let update: RecordUpdate = serde_json::from_str(r#"{"space_active": true}"#).unwrap();
    api.update_record(3, &update).unwrap();

    let after = api.render(1).unwrap();
    let feature = after.map.iter().find(|f| f.id == 3).unwrap();
    assert_eq!(feature.title, "  Port Republic  ");
    assert_eq!(feature.styles.vector_color, StyleValue::from("#224466"));
    assert_eq!(before.map, after.map.into_iter().filter(|f| f.id != 3).collect::<Vec<_>>());
}

#[test]
fn feature_source_shapes_are_joined() {
    let mut catalog = catalog();
    let mut features = HashMap::new();
    features.insert(
        100,
        vec![
            ItemFeature {
                wkt: Some("POINT(1 1)".into()),
            },
            ItemFeature { wkt: None },
            ItemFeature {
                wkt: Some("POINT(2 2)".into()),
            },
        ],
    );
    catalog.features = Some(features);

    let store = InMemoryStore::with_contents(
        vec![Exhibit::new(1, "Jackson in the Valley", "valley")],
        records(),
    )
    .unwrap();
    let api = NeatlineApi::new(store, catalog, StyleDefaults::default());
    let payload = api.render(1).unwrap();
    assert_eq!(payload.map[1].wkt, "POINT(1 1)|POINT(2 2)");
}

#[test]
fn deleting_a_parent_frees_both_children() {
    let mut api = api();
    api.delete_record(1).unwrap();

    let store = api.store();
    assert!(store.get_record(1).is_err());
    assert_eq!(store.get_record(2).unwrap().parent_record_id, None);
    assert_eq!(store.get_record(3).unwrap().parent_record_id, None);

    // Former children now fall through to the system default.
    let payload = api.render(1).unwrap();
    assert_eq!(payload.map[0].styles.vector_color, StyleValue::from("#ffb80e"));
}

#[test]
fn new_record_form_for_catalog_item() {
    let form = api().new_record_form(1, 100).unwrap();
    let json = serde_json::to_value(&form).unwrap();
    assert_eq!(json["title"], "Hotchkiss Map");
    assert_eq!(json["start_date"], "1862");
    assert_eq!(json["end_date"], "1863");
    assert_eq!(json["parent_record_id"], "none");
    assert_eq!(json["left_percent"], 0);
    assert_eq!(json["right_percent"], 100);
    assert_eq!(json["geocoverage"], "");
    assert_eq!(json["records"].as_array().unwrap().len(), 3);
}

#[test]
fn bundle_directory_round_trips_edits() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = RecordStore::with_backend(FsBackend::new(dir.path()));
        store
            .save_exhibit(&Exhibit::new(1, "Jackson in the Valley", "valley"))
            .unwrap();
        for record in records() {
            store.save_record(&record).unwrap();
        }
    }

    let store = RecordStore::with_backend(FsBackend::new(dir.path()));
    let mut api = NeatlineApi::new(store, catalog(), StyleDefaults::default());
    let update: RecordUpdate =
        serde_json::from_str(r#"{"parent_record_id": "none", "stroke_width": 7}"#).unwrap();
    api.update_record(3, &update).unwrap();

    let reopened = RecordStore::with_backend(FsBackend::new(dir.path()));
    let record = reopened.get_record(3).unwrap();
    assert_eq!(record.parent_record_id, None);
    assert_eq!(record.styles.stroke_width, Some(7));
    assert!(dir.path().join("records.json").exists());
    assert!(dir.path().join("exhibits.json").exists());
}
