//! Integration tests for the checked set

use gridmemo::{CheckboxColumn, ColumnMap, OrderColumn, Settings};
use gridmemo::settings::build_column_map;
use serde_json::json;

#[path = "fixtures.rs"]
mod fixtures;

use fixtures::{Harness, harness, record, table_data};

fn with_settings() -> Harness {
    let h = harness();
    let mut settings = Settings::new("test");
    settings.column_data = serde_json::from_value(fixtures::column_data()).unwrap();
    settings.column_map = build_column_map(&settings, &CheckboxColumn::default(), &OrderColumn::default());
    h.cache.set_settings(settings);
    h
}

fn flagged(flags: &[bool]) -> Vec<gridmemo::Record> {
    table_data()
        .into_iter()
        .zip(flags)
        .map(|(mut row, flag)| {
            row.insert("gm_checkbox".to_string(), json!(flag));
            row
        })
        .collect()
}

#[test]
fn test_unflagged_candidates_select_nothing() {
    let h = with_settings();
    assert!(h.cache.get_checked_data("test").is_empty());

    h.cache.set_checked_data("test", &table_data(), false);
    assert!(h.cache.get_checked_data("test").is_empty());
}

#[test]
fn test_checked_list_taken_verbatim() {
    let h = with_settings();
    let data = table_data();

    h.cache.set_checked_data("test", &[data[0].clone(), data[2].clone()], true);

    let checked = h.cache.get_checked_data("test");
    assert_eq!(checked, vec![data[0].clone(), data[2].clone()]);
    assert_eq!(checked[0]["id"], json!(92));
    assert_eq!(checked[1]["id"], json!(89));
}

#[test]
fn test_mixed_flags_follow_checkbox_field() {
    let h = with_settings();
    let mut data_list = flagged(&[true, false, true, false]);

    h.cache.set_checked_data("test", &data_list, false);
    let checked = h.cache.get_checked_data("test");
    assert_eq!(checked.len(), 2);
    assert_eq!(checked[0]["id"], json!(92));
    assert_eq!(checked[1]["id"], json!(89));

    // same call again changes nothing
    h.cache.set_checked_data("test", &data_list, false);
    assert_eq!(h.cache.get_checked_data("test"), checked);

    data_list[2].insert("gm_checkbox".to_string(), json!(false));
    h.cache.set_checked_data("test", &data_list, false);
    let checked = h.cache.get_checked_data("test");
    assert_eq!(checked.len(), 1);
    assert_eq!(checked[0]["id"], json!(92));

    h.cache.set_checked_data("test", &[], true);
    assert!(h.cache.get_checked_data("test").is_empty());
}

#[test]
fn test_checkbox_field_comes_from_column_map() {
    let h = harness();
    let mut settings = Settings::new("test");
    let checkbox = CheckboxColumn {
        key: "picked".to_string(),
        ..CheckboxColumn::default()
    };
    settings.column_map = build_column_map(&settings, &checkbox, &OrderColumn::default());
    h.cache.set_settings(settings);

    let rows = vec![
        record(json!({"id": 1, "picked": true, "gm_checkbox": false})),
        record(json!({"id": 2, "picked": false, "gm_checkbox": true})),
    ];
    h.cache.set_checked_data("test", &rows, false);

    let checked = h.cache.get_checked_data("test");
    assert_eq!(checked.len(), 1);
    assert_eq!(checked[0]["id"], json!(1));
}

#[test]
fn test_update_checked_data_merges_by_key() {
    let h = with_settings();
    let data = table_data();
    let column_map = h.cache.get_settings("test").unwrap().column_map;
    h.cache.set_checked_data("test", &[data[0].clone(), data[5].clone()], true);

    assert_eq!(h.cache.get_checked_data("test")[0]["title"], json!("Content-Type reference"));
    assert_eq!(h.cache.get_checked_data("test")[1]["title"], json!("Catching js errors"));

    h.cache.update_checked_data(
        "test",
        &column_map,
        "id",
        &[record(json!({"id": 92, "title": "this is new title"}))],
    );

    let checked = h.cache.get_checked_data("test");
    assert_eq!(checked.len(), 2);
    assert_eq!(checked[0]["title"], json!("this is new title"));
    assert_eq!(checked[0]["pic"], json!("/upload/92.png"));
    assert_eq!(checked[1]["title"], json!("Catching js errors"));
}

#[test]
fn test_update_checked_data_keeps_auto_columns() {
    let h = with_settings();
    let column_map = h.cache.get_settings("test").unwrap().column_map;
    h.cache.set_checked_data("test", &flagged(&[true]), true);

    h.cache.update_checked_data(
        "test",
        &column_map,
        "id",
        &[record(json!({"id": 92, "gm_checkbox": false, "gm_order": 7, "type": "MIME"}))],
    );

    let checked = h.cache.get_checked_data("test");
    assert_eq!(checked[0]["gm_checkbox"], json!(true));
    assert!(checked[0].get("gm_order").is_none());
    assert_eq!(checked[0]["type"], json!("MIME"));
}

#[test]
fn test_selection_survives_data_refresh() {
    let h = with_settings();
    let data = table_data();
    h.cache.set_table_data("test", data.clone());
    h.cache.set_checked_data("test", &[data[3].clone()], true);

    // a refresh hands back new record instances with the same ids
    let refreshed: Vec<_> = table_data()
        .into_iter()
        .map(|mut row| {
            row.insert("username".to_string(), json!("someone else"));
            row
        })
        .collect();
    h.cache.set_table_data("test", refreshed.clone());
    h.cache.update_checked_data("test", &ColumnMap::new(), "id", &refreshed);

    assert!(h.cache.is_checked("test", "id", &refreshed[3]));
    assert!(!h.cache.is_checked("test", "id", &refreshed[4]));
    assert_eq!(h.cache.get_checked_data("test")[0]["username"], json!("someone else"));
}

#[test]
fn test_selection_without_settings_uses_default_field() {
    let h = harness();
    h.cache.set_checked_data("test", &flagged(&[false, true]), false);

    let checked = h.cache.get_checked_data("test");
    assert_eq!(checked.len(), 1);
    assert_eq!(checked[0]["id"], json!(90));
}
