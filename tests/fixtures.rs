#![allow(dead_code)]

use gridmemo::{
    CacheConfig, GridCache, InMemoryStore, Record, RecordingObserver, RowNode, StaticPage,
};
use serde_json::{Value as JsonValue, json};
use std::sync::Arc;

pub const PATHNAME: &str = "/context.html";
pub const HASH: &str = "#userList";
pub const MEMORY_KEY: &str = "GridManagerMemory";

pub struct Harness {
    pub cache: GridCache,
    pub store: Arc<InMemoryStore>,
    pub page: Arc<StaticPage>,
    pub observer: Arc<RecordingObserver>,
}

pub fn harness() -> Harness {
    harness_with(CacheConfig::default())
}

pub fn harness_with(config: CacheConfig) -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let page = Arc::new(StaticPage::new(PATHNAME, HASH));
    let observer = Arc::new(RecordingObserver::new());
    let cache = GridCache::new()
        .store(store.clone())
        .page(page.clone())
        .observer(observer.clone())
        .config(config);
    Harness {
        cache,
        store,
        page,
        observer,
    }
}

pub fn record(value: JsonValue) -> Record {
    value.as_object().cloned().expect("fixture record must be an object")
}

/// Ten rows as a blog list endpoint would return them.
pub fn table_data() -> Vec<Record> {
    let rows = [
        (92, "Content-Type reference", "HTTP"),
        (90, "Grid column widths", "CSS"),
        (89, "Checkbox state after refresh", "JS"),
        (88, "Cache keys and URL hashes", "JS"),
        (87, "Sorting stable rows", "JS"),
        (86, "Catching js errors", "JS"),
        (85, "Page size memory", "UX"),
        (84, "Ordering columns by drag", "UX"),
        (83, "Row templates", "HTML"),
        (82, "Empty table states", "UX"),
    ];
    rows.iter()
        .map(|(id, title, kind)| {
            record(json!({
                "id": id,
                "pic": format!("/upload/{}.png", id),
                "title": title,
                "type": kind,
                "username": "baukh",
                "createDate": 1_500_000_000 + id
            }))
        })
        .collect()
}

pub fn column_data() -> JsonValue {
    json!([
        {"key": "pic", "text": "Cover", "width": "110px", "template": "<img/>"},
        {"key": "title", "text": "Title", "align": "left"},
        {"key": "type", "text": "Category", "width": "150px"},
        {"key": "username", "text": "Author", "width": "100px"},
        {"key": "createDate", "text": "Created", "width": "130px"},
        {"key": "action", "text": "Action", "width": "100px", "disableCustomize": true}
    ])
}

/// Column keys after the order and checkbox columns are inserted.
pub fn expected_column_keys() -> Vec<&'static str> {
    vec![
        "gm_order",
        "gm_checkbox",
        "pic",
        "title",
        "type",
        "username",
        "createDate",
        "action",
    ]
}

pub fn options() -> JsonValue {
    json!({
        "gridManagerName": "test",
        "ajaxData": "https://www.example.com/blogManager/getBlogList",
        "ajaxType": "POST",
        "columnData": column_data()
    })
}

/// Rendered `<tr cache-key="N">` rows for the whole table.
pub fn rows(count: usize) -> Vec<RowNode> {
    (0..count)
        .map(|i| RowNode::new().with_attribute("cache-key", i))
        .collect()
}
