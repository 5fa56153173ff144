//! The slice of the hosting page the cache talks to: the current location
//! (for memory keys), the grid root element (for the cache-error marker)
//! and rendered row elements (for row lookups).

use crate::core::Record;
use std::collections::HashMap;
use std::sync::RwLock;

/// Location and root-element access of the page hosting the grids.
pub trait HostPage: Send + Sync {
    /// `location.pathname`
    fn pathname(&self) -> String;

    /// `location.hash`, including the leading `#` (empty when unset)
    fn hash(&self) -> String;

    /// Sets an attribute on the root element of the named grid.
    fn set_root_attribute(&self, grid_manager_name: &str, name: &str, value: &str);
}

/// Host page with a fixed location that records root attributes in memory.
#[derive(Debug, Default)]
pub struct StaticPage {
    location: RwLock<(String, String)>,
    root_attributes: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl StaticPage {
    pub fn new(pathname: &str, hash: &str) -> Self {
        Self {
            location: RwLock::new((pathname.to_string(), hash.to_string())),
            root_attributes: RwLock::new(HashMap::new()),
        }
    }

    pub fn set_hash(&self, hash: &str) {
        if let Ok(mut location) = self.location.write() {
            location.1 = hash.to_string();
        }
    }

    pub fn set_pathname(&self, pathname: &str) {
        if let Ok(mut location) = self.location.write() {
            location.0 = pathname.to_string();
        }
    }

    pub fn root_attribute(&self, grid_manager_name: &str, name: &str) -> Option<String> {
        self.root_attributes
            .read()
            .ok()?
            .get(grid_manager_name)?
            .get(name)
            .cloned()
    }
}

impl HostPage for StaticPage {
    fn pathname(&self) -> String {
        self.location.read().map(|l| l.0.clone()).unwrap_or_default()
    }

    fn hash(&self) -> String {
        self.location.read().map(|l| l.1.clone()).unwrap_or_default()
    }

    fn set_root_attribute(&self, grid_manager_name: &str, name: &str, value: &str) {
        if let Ok(mut attrs) = self.root_attributes.write() {
            attrs
                .entry(grid_manager_name.to_string())
                .or_default()
                .insert(name.to_string(), value.to_string());
        }
    }
}

/// Anything that exposes attributes like a rendered `<tr>`.
pub trait RowElement {
    fn attribute(&self, name: &str) -> Option<String>;
}

/// Detached row element carrying only attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowNode {
    attributes: HashMap<String, String>,
}

impl RowNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, value: impl ToString) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

impl RowElement for RowNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

/// What a row lookup was asked about.
pub enum RowTarget<'a> {
    Element(&'a dyn RowElement),
    Collection(Vec<&'a dyn RowElement>),
    /// Neither a row element nor a list of them (e.g. a selector string).
    Other,
}

impl<'a> RowTarget<'a> {
    pub fn element<E: RowElement + 'a>(element: &'a E) -> Self {
        RowTarget::Element(element)
    }

    pub fn collection<E: RowElement + 'a>(elements: &'a [E]) -> Self {
        RowTarget::Collection(elements.iter().map(|e| e as &dyn RowElement).collect())
    }
}

/// Result of a row lookup, shaped after the target.
#[derive(Debug, Clone, PartialEq)]
pub enum RowLookup {
    /// Single element: the record at its row index, if any.
    One(Option<Record>),
    /// Collection: one slot per element, in element order.
    Many(Vec<Option<Record>>),
    /// Unsupported target: the empty object fallback.
    Empty,
}

impl RowLookup {
    pub fn one(self) -> Option<Record> {
        match self {
            RowLookup::One(record) => record,
            _ => None,
        }
    }

    pub fn many(self) -> Vec<Option<Record>> {
        match self {
            RowLookup::Many(records) => records,
            RowLookup::One(record) => vec![record],
            RowLookup::Empty => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RowLookup::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_page_location_and_attributes() {
        let page = StaticPage::new("/context.html", "");
        page.set_hash("#userList");
        assert_eq!(page.pathname(), "/context.html");
        assert_eq!(page.hash(), "#userList");

        assert_eq!(page.root_attribute("test", "grid-manager-cache-error"), None);
        page.set_root_attribute("test", "grid-manager-cache-error", "error");
        assert_eq!(page.root_attribute("test", "grid-manager-cache-error").as_deref(), Some("error"));
    }

    #[test]
    fn test_lookup_accessors() {
        assert_eq!(RowLookup::Empty.many(), Vec::<Option<Record>>::new());
        assert_eq!(RowLookup::One(None).one(), None);
        assert!(RowLookup::Empty.is_empty());
    }
}
