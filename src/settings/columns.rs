use super::{ColumnContribution, Settings};
use crate::core::{CacheError, Column, ColumnDef, ColumnMap, Result};
use std::collections::HashSet;

/// Every entry needs a key, and keys must not repeat.
pub fn validate_column_data(column_data: &[ColumnDef]) -> Result<()> {
    let mut seen = HashSet::with_capacity(column_data.len());
    for (index, def) in column_data.iter().enumerate() {
        let key = def
            .declared_key()
            .ok_or(CacheError::MissingColumnKey { index })?;
        if !seen.insert(key) {
            return Err(CacheError::DuplicateColumnKey {
                index,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Column map in display order: order column, checkbox column, user columns.
///
/// `settings.column_data` must have passed `validate_column_data`.
pub fn build_column_map(
    settings: &Settings,
    checkbox: &dyn ColumnContribution,
    order: &dyn ColumnContribution,
) -> ColumnMap {
    let mut columns = Vec::with_capacity(settings.column_data.len() + 2);

    if order.is_enabled(settings) {
        columns.push(order.column(settings));
    }
    if checkbox.is_enabled(settings) {
        columns.push(checkbox.column(settings));
    }
    for def in &settings.column_data {
        if let Some(key) = def.declared_key() {
            columns.push(Column::from_def(key, def));
        }
    }

    ColumnMap::from_columns(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CHECKBOX_KEY, ColumnRole, ORDER_KEY};
    use crate::settings::{CheckboxColumn, OrderColumn};

    fn defs() -> Vec<ColumnDef> {
        vec![ColumnDef::new("pic").width("110px"), ColumnDef::new("title")]
    }

    #[test]
    fn test_validate_reports_index() {
        let mut column_data = defs();
        column_data.push(ColumnDef::default().text("no key"));
        assert!(matches!(
            validate_column_data(&column_data),
            Err(CacheError::MissingColumnKey { index: 2 })
        ));

        let duplicated = vec![ColumnDef::new("a"), ColumnDef::new("b"), ColumnDef::new("a")];
        assert!(matches!(
            validate_column_data(&duplicated),
            Err(CacheError::DuplicateColumnKey { index: 2, .. })
        ));

        assert!(validate_column_data(&defs()).is_ok());
    }

    #[test]
    fn test_contributed_columns_come_first() {
        let mut settings = Settings::new("test");
        settings.column_data = defs();

        let map = build_column_map(&settings, &CheckboxColumn::default(), &OrderColumn::default());
        assert_eq!(
            map.keys().collect::<Vec<_>>(),
            vec![ORDER_KEY, CHECKBOX_KEY, "pic", "title"]
        );
        assert_eq!(map.get("pic").unwrap().index, 2);
        assert_eq!(map.get(CHECKBOX_KEY).unwrap().role, Some(ColumnRole::Checkbox));
    }

    #[test]
    fn test_disabled_contributions_are_skipped() {
        let mut settings = Settings::new("test");
        settings.column_data = defs();
        settings.support_checkbox = false;
        settings.support_auto_order = false;

        let map = build_column_map(&settings, &CheckboxColumn::default(), &OrderColumn::default());
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["pic", "title"]);
    }
}
