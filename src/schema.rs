//! Column derivation for the feed table.
//!
//! Columns are not taken from a single sample row.  [`Schema`] accumulates
//! the ordered union of every field name seen from the active source, so all
//! rows of a page (and all pages after it) share one column layout.  A row
//! lacking a field simply renders an empty cell.

use std::collections::HashSet;

use crate::source::{render_value, FeedItem};

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Synthetic leading "#" column: the row's 1-based position in the feed.
    Ordinal,
    /// A record field, by name.
    Field(String),
}

impl Column {
    pub fn header(&self) -> &str {
        match self {
            Self::Ordinal => "#",
            Self::Field(name) => name,
        }
    }

    /// Display text for this column.  `ordinal` is the row's feed position.
    pub fn cell(&self, item: &FeedItem, ordinal: usize) -> String {
        match self {
            Self::Ordinal => ordinal.to_string(),
            Self::Field(name) => item.get(name).map(render_value).unwrap_or_default(),
        }
    }
}

/// 1-based position of a row in the whole feed.
pub fn ordinal(page_number: usize, page_size: usize, row_index: usize) -> usize {
    page_number.saturating_sub(1) * page_size + row_index + 1
}

/// Ordered set of field names learned from fetched records.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<String>,
    seen: HashSet<String>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn any new field names from `items`, in first-seen order.
    pub fn observe(&mut self, items: &[FeedItem]) {
        for item in items {
            for key in item.keys() {
                if self.seen.insert(key.to_string()) {
                    self.fields.push(key.to_string());
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.seen.clear();
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Columns to show for a page: empty when the page has no rows,
    /// otherwise the ordinal column followed by every known field.
    pub fn columns(&self, items: &[FeedItem]) -> Vec<Column> {
        if items.is_empty() {
            return Vec::new();
        }
        std::iter::once(Column::Ordinal)
            .chain(self.fields.iter().cloned().map(Column::Field))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> FeedItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_page_has_no_columns() {
        let mut schema = Schema::new();
        schema.observe(&[item(json!({"a": "1"}))]);
        assert!(schema.columns(&[]).is_empty());
    }

    #[test]
    fn ordinal_column_comes_first_then_natural_key_order() {
        let items = [item(json!({"Published Date": "d", "Acquirer Company": "A", "MAType": "M"}))];
        let mut schema = Schema::new();
        schema.observe(&items);

        let headers: Vec<String> = schema
            .columns(&items)
            .iter()
            .map(|c| c.header().to_string())
            .collect();
        assert_eq!(headers, ["#", "Published Date", "Acquirer Company", "MAType"]);
    }

    #[test]
    fn later_rows_extend_columns_and_missing_fields_are_blank() {
        let items = [
            item(json!({"a": "1", "b": "2"})),
            item(json!({"a": "3", "c": "4"})),
        ];
        let mut schema = Schema::new();
        schema.observe(&items);

        let columns = schema.columns(&items);
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[3], Column::Field("c".into()));
        assert_eq!(columns[2].cell(&items[1], 2), "");
        assert_eq!(columns[3].cell(&items[0], 1), "");
        assert_eq!(columns[3].cell(&items[1], 2), "4");
    }

    #[test]
    fn schema_is_stable_across_pages() {
        let mut schema = Schema::new();
        schema.observe(&[item(json!({"a": "1", "b": "2"}))]);
        schema.observe(&[item(json!({"b": "x", "a": "y"}))]);
        assert_eq!(schema.fields(), ["a", "b"]);
    }

    #[test]
    fn clear_forgets_fields() {
        let mut schema = Schema::new();
        schema.observe(&[item(json!({"a": "1"}))]);
        schema.clear();
        assert!(schema.fields().is_empty());
    }

    #[test]
    fn ordinal_counts_across_pages() {
        assert_eq!(ordinal(1, 50, 0), 1);
        assert_eq!(ordinal(2, 50, 0), 51);
        assert_eq!(ordinal(3, 25, 4), 55);
    }

    #[test]
    fn categorical_cell_uses_pair_label() {
        let row = item(json!({
            "Acquisition Type": {"Acquisition Type": "Merger", "Acquisition Sub Type": "Reverse"}
        }));
        let col = Column::Field("Acquisition Type".into());
        assert_eq!(col.cell(&row, 1), "Merger - Reverse");
        assert_eq!(Column::Ordinal.cell(&row, 7), "7");
    }
}
