//! Generic table model: column descriptions, sort keys and row comparison.

mod pipeline;
mod selection;

pub use pipeline::{ColumnFilters, Pagination, Projection, SortDirection, SortState, project};
pub use selection::SelectionSet;

use std::cmp::Ordering;

/// Sort key types for table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Plain integer (ids).
    Integer(i64),
    /// Magnitude rank, see [`crate::magnitude::rank`].
    Rank(u64),
    /// Locale-naive text.
    Text(String),
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.partial_cmp(b),
            (SortKey::Rank(a), SortKey::Rank(b)) => a.partial_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// How a column's values are compared and matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Plain string, lexicographic order.
    Text,
    /// Integer value.
    Integer,
    /// Magnitude string ("60k", "1M", "-").
    Magnitude,
    /// List of tags; filters match any tag.
    Tags,
}

/// Static description of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Preferred display width. The last column always fills the rest.
    pub width: u16,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind, width: u16) -> Self {
        Self { name, kind, width }
    }
}

/// Trait for table row items.
pub trait TableRow: Clone {
    /// Stable identifier, used for selection and expansion.
    fn id(&self) -> u64;

    /// Column descriptions, in display order.
    fn columns() -> &'static [Column];

    /// Display value of a cell.
    fn cell(&self, column: usize) -> String;

    /// Sort key for the specified column.
    fn sort_key(&self, column: usize) -> SortKey;

    /// Number of columns.
    fn column_count() -> usize {
        Self::columns().len()
    }

    /// Checks whether a cell matches a filter. `needle` is already lowercased
    /// and non-empty.
    fn matches_filter(&self, column: usize, needle: &str) -> bool {
        self.cell(column).to_lowercase().contains(needle)
    }
}

/// Compares two rows on the given column.
///
/// Keys of mismatched types (which a well-formed row never produces) compare
/// equal so that sorting stays total.
pub fn compare<T: TableRow>(a: &T, b: &T, column: usize) -> Ordering {
    a.sort_key(column)
        .partial_cmp(&b.sort_key(column))
        .unwrap_or(Ordering::Equal)
}

/// Finds a column by case-insensitive name or by zero-based index.
pub fn find_column<T: TableRow>(name: &str) -> Option<usize> {
    let wanted = name.trim();
    if let Ok(idx) = wanted.parse::<usize>() {
        return (idx < T::column_count()).then_some(idx);
    }
    let normalized = |s: &str| s.to_lowercase().replace([' ', '_', '-'], "");
    let wanted = normalized(wanted);
    T::columns()
        .iter()
        .position(|c| normalized(c.name) == wanted)
}


#[cfg(test)]
mod tests {
    use super::test_rows::{Row, row};
    use super::*;

    #[test]
    fn text_columns_compare_lexicographically() {
        let a = row(0, "Alpha", "-");
        let b = row(1, "Beta", "-");
        assert_eq!(compare(&a, &b, 0), Ordering::Less);
        // Byte order: uppercase before lowercase.
        assert_eq!(compare(&row(0, "Zed", "-"), &row(1, "alpha", "-"), 0), Ordering::Less);
    }

    #[test]
    fn magnitude_columns_compare_by_rank() {
        let a = row(0, "a", "1M");
        let b = row(1, "b", "999k");
        assert_eq!(compare(&a, &b, 1), Ordering::Greater);
        assert_eq!(compare(&row(0, "a", "-"), &row(1, "b", "-"), 1), Ordering::Equal);
    }

    #[test]
    fn mismatched_keys_compare_equal() {
        assert_eq!(
            SortKey::Integer(1).partial_cmp(&SortKey::Text("1".into())),
            None
        );
    }

    #[test]
    fn find_column_by_name_or_index() {
        assert_eq!(find_column::<Row>("size"), Some(1));
        assert_eq!(find_column::<Row>("NAME"), Some(0));
        assert_eq!(find_column::<Row>("1"), Some(1));
        assert_eq!(find_column::<Row>("7"), None);
        assert_eq!(find_column::<Row>("nope"), None);
    }
}
