//! Filter, sort and paginate pipeline.
//!
//! [`project`] is a pure function: it never mutates the records or the query
//! state, and every combination of inputs has a defined result.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;

use super::{TableRow, compare};

/// Sort direction for the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

/// Single-column sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Creates a sort state; `SortDirection::None` yields the unsorted state.
    pub fn by(column: usize, direction: SortDirection) -> Self {
        match direction {
            SortDirection::None => Self::default(),
            _ => Self {
                column: Some(column),
                direction,
            },
        }
    }

    /// Returns the active column and direction, if any.
    pub fn active(&self) -> Option<(usize, SortDirection)> {
        match (self.column, self.direction) {
            (Some(column), SortDirection::Ascending | SortDirection::Descending) => {
                Some((column, self.direction))
            }
            _ => None,
        }
    }

    /// Header click: the active column cycles ascending, descending, unsorted;
    /// any other column starts ascending.
    pub fn cycle(&mut self, column: usize) {
        *self = match self.active() {
            Some((active, SortDirection::Ascending)) if active == column => {
                Self::by(column, SortDirection::Descending)
            }
            Some((active, SortDirection::Descending)) if active == column => Self::default(),
            _ => Self::by(column, SortDirection::Ascending),
        };
    }
}

/// Per-column free-text filters, AND-composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    filters: BTreeMap<usize, String>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter text of a column. Blank text removes the filter.
    /// Returns true if the active filters changed.
    pub fn set(&mut self, column: usize, text: &str) -> bool {
        if text.trim().is_empty() {
            return self.filters.remove(&column).is_some();
        }
        if self.filters.get(&column).map(String::as_str) == Some(text) {
            return false;
        }
        self.filters.insert(column, text.to_string());
        true
    }

    /// Removes every filter. Returns true if any was active.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.filters.is_empty();
        self.filters.clear();
        had_any
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.filters.get(&column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.filters.iter().map(|(&col, text)| (col, text.as_str()))
    }

    /// Returns true if the row passes every active filter.
    pub fn matches<T: TableRow>(&self, row: &T) -> bool {
        self.filters.iter().all(|(&column, text)| {
            let needle = text.trim().to_lowercase();
            row.matches_filter(column, &needle)
        })
    }
}

/// Page size and current page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Creates pagination on the first page. A zero page size becomes 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Requested page index (may exceed the last page until clamped).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages for `total` rows; never less than 1.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Effective page index for `total` rows.
    pub fn clamped_page(&self, total: usize) -> usize {
        self.page.min(self.page_count(total) - 1)
    }

    /// Row range of the effective page.
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = (self.clamped_page(total) * self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    /// Moves to `page`, clamped for `total` rows. Returns the new page.
    pub fn set_page(&mut self, page: usize, total: usize) -> usize {
        self.page = page;
        self.page = self.clamped_page(total);
        self.page
    }

    /// Changes the page size and clamps the current page for `total` rows.
    pub fn set_page_size(&mut self, page_size: usize, total: usize) -> usize {
        self.page_size = page_size.max(1);
        self.page = self.clamped_page(total);
        self.page
    }
}

/// Result of running the pipeline.
#[derive(Debug, Clone)]
pub struct Projection<'a, T> {
    /// Rows on the effective page, in display order.
    pub visible: Vec<&'a T>,
    /// Rows after filtering, before pagination.
    pub total_filtered: usize,
    /// Effective (clamped) page index.
    pub page: usize,
    pub page_count: usize,
}

/// Filters, sorts and paginates `records`.
///
/// Sorting is stable, so ties keep their store order in both directions.
pub fn project<'a, T: TableRow>(
    records: &'a [T],
    filters: &ColumnFilters,
    sort: &SortState,
    pagination: &Pagination,
) -> Projection<'a, T> {
    let mut rows: Vec<&T> = records.iter().filter(|r| filters.matches(*r)).collect();

    if let Some((column, direction)) = sort.active() {
        rows.sort_by(|a, b| {
            let cmp = compare(*a, *b, column);
            if direction == SortDirection::Descending {
                cmp.reverse()
            } else {
                cmp
            }
        });
    }

    let total_filtered = rows.len();
    let window = pagination.window(total_filtered);
    let visible = rows.drain(window).collect();

    Projection {
        visible,
        total_filtered,
        page: pagination.clamped_page(total_filtered),
        page_count: pagination.page_count(total_filtered),
    }
}
