//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a specific
//! rendering framework. The TUI maps them to ratatui styles.

use crate::grid::GridView;
use crate::table::{SortDirection, TableRow};

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Positive/active (TUI: green). E.g. online users.
    Active,
    /// Dimmed (TUI: dark gray). E.g. absent magnitudes, offline users.
    Dimmed,
    /// Accent (TUI: cyan). E.g. admin role.
    Accent,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// One line of an expanded detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
}

impl DetailLine {
    pub fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// One table row.
#[derive(Debug, Clone)]
pub struct ViewRow {
    pub id: u64,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
    pub checked: bool,
    /// Detail panel lines; empty when the row is collapsed.
    pub detail: Vec<DetailLine>,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow>,
    /// Sorted column and whether the order is ascending.
    pub sort: Option<(usize, bool)>,
    /// Active filter text per column.
    pub filters: Vec<Option<String>>,
    /// "1 - 10 of 16 models" style summary.
    pub footer: String,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub selected: usize,
    /// Set while the grid is loading; rows are empty.
    pub loading: Option<String>,
    pub empty_message: String,
    /// Rows can be expanded into a detail panel.
    pub expandable: bool,
}

/// Per-record presentation hooks used by [`build_table_view`].
pub trait RowPresenter<T> {
    /// Builds the cells of one row.
    fn cells(&self, row: &T) -> Vec<ViewCell>;

    fn row_style(&self, _row: &T) -> RowStyleClass {
        RowStyleClass::Normal
    }

    /// Detail panel lines of an expanded row.
    fn detail(&self, _row: &T) -> Vec<DetailLine> {
        Vec::new()
    }
}

/// Labels for one kind of table.
pub struct TableLabels<'a> {
    pub title: &'a str,
    /// Plural noun used in the footer, e.g. "models".
    pub noun: &'a str,
    pub loading: &'a str,
    pub empty: &'a str,
    pub expandable: bool,
}

/// Footer summary: `"11 - 16 of 16 models"` or `"0 models"`.
pub fn footer_text<T: TableRow>(view: &GridView<'_, T>, noun: &str) -> String {
    match view.row_range() {
        Some((first, last)) => format!("{} - {} of {} {}", first, last, view.total_filtered, noun),
        None => format!("0 {}", noun),
    }
}

/// Maps a grid projection to a table view model.
pub fn build_table_view<T: TableRow>(
    view: &GridView<'_, T>,
    labels: &TableLabels<'_>,
    presenter: &impl RowPresenter<T>,
) -> TableViewModel {
    let columns = T::columns();
    let filters = (0..columns.len())
        .map(|i| view.filters.get(i).map(str::to_string))
        .collect();
    let sort = view
        .sort
        .active()
        .map(|(col, dir)| (col, dir == SortDirection::Ascending));

    let rows = view
        .rows
        .iter()
        .map(|&row| ViewRow {
            id: row.id(),
            cells: presenter.cells(row),
            style: presenter.row_style(row),
            checked: view.is_selected(row),
            detail: if labels.expandable && view.is_expanded(row) {
                presenter.detail(row)
            } else {
                Vec::new()
            },
        })
        .collect();

    TableViewModel {
        title: labels.title.to_string(),
        headers: columns.iter().map(|c| c.name.to_string()).collect(),
        widths: columns.iter().map(|c| c.width).collect(),
        rows,
        sort,
        filters,
        footer: footer_text(view, labels.noun),
        page: view.page,
        page_count: view.page_count,
        page_size: view.page_size,
        selected: view.selection.len(),
        loading: view.loading.then(|| labels.loading.to_string()),
        empty_message: labels.empty.to_string(),
        expandable: labels.expandable,
    }
}
