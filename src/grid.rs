//! Grid component: record store plus query, selection and loading state.
//!
//! A [`Grid`] owns everything a data grid needs between user events: the
//! record store, the active filters, sort and page, the selected and expanded
//! row ids, and a queue of outgoing [`GridEvent`]s. Rendering reads a
//! [`GridView`] built by [`Grid::view`].
//!
//! All mutations are ignored while the grid is loading.

use serde::Serialize;
use tracing::{debug, info};

use crate::models::Dataset;
use crate::store::RecordStore;
use crate::table::{ColumnFilters, Pagination, SelectionSet, SortState, TableRow, project};

/// Loading lifecycle. `Loading -> Ready` happens once and is irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// Notifications raised by a grid. Owners drain them with
/// [`Grid::drain_events`]; nothing is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GridEvent {
    SelectionChanged { selected: Vec<u64> },
    PageChanged { page: usize },
    SortChanged { sort: SortState },
    RecordAdded { id: u64 },
}

/// Render-ready projection of a grid.
#[derive(Debug)]
pub struct GridView<'a, T> {
    pub loading: bool,
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a T>,
    /// Rows matching the filters, across all pages.
    pub total_filtered: usize,
    /// Effective page index.
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub sort: SortState,
    pub filters: &'a ColumnFilters,
    pub selection: &'a SelectionSet,
    pub expanded: &'a SelectionSet,
}

impl<T: TableRow> GridView<'_, T> {
    /// 1-based positions of the first and last visible rows.
    pub fn row_range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = self.page * self.page_size + 1;
        Some((first, first + self.rows.len() - 1))
    }

    pub fn is_selected(&self, row: &T) -> bool {
        self.selection.is_selected(row.id())
    }

    pub fn is_expanded(&self, row: &T) -> bool {
        self.expanded.is_selected(row.id())
    }
}

/// A data grid over one record type.
#[derive(Debug)]
pub struct Grid<T: TableRow> {
    store: RecordStore<T>,
    /// Records supplied before loading; consumed on `Ready`.
    input: Option<Vec<T>>,
    state: LoadState,
    filters: ColumnFilters,
    sort: SortState,
    pagination: Pagination,
    selection: SelectionSet,
    expanded: SelectionSet,
    events: Vec<GridEvent>,
}

impl<T: TableRow> Grid<T> {
    /// Creates a grid in `Loading`. `input` replaces the built-in dataset
    /// when the grid becomes ready, unless it is empty.
    pub fn loading(input: Vec<T>, page_size: usize) -> Self {
        Self {
            input: Some(input),
            state: LoadState::Loading,
            ..Self::ready(Vec::new(), page_size)
        }
    }

    /// Creates a grid that is ready immediately.
    pub fn ready(records: Vec<T>, page_size: usize) -> Self {
        Self {
            store: RecordStore::new(records),
            input: None,
            state: LoadState::Ready,
            filters: ColumnFilters::new(),
            sort: SortState::default(),
            pagination: Pagination::new(page_size),
            selection: SelectionSet::new(),
            expanded: SelectionSet::new(),
            events: Vec::new(),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn store(&self) -> &RecordStore<T> {
        &self.store
    }

    pub fn records(&self) -> &[T] {
        self.store.records()
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn filters(&self) -> &ColumnFilters {
        &self.filters
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn expanded(&self) -> &SelectionSet {
        &self.expanded
    }

    pub fn selected_records(&self) -> Vec<&T> {
        self.selection.selected_records(self.store.records())
    }

    fn filtered_total(&self) -> usize {
        self.store
            .records()
            .iter()
            .filter(|r| self.filters.matches(*r))
            .count()
    }

    fn current_page(&self) -> usize {
        self.pagination.clamped_page(self.filtered_total())
    }

    fn push_page_change(&mut self, before: usize) {
        let after = self.current_page();
        if after != before {
            self.events.push(GridEvent::PageChanged { page: after });
        }
    }

    fn push_selection_change(&mut self) {
        self.events.push(GridEvent::SelectionChanged {
            selected: self.selection.ids(),
        });
    }

    /// Header click on `column`: ascending, descending, unsorted.
    pub fn cycle_sort(&mut self, column: usize) -> bool {
        if self.is_loading() || column >= T::column_count() {
            return false;
        }
        let mut sort = self.sort;
        sort.cycle(column);
        self.set_sort(sort)
    }

    pub fn set_sort(&mut self, sort: SortState) -> bool {
        if self.is_loading() || sort == self.sort {
            return false;
        }
        self.sort = sort;
        self.events.push(GridEvent::SortChanged { sort });
        true
    }

    /// Sets the filter of one column and returns to the first page.
    pub fn set_filter(&mut self, column: usize, text: &str) -> bool {
        if self.is_loading() {
            return false;
        }
        let before = self.current_page();
        if !self.filters.set(column, text) {
            return false;
        }
        let total = self.filtered_total();
        self.pagination.set_page(0, total);
        self.push_page_change(before);
        true
    }

    pub fn clear_filters(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        let before = self.current_page();
        if !self.filters.clear() {
            return false;
        }
        let total = self.filtered_total();
        self.pagination.set_page(0, total);
        self.push_page_change(before);
        true
    }

    /// Moves to `page`, clamped to the last page.
    pub fn set_page(&mut self, page: usize) -> bool {
        if self.is_loading() {
            return false;
        }
        let before = self.current_page();
        let total = self.filtered_total();
        self.pagination.set_page(page, total);
        self.push_page_change(before);
        self.current_page() != before
    }

    pub fn next_page(&mut self) -> bool {
        let page = self.current_page();
        self.set_page(page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        let page = self.current_page();
        self.set_page(page.saturating_sub(1))
    }

    /// Changes rows per page; the current page is clamped.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if self.is_loading() || page_size.max(1) == self.pagination.page_size() {
            return false;
        }
        let before = self.current_page();
        let total = self.filtered_total();
        self.pagination.set_page_size(page_size, total);
        self.push_page_change(before);
        true
    }

    /// Flips selection of `id`. Returns true if the id is now selected.
    pub fn toggle_selected(&mut self, id: u64) -> bool {
        if self.is_loading() {
            return false;
        }
        let selected = self.selection.toggle(id);
        self.push_selection_change();
        selected
    }

    /// Selects every row on the current page.
    pub fn select_visible(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        let ids: Vec<u64> = self.view().rows.iter().map(|r| r.id()).collect();
        if !self.selection.select_all(ids) {
            return false;
        }
        self.push_selection_change();
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.is_loading() || !self.selection.clear() {
            return false;
        }
        self.push_selection_change();
        true
    }

    /// Opens or closes the detail panel of `id`. Returns true if now open.
    pub fn toggle_expanded(&mut self, id: u64) -> bool {
        if self.is_loading() {
            return false;
        }
        self.expanded.toggle(id)
    }

    /// Appends a record. Returns its id, or `None` while loading.
    pub fn append(&mut self, record: T) -> Option<u64> {
        if self.is_loading() {
            return None;
        }
        let id = self.store.append(record);
        debug!("Record {} appended ({} total)", id, self.store.len());
        self.events.push(GridEvent::RecordAdded { id });
        Some(id)
    }

    /// Builds the render-ready projection. The pipeline is not run while
    /// loading.
    pub fn view(&self) -> GridView<'_, T> {
        let page_size = self.pagination.page_size();
        if self.is_loading() {
            return GridView {
                loading: true,
                rows: Vec::new(),
                total_filtered: 0,
                page: 0,
                page_count: 1,
                page_size,
                sort: self.sort,
                filters: &self.filters,
                selection: &self.selection,
                expanded: &self.expanded,
            };
        }

        let projection = project(
            self.store.records(),
            &self.filters,
            &self.sort,
            &self.pagination,
        );
        GridView {
            loading: false,
            rows: projection.visible,
            total_filtered: projection.total_filtered,
            page: projection.page,
            page_count: projection.page_count,
            page_size,
            sort: self.sort,
            filters: &self.filters,
            selection: &self.selection,
            expanded: &self.expanded,
        }
    }

    /// Takes the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }
}

impl<T: Dataset> Grid<T> {
    /// Completes loading: the store receives the supplied input, or the
    /// built-in dataset when none was supplied. Returns false if the grid was
    /// already ready.
    pub fn finish_loading(&mut self) -> bool {
        if !self.is_loading() {
            return false;
        }
        let records = match self.input.take() {
            Some(input) if !input.is_empty() => {
                info!("Loaded {} records from input", input.len());
                input
            }
            _ => {
                let defaults = T::default_records();
                info!("Loaded {} built-in records", defaults.len());
                defaults
            }
        };
        self.store = RecordStore::new(records);
        self.state = LoadState::Ready;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelRecord, default_models};
    use crate::table::SortDirection;

    fn ready_models(page_size: usize) -> Grid<ModelRecord> {
        let mut grid = Grid::loading(Vec::new(), page_size);
        assert!(grid.finish_loading());
        grid
    }

    #[test]
    fn loading_grid_is_inert() {
        let mut grid: Grid<ModelRecord> = Grid::loading(Vec::new(), 10);
        assert!(grid.is_loading());
        assert!(grid.records().is_empty());

        assert!(!grid.cycle_sort(0));
        assert!(!grid.set_filter(0, "claude"));
        assert!(!grid.toggle_selected(0));
        assert!(!grid.next_page());
        assert!(grid.append(ModelRecord::new(99, "x", "-", "-", &[])).is_none());

        let view = grid.view();
        assert!(view.loading);
        assert!(view.rows.is_empty());
        assert_eq!(view.total_filtered, 0);
        assert!(grid.drain_events().is_empty());
    }

    #[test]
    fn ready_uses_built_in_dataset_when_input_empty() {
        let grid = ready_models(10);
        assert_eq!(grid.load_state(), LoadState::Ready);
        assert_eq!(grid.records().len(), 16);
    }

    #[test]
    fn ready_uses_input_verbatim() {
        let input = vec![
            ModelRecord::new(0, "Custom Model A", "128k", "512k", &["Custom task"]),
            ModelRecord::new(1, "Custom Model B", "64k", "-", &["Development"]),
        ];
        let mut grid = Grid::loading(input.clone(), 10);
        assert!(grid.finish_loading());
        assert_eq!(grid.records(), input.as_slice());
    }

    #[test]
    fn ready_transition_happens_once() {
        let mut grid = ready_models(10);
        grid.append(ModelRecord::new(16, "Extra", "1k", "-", &[]));
        assert!(!grid.finish_loading());
        assert_eq!(grid.records().len(), 17);
    }

    #[test]
    fn sixteen_records_page_size_ten() {
        let mut grid = ready_models(10);
        let view = grid.view();
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.page_count, 2);
        assert_eq!(view.row_range(), Some((1, 10)));

        assert!(grid.set_page(1));
        assert_eq!(grid.view().rows.len(), 6);
        assert_eq!(grid.view().row_range(), Some((11, 16)));

        // Page 2 does not exist.
        assert!(!grid.set_page(2));
        assert_eq!(grid.view().page, 1);
        assert!(!grid.next_page());

        assert_eq!(grid.drain_events(), vec![GridEvent::PageChanged { page: 1 }]);
    }

    #[test]
    fn selection_persists_across_sort_filter_and_paging() {
        let mut grid = ready_models(5);
        let id = grid.view().rows[0].id;
        assert!(grid.toggle_selected(id));

        grid.cycle_sort(ModelRecord::MAX_MODE);
        grid.cycle_sort(ModelRecord::NAME);
        assert!(grid.selection().is_selected(id));

        grid.set_filter(ModelRecord::NAME, "gemini");
        assert!(grid.view().rows.iter().all(|r| r.id != id));
        assert!(grid.selection().is_selected(id));

        grid.clear_filters();
        grid.set_page(3);
        assert!(grid.selection().is_selected(id));
        assert_eq!(grid.selected_records().len(), 1);
    }

    #[test]
    fn filter_returns_to_first_page() {
        let mut grid = ready_models(5);
        grid.set_page(2);
        grid.drain_events();

        assert!(grid.set_filter(ModelRecord::NAME, "claude"));
        let view = grid.view();
        assert_eq!(view.page, 0);
        assert_eq!(view.total_filtered, 8);
        assert_eq!(grid.drain_events(), vec![GridEvent::PageChanged { page: 0 }]);
    }

    #[test]
    fn empty_filter_result() {
        let mut grid = ready_models(10);
        grid.set_filter(ModelRecord::NAME, "no such model");
        let view = grid.view();
        assert_eq!(view.total_filtered, 0);
        assert!(view.rows.is_empty());
        assert_eq!(view.row_range(), None);
    }

    #[test]
    fn sort_by_magnitude_column() {
        let mut grid = ready_models(16);
        grid.cycle_sort(ModelRecord::MAX_MODE);
        assert_eq!(
            grid.sort(),
            SortState::by(ModelRecord::MAX_MODE, SortDirection::Ascending)
        );

        let view = grid.view();
        let last = view.rows.last().map(|r| r.max_mode.as_str());
        assert_eq!(last, Some("1M"));
        // "-" rows come first, in store order.
        assert_eq!(view.rows[0].name, "Claude 3 Opus");

        grid.cycle_sort(ModelRecord::MAX_MODE);
        let view = grid.view();
        assert_eq!(view.rows[0].name, "Claude 4 Sonnet 1M");

        let events = grid.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GridEvent::SortChanged { .. }));
    }

    #[test]
    fn page_size_change_clamps_page() {
        let mut grid = ready_models(5);
        grid.set_page(3);
        assert_eq!(grid.view().page, 3);
        assert!(grid.set_page_size(10));
        let view = grid.view();
        assert_eq!(view.page, 1);
        assert_eq!(view.rows.len(), 6);
        assert!(!grid.set_page_size(10));
    }

    #[test]
    fn select_visible_and_clear() {
        let mut grid = ready_models(5);
        assert!(grid.select_visible());
        assert_eq!(grid.selection().len(), 5);
        assert!(!grid.select_visible());
        assert!(grid.clear_selection());
        assert!(grid.selection().is_empty());
        let events = grid.drain_events();
        assert_eq!(
            events.last(),
            Some(&GridEvent::SelectionChanged { selected: vec![] })
        );
    }

    #[test]
    fn expansion_is_tracked_by_id() {
        let mut grid = ready_models(10);
        assert!(grid.toggle_expanded(4));
        grid.cycle_sort(ModelRecord::NAME);
        assert!(grid.expanded().is_selected(4));
        assert!(!grid.toggle_expanded(4));
    }

    #[test]
    fn append_raises_record_added() {
        let mut grid = Grid::ready(default_models(), 10);
        let id = grid.append(ModelRecord::new(16, "New", "8k", "-", &[]));
        assert_eq!(id, Some(16));
        assert_eq!(grid.drain_events(), vec![GridEvent::RecordAdded { id: 16 }]);
        assert!(grid.drain_events().is_empty());
    }
}
