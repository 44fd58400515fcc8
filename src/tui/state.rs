//! Application state management.

use ratatui::widgets::TableState as RatatuiTableState;
use tracing::info;

use crate::config::{next_page_size, prev_page_size};
use crate::directory::{AddUserDialog, UserDirectory};
use crate::grid::{Grid, GridEvent};
use crate::models::{ModelRecord, User};
use crate::table::TableRow;

/// Available tabs in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Models,
    Users,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Models, Tab::Users]
    }

    /// Returns the display name of the tab.
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Models => "Models",
            Tab::Users => "Users",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Models => Tab::Users,
            Tab::Users => Tab::Models,
        }
    }

    pub fn prev(&self) -> Tab {
        // Two tabs: same as next.
        self.next()
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a filter for the focused column.
    Filter,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    /// No popup is open.
    #[default]
    None,
    /// Help popup with scroll offset.
    Help { scroll: usize },
    /// Quit confirmation dialog.
    QuitConfirm,
    /// Add-user dialog (Users tab).
    AddUser,
}

/// Row cursor and focused column of one grid.
#[derive(Debug, Default)]
pub struct GridCursor {
    /// Index into the visible rows.
    pub row: usize,
    /// Column targeted by sort and filter keys.
    pub column: usize,
    /// Ratatui table state for scrolling.
    pub ratatui_state: RatatuiTableState,
}

impl GridCursor {
    pub fn up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn down(&mut self, len: usize) {
        if self.row + 1 < len {
            self.row += 1;
        }
    }

    pub fn end(&mut self, len: usize) {
        self.row = len.saturating_sub(1);
    }

    pub fn left(&mut self) {
        self.column = self.column.saturating_sub(1);
    }

    pub fn right(&mut self, columns: usize) {
        if self.column + 1 < columns {
            self.column += 1;
        }
    }

    /// Keeps the cursor inside the visible rows.
    pub fn clamp(&mut self, len: usize) {
        if self.row >= len {
            self.row = len.saturating_sub(1);
        }
    }
}

fn visible_ids<T: TableRow>(grid: &Grid<T>) -> Vec<u64> {
    grid.view().rows.iter().map(|r| r.id()).collect()
}

/// Main application state.
pub struct AppState {
    pub current_tab: Tab,
    pub input_mode: InputMode,
    pub popup: PopupState,

    pub models: Grid<ModelRecord>,
    pub users: UserDirectory,
    pub add_user: AddUserDialog,

    pub models_cursor: GridCursor,
    pub users_cursor: GridCursor,

    /// Filter being typed in [`InputMode::Filter`].
    pub filter_input: String,
    /// Filter of the focused column before editing started; restored on Esc.
    filter_backup: String,

    /// Transient message shown in the header until the next key.
    pub status_message: Option<String>,
    /// Ticks since start; drives the loading indicator.
    pub ticks: usize,
}

impl AppState {
    pub fn new(models: Grid<ModelRecord>, users: UserDirectory) -> Self {
        Self {
            current_tab: Tab::default(),
            input_mode: InputMode::default(),
            popup: PopupState::default(),
            models,
            users,
            add_user: AddUserDialog::new(),
            models_cursor: GridCursor::default(),
            users_cursor: GridCursor::default(),
            filter_input: String::new(),
            filter_backup: String::new(),
            status_message: None,
            ticks: 0,
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.input_mode = InputMode::Normal;
    }

    pub fn cursor(&self) -> &GridCursor {
        match self.current_tab {
            Tab::Models => &self.models_cursor,
            Tab::Users => &self.users_cursor,
        }
    }

    pub fn cursor_mut(&mut self) -> &mut GridCursor {
        match self.current_tab {
            Tab::Models => &mut self.models_cursor,
            Tab::Users => &mut self.users_cursor,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self.current_tab {
            Tab::Models => self.models.is_loading(),
            Tab::Users => self.users.grid().is_loading(),
        }
    }

    pub fn column_count(&self) -> usize {
        match self.current_tab {
            Tab::Models => ModelRecord::column_count(),
            Tab::Users => User::column_count(),
        }
    }

    pub fn column_name(&self, column: usize) -> &'static str {
        let columns = match self.current_tab {
            Tab::Models => ModelRecord::columns(),
            Tab::Users => User::columns(),
        };
        columns.get(column).map_or("", |c| c.name)
    }

    /// Ids of the rows on the current page, in display order.
    pub fn visible_ids(&self) -> Vec<u64> {
        match self.current_tab {
            Tab::Models => visible_ids(&self.models),
            Tab::Users => visible_ids(self.users.grid()),
        }
    }

    /// Id of the row under the cursor.
    pub fn cursor_id(&self) -> Option<u64> {
        self.visible_ids().get(self.cursor().row).copied()
    }

    /// Clamps the cursor after the visible rows changed.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_ids().len();
        self.cursor_mut().clamp(len);
    }

    pub fn cycle_sort(&mut self) {
        let column = self.cursor().column;
        let changed = match self.current_tab {
            Tab::Models => self.models.cycle_sort(column),
            Tab::Users => self.users.grid_mut().cycle_sort(column),
        };
        if changed {
            self.cursor_mut().row = 0;
        }
    }

    /// Filter text of the focused column.
    pub fn current_filter(&self) -> String {
        let column = self.cursor().column;
        let filters = match self.current_tab {
            Tab::Models => self.models.filters(),
            Tab::Users => self.users.grid().filters(),
        };
        filters.get(column).unwrap_or_default().to_string()
    }

    fn apply_filter(&mut self, text: &str) {
        let column = self.cursor().column;
        let changed = match self.current_tab {
            Tab::Models => self.models.set_filter(column, text),
            Tab::Users => self.users.grid_mut().set_filter(column, text),
        };
        if changed {
            self.cursor_mut().row = 0;
        }
    }

    /// Enters filter mode for the focused column.
    pub fn start_filter(&mut self) {
        if self.is_loading() {
            return;
        }
        self.filter_backup = self.current_filter();
        self.filter_input = self.filter_backup.clone();
        self.input_mode = InputMode::Filter;
    }

    /// Applies the typed filter as it changes.
    pub fn update_filter(&mut self) {
        let text = self.filter_input.clone();
        self.apply_filter(&text);
    }

    pub fn confirm_filter(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leaves filter mode, restoring the previous filter.
    pub fn cancel_filter(&mut self) {
        let backup = std::mem::take(&mut self.filter_backup);
        self.apply_filter(&backup);
        self.filter_input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn clear_filters(&mut self) {
        let changed = match self.current_tab {
            Tab::Models => self.models.clear_filters(),
            Tab::Users => self.users.grid_mut().clear_filters(),
        };
        if changed {
            self.cursor_mut().row = 0;
        }
    }

    pub fn next_page(&mut self) {
        let changed = match self.current_tab {
            Tab::Models => self.models.next_page(),
            Tab::Users => self.users.grid_mut().next_page(),
        };
        if changed {
            self.cursor_mut().row = 0;
        }
    }

    pub fn prev_page(&mut self) {
        let changed = match self.current_tab {
            Tab::Models => self.models.prev_page(),
            Tab::Users => self.users.grid_mut().prev_page(),
        };
        if changed {
            self.cursor_mut().row = 0;
        }
    }

    /// Steps the page size through the offered options.
    pub fn step_page_size(&mut self, larger: bool) {
        let step = |current| {
            if larger {
                next_page_size(current)
            } else {
                prev_page_size(current)
            }
        };
        match self.current_tab {
            Tab::Models => {
                let size = step(self.models.pagination().page_size());
                self.models.set_page_size(size);
            }
            Tab::Users => {
                let grid = self.users.grid_mut();
                let size = step(grid.pagination().page_size());
                grid.set_page_size(size);
            }
        }
        self.clamp_cursor();
    }

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.cursor_id() else {
            return;
        };
        match self.current_tab {
            Tab::Models => self.models.toggle_selected(id),
            Tab::Users => self.users.grid_mut().toggle_selected(id),
        };
    }

    pub fn select_visible(&mut self) {
        match self.current_tab {
            Tab::Models => self.models.select_visible(),
            Tab::Users => self.users.grid_mut().select_visible(),
        };
    }

    pub fn clear_selection(&mut self) {
        match self.current_tab {
            Tab::Models => self.models.clear_selection(),
            Tab::Users => self.users.grid_mut().clear_selection(),
        };
    }

    /// Opens or closes the detail panel of the row under the cursor.
    pub fn toggle_expanded(&mut self) {
        if self.current_tab != Tab::Models {
            self.status_message = Some("Users have no detail panel".to_string());
            return;
        }
        if let Some(id) = self.cursor_id() {
            self.models.toggle_expanded(id);
        }
    }

    pub fn open_add_user(&mut self) {
        if self.current_tab != Tab::Users {
            return;
        }
        self.add_user.open();
        self.popup = PopupState::AddUser;
    }

    /// Submits the add-user dialog; closes the popup on success.
    pub fn submit_add_user(&mut self) {
        let action = self.add_user.modal.primary();
        if let Some(id) = self.add_user.activate(action, &mut self.users) {
            self.popup = PopupState::None;
            self.status_message = Some(format!("User {} added", id));
        }
    }

    pub fn cancel_add_user(&mut self) {
        let action = self.add_user.modal.secondary();
        self.add_user.activate(action, &mut self.users);
        self.popup = PopupState::None;
    }

    /// Completes the deferred load of the models grid.
    pub fn finish_loading(&mut self) {
        if self.models.finish_loading() {
            self.models_cursor.clamp(visible_ids(&self.models).len());
        }
    }

    /// Takes the queued events of both grids.
    pub fn drain_events(&mut self) -> Vec<(Tab, GridEvent)> {
        let models = self.models.drain_events().into_iter().map(|e| (Tab::Models, e));
        let users = self
            .users
            .grid_mut()
            .drain_events()
            .into_iter()
            .map(|e| (Tab::Users, e));
        models.chain(users).collect()
    }
}

/// Logs drained grid events.
pub fn log_events(events: &[(Tab, GridEvent)]) {
    for (tab, event) in events {
        info!(tab = tab.name(), "{:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_state() -> AppState {
        let mut models = Grid::loading(Vec::new(), 10);
        models.finish_loading();
        AppState::new(models, UserDirectory::with_defaults(10))
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut cursor = GridCursor::default();
        cursor.up();
        assert_eq!(cursor.row, 0);
        cursor.down(2);
        cursor.down(2);
        assert_eq!(cursor.row, 1);
        cursor.end(10);
        assert_eq!(cursor.row, 9);
        cursor.clamp(6);
        assert_eq!(cursor.row, 5);
        cursor.right(2);
        cursor.right(2);
        assert_eq!(cursor.column, 1);
    }

    #[test]
    fn filter_cancel_restores_previous() {
        let mut state = ready_state();
        state.start_filter();
        state.filter_input.push_str("gemini");
        state.update_filter();
        assert_eq!(state.visible_ids().len(), 3);

        state.cancel_filter();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.visible_ids().len(), 10);
        assert_eq!(state.current_filter(), "");
    }

    #[test]
    fn page_size_steps_and_cursor_clamps() {
        let mut state = ready_state();
        state.models_cursor.end(10);
        state.step_page_size(false);
        assert_eq!(state.models.pagination().page_size(), 5);
        assert_eq!(state.models_cursor.row, 4);
    }

    #[test]
    fn loading_completion_clamps_nothing_when_empty() {
        let models = Grid::loading(Vec::new(), 10);
        let mut state = AppState::new(models, UserDirectory::with_defaults(10));
        assert!(state.visible_ids().is_empty());
        state.finish_loading();
        assert_eq!(state.visible_ids().len(), 10);
    }

    #[test]
    fn drain_events_tags_tab() {
        let mut state = ready_state();
        state.toggle_selected();
        state.switch_tab(Tab::Users);
        state.toggle_selected();

        let events = state.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, Tab::Models);
        assert_eq!(events[1].0, Tab::Users);
        assert_eq!(
            events[1].1,
            GridEvent::SelectionChanged { selected: vec![1] }
        );
        log_events(&events);
    }
}
