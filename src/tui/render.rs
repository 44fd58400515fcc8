//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::view::models::build_models_view;
use crate::view::users::build_users_view;

use super::state::{AppState, PopupState, Tab};
use super::widgets::{
    render_add_user, render_footer, render_grid_table, render_header, render_help,
    render_quit_confirm,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(5),    // Grid
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    let vm = match state.current_tab {
        Tab::Models => build_models_view(&state.models),
        Tab::Users => build_users_view(&state.users),
    };
    let ticks = state.ticks;
    render_grid_table(frame, chunks[1], &vm, state.cursor_mut(), ticks);
    render_footer(frame, chunks[2], &vm, state.current_tab);

    // Popups are rendered last to overlay everything.
    match &mut state.popup {
        PopupState::None => {}
        PopupState::Help { scroll } => render_help(frame, area, state.current_tab, scroll),
        PopupState::AddUser => render_add_user(frame, area, &state.add_user),
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
    }
}
