//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::directory::FormField;

use super::state::{AppState, InputMode, PopupState, Tab};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    state.status_message = None;
    match state.popup {
        PopupState::QuitConfirm => return handle_quit_confirm(state, key),
        PopupState::AddUser => return handle_add_user(state, key),
        PopupState::Help { .. } => return handle_help(state, key),
        PopupState::None => {}
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Filter => handle_filter_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        _ if is_ctrl_c(&key) => KeyAction::Quit,
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if is_ctrl_c(&key) {
        return KeyAction::Quit;
    }
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
    ) {
        state.popup = PopupState::None;
        return KeyAction::None;
    }
    if let PopupState::Help { scroll } = &mut state.popup {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            // Clamped during render.
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            KeyCode::PageUp => *scroll = scroll.saturating_sub(10),
            KeyCode::PageDown => *scroll = scroll.saturating_add(10),
            _ => {}
        }
    }
    KeyAction::None
}

fn handle_add_user(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if is_ctrl_c(&key) {
        return KeyAction::Quit;
    }
    let on_role = state.add_user.focus == FormField::Role;
    match key.code {
        KeyCode::Esc => state.cancel_add_user(),
        KeyCode::Enter => state.submit_add_user(),
        KeyCode::Tab | KeyCode::Down => state.add_user.focus_next(),
        KeyCode::BackTab | KeyCode::Up => state.add_user.focus_prev(),
        KeyCode::Left if on_role => state.add_user.cycle_role(false),
        KeyCode::Right if on_role => state.add_user.cycle_role(true),
        KeyCode::Backspace => state.add_user.backspace(),
        KeyCode::Char(c) => state.add_user.input(c),
        _ => {}
    }
    KeyAction::None
}

fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        KeyCode::Esc => state.cancel_filter(),
        KeyCode::Enter => state.confirm_filter(),
        KeyCode::Backspace => {
            state.filter_input.pop();
            state.update_filter();
        }
        KeyCode::Char(c) => {
            state.filter_input.push(c);
            state.update_filter();
        }
        _ => {}
    }
    KeyAction::None
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
        }

        // Tab navigation
        KeyCode::Tab => state.switch_tab(state.current_tab.next()),
        KeyCode::BackTab => state.switch_tab(state.current_tab.prev()),
        KeyCode::Char('1') => state.switch_tab(Tab::Models),
        KeyCode::Char('2') => state.switch_tab(Tab::Users),

        // Row navigation
        KeyCode::Up | KeyCode::Char('k') => state.cursor_mut().up(),
        KeyCode::Down | KeyCode::Char('j') => {
            let len = state.visible_ids().len();
            state.cursor_mut().down(len);
        }
        KeyCode::Home => state.cursor_mut().row = 0,
        KeyCode::End => {
            let len = state.visible_ids().len();
            state.cursor_mut().end(len);
        }

        // Column focus
        KeyCode::Left | KeyCode::Char('h') => state.cursor_mut().left(),
        KeyCode::Right | KeyCode::Char('l') => {
            let columns = state.column_count();
            state.cursor_mut().right(columns);
        }

        // Sorting and filtering on the focused column
        KeyCode::Char('s') | KeyCode::Char('S') => state.cycle_sort(),
        KeyCode::Char('/') => state.start_filter(),
        KeyCode::Char('c') | KeyCode::Char('C') => state.clear_filters(),

        // Paging
        KeyCode::Char('n') | KeyCode::PageDown => state.next_page(),
        KeyCode::Char('p') | KeyCode::PageUp => state.prev_page(),
        KeyCode::Char('+') | KeyCode::Char('=') => state.step_page_size(true),
        KeyCode::Char('-') => state.step_page_size(false),

        // Selection
        KeyCode::Char(' ') => state.toggle_selected(),
        KeyCode::Char('v') => state.select_visible(),
        KeyCode::Char('V') => state.clear_selection(),

        // Detail panel and dialogs
        KeyCode::Enter | KeyCode::Char('e') => state.toggle_expanded(),
        KeyCode::Char('a') | KeyCode::Char('A') => state.open_add_user(),
        KeyCode::Char('?') | KeyCode::Char('H') => {
            state.popup = PopupState::Help { scroll: 0 };
        }

        _ => {}
    }
    KeyAction::None
}
