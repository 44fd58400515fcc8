//! Header bar: application name, tabs, filter or status line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode, Tab};
use crate::tui::style::Styles;

/// Renders the one-line header.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(10), // Name
        Constraint::Min(20),    // Tabs
        Constraint::Length(44), // Filter/Status
    ])
    .split(area);

    frame.render_widget(Paragraph::new(" gridview").style(Styles::header()), chunks[0]);

    let tabs: Vec<Span> = Tab::all()
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if *tab == state.current_tab {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            let num = format!(" {}:", i + 1);
            let name = format!("{} ", tab.name());
            vec![Span::styled(num, Styles::dim()), Span::styled(name, style)]
        })
        .collect();
    let tabs_widget = Paragraph::new(Line::from(tabs)).style(Styles::header());
    frame.render_widget(tabs_widget, chunks[1]);

    let column = state.column_name(state.cursor().column);
    let (right_content, right_style) = if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::status())
    } else {
        match state.input_mode {
            InputMode::Filter => (
                format!("{}: {}█", column, state.filter_input),
                Styles::filter_input(),
            ),
            InputMode::Normal => {
                let filter = state.current_filter();
                let text = if filter.is_empty() {
                    format!("[{}]", column)
                } else {
                    format!("[{}] /{}", column, filter)
                };
                (text, Styles::header())
            }
        }
    };
    frame.render_widget(Paragraph::new(right_content).style(right_style), chunks[2]);
}
