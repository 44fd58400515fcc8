//! Grid footer: row range, paging and selection summary plus key hints.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::Tab;
use crate::tui::style::Styles;
use crate::view::common::TableViewModel;

/// Summary text for the left side of the footer.
pub fn footer_summary(vm: &TableViewModel) -> String {
    let mut text = format!(
        " {} | Page {}/{} | {} per page",
        vm.footer,
        vm.page + 1,
        vm.page_count,
        vm.page_size
    );
    if vm.selected > 0 {
        text.push_str(&format!(" | {} selected", vm.selected));
    }
    text
}

fn hints(tab: Tab) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("s", "sort"), ("/", "filter"), ("n/p", "page"), ("space", "select")];
    match tab {
        Tab::Models => hints.push(("enter", "details")),
        Tab::Users => hints.push(("a", "add")),
    }
    hints.push(("?", "help"));
    hints
}

/// Renders the one-line footer.
pub fn render_footer(frame: &mut Frame, area: Rect, vm: &TableViewModel, tab: Tab) {
    let chunks = Layout::horizontal([Constraint::Min(30), Constraint::Length(56)]).split(area);

    frame.render_widget(
        Paragraph::new(footer_summary(vm)).style(Styles::default()),
        chunks[0],
    );

    let spans: Vec<Span> = hints(tab)
        .into_iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(key, Styles::help_key()),
                Span::styled(format!(" {}  ", action), Styles::dim()),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        chunks[1],
    );
}
