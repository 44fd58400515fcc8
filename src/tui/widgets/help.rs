//! Help popup widget with per-tab key descriptions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::popup::{centered_rect, render_popup_block};
use crate::tui::state::Tab;
use crate::tui::style::Styles;

const NAVIGATION: &[(&str, &str)] = &[
    ("1 / 2 / Tab", "Switch tab"),
    ("Up/Down, j/k", "Move cursor"),
    ("Home / End", "First / last row on page"),
    ("Left/Right, h/l", "Focus column"),
    ("n / PgDn", "Next page"),
    ("p / PgUp", "Previous page"),
    ("+ / -", "Larger / smaller page size"),
];

const GRID: &[(&str, &str)] = &[
    ("s", "Sort focused column (asc, desc, off)"),
    ("/", "Filter focused column (Enter keeps, Esc reverts)"),
    ("c", "Clear all filters"),
    ("Space", "Toggle row selection"),
    ("v / V", "Select page / clear selection"),
];

const GENERAL: &[(&str, &str)] = &[("?", "Toggle this help"), ("q", "Quit"), ("Ctrl-C", "Quit now")];

fn section(title: &str, keys: &[(&str, &str)], lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(Span::styled(title.to_string(), Styles::section_header())));
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<18}", key), Styles::help_key()),
            Span::raw(desc.to_string()),
        ]));
    }
    lines.push(Line::from(""));
}

/// Help lines for a tab.
pub fn help_content(tab: Tab) -> (String, Vec<Line<'static>>) {
    let mut lines = Vec::new();
    section("Navigation", NAVIGATION, &mut lines);
    section("Grid", GRID, &mut lines);
    match tab {
        Tab::Models => section(
            "Models",
            &[("Enter / e", "Show or hide the detail panel")],
            &mut lines,
        ),
        Tab::Users => section(
            "Users",
            &[
                ("a", "Add user"),
                ("Tab / Up / Down", "Next / previous field (in dialog)"),
                ("Left / Right", "Change role (in dialog)"),
                ("Enter / Esc", "Add / cancel (in dialog)"),
            ],
            &mut lines,
        ),
    }
    section("General", GENERAL, &mut lines);
    (format!("Help: {}", tab.name()), lines)
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, tab: Tab, scroll: &mut usize) {
    let popup_area = centered_rect(70, 80, area);
    let (title, content) = help_content(tab);
    let content_lines = content.len();
    let inner = render_popup_block(frame, popup_area, &title);

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Styles::popup());
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Styles::dim()),
        Span::styled("?", Styles::help_key()),
        Span::styled(" or ", Styles::dim()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" to close", Styles::dim()),
        Span::styled(scroll_info, Styles::dim()),
    ]));
    frame.render_widget(footer, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_specific_sections() {
        let (title, models) = help_content(Tab::Models);
        assert_eq!(title, "Help: Models");
        let (_, users) = help_content(Tab::Users);
        // Users describe four dialog keys instead of one detail key.
        assert_eq!(users.len(), models.len() + 3);
    }
}
