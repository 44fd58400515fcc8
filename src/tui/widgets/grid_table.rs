//! Data grid widget.
//! Thin TUI wrapper over a [`TableViewModel`].

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::tui::state::GridCursor;
use crate::tui::style::Styles;
use crate::view::common::{TableViewModel, ViewRow};

const SPINNER: &[&str] = &["|", "/", "-", "\\"];

fn header_label(vm: &TableViewModel, idx: usize, name: &str) -> String {
    let indicator = match vm.sort {
        Some((col, true)) if col == idx => "▲",
        Some((col, false)) if col == idx => "▼",
        _ => "",
    };
    let filtered = if vm.filters.get(idx).is_some_and(Option::is_some) {
        "*"
    } else {
        ""
    };
    format!("{}{}{}", name, indicator, filtered)
}

/// Lines of the detail panels of expanded rows on the page.
fn detail_lines(rows: &[ViewRow]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for row in rows.iter().filter(|r| !r.detail.is_empty()) {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        for d in &row.detail {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<18}", d.label), Styles::section_header()),
                Span::raw(d.value.clone()),
            ]));
        }
    }
    lines
}

/// Renders a grid with its loading, empty and detail states.
pub fn render_grid_table(
    frame: &mut Frame,
    area: Rect,
    vm: &TableViewModel,
    cursor: &mut GridCursor,
    ticks: usize,
) {
    let block = Block::default()
        .title(format!(" {} ", vm.title))
        .borders(Borders::ALL)
        .style(Styles::default());

    if let Some(message) = &vm.loading {
        let spinner = SPINNER[ticks % SPINNER.len()];
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);
        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(inner);
        let text = Paragraph::new(format!("{} {}", spinner, message))
            .alignment(Alignment::Center)
            .style(Styles::dim());
        frame.render_widget(text, rows[1]);
        return;
    }

    let details = detail_lines(&vm.rows);
    let (table_area, detail_area) = if details.is_empty() {
        (area, None)
    } else {
        let height = (details.len() as u16 + 2).min(area.height / 2);
        let chunks = Layout::vertical([Constraint::Min(5), Constraint::Length(height)]).split(area);
        (chunks[0], Some(chunks[1]))
    };

    // Header with sort and filter markers; focused column highlighted.
    let mut headers = vec![Span::styled("", Styles::table_header())];
    headers.extend(vm.headers.iter().enumerate().map(|(i, h)| {
        let style = if i == cursor.column {
            Styles::focused_header()
        } else {
            Styles::table_header()
        };
        Span::styled(header_label(vm, i, h), style)
    }));
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|vr| {
            let check = if vr.checked { "[x]" } else { "[ ]" };
            let marker = if vm.expandable && !vr.detail.is_empty() {
                "▾"
            } else {
                " "
            };
            let mut cells = vec![Span::raw(format!("{}{}", check, marker))];
            cells.extend(vr.cells.iter().map(|c| match c.style {
                Some(s) => Span::styled(c.text.clone(), Styles::from_class(s)),
                None => Span::raw(c.text.clone()),
            }));
            Row::new(cells).style(Styles::from_class(vr.style)).height(1)
        })
        .collect();

    // Checkbox column, then data columns with the last one filling the rest.
    let mut widths = vec![Constraint::Length(4)];
    let last = vm.widths.len().saturating_sub(1);
    widths.extend(vm.widths.iter().enumerate().map(|(i, &w)| {
        if i == last {
            Constraint::Fill(1)
        } else {
            Constraint::Length(w)
        }
    }));

    frame.render_widget(Clear, table_area);
    if vm.rows.is_empty() {
        let paragraph = Paragraph::new(vm.empty_message.as_str())
            .style(Styles::dim())
            .block(block);
        frame.render_widget(paragraph, table_area);
        return;
    }

    cursor.clamp(vm.rows.len());
    cursor.ratatui_state.select(Some(cursor.row));
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Styles::selected());
    frame.render_stateful_widget(table, table_area, &mut cursor.ratatui_state);

    if let Some(detail_area) = detail_area {
        let panel = Paragraph::new(details).block(
            Block::default()
                .title(" Details ")
                .borders(Borders::ALL)
                .style(Styles::default()),
        );
        frame.render_widget(Clear, detail_area);
        frame.render_widget(panel, detail_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::common::DetailLine;

    fn vm() -> TableViewModel {
        TableViewModel {
            title: "Models".to_string(),
            headers: vec!["Name".to_string(), "Size".to_string()],
            widths: vec![10, 6],
            rows: Vec::new(),
            sort: Some((1, false)),
            filters: vec![Some("x".to_string()), None],
            footer: String::new(),
            page: 0,
            page_count: 1,
            page_size: 10,
            selected: 0,
            loading: None,
            empty_message: String::new(),
            expandable: true,
        }
    }

    #[test]
    fn header_markers() {
        let vm = vm();
        assert_eq!(header_label(&vm, 0, "Name"), "Name*");
        assert_eq!(header_label(&vm, 1, "Size"), "Size▼");
    }

    #[test]
    fn detail_panels_are_separated() {
        let row = |id, detail: Vec<DetailLine>| ViewRow {
            id,
            cells: Vec::new(),
            style: Default::default(),
            checked: false,
            detail,
        };
        let rows = vec![
            row(0, vec![DetailLine::new("Model", "A".to_string())]),
            row(1, Vec::new()),
            row(2, vec![
                DetailLine::new("Model", "B".to_string()),
                DetailLine::new("Max mode", "1M".to_string()),
            ]),
        ];
        assert_eq!(detail_lines(&rows).len(), 4);
    }
}
