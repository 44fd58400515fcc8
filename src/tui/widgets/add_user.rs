//! Add-user dialog widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::popup::{fixed_rect, render_popup_block};
use crate::directory::{AddUserDialog, FormField};
use crate::tui::style::Styles;

fn field_lines(dialog: &AddUserDialog, field: FormField) -> Vec<Line<'static>> {
    let focused = dialog.focus == field;
    let value = dialog.form.value(field).to_string();
    let shown = match (field, focused) {
        (FormField::Role, true) => format!("< {} >", value),
        (_, true) => format!("{}█", value),
        _ => value,
    };
    let label_style = if focused {
        Styles::focused()
    } else {
        Styles::section_header()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {:<6}", field.label()), label_style),
        Span::raw(" "),
        Span::styled(shown, Styles::filter_input()),
    ])];
    if let Some(err) = dialog.errors().get(field) {
        lines.push(Line::from(Span::styled(format!("        {}", err), Styles::error())));
    }
    lines
}

/// Renders the add-user modal.
pub fn render_add_user(frame: &mut Frame, area: Rect, dialog: &AddUserDialog) {
    let popup_area = fixed_rect(56, 13, area);
    let inner = render_popup_block(frame, popup_area, &dialog.modal.title);

    let mut content = vec![Line::from("")];
    for &field in FormField::all() {
        content.extend(field_lines(dialog, field));
    }
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("  Enter", Styles::help_key()),
        Span::styled(format!(" {}   ", dialog.modal.primary_text), Styles::dim()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(format!(" {}", dialog.modal.secondary_text), Styles::dim()),
    ]));

    frame.render_widget(Paragraph::new(content).style(Styles::popup()), inner);
}
