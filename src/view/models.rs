//! Model comparison view model.

use crate::grid::Grid;
use crate::magnitude;
use crate::models::ModelRecord;
use crate::view::common::{
    DetailLine, RowPresenter, RowStyleClass, TableLabels, TableViewModel, ViewCell,
    build_table_view,
};

pub const LOADING_TEXT: &str = "Loading model data, please wait...";

const LABELS: TableLabels<'static> = TableLabels {
    title: "Models",
    noun: "models",
    loading: LOADING_TEXT,
    empty: "No models match the current filters",
    expandable: true,
};

fn magnitude_cell(value: &str) -> ViewCell {
    if magnitude::is_absent(value) {
        ViewCell::styled(value.to_string(), RowStyleClass::Dimmed)
    } else {
        ViewCell::plain(value.to_string())
    }
}

fn magnitude_detail(value: &str) -> String {
    if magnitude::is_absent(value) {
        "not available".to_string()
    } else {
        format!("{} (rank {})", value, magnitude::rank(value))
    }
}

struct ModelPresenter;

impl RowPresenter<ModelRecord> for ModelPresenter {
    fn cells(&self, row: &ModelRecord) -> Vec<ViewCell> {
        vec![
            ViewCell::plain(row.name.clone()),
            magnitude_cell(&row.default_context),
            magnitude_cell(&row.max_mode),
            ViewCell::plain(row.recommendation.join(", ")),
        ]
    }

    fn detail(&self, row: &ModelRecord) -> Vec<DetailLine> {
        let mut lines = vec![
            DetailLine::new("Model", row.name.clone()),
            DetailLine::new("Default context", magnitude_detail(&row.default_context)),
            DetailLine::new("Max mode", magnitude_detail(&row.max_mode)),
        ];
        if row.recommendation.is_empty() {
            lines.push(DetailLine::new("Recommended for", "-".to_string()));
        }
        for (i, tag) in row.recommendation.iter().enumerate() {
            let label = if i == 0 { "Recommended for" } else { "" };
            lines.push(DetailLine::new(label, format!("- {}", tag)));
        }
        lines
    }
}

/// Builds a UI-agnostic view model for the model comparison grid.
pub fn build_models_view(grid: &Grid<ModelRecord>) -> TableViewModel {
    build_table_view(&grid.view(), &LABELS, &ModelPresenter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_grid() -> Grid<ModelRecord> {
        let mut grid = Grid::loading(Vec::new(), 10);
        grid.finish_loading();
        grid
    }

    #[test]
    fn loading_view_has_no_rows() {
        let grid: Grid<ModelRecord> = Grid::loading(Vec::new(), 10);
        let vm = build_models_view(&grid);
        assert_eq!(vm.loading.as_deref(), Some(LOADING_TEXT));
        assert!(vm.rows.is_empty());
        assert_eq!(vm.footer, "0 models");
    }

    #[test]
    fn first_page() {
        let grid = ready_grid();
        let vm = build_models_view(&grid);
        assert!(vm.loading.is_none());
        assert_eq!(vm.headers.len(), 4);
        assert_eq!(vm.rows.len(), 10);
        assert_eq!(vm.footer, "1 - 10 of 16 models");
        assert_eq!(vm.page_count, 2);
        assert_eq!(vm.sort, None);

        // "Claude 3 Opus" has no max mode.
        let first = &vm.rows[0];
        assert_eq!(first.cells[0].text, "Claude 3 Opus");
        assert_eq!(first.cells[2].style, Some(RowStyleClass::Dimmed));
        assert_eq!(first.cells[1].style, None);
        assert_eq!(first.cells[3].text, "Long-form writing, Reasoning");
    }

    #[test]
    fn checked_and_expanded_rows() {
        let mut grid = ready_grid();
        grid.toggle_selected(1);
        grid.toggle_expanded(15);
        grid.set_page(1);

        let vm = build_models_view(&grid);
        assert_eq!(vm.selected, 1);
        assert_eq!(vm.footer, "11 - 16 of 16 models");
        assert!(vm.rows.iter().all(|r| !r.checked));

        let gemini = vm.rows.iter().find(|r| r.id == 15).unwrap();
        assert_eq!(gemini.detail[0].value, "Gemini 2.5 Pro");
        assert_eq!(gemini.detail[1].value, "200k (rank 200)");
        assert_eq!(gemini.detail[2].value, "1M (rank 1000)");
        assert_eq!(gemini.detail[3].label, "Recommended for");
        assert_eq!(gemini.detail.len(), 5);
        assert!(vm.rows.iter().filter(|r| r.id != 15).all(|r| r.detail.is_empty()));
    }

    #[test]
    fn sort_and_filter_indicators() {
        let mut grid = ready_grid();
        grid.cycle_sort(ModelRecord::MAX_MODE);
        grid.cycle_sort(ModelRecord::MAX_MODE);
        grid.set_filter(ModelRecord::NAME, "gemini");

        let vm = build_models_view(&grid);
        assert_eq!(vm.sort, Some((ModelRecord::MAX_MODE, false)));
        assert_eq!(vm.filters[ModelRecord::NAME].as_deref(), Some("gemini"));
        assert_eq!(vm.filters[ModelRecord::MAX_MODE], None);
        assert_eq!(vm.footer, "1 - 3 of 3 models");
    }
}
