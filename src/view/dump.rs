//! Serializable projection for `--dump`.

use serde::Serialize;

use crate::grid::Grid;
use crate::table::{SortDirection, TableRow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortDump {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDump {
    pub column: String,
    pub text: String,
}

/// One page of a grid as plain data.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionDump<'a, T: Serialize> {
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total_filtered: usize,
    pub sort: Option<SortDump>,
    pub filters: Vec<FilterDump>,
    pub selected: Vec<u64>,
    pub rows: Vec<&'a T>,
}

/// Captures the current page of a grid.
pub fn dump_projection<T: TableRow + Serialize>(grid: &Grid<T>) -> ProjectionDump<'_, T> {
    let view = grid.view();
    let column_name = |col: usize| {
        T::columns()
            .get(col)
            .map(|c| c.name.to_string())
            .unwrap_or_else(|| col.to_string())
    };

    ProjectionDump {
        page: view.page,
        page_count: view.page_count,
        page_size: view.page_size,
        total_filtered: view.total_filtered,
        sort: view.sort.active().map(|(col, direction)| SortDump {
            column: column_name(col),
            direction,
        }),
        filters: view
            .filters
            .iter()
            .map(|(col, text)| FilterDump {
                column: column_name(col),
                text: text.to_string(),
            })
            .collect(),
        selected: view.selection.ids(),
        rows: view.rows,
    }
}
