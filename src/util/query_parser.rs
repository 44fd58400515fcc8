//! Parsers for the `--sort` and `--filter` CLI arguments.
//!
//! Columns are named by header (case-insensitive, spaces, `_` and `-`
//! ignored) or by zero-based index:
//! - sort: `name`, `max_mode:desc`, `2:asc`
//! - filter: `name=claude`, `recommendation=coding`

use crate::table::{SortDirection, SortState, TableRow, find_column};

/// Error type for query argument parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParseError {
    pub input: String,
    pub message: String,
}

impl std::fmt::Display for QueryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for QueryParseError {}

fn error(input: &str, message: impl Into<String>) -> QueryParseError {
    QueryParseError {
        input: input.to_string(),
        message: message.into(),
    }
}

fn column_names<T: TableRow>() -> String {
    T::columns()
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn resolve_column<T: TableRow>(input: &str, name: &str) -> Result<usize, QueryParseError> {
    find_column::<T>(name).ok_or_else(|| {
        error(
            input,
            format!("Unknown column '{}'. Columns: {}", name.trim(), column_names::<T>()),
        )
    })
}

/// Parses `column[:asc|desc]` into a sort state. Direction defaults to
/// ascending.
pub fn parse_sort_spec<T: TableRow>(input: &str) -> Result<SortState, QueryParseError> {
    let input = input.trim();
    let (name, direction) = match input.rsplit_once(':') {
        Some((name, dir)) => (name, dir),
        None => (input, "asc"),
    };

    let direction = match direction.trim().to_lowercase().as_str() {
        "asc" | "ascending" => SortDirection::Ascending,
        "desc" | "descending" => SortDirection::Descending,
        other => {
            return Err(error(
                input,
                format!("Unknown direction '{}'. Use asc or desc", other),
            ));
        }
    };

    let column = resolve_column::<T>(input, name)?;
    Ok(SortState::by(column, direction))
}

/// Parses `column=text` into a column index and filter text.
pub fn parse_filter_spec<T: TableRow>(input: &str) -> Result<(usize, String), QueryParseError> {
    let Some((name, text)) = input.split_once('=') else {
        return Err(error(input, "Expected column=text"));
    };
    let column = resolve_column::<T>(input, name)?;
    Ok((column, text.to_string()))
}
