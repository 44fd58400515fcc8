//! Utility modules for gridview.

mod query_parser;

pub use query_parser::{QueryParseError, parse_filter_spec, parse_sort_spec};
