//! gridview - data grid view-model library and terminal front-end.
//!
//! The library holds the UI-independent grid logic shared by:
//! - the interactive TUI (`tui`)
//! - the `--dump` JSON projection of the `gridview` binary

pub mod config;
pub mod directory;
pub mod error;
pub mod grid;
pub mod loader;
pub mod magnitude;
pub mod modal;
pub mod models;
pub mod store;
pub mod table;
pub mod tui;
pub mod util;
pub mod view;
