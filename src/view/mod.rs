//! UI-agnostic view models.
//!
//! Each sub-module builds a [`common::TableViewModel`] from a grid. The TUI
//! then maps the view model to ratatui widgets; `--dump` serializes a
//! [`dump::ProjectionDump`] instead.

pub mod common;
pub mod dump;
pub mod models;
pub mod users;
