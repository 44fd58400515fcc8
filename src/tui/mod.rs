//! Terminal User Interface for gridview.
//!
//! Shows the model comparison grid and the user directory as tabs, with
//! keyboard-driven sorting, filtering, paging, selection and dialogs.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, Tab};
