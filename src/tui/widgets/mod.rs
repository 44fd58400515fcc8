//! TUI widgets for gridview.

mod add_user;
mod footer;
mod grid_table;
mod header;
mod help;
mod popup;
mod quit_confirm;

pub use add_user::render_add_user;
pub use footer::render_footer;
pub use grid_table::render_grid_table;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
