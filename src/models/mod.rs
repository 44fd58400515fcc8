//! Record types shown in the grids and their built-in datasets.

mod model;
mod user;

pub use model::{ModelRecord, default_models, load_models, parse_models};
pub use user::{DEFAULT_ROLE, ROLES, STATUS_OFFLINE, STATUS_ONLINE, User, default_users};

use crate::table::TableRow;

/// Row types that come with a built-in dataset.
pub trait Dataset: TableRow {
    /// Records used when no input is supplied.
    fn default_records() -> Vec<Self>;
}

impl Dataset for ModelRecord {
    fn default_records() -> Vec<Self> {
        default_models()
    }
}

impl Dataset for User {
    fn default_records() -> Vec<Self> {
        default_users()
    }
}
