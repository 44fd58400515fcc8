//! User rows for the simple grid.

use serde::{Deserialize, Serialize};

use crate::table::{Column, ColumnKind, SortKey, TableRow};

pub const STATUS_ONLINE: &str = "Online";
pub const STATUS_OFFLINE: &str = "Offline";

/// Role preselected in the add-user form.
pub const DEFAULT_ROLE: &str = "User";

/// Roles offered by the add-user form.
pub const ROLES: &[&str] = &["Admin", "User"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl User {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const EMAIL: usize = 2;
    pub const ROLE: usize = 3;
    pub const STATUS: usize = 4;

    pub fn new(id: u64, name: &str, email: &str, role: &str, status: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            status: status.to_string(),
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == STATUS_ONLINE
    }
}

const COLUMNS: &[Column] = &[
    Column::new("ID", ColumnKind::Integer, 4),
    Column::new("Name", ColumnKind::Text, 18),
    Column::new("Email", ColumnKind::Text, 28),
    Column::new("Role", ColumnKind::Text, 8),
    Column::new("Status", ColumnKind::Text, 8),
];

impl TableRow for User {
    fn id(&self) -> u64 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, column: usize) -> String {
        match column {
            Self::ID => self.id.to_string(),
            Self::NAME => self.name.clone(),
            Self::EMAIL => self.email.clone(),
            Self::ROLE => self.role.clone(),
            Self::STATUS => self.status.clone(),
            _ => String::new(),
        }
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            Self::ID => SortKey::Integer(i64::try_from(self.id).unwrap_or(i64::MAX)),
            _ => SortKey::Text(self.cell(column)),
        }
    }
}

/// The six users of the built-in directory (ids 1..=6).
pub fn default_users() -> Vec<User> {
    vec![
        User::new(1, "John Smith", "john.smith@mock.com", "Admin", STATUS_ONLINE),
        User::new(2, "Jane Doe", "jane.doe@mock.com", "User", STATUS_ONLINE),
        User::new(3, "Bob Johnson", "bob.johnson@mock.com", "User", STATUS_OFFLINE),
        User::new(4, "Alice Brown", "alice.brown@mock.com", "Admin", STATUS_ONLINE),
        User::new(5, "Charlie Wilson", "charlie.wilson@mock.com", "User", STATUS_ONLINE),
        User::new(6, "Diana Prince", "diana.prince@mock.com", "Admin", STATUS_ONLINE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::compare;
    use std::cmp::Ordering;

    #[test]
    fn ids_sort_numerically() {
        let a = User::new(2, "a", "a@x", "User", STATUS_ONLINE);
        let b = User::new(10, "b", "b@x", "User", STATUS_ONLINE);
        // "10" < "2" as text, but not as ids.
        assert_eq!(compare(&a, &b, User::ID), Ordering::Less);
    }

    #[test]
    fn default_directory() {
        let users = default_users();
        assert_eq!(users.len(), 6);
        assert_eq!(users.iter().map(|u| u.id).max(), Some(6));
        assert!(!users[2].is_online());
    }

    #[test]
    fn filter_matches_cells_case_insensitively() {
        let u = User::new(1, "John Smith", "john.smith@mock.com", "Admin", STATUS_ONLINE);
        assert!(u.matches_filter(User::EMAIL, "mock.com"));
        assert!(u.matches_filter(User::ROLE, "admin"));
        assert!(!u.matches_filter(User::STATUS, "off"));
    }
}
