//! User directory view model.

use crate::directory::UserDirectory;
use crate::models::User;
use crate::view::common::{
    RowPresenter, RowStyleClass, TableLabels, TableViewModel, ViewCell, build_table_view,
};

const LABELS: TableLabels<'static> = TableLabels {
    title: "Users",
    noun: "users",
    loading: "Loading users...",
    empty: "No users found",
    expandable: false,
};

struct UserPresenter;

impl RowPresenter<User> for UserPresenter {
    fn cells(&self, row: &User) -> Vec<ViewCell> {
        let role = if row.role == "Admin" {
            ViewCell::styled(row.role.clone(), RowStyleClass::Accent)
        } else {
            ViewCell::plain(row.role.clone())
        };
        let status = if row.is_online() {
            ViewCell::styled(row.status.clone(), RowStyleClass::Active)
        } else {
            ViewCell::plain(row.status.clone())
        };
        vec![
            ViewCell::plain(row.id.to_string()),
            ViewCell::plain(row.name.clone()),
            ViewCell::plain(row.email.clone()),
            role,
            status,
        ]
    }

    fn row_style(&self, row: &User) -> RowStyleClass {
        if row.is_online() {
            RowStyleClass::Normal
        } else {
            RowStyleClass::Dimmed
        }
    }
}

/// Builds a UI-agnostic view model for the user directory.
pub fn build_users_view(directory: &UserDirectory) -> TableViewModel {
    build_table_view(&directory.grid().view(), &LABELS, &UserPresenter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::UserForm;

    #[test]
    fn default_directory_view() {
        let dir = UserDirectory::with_defaults(10);
        let vm = build_users_view(&dir);
        assert!(vm.loading.is_none());
        assert!(!vm.expandable);
        assert_eq!(vm.rows.len(), 6);
        assert_eq!(vm.footer, "1 - 6 of 6 users");
        assert_eq!(vm.headers, vec!["ID", "Name", "Email", "Role", "Status"]);

        let bob = &vm.rows[2];
        assert_eq!(bob.cells[1].text, "Bob Johnson");
        assert_eq!(bob.style, RowStyleClass::Dimmed);
        assert_eq!(vm.rows[0].cells[3].style, Some(RowStyleClass::Accent));
        assert_eq!(vm.rows[0].cells[4].style, Some(RowStyleClass::Active));
    }

    #[test]
    fn added_user_is_listed() {
        let mut dir = UserDirectory::with_defaults(10);
        let form = UserForm {
            name: "Eve".to_string(),
            email: "eve@mock.com".to_string(),
            role: "User".to_string(),
        };
        dir.add(&form).unwrap();

        let vm = build_users_view(&dir);
        assert_eq!(vm.rows.len(), 7);
        assert_eq!(vm.rows[6].cells[0].text, "7");
        assert_eq!(vm.footer, "1 - 7 of 7 users");
    }
}
