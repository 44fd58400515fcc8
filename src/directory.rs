//! User directory: the simple grid plus its add-user workflow.
//!
//! New users go through [`UserForm::validate`]; a form with any field error is
//! rejected as a whole and the store is left unchanged.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use crate::grid::Grid;
use crate::modal::{Modal, ModalAction};
use crate::models::{DEFAULT_ROLE, ROLES, STATUS_ONLINE, User, default_users};

/// Fields of the add-user form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Role,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[FormField::Name, FormField::Email, FormField::Role]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Role => "Role",
        }
    }

    pub fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Role,
            FormField::Role => FormField::Name,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Name => FormField::Role,
            FormField::Email => FormField::Name,
            FormField::Role => FormField::Email,
        }
    }
}

/// Validation failure of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidRole,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "This field is required"),
            FieldError::InvalidEmail => write!(f, "Enter a valid email address"),
            FieldError::InvalidRole => write!(f, "Choose one of: {}", ROLES.join(", ")),
        }
    }
}

/// Field-level validation state of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FormField, FieldError>,
}

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.errors.iter().map(|(&f, &e)| (f, e))
    }

    fn set(&mut self, field: FormField, result: Option<FieldError>) {
        match result {
            Some(err) => {
                self.errors.insert(field, err);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}

/// Checks the shape of an email address: one `@`, a non-empty local part and
/// a domain made of non-empty dot-separated labels, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.split('.').all(|label| !label.is_empty())
}

fn required(value: &str) -> Option<FieldError> {
    value.trim().is_empty().then_some(FieldError::Required)
}

/// Values of the add-user form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

impl UserForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Role => &self.role,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Role => &mut self.role,
        }
    }

    /// Validates one field.
    pub fn validate_field(&self, field: FormField) -> Option<FieldError> {
        let value = self.value(field);
        match field {
            FormField::Name => required(value),
            FormField::Role => required(value).or_else(|| {
                (!ROLES.contains(&value.trim())).then_some(FieldError::InvalidRole)
            }),
            FormField::Email => required(value).or_else(|| {
                (!is_valid_email(value.trim())).then_some(FieldError::InvalidEmail)
            }),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for &field in FormField::all() {
            errors.set(field, self.validate_field(field));
        }
        errors
    }
}

/// The simple user grid together with its id sequence.
#[derive(Debug)]
pub struct UserDirectory {
    grid: Grid<User>,
    next_id: u64,
}

impl UserDirectory {
    /// Creates a directory; new ids continue past the largest existing id.
    pub fn new(users: Vec<User>, page_size: usize) -> Self {
        let grid = Grid::ready(users, page_size);
        let next_id = grid.store().max_id().map_or(1, |id| id + 1);
        Self { grid, next_id }
    }

    /// Directory holding the built-in users.
    pub fn with_defaults(page_size: usize) -> Self {
        Self::new(default_users(), page_size)
    }

    pub fn grid(&self) -> &Grid<User> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<User> {
        &mut self.grid
    }

    /// Id the next added user will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Validates the form and appends a new online user.
    ///
    /// On failure nothing is appended and the field errors are returned.
    pub fn add(&mut self, form: &UserForm) -> Result<u64, FieldErrors> {
        let errors = form.validate();
        if !errors.is_empty() {
            debug!("Add user rejected: {} invalid field(s)", errors.len());
            return Err(errors);
        }

        let id = self.next_id;
        let user = User::new(
            id,
            form.name.trim(),
            form.email.trim(),
            form.role.trim(),
            STATUS_ONLINE,
        );
        let id = self.grid.append(user).unwrap_or(id);
        self.next_id = id + 1;
        info!("User {} added", id);
        Ok(id)
    }
}

/// Add-user dialog: a modal around a [`UserForm`].
#[derive(Debug, Clone)]
pub struct AddUserDialog {
    pub modal: Modal,
    pub form: UserForm,
    pub focus: FormField,
    errors: FieldErrors,
    /// Errors are shown once the user has tried to submit.
    submitted: bool,
}

impl Default for AddUserDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl AddUserDialog {
    pub fn new() -> Self {
        Self {
            modal: Modal::new("Add User").with_buttons("Add", "Cancel"),
            form: UserForm::default(),
            focus: FormField::Name,
            errors: FieldErrors::default(),
            submitted: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    /// Opens the dialog with a fresh form.
    pub fn open(&mut self) {
        self.form = UserForm::default();
        self.focus = FormField::Name;
        self.errors = FieldErrors::default();
        self.submitted = false;
        self.modal.open();
    }

    /// Errors to display next to the fields.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn revalidate_focused(&mut self) {
        if self.submitted {
            let result = self.form.validate_field(self.focus);
            self.errors.set(self.focus, result);
        }
    }

    /// Types into the focused text field. The role is only changed through
    /// [`AddUserDialog::cycle_role`].
    pub fn input(&mut self, c: char) {
        if self.focus == FormField::Role {
            return;
        }
        self.form.value_mut(self.focus).push(c);
        self.revalidate_focused();
    }

    pub fn backspace(&mut self) {
        if self.focus == FormField::Role {
            return;
        }
        self.form.value_mut(self.focus).pop();
        self.revalidate_focused();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Steps the role through the offered roles.
    pub fn cycle_role(&mut self, forward: bool) {
        let current = ROLES.iter().position(|r| *r == self.form.role.trim());
        let idx = match (current, forward) {
            (Some(i), true) => (i + 1) % ROLES.len(),
            (Some(i), false) => (i + ROLES.len() - 1) % ROLES.len(),
            (None, _) => 0,
        };
        self.form.role = ROLES[idx].to_string();
        self.revalidate_focused();
    }

    /// Handles a modal button. Returns the id of the added user, if any.
    pub fn activate(&mut self, action: ModalAction, directory: &mut UserDirectory) -> Option<u64> {
        match action {
            ModalAction::Primary(button) => {
                debug!("Add user dialog: {}", button);
                self.submit(directory)
            }
            ModalAction::Secondary(button) => {
                debug!("Add user dialog: {}", button);
                self.cancel();
                None
            }
        }
    }

    /// Primary button: adds the user and closes, or keeps the dialog open
    /// with field errors.
    pub fn submit(&mut self, directory: &mut UserDirectory) -> Option<u64> {
        self.submitted = true;
        match directory.add(&self.form) {
            Ok(id) => {
                self.errors = FieldErrors::default();
                self.modal.close();
                Some(id)
            }
            Err(errors) => {
                if let Some((field, _)) = errors.iter().next() {
                    self.focus = field;
                }
                self.errors = errors;
                None
            }
        }
    }

    /// Secondary button: closes without changes.
    pub fn cancel(&mut self) {
        self.modal.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridEvent;

    fn form(name: &str, email: &str, role: &str) -> UserForm {
        UserForm {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("jane.doe@mock.com"));
        assert!(is_valid_email("a@b"));
        assert!(!is_valid_email("jane.doe"));
        assert!(!is_valid_email("@mock.com"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("jane@@mock.com"));
        assert!(!is_valid_email("jane doe@mock.com"));
        assert!(!is_valid_email("jane@mock..com"));
    }

    #[test]
    fn blank_required_field_is_rejected_without_append() {
        let mut dir = UserDirectory::with_defaults(10);
        let before = dir.grid().records().len();

        let errors = dir.add(&form("   ", "new@mock.com", "User")).unwrap_err();
        assert_eq!(errors.get(FormField::Name), Some(FieldError::Required));
        assert_eq!(errors.len(), 1);
        assert_eq!(dir.grid().records().len(), before);
        assert_eq!(dir.next_id(), 7);
        assert!(dir.grid_mut().drain_events().is_empty());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut dir = UserDirectory::with_defaults(10);
        let errors = dir.add(&form("Eve", "eve-at-mock", "User")).unwrap_err();
        assert_eq!(errors.get(FormField::Email), Some(FieldError::InvalidEmail));
        assert_eq!(dir.grid().records().len(), 6);

        let errors = dir.add(&form("Eve", "", "")).unwrap_err();
        assert_eq!(errors.get(FormField::Email), Some(FieldError::Required));
        assert_eq!(errors.get(FormField::Role), Some(FieldError::Required));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut dir = UserDirectory::with_defaults(10);
        let errors = dir.add(&form("Eve", "eve@mock.com", "root")).unwrap_err();
        assert_eq!(errors.get(FormField::Role), Some(FieldError::InvalidRole));
        assert_eq!(errors.len(), 1);
        assert_eq!(dir.grid().records().len(), 6);
        assert_eq!(dir.next_id(), 7);

        assert_eq!(dir.add(&form("Eve", "eve@mock.com", " Admin ")), Ok(7));
    }

    #[test]
    fn role_field_ignores_typing() {
        let mut dialog = AddUserDialog::new();
        dialog.open();
        dialog.focus = FormField::Role;
        for c in "root".chars() {
            dialog.input(c);
        }
        dialog.backspace();
        assert_eq!(dialog.form.role, "User");

        dialog.cycle_role(false);
        assert_eq!(dialog.form.role, "Admin");
    }

    #[test]
    fn ids_continue_past_dataset() {
        let mut dir = UserDirectory::with_defaults(10);
        assert_eq!(dir.add(&form("Eve", "eve@mock.com", "User")), Ok(7));
        assert_eq!(dir.add(&form("Mallory", "mallory@mock.com", "Admin")), Ok(8));

        let added = dir.grid().store().get(7).unwrap();
        assert_eq!(added.status, STATUS_ONLINE);
        assert_eq!(added.email, "eve@mock.com");
        assert_eq!(
            dir.grid_mut().drain_events(),
            vec![
                GridEvent::RecordAdded { id: 7 },
                GridEvent::RecordAdded { id: 8 }
            ]
        );
    }

    #[test]
    fn empty_directory_starts_at_one() {
        let mut dir = UserDirectory::new(Vec::new(), 10);
        assert_eq!(dir.add(&form("First", "first@mock.com", "User")), Ok(1));
    }

    #[test]
    fn dialog_resets_on_open() {
        let mut dialog = AddUserDialog::new();
        dialog.open();
        dialog.input('x');
        dialog.cancel();
        assert!(!dialog.is_open());

        dialog.open();
        assert_eq!(dialog.form, UserForm::default());
        assert_eq!(dialog.form.role, "User");
        assert_eq!(dialog.focus, FormField::Name);
    }

    #[test]
    fn dialog_submit_keeps_open_on_errors() {
        let mut dir = UserDirectory::with_defaults(10);
        let mut dialog = AddUserDialog::new();
        dialog.open();

        let action = dialog.modal.primary();
        assert_eq!(dialog.activate(action, &mut dir), None);
        assert!(dialog.is_open());
        assert_eq!(dialog.errors().get(FormField::Name), Some(FieldError::Required));
        assert_eq!(dialog.focus, FormField::Name);

        // Typing clears the error for the focused field.
        for c in "Eve".chars() {
            dialog.input(c);
        }
        assert_eq!(dialog.errors().get(FormField::Name), None);
        assert_eq!(
            dialog.errors().get(FormField::Email),
            Some(FieldError::Required)
        );
    }

    #[test]
    fn dialog_submit_adds_and_closes() {
        let mut dir = UserDirectory::with_defaults(10);
        let mut dialog = AddUserDialog::new();
        dialog.open();
        for c in "Eve".chars() {
            dialog.input(c);
        }
        dialog.focus_next();
        for c in "eve@mock.com".chars() {
            dialog.input(c);
        }
        dialog.focus_next();
        dialog.cycle_role(true);
        assert_eq!(dialog.form.role, "Admin");

        assert_eq!(dialog.submit(&mut dir), Some(7));
        assert!(!dialog.is_open());
        assert_eq!(dir.grid().records().len(), 7);
        assert_eq!(dir.grid().store().get(7).map(|u| u.role.as_str()), Some("Admin"));
    }

    #[test]
    fn dialog_cancel_leaves_store_unchanged() {
        let mut dir = UserDirectory::with_defaults(10);
        let mut dialog = AddUserDialog::new();
        dialog.open();
        dialog.input('x');
        let action = dialog.modal.secondary();
        assert_eq!(dialog.activate(action, &mut dir), None);
        assert!(!dialog.is_open());
        assert_eq!(dir.grid().records().len(), 6);
    }
}
