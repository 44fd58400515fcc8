//! Modal dialog state with a primary and a secondary button.

/// Button activated in a modal. Carries the button text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    Primary(String),
    Secondary(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub primary_text: String,
    pub secondary_text: String,
    open: bool,
}

impl Modal {
    /// Creates a closed modal with "Ok" / "Cancel" buttons.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            primary_text: "Ok".to_string(),
            secondary_text: "Cancel".to_string(),
            open: false,
        }
    }

    pub fn with_buttons(mut self, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        self.primary_text = primary.into();
        self.secondary_text = secondary.into();
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Activates the primary button. The owner decides whether to close.
    pub fn primary(&self) -> ModalAction {
        ModalAction::Primary(self.primary_text.clone())
    }

    /// Activates the secondary button.
    pub fn secondary(&self) -> ModalAction {
        ModalAction::Secondary(self.secondary_text.clone())
    }
}
