//! Headless document model.
//!
//! Markup generation lives elsewhere; this module holds the state the
//! containers and the router read and write: what the mount point shows, the
//! vertical navigation, the preview modal and the error region.

mod elements;

pub use elements::{
    BillRow, FileInput, Modal, ModalContent, NavIcon, SubmitEvent, VerticalLayout,
};

/// What the mount point currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Nothing mounted yet.
    Empty,
    /// Login page.
    Login,
    /// Error page; `message` is the error region's text.
    Error {
        /// Text of the error region.
        message: String,
    },
    /// Employee bill list.
    Bills {
        /// Rows, most recent first.
        rows: Vec<BillRow>,
    },
    /// New-bill form.
    NewBill {
        /// The attachment input.
        file_input: FileInput,
        /// Form-level validation message, shown next to the inputs.
        validation_message: Option<String>,
        /// Error region shown above the form after a store failure.
        error: Option<String>,
    },
    /// Admin dashboard.
    Dashboard,
}

impl View {
    /// An empty new-bill form.
    pub fn new_bill() -> Self {
        View::NewBill {
            file_input: FileInput::default(),
            validation_message: None,
            error: None,
        }
    }
}

/// The rendered document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Mount point content.
    pub root: View,
    /// Vertical navigation.
    pub layout: VerticalLayout,
    /// Attachment preview modal.
    pub modal: Modal,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            root: View::Empty,
            layout: VerticalLayout::default(),
            modal: Modal::default(),
        }
    }
}

impl Document {
    /// Text of the error region, when one is shown.
    pub fn error_message(&self) -> Option<&str> {
        match &self.root {
            View::Error { message } => Some(message),
            View::NewBill { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// The new-bill form's validation message, when one is shown.
    pub fn form_validation_message(&self) -> Option<&str> {
        match &self.root {
            View::NewBill {
                validation_message, ..
            } => validation_message.as_deref(),
            _ => None,
        }
    }

    /// Rows of the bill list, when it is shown.
    pub fn bill_rows(&self) -> Option<&[BillRow]> {
        match &self.root {
            View::Bills { rows } => Some(rows),
            _ => None,
        }
    }

    /// The new-bill file input, when the form is shown.
    pub fn file_input(&self) -> Option<&FileInput> {
        match &self.root {
            View::NewBill { file_input, .. } => Some(file_input),
            _ => None,
        }
    }

    /// Clears the new-bill form's error region and validation message.
    pub fn clear_form_feedback(&mut self) {
        if let View::NewBill {
            validation_message,
            error,
            ..
        } = &mut self.root
        {
            *validation_message = None;
            *error = None;
        }
    }

    /// Mutable access to the new-bill file input, when the form is shown.
    pub fn file_input_mut(&mut self) -> Option<&mut FileInput> {
        match &mut self.root {
            View::NewBill { file_input, .. } => Some(file_input),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_region_only_on_error_page() {
        let mut document = Document::default();
        assert_eq!(document.error_message(), None);

        document.root = View::Error {
            message: "Erreur 404".to_string(),
        };
        assert_eq!(document.error_message(), Some("Erreur 404"));
        assert!(document.bill_rows().is_none());
    }

    #[test]
    fn test_file_input_only_on_new_bill_page() {
        let mut document = Document::default();
        assert!(document.file_input_mut().is_none());

        document.root = View::new_bill();
        assert!(document.file_input_mut().is_some());
    }

    #[test]
    fn test_error_region_shown_alongside_form() {
        let mut document = Document::default();
        document.root = View::NewBill {
            file_input: FileInput::default(),
            validation_message: None,
            error: Some("Erreur 500".to_string()),
        };

        assert_eq!(document.error_message(), Some("Erreur 500"));
        assert_eq!(document.form_validation_message(), None);
        assert!(document.file_input().is_some());
    }
}
