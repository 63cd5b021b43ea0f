//! Interactive elements the containers operate on.

use crate::models::{Bill, BillFormValues, SelectedFile};

/// Icons of the vertical navigation layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavIcon {
    /// Bill list.
    Window,
    /// New bill.
    Mail,
}

impl NavIcon {
    /// The icon's test id in the rendered markup.
    pub fn test_id(&self) -> &'static str {
        match self {
            NavIcon::Window => "icon-window",
            NavIcon::Mail => "icon-mail",
        }
    }
}

/// The persistent vertical navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerticalLayout {
    visible: bool,
    active: Option<NavIcon>,
}

impl VerticalLayout {
    /// Shows the layout with `active` highlighted, or none.
    pub fn show(&mut self, active: Option<NavIcon>) {
        self.visible = true;
        self.active = active;
    }

    /// Hides the layout.
    pub fn hide(&mut self) {
        self.visible = false;
        self.active = None;
    }

    /// True when the layout is rendered.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True when `icon` carries the active marker.
    pub fn is_active(&self, icon: NavIcon) -> bool {
        self.visible && self.active == Some(icon)
    }
}

/// What the preview modal shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    /// Inline image preview.
    Image {
        /// Attachment URL.
        url: String,
        /// Rendered width in pixels.
        width: u32,
    },
    /// Download link for attachments that are not images.
    Link {
        /// Attachment URL.
        url: String,
        /// Link text.
        file_name: String,
    },
}

/// The attachment preview modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal {
    open: bool,
    content: Option<ModalContent>,
}

impl Modal {
    /// Replaces the modal body and opens it.
    pub fn show(&mut self, content: ModalContent) {
        self.content = Some(content);
        self.open = true;
    }

    /// Closes the modal.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// True once the open transition has been triggered.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The current modal body.
    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }
}

/// A file input element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    files: Vec<SelectedFile>,
    value: String,
    validation_message: Option<String>,
}

impl FileInput {
    /// Selects a single file, as a change event would.
    pub fn select(&mut self, file: SelectedFile) {
        self.value = file.name.clone();
        self.files = vec![file];
        self.validation_message = None;
    }

    /// The selected files.
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// The input's value; empty once cleared.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.files.clear();
        self.value.clear();
    }

    /// Sets the message the browser shows next to the input.
    pub fn set_validation_message(&mut self, message: impl Into<String>) {
        self.validation_message = Some(message.into());
    }

    /// The message shown next to the input, if any.
    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }
}

/// A form submission event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    /// The form field values at submission time.
    pub values: BillFormValues,
    default_prevented: bool,
}

impl SubmitEvent {
    /// Creates a submission event for the given values.
    pub fn new(values: BillFormValues) -> Self {
        Self {
            values,
            default_prevented: false,
        }
    }

    /// Stops the browser's own form submission.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// True once [`SubmitEvent::prevent_default`] was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A row of the bill list.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    /// The listed bill, as stored.
    pub bill: Bill,
    /// Date as displayed; the raw date when it could not be formatted.
    pub date: String,
    /// Status label as displayed.
    pub status: String,
}

impl BillRow {
    /// URL carried by the row's eye icon.
    pub fn bill_url(&self) -> Option<&str> {
        self.bill.file_url.as_deref()
    }
}
