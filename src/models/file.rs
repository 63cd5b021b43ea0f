//! Attachment file selected in the new-bill form.

use crate::config::file_extension;

/// A file picked in a file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the browser.
    pub name: String,
    /// MIME type as reported by the browser.
    pub mime_type: String,
    /// File bytes.
    pub content: Vec<u8>,
}

impl SelectedFile {
    /// Creates a selected file.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Returns the file extension, without the dot.
    pub fn extension(&self) -> Option<&str> {
        file_extension(&self.name)
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
