//! Error types for the Billed client core.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a container or the router can run into.

use thiserror::Error;

/// A failure reported by the remote store.
///
/// The status mirrors an HTTP status code. Its display form is the literal
/// text written into the error region of the page.
///
/// # Example
///
/// ```
/// use billed::error::StoreError;
///
/// let error = StoreError::new(404);
/// assert_eq!(error.to_string(), "Erreur 404");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Erreur {status}")]
pub struct StoreError {
    /// The HTTP-like status code of the failed call.
    pub status: u16,
}

impl StoreError {
    /// Creates a store error for the given status code.
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// Resource not found.
    pub fn not_found() -> Self {
        Self::new(404)
    }

    /// Server-side failure.
    pub fn internal() -> Self {
        Self::new(500)
    }
}

/// The main error type for the Billed client core.
#[derive(Debug, Error)]
pub enum BilledError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The persisted session descriptor is not valid JSON of the expected shape.
    #[error("Failed to parse session stored under '{key}': {message}")]
    SessionParseError {
        /// The storage key the session was read from.
        key: String,
        /// A description of the parse error.
        message: String,
    },

    /// A selected file does not carry an accepted extension.
    #[error("Unsupported file type for '{file_name}'")]
    InvalidFileExtension {
        /// The rejected file name.
        file_name: String,
    },

    /// A file input changed without any file selected.
    #[error("No file selected")]
    MissingFile,

    /// A form field could not be converted to its typed value.
    #[error("Invalid field '{field}': {message}")]
    InvalidField {
        /// The form field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The remote store rejected a call.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BilledError {
    /// Returns the text to write into the page's error region.
    ///
    /// Store failures render as `Erreur <status>`; every other error renders
    /// its display form.
    pub fn error_message(&self) -> String {
        self.to_string()
    }

    /// Returns the store status code when this is a transport failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            BilledError::Store(err) => Some(err.status),
            _ => None,
        }
    }
}

/// A type alias for Results that return BilledError.
pub type BilledResult<T> = Result<T, BilledError>;

/// A type alias for Results returned by remote store calls.
pub type StoreResult<T> = Result<T, StoreError>;
