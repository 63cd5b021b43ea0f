//! Configuration types for the Billed client core.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use serde::Deserialize;

use crate::router::Route;

/// Mapping from logical route names to path strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteTable {
    /// Login page path.
    pub login: String,
    /// Employee bill list path.
    pub bills: String,
    /// Employee new-bill form path.
    pub new_bill: String,
    /// Admin dashboard path.
    pub dashboard: String,
}

impl RouteTable {
    /// Returns the path string registered for a route.
    pub fn path(&self, route: Route) -> &str {
        match route {
            Route::Login => &self.login,
            Route::Bills => &self.bills,
            Route::NewBill => &self.new_bill,
            Route::Dashboard => &self.dashboard,
        }
    }

    /// Resolves a path string to its route, if the path is registered.
    pub fn resolve(&self, path: &str) -> Option<Route> {
        Route::ALL
            .into_iter()
            .find(|route| self.path(*route) == path)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            login: "/".to_string(),
            bills: "#employee/bills".to_string(),
            new_bill: "#employee/bill/new".to_string(),
            dashboard: "#admin/dashboard".to_string(),
        }
    }
}

/// Attachment acceptance policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilePolicy {
    /// Lowercase extensions accepted for a bill attachment.
    pub allowed_extensions: Vec<String>,
}

impl FilePolicy {
    /// Returns true if `file_name` ends with an accepted extension (case-insensitive).
    ///
    /// # Example
    ///
    /// ```
    /// use billed::config::FilePolicy;
    ///
    /// let policy = FilePolicy::default();
    /// assert!(policy.accepts("facture.JPG"));
    /// assert!(!policy.accepts("image.exe"));
    /// assert!(!policy.accepts("png"));
    /// ```
    pub fn accepts(&self, file_name: &str) -> bool {
        match file_extension(file_name) {
            Some(ext) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

impl Default for FilePolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

/// Returns the text after the last `.` of a file name, if there is a non-empty one.
pub(crate) fn file_extension(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// Geometry of the attachment preview modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ModalConfig {
    /// Modal width in pixels.
    pub width: u32,
}

impl ModalConfig {
    /// Width of the preview image: half the modal, rounded down.
    pub fn image_width(&self) -> u32 {
        self.width / 2
    }
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self { width: 800 }
    }
}

/// Defaults applied while gathering the new-bill form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FormDefaults {
    /// Tax percentage used when the field is empty or not an integer.
    pub default_pct: u32,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self { default_pct: 20 }
    }
}

/// The complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Key under which the session descriptor is persisted.
    pub session_key: String,
    /// Route table.
    pub routes: RouteTable,
    /// Attachment policy.
    #[serde(default)]
    pub files: FilePolicy,
    /// Preview modal geometry.
    #[serde(default)]
    pub modal: ModalConfig,
    /// New-bill form defaults.
    #[serde(default)]
    pub form: FormDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_key: "user".to_string(),
            routes: RouteTable::default(),
            files: FilePolicy::default(),
            modal: ModalConfig::default(),
            form: FormDefaults::default(),
        }
    }
}
