//! Configuration loading and management for the Billed client core.
//!
//! This module loads the route table, session key, attachment policy and
//! view defaults from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use billed::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/billed.yaml").unwrap().into_config();
//! assert_eq!(config.session_key, "user");
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, FilePolicy, FormDefaults, ModalConfig, RouteTable};
pub(crate) use types::file_extension;
