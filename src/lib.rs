//! Client-side core of the Billed expense-report tool.
//!
//! This crate provides the bill list and new-bill containers, the router that
//! gates views on the session's role, and the seams to the remote bill store
//! and the persisted session.

#![warn(missing_docs)]

pub mod config;
pub mod containers;
pub mod error;
pub mod format;
pub mod models;
pub mod router;
pub mod store;
pub mod view;
