//! Core data models for the Billed client core.
//!
//! This module contains the domain models shared by the containers and the router.

mod bill;
mod file;
mod session;

pub use bill::{Bill, BillFormValues, BillStatus, ExpenseType, NewBill};
pub use file::SelectedFile;
pub use session::{Session, UserType};
pub(crate) use bill::parse_iso_date;
