//! Persistence seams consumed by the containers and the router.
//!
//! [`BillsStore`] abstracts the remote bill storage and [`SessionStore`] the
//! persisted session. In-memory implementations of both are provided.

mod bills;
mod memory;
mod session;

pub use bills::{BillsStore, FileUpload, StoredFile};
pub use memory::{MemoryStore, StoreOperation};
pub use session::{MemorySessionStore, SessionStore, current_session, read_session};
