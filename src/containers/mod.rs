//! Stateful containers mediating between a rendered view and the remote store.
//!
//! Each container is built from a [`ContainerContext`]: the navigation
//! capability, the optional store handle, the current session and the
//! application configuration.

mod bills;
mod new_bill;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::Session;
use crate::store::BillsStore;

pub use bills::{BillsList, shape_bills};
pub use new_bill::{FileChange, INVALID_FILE_MESSAGE, NewBillForm};

/// Navigation capability: asks the router to navigate to a path.
pub type Navigate = Arc<dyn Fn(&str) + Send + Sync>;

/// Everything a container is constructed with.
#[derive(Clone)]
pub struct ContainerContext {
    /// Navigation capability.
    pub on_navigate: Navigate,
    /// Remote store; `None` runs the container offline.
    pub store: Option<Arc<dyn BillsStore>>,
    /// The session the view was mounted for.
    pub session: Session,
    /// Application configuration.
    pub config: Arc<AppConfig>,
}

impl ContainerContext {
    pub(crate) fn navigate(&self, path: &str) {
        (self.on_navigate)(path)
    }
}

impl std::fmt::Debug for ContainerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerContext")
            .field("store", &self.store.is_some())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Records every path passed to the navigation capability.
    #[derive(Clone, Default)]
    pub struct NavigationLog(Arc<Mutex<Vec<String>>>);

    impl NavigationLog {
        pub fn navigate(&self) -> Navigate {
            let log = self.0.clone();
            Arc::new(move |path: &str| log.lock().unwrap().push(path.to_string()))
        }

        pub fn paths(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    pub fn context(log: &NavigationLog, store: Option<Arc<dyn BillsStore>>) -> ContainerContext {
        ContainerContext {
            on_navigate: log.navigate(),
            store,
            session: Session::employee("employee@test.tld"),
            config: Arc::new(AppConfig::default()),
        }
    }
}
