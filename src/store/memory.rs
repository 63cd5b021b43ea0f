//! In-memory [`BillsStore`] implementation.
//!
//! Stands in for the remote store in tests, benchmarks and offline
//! embeddings. Failures can be scheduled per operation to exercise the
//! error paths, and every call is counted.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{Bill, NewBill};

use super::bills::{BillsStore, FileUpload, StoredFile};

/// The store operations, for failure scheduling and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// [`BillsStore::list`].
    List,
    /// [`BillsStore::upload`].
    Upload,
    /// [`BillsStore::create`].
    Create,
    /// [`BillsStore::update`].
    Update,
}

#[derive(Debug, Default)]
struct State {
    bills: Vec<Bill>,
    uploads: Vec<FileUpload>,
    created: Vec<NewBill>,
    failures: HashMap<StoreOperation, VecDeque<StoreError>>,
    calls: HashMap<StoreOperation, usize>,
}

/// A [`BillsStore`] kept entirely in memory.
#[derive(Debug)]
pub struct MemoryStore {
    base_url: String,
    state: Mutex<State>,
}

impl MemoryStore {
    /// Creates an empty store serving attachments under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_bills(base_url, Vec::new())
    }

    /// Creates a store seeded with bills, listed in the given order.
    pub fn with_bills(base_url: impl Into<String>, bills: Vec<Bill>) -> Self {
        Self {
            base_url: base_url.into(),
            state: Mutex::new(State {
                bills,
                ..State::default()
            }),
        }
    }

    /// Makes the next call to `operation` fail with `error`.
    ///
    /// Scheduled failures are consumed in order, one per call.
    pub async fn fail_next(&self, operation: StoreOperation, error: StoreError) {
        self.state
            .lock()
            .await
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Number of calls made to `operation`, failed ones included.
    pub async fn call_count(&self, operation: StoreOperation) -> usize {
        self.state
            .lock()
            .await
            .calls
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }

    /// Records passed to successful `create` calls, oldest first.
    pub async fn created(&self) -> Vec<NewBill> {
        self.state.lock().await.created.clone()
    }

    /// Uploads accepted so far, oldest first.
    pub async fn uploads(&self) -> Vec<FileUpload> {
        self.state.lock().await.uploads.clone()
    }

    /// Current bills, in store order.
    pub async fn bills(&self) -> Vec<Bill> {
        self.state.lock().await.bills.clone()
    }

    fn begin(state: &mut State, operation: StoreOperation) -> StoreResult<()> {
        *state.calls.entry(operation).or_default() += 1;
        match state
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => {
                debug!(?operation, status = error.status, "Scheduled store failure");
                Err(error)
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BillsStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Bill>> {
        let mut state = self.state.lock().await;
        Self::begin(&mut state, StoreOperation::List)?;
        Ok(state.bills.clone())
    }

    async fn upload(&self, upload: &FileUpload) -> StoreResult<StoredFile> {
        let mut state = self.state.lock().await;
        Self::begin(&mut state, StoreOperation::Upload)?;

        let key = Uuid::new_v4().to_string();
        let file_url = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            key,
            upload.file.name
        );
        state.uploads.push(upload.clone());

        Ok(StoredFile {
            file_url: Some(file_url),
            key,
        })
    }

    async fn create(&self, bill: &NewBill) -> StoreResult<StoredFile> {
        let mut state = self.state.lock().await;
        Self::begin(&mut state, StoreOperation::Create)?;

        let key = Uuid::new_v4().to_string();
        state.created.push(bill.clone());
        state.bills.push(bill.clone().into_bill(key.clone()));

        Ok(StoredFile {
            file_url: bill.file_url.clone(),
            key,
        })
    }

    async fn update(&self, key: &str, bill: &NewBill) -> StoreResult<Bill> {
        let mut state = self.state.lock().await;
        Self::begin(&mut state, StoreOperation::Update)?;

        let slot = state
            .bills
            .iter_mut()
            .find(|stored| stored.id == key)
            .ok_or_else(StoreError::not_found)?;

        let comment_admin = slot.comment_admin.take();
        let mut updated = bill.clone().into_bill(key.to_string());
        updated.comment_admin = comment_admin;
        *slot = updated.clone();

        Ok(updated)
    }
}
