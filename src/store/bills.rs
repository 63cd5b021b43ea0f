//! Remote bill store seam.
//!
//! Containers only ever talk to persistence through [`BillsStore`]. Every
//! call is asynchronous and may fail with a status-coded [`StoreError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::models::{Bill, NewBill, SelectedFile};

/// An attachment upload: the file and the email of its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// The selected file.
    pub file: SelectedFile,
    /// Email of the uploading user.
    pub email: String,
}

/// Reference returned by the store after an upload or a creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Public URL of the stored attachment, if any.
    pub file_url: Option<String>,
    /// Store key of the created object.
    pub key: String,
}

/// Persistence capabilities for bills.
#[async_trait]
pub trait BillsStore: Send + Sync {
    /// Lists the bills visible to the current user, in store order.
    async fn list(&self) -> StoreResult<Vec<Bill>>;

    /// Uploads an attachment ahead of submission.
    async fn upload(&self, upload: &FileUpload) -> StoreResult<StoredFile>;

    /// Creates a bill.
    async fn create(&self, bill: &NewBill) -> StoreResult<StoredFile>;

    /// Replaces the bill stored under `key`.
    async fn update(&self, key: &str, bill: &NewBill) -> StoreResult<Bill>;
}
