//! New-bill submission container.
//!
//! Validates the attachment as soon as it is picked, uploads it ahead of
//! submission when a store is configured, then assembles and creates the bill.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{BilledError, BilledResult};
use crate::models::{NewBill, SelectedFile};
use crate::router::Route;
use crate::store::{FileUpload, StoredFile};
use crate::view::{FileInput, SubmitEvent};

use super::ContainerContext;

/// Message shown next to the file input when the attachment is rejected.
pub const INVALID_FILE_MESSAGE: &str =
    "Seuls les fichiers au format jpg, jpeg ou png sont acceptés";

/// Outcome of a file input change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    /// The file was kept for submission.
    Accepted,
    /// The file was refused and the input cleared.
    Rejected,
}

/// Container behind the new-bill form.
///
/// Submission takes `&mut self`, so a second submission on the same
/// container cannot start while the first one is awaiting the store.
#[derive(Debug, Clone)]
pub struct NewBillForm {
    ctx: ContainerContext,
    file: Option<SelectedFile>,
    stored: Option<StoredFile>,
}

impl NewBillForm {
    /// Creates the container.
    pub fn new(ctx: ContainerContext) -> Self {
        Self {
            ctx,
            file: None,
            stored: None,
        }
    }

    /// The attachment kept for submission.
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Name of the attachment kept for submission.
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|file| file.name.as_str())
    }

    /// Result of the proactive upload, if it happened.
    pub fn stored_file(&self) -> Option<&StoredFile> {
        self.stored.as_ref()
    }

    /// Handles a change of the attachment input.
    ///
    /// A file whose extension is not accepted clears the input, sets its
    /// validation message and returns [`FileChange::Rejected`]. An accepted
    /// file is kept and, when a store is configured, uploaded right away.
    ///
    /// # Errors
    ///
    /// Returns [`BilledError::MissingFile`] when the input holds no file, and
    /// the store error when the upload fails. The file stays kept locally in
    /// that case.
    pub async fn handle_change_file(&mut self, input: &mut FileInput) -> BilledResult<FileChange> {
        let file = input.files().first().cloned().ok_or(BilledError::MissingFile)?;

        self.stored = None;
        if !self.ctx.config.files.accepts(&file.name) {
            warn!(
                file_name = %file.name,
                extension = file.extension().unwrap_or_default(),
                "Rejected attachment with unsupported extension"
            );
            self.file = None;
            input.clear();
            input.set_validation_message(INVALID_FILE_MESSAGE);
            return Ok(FileChange::Rejected);
        }

        debug!(
            file_name = %file.name,
            mime_type = %file.mime_type,
            size = file.size(),
            "Accepted attachment"
        );
        self.file = Some(file.clone());

        if let Some(store) = &self.ctx.store {
            let upload = FileUpload {
                file,
                email: self.ctx.session.email.clone(),
            };
            let stored = store.upload(&upload).await.inspect_err(|err| {
                warn!(file_name = %upload.file.name, status = err.status, "Attachment upload failed");
            })?;
            info!(key = %stored.key, "Uploaded attachment");
            self.stored = Some(stored);
        }

        Ok(FileChange::Accepted)
    }

    /// Handles the form submission.
    ///
    /// Prevents the browser's submission, assembles the bill with the
    /// session's email and a `pending` status, creates it and navigates to the
    /// bill list. Without a store only the navigation happens.
    ///
    /// # Errors
    ///
    /// Returns [`BilledError::InvalidField`] when a field cannot be converted,
    /// and the store error when creation fails. No navigation happens then.
    pub async fn handle_submit(&mut self, event: &mut SubmitEvent) -> BilledResult<()> {
        event.prevent_default();

        let Some(store) = &self.ctx.store else {
            debug!("No store configured, skipping bill creation");
            self.navigate_to_bills();
            return Ok(());
        };

        let file_url = self.stored.as_ref().and_then(|stored| stored.file_url.clone());
        let bill = NewBill::from_form(
            &event.values,
            &self.ctx.session.email,
            self.ctx.config.form,
            file_url,
            self.file_name().map(str::to_string),
        )?;

        let correlation_id = Uuid::new_v4();
        info!(
            correlation_id = %correlation_id,
            expense_type = %bill.expense_type,
            amount = bill.amount,
            "Submitting bill"
        );

        match store.create(&bill).await {
            Ok(stored) => {
                info!(correlation_id = %correlation_id, key = %stored.key, "Bill created");
                self.navigate_to_bills();
                Ok(())
            }
            Err(err) => {
                warn!(correlation_id = %correlation_id, status = err.status, "Bill creation failed");
                Err(err.into())
            }
        }
    }

    fn navigate_to_bills(&self) {
        self.ctx.navigate(self.ctx.config.routes.path(Route::Bills));
    }
}
