//! Bill list container.
//!
//! Fetches the bills from the store, shapes them for display (most recent
//! first, formatted dates and statuses) and handles the row interactions.

use std::cmp::Reverse;

use tracing::{debug, info, warn};

use crate::error::BilledResult;
use crate::format::{format_date, format_status};
use crate::models::Bill;
use crate::router::Route;
use crate::view::{BillRow, Modal, ModalContent};

use super::ContainerContext;

/// Container behind the employee bill list.
#[derive(Debug, Clone)]
pub struct BillsList {
    ctx: ContainerContext,
}

impl BillsList {
    /// Creates the container.
    pub fn new(ctx: ContainerContext) -> Self {
        Self { ctx }
    }

    /// Fetches the bills and shapes them for display.
    ///
    /// Without a store the list is empty. Store failures propagate unchanged
    /// so the caller can render them into the error region.
    pub async fn get_bills(&self) -> BilledResult<Vec<BillRow>> {
        let Some(store) = &self.ctx.store else {
            debug!("No store configured, listing nothing");
            return Ok(Vec::new());
        };

        let bills = store.list().await.inspect_err(|err| {
            warn!(status = err.status, "Failed to list bills");
        })?;

        let count = bills.len();
        let rows = shape_bills(bills);
        info!(bills_count = count, "Listed bills");
        Ok(rows)
    }

    /// Shows the attachment of `row` in the preview modal and opens it.
    ///
    /// Image attachments are previewed inline at half the modal width; any
    /// other attachment gets a download link.
    pub fn handle_click_icon_eye(&self, modal: &mut Modal, row: &BillRow) {
        let Some(url) = row.bill_url() else {
            warn!(bill_id = %row.bill.id, "Bill has no attachment to preview");
            return;
        };

        let file_name = row
            .bill
            .file_name
            .as_deref()
            .unwrap_or_else(|| url_file_name(url));
        let content = if self.ctx.config.files.accepts(file_name) {
            ModalContent::Image {
                url: url.to_string(),
                width: self.ctx.config.modal.image_width(),
            }
        } else {
            ModalContent::Link {
                url: url.to_string(),
                file_name: file_name.to_string(),
            }
        };

        debug!(bill_id = %row.bill.id, "Opening attachment preview");
        modal.show(content);
    }

    /// Navigates to the new-bill form.
    pub fn handle_click_new_bill(&self) {
        self.ctx
            .navigate(self.ctx.config.routes.path(Route::NewBill));
    }
}

/// Orders bills most recent first and formats them for display.
///
/// The sort is stable. Bills whose date does not parse keep their raw date
/// text and are placed after every dated bill.
///
/// # Example
///
/// ```
/// use billed::containers::shape_bills;
/// use billed::models::Bill;
///
/// let bills: Vec<Bill> = serde_json::from_str(r#"[
///     {"id": "old", "type": "Transports", "name": "a", "date": "2004-04-04", "amount": 1, "status": "pending"},
///     {"id": "new", "type": "Transports", "name": "b", "date": "2023-01-01", "amount": 1, "status": "accepted"}
/// ]"#).unwrap();
///
/// let rows = shape_bills(bills);
/// assert_eq!(rows[0].bill.id, "new");
/// assert_eq!(rows[0].date, "1 Jan. 23");
/// assert_eq!(rows[1].status, "En attente");
/// ```
pub fn shape_bills(mut bills: Vec<Bill>) -> Vec<BillRow> {
    bills.sort_by_cached_key(|bill| Reverse(bill.calendar_date()));

    bills
        .into_iter()
        .map(|bill| {
            let date = format_date(&bill.date).unwrap_or_else(|| {
                warn!(bill_id = %bill.id, date = %bill.date, "Unformattable bill date");
                bill.date.clone()
            });
            let status = format_status(bill.status).to_string();
            BillRow { bill, date, status }
        })
        .collect()
}

/// Last path segment of an attachment URL, without query or fragment.
fn url_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::containers::test_support::{NavigationLog, context};
    use crate::error::{BilledError, StoreError};
    use crate::store::{BillsStore, MemoryStore, StoreOperation};
    use proptest::prelude::*;

    fn fixture_bills() -> Vec<Bill> {
        serde_json::from_str(include_str!("../../tests/fixtures/bills.json")).unwrap()
    }

    fn bill(id: &str, date: &str) -> Bill {
        let mut bill = fixture_bills().remove(0);
        bill.id = id.to_string();
        bill.date = date.to_string();
        bill
    }

    fn list_with(store: Arc<MemoryStore>) -> BillsList {
        let log = NavigationLog::default();
        BillsList::new(context(&log, Some(store as Arc<dyn BillsStore>)))
    }

    #[tokio::test]
    async fn test_without_store_lists_nothing() {
        let log = NavigationLog::default();
        let list = BillsList::new(context(&log, None));
        assert!(list.get_bills().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fixture_bills_ordered_most_recent_first() {
        let store = Arc::new(MemoryStore::with_bills("https://localhost", fixture_bills()));
        let rows = list_with(store).get_bills().await.unwrap();

        let dates: Vec<&str> = rows.iter().map(|row| row.bill.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]
        );
        assert_eq!(rows[0].date, "4 Avr. 04");
        assert_eq!(rows[0].status, "En attente");
    }

    #[tokio::test]
    async fn test_more_recent_bill_listed_first() {
        let bills = vec![bill("a", "2004-04-04"), bill("b", "2023-01-01")];
        let store = Arc::new(MemoryStore::with_bills("https://localhost", bills));

        let rows = list_with(store).get_bills().await.unwrap();
        assert_eq!(rows[0].bill.date, "2023-01-01");
        assert_eq!(rows[1].bill.date, "2004-04-04");
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = Arc::new(MemoryStore::with_bills("https://localhost", fixture_bills()));
        store
            .fail_next(StoreOperation::List, StoreError::not_found())
            .await;

        let err = list_with(store).get_bills().await.unwrap_err();
        assert!(matches!(err, BilledError::Store(ref e) if e.status == 404));
        assert_eq!(err.error_message(), "Erreur 404");
    }

    #[tokio::test]
    async fn test_listing_twice_is_idempotent() {
        let store = Arc::new(MemoryStore::with_bills("https://localhost", fixture_bills()));
        let list = list_with(store);

        let first = list.get_bills().await.unwrap();
        let second = list.get_bills().await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_date_degrades_per_row() {
        let rows = shape_bills(vec![
            bill("broken", "04/04/2004"),
            bill("old", "2001-01-01"),
            bill("new", "2003-03-03"),
        ]);

        let ids: Vec<&str> = rows.iter().map(|row| row.bill.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "broken"]);
        assert_eq!(rows[2].date, "04/04/2004");
        assert_eq!(rows[2].status, "En attente");
    }

    #[test]
    fn test_eye_click_previews_image_at_half_width() {
        let log = NavigationLog::default();
        let list = BillsList::new(context(&log, None));
        let row = shape_bills(fixture_bills()).remove(0);
        let mut modal = Modal::default();

        list.handle_click_icon_eye(&mut modal, &row);

        assert!(modal.is_open());
        assert_eq!(
            modal.content(),
            Some(&ModalContent::Image {
                url: row.bill.file_url.clone().unwrap(),
                width: 400,
            })
        );
    }

    #[test]
    fn test_eye_click_links_non_image_attachment() {
        let log = NavigationLog::default();
        let list = BillsList::new(context(&log, None));
        let mut source = bill("pdf", "2001-01-01");
        source.file_url = Some("https://localhost/facture.pdf".to_string());
        source.file_name = Some("facture.pdf".to_string());
        let row = shape_bills(vec![source]).remove(0);
        let mut modal = Modal::default();

        list.handle_click_icon_eye(&mut modal, &row);

        assert!(matches!(
            modal.content(),
            Some(ModalContent::Link { file_name, .. }) if file_name == "facture.pdf"
        ));
    }

    #[test]
    fn test_eye_click_without_file_name_ignores_url_query() {
        let log = NavigationLog::default();
        let list = BillsList::new(context(&log, None));
        let url = "https://storage.tld/o/justificatif.jpg?alt=media&token=c1640e12";
        let mut source = bill("nameless", "2001-01-01");
        source.file_url = Some(url.to_string());
        source.file_name = None;
        let row = shape_bills(vec![source]).remove(0);
        let mut modal = Modal::default();

        list.handle_click_icon_eye(&mut modal, &row);

        assert_eq!(
            modal.content(),
            Some(&ModalContent::Image {
                url: url.to_string(),
                width: 400,
            })
        );
    }

    #[test]
    fn test_url_file_name_strips_query_and_fragment() {
        assert_eq!(url_file_name("https://h/a/b.png?x=1#y"), "b.png");
        assert_eq!(url_file_name("https://h/a/doc.pdf#page=2"), "doc.pdf");
        assert_eq!(url_file_name("plain.jpeg"), "plain.jpeg");
    }

    #[test]
    fn test_eye_click_without_attachment_keeps_modal_closed() {
        let log = NavigationLog::default();
        let list = BillsList::new(context(&log, None));
        let mut source = bill("none", "2001-01-01");
        source.file_url = None;
        let row = shape_bills(vec![source]).remove(0);
        let mut modal = Modal::default();

        list.handle_click_icon_eye(&mut modal, &row);
        assert!(!modal.is_open());
    }

    #[test]
    fn test_new_bill_button_navigates() {
        let log = NavigationLog::default();
        let list = BillsList::new(context(&log, None));

        list.handle_click_new_bill();
        assert_eq!(log.paths(), vec!["#employee/bill/new"]);
    }

    proptest! {
        #[test]
        fn prop_rows_sorted_descending_and_stable(
            days in proptest::collection::vec(0i64..3650, 0..40)
        ) {
            let base = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
            let bills: Vec<Bill> = days
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    let date = base + chrono::Duration::days(*d);
                    bill(&i.to_string(), &date.format("%Y-%m-%d").to_string())
                })
                .collect();

            let rows = shape_bills(bills);
            prop_assert_eq!(rows.len(), days.len());

            for pair in rows.windows(2) {
                let (a, b) = (&pair[0].bill, &pair[1].bill);
                prop_assert!(a.date >= b.date);
                if a.date == b.date {
                    let ia: usize = a.id.parse().unwrap();
                    let ib: usize = b.id.parse().unwrap();
                    prop_assert!(ia < ib);
                }
            }
        }
    }
}
