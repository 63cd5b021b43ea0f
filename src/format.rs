//! Display formatting for listed bills.
//!
//! Dates are shown in a short French form (`4 Avr. 04`) and statuses with
//! their French labels.

use chrono::Datelike;

use crate::models::{BillStatus, parse_iso_date};

/// Three-letter French month abbreviations, capitalised.
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Formats an ISO `YYYY-MM-DD` date as `<day> <Mon>. <yy>`.
///
/// Returns `None` when the input is not a valid calendar date.
///
/// # Example
///
/// ```
/// use billed::format::format_date;
///
/// assert_eq!(format_date("2004-04-04").as_deref(), Some("4 Avr. 04"));
/// assert_eq!(format_date("2023-12-25").as_deref(), Some("25 Déc. 23"));
/// assert_eq!(format_date("2023-13-01"), None);
/// ```
pub fn format_date(raw: &str) -> Option<String> {
    let date = parse_iso_date(raw)?;
    let month = MONTHS[date.month0() as usize];
    let year = date.year().rem_euclid(100);
    Some(format!("{} {}. {:02}", date.day(), month, year))
}

/// Returns the label shown for a bill status.
pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refused",
    }
}
