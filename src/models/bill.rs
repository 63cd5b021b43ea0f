//! Bill model and related types.
//!
//! This module defines the stored [`Bill`] record, the [`NewBill`] record
//! assembled by the submission workflow, and the raw form values it is
//! gathered from.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::FormDefaults;
use crate::error::{BilledError, BilledResult};

/// The fixed set of expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    /// Travel and commuting.
    #[serde(rename = "Transports")]
    Transports,
    /// Meals.
    #[serde(rename = "Restaurants et bars")]
    RestaurantsAndBars,
    /// Hotels and lodging.
    #[serde(rename = "Hôtel et logement")]
    HotelAndLodging,
    /// Online subscriptions and services.
    #[serde(rename = "Services en ligne")]
    OnlineServices,
    /// IT and electronics.
    #[serde(rename = "IT et électronique")]
    ItAndElectronics,
    /// Equipment and hardware.
    #[serde(rename = "Equipement et matériel")]
    EquipmentAndHardware,
    /// Office supplies.
    #[serde(rename = "Fournitures de bureau")]
    OfficeSupplies,
}

impl ExpenseType {
    /// Every category, in the order the form lists them.
    pub const ALL: [ExpenseType; 7] = [
        ExpenseType::Transports,
        ExpenseType::RestaurantsAndBars,
        ExpenseType::HotelAndLodging,
        ExpenseType::OnlineServices,
        ExpenseType::ItAndElectronics,
        ExpenseType::EquipmentAndHardware,
        ExpenseType::OfficeSupplies,
    ];

    /// Returns the label shown in the form and stored on the record.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseType::Transports => "Transports",
            ExpenseType::RestaurantsAndBars => "Restaurants et bars",
            ExpenseType::HotelAndLodging => "Hôtel et logement",
            ExpenseType::OnlineServices => "Services en ligne",
            ExpenseType::ItAndElectronics => "IT et électronique",
            ExpenseType::EquipmentAndHardware => "Equipement et matériel",
            ExpenseType::OfficeSupplies => "Fournitures de bureau",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseType {
    type Err = BilledError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| BilledError::InvalidField {
                field: "type".to_string(),
                message: format!("unknown expense type '{}'", s),
            })
    }
}

/// Review status of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// Awaiting review. Every bill starts here.
    Pending,
    /// Approved by an admin.
    Accepted,
    /// Rejected by an admin.
    Refused,
}

/// A bill as stored by the remote store.
///
/// `date` is kept as the raw text the store returned so that a malformed
/// record can still be listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Identifier assigned by the store.
    pub id: String,
    /// Owner's email.
    #[serde(default)]
    pub email: String,
    /// Expense category.
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    /// Free-text name.
    pub name: String,
    /// ISO `YYYY-MM-DD` date as stored.
    pub date: String,
    /// Amount in currency units.
    pub amount: i64,
    /// Tax amount; empty when not provided.
    #[serde(default, with = "vat")]
    pub vat: Option<Decimal>,
    /// Tax percentage.
    #[serde(default)]
    pub pct: u32,
    /// Optional employee commentary.
    #[serde(default)]
    pub commentary: String,
    /// URL of the stored attachment.
    #[serde(default)]
    pub file_url: Option<String>,
    /// Original attachment file name.
    #[serde(default)]
    pub file_name: Option<String>,
    /// Review status.
    pub status: BillStatus,
    /// Admin's review comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl Bill {
    /// Parses the stored date, returning `None` when it is not a valid ISO date.
    ///
    /// # Examples
    ///
    /// ```
    /// use billed::models::Bill;
    /// use chrono::NaiveDate;
    ///
    /// let bill: Bill = serde_json::from_str(r#"{
    ///     "id": "b1", "type": "Transports", "name": "taxi",
    ///     "date": "2004-04-04", "amount": 40, "status": "pending"
    /// }"#).unwrap();
    /// assert_eq!(bill.calendar_date(), NaiveDate::from_ymd_opt(2004, 4, 4));
    /// ```
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }
}

/// Parses a `YYYY-MM-DD` date.
pub(crate) fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Raw values of the new-bill form, as typed by the employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillFormValues {
    /// Selected expense category label.
    pub expense_type: String,
    /// Expense name.
    pub name: String,
    /// Date picker value.
    pub date: String,
    /// Amount field.
    pub amount: String,
    /// VAT field.
    pub vat: String,
    /// Percentage field.
    pub pct: String,
    /// Commentary textarea.
    pub commentary: String,
    /// Email field, if the form carries one. Never used for the record.
    pub email: String,
}

/// A bill assembled by the submission workflow, ready to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    /// Owner's email, taken from the session.
    pub email: String,
    /// Expense category.
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    /// Free-text name.
    pub name: String,
    /// Expense date.
    pub date: NaiveDate,
    /// Amount in currency units.
    pub amount: i64,
    /// Tax amount.
    #[serde(default, with = "vat")]
    pub vat: Option<Decimal>,
    /// Tax percentage.
    pub pct: u32,
    /// Optional commentary.
    pub commentary: String,
    /// URL of the uploaded attachment, when the upload happened.
    pub file_url: Option<String>,
    /// Attachment file name.
    pub file_name: Option<String>,
    /// Always `pending` on creation.
    pub status: BillStatus,
}

impl NewBill {
    /// Converts raw form values into a typed record.
    ///
    /// The email comes from the session and the status is always
    /// [`BillStatus::Pending`], whatever the form says. An empty or
    /// non-integer percentage falls back to `defaults.default_pct`.
    ///
    /// # Errors
    ///
    /// Returns [`BilledError::InvalidField`] when the category, date, amount or
    /// VAT cannot be parsed.
    pub fn from_form(
        values: &BillFormValues,
        session_email: &str,
        defaults: FormDefaults,
        file_url: Option<String>,
        file_name: Option<String>,
    ) -> BilledResult<Self> {
        let expense_type = values.expense_type.trim().parse::<ExpenseType>()?;

        let date = parse_iso_date(&values.date).ok_or_else(|| BilledError::InvalidField {
            field: "date".to_string(),
            message: format!("'{}' is not a YYYY-MM-DD date", values.date),
        })?;

        let amount = values
            .amount
            .trim()
            .parse::<i64>()
            .map_err(|e| BilledError::InvalidField {
                field: "amount".to_string(),
                message: e.to_string(),
            })?;

        let vat = vat::parse(&values.vat).map_err(|e| BilledError::InvalidField {
            field: "vat".to_string(),
            message: e.to_string(),
        })?;

        let pct = values
            .pct
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|pct| *pct != 0)
            .unwrap_or(defaults.default_pct);

        Ok(Self {
            email: session_email.to_string(),
            expense_type,
            name: values.name.clone(),
            date,
            amount,
            vat,
            pct,
            commentary: values.commentary.clone(),
            file_url,
            file_name,
            status: BillStatus::Pending,
        })
    }

    /// Turns the record into a stored bill with the given identifier.
    pub fn into_bill(self, id: String) -> Bill {
        Bill {
            id,
            email: self.email,
            expense_type: self.expense_type,
            name: self.name,
            date: self.date.format("%Y-%m-%d").to_string(),
            amount: self.amount,
            vat: self.vat,
            pct: self.pct,
            commentary: self.commentary,
            file_url: self.file_url,
            file_name: self.file_name,
            status: self.status,
            comment_admin: None,
        }
    }
}

/// Serde helpers for the VAT field, which the store sends as a string, a
/// number or an empty string.
mod vat {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer, de};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(vat: &Option<Decimal>, s: S) -> Result<S::Ok, S::Error> {
        match vat {
            Some(v) => s.serialize_str(&v.to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
        match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => parse(&s).map_err(de::Error::custom),
            Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
                .map(Some)
                .map_err(de::Error::custom),
            Some(other) => Err(de::Error::custom(format!("invalid vat value: {}", other))),
        }
    }

    pub fn parse(raw: &str) -> Result<Option<Decimal>, rust_decimal::Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        Decimal::from_str(raw).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_values() -> BillFormValues {
        BillFormValues {
            expense_type: "Hôtel et logement".to_string(),
            name: "Séminaire".to_string(),
            date: "2023-01-01".to_string(),
            amount: "348".to_string(),
            vat: "70".to_string(),
            pct: "20".to_string(),
            commentary: "".to_string(),
            email: "someone.else@test.tld".to_string(),
        }
    }

    #[test]
    fn test_deserialize_fixture_bill() {
        let json = r#"{
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": "80",
            "fileUrl": "https://test.storage.tld/v0/b/billable.png",
            "status": "pending",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "commentAdmin": "ok",
            "email": "a@a",
            "pct": 20
        }"#;

        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.expense_type, ExpenseType::HotelAndLodging);
        assert_eq!(bill.vat, Some(Decimal::new(80, 0)));
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.comment_admin.as_deref(), Some("ok"));
        assert_eq!(bill.calendar_date(), NaiveDate::from_ymd_opt(2004, 4, 4));
    }

    #[test]
    fn test_vat_accepts_empty_string_and_number() {
        let empty: Bill = serde_json::from_str(
            r#"{"id":"1","type":"Transports","name":"n","date":"2002-02-02","amount":1,"vat":"","status":"refused"}"#,
        )
        .unwrap();
        assert_eq!(empty.vat, None);

        let number: Bill = serde_json::from_str(
            r#"{"id":"1","type":"Transports","name":"n","date":"2002-02-02","amount":1,"vat":12.5,"status":"accepted"}"#,
        )
        .unwrap();
        assert_eq!(number.vat, Some(Decimal::new(125, 1)));
    }

    #[test]
    fn test_malformed_date_still_deserializes() {
        let bill: Bill = serde_json::from_str(
            r#"{"id":"1","type":"Transports","name":"n","date":"not a date","amount":1,"status":"pending"}"#,
        )
        .unwrap();
        assert_eq!(bill.calendar_date(), None);
    }

    #[test]
    fn test_unknown_expense_type_is_rejected() {
        let result = "Voyage".parse::<ExpenseType>();
        assert!(matches!(
            result,
            Err(BilledError::InvalidField { ref field, .. }) if field == "type"
        ));
    }

    #[test]
    fn test_expense_type_labels_round_trip() {
        for expense_type in ExpenseType::ALL {
            assert_eq!(expense_type.label().parse::<ExpenseType>().unwrap(), expense_type);
            let json = serde_json::to_string(&expense_type).unwrap();
            assert_eq!(json, format!("\"{}\"", expense_type.label()));
        }
    }

    #[test]
    fn test_from_form_uses_session_email_and_pending_status() {
        let bill = NewBill::from_form(
            &form_values(),
            "employee@test.tld",
            FormDefaults::default(),
            Some("https://localhost:3456/images/test.jpg".to_string()),
            Some("test.jpg".to_string()),
        )
        .unwrap();

        assert_eq!(bill.email, "employee@test.tld");
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.amount, 348);
        assert_eq!(bill.vat, Some(Decimal::new(70, 0)));
        assert_eq!(bill.date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(bill.file_name.as_deref(), Some("test.jpg"));
    }

    #[test]
    fn test_from_form_defaults_pct() {
        let mut values = form_values();
        values.pct = "".to_string();
        let defaults = FormDefaults { default_pct: 20 };

        let bill = NewBill::from_form(&values, "e@t", defaults, None, None).unwrap();
        assert_eq!(bill.pct, 20);

        values.pct = "abc".to_string();
        let bill = NewBill::from_form(&values, "e@t", defaults, None, None).unwrap();
        assert_eq!(bill.pct, 20);
    }

    #[test]
    fn test_from_form_rejects_bad_amount() {
        let mut values = form_values();
        values.amount = "12,5".to_string();

        let result = NewBill::from_form(&values, "e@t", FormDefaults::default(), None, None);
        assert!(matches!(
            result,
            Err(BilledError::InvalidField { ref field, .. }) if field == "amount"
        ));
    }

    #[test]
    fn test_from_form_rejects_impossible_date() {
        let mut values = form_values();
        values.date = "2023-02-30".to_string();

        let result = NewBill::from_form(&values, "e@t", FormDefaults::default(), None, None);
        assert!(matches!(
            result,
            Err(BilledError::InvalidField { ref field, .. }) if field == "date"
        ));
    }

    #[test]
    fn test_new_bill_serializes_store_shape() {
        let bill = NewBill::from_form(
            &form_values(),
            "employee@test.tld",
            FormDefaults::default(),
            None,
            Some("test.png".to_string()),
        )
        .unwrap();

        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["type"], "Hôtel et logement");
        assert_eq!(json["date"], "2023-01-01");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["vat"], "70");
        assert_eq!(json["fileName"], "test.png");
        assert!(json["fileUrl"].is_null());
    }

    #[test]
    fn test_into_bill_keeps_iso_date() {
        let bill = NewBill::from_form(&form_values(), "e@t", FormDefaults::default(), None, None)
            .unwrap()
            .into_bill("id-1".to_string());

        assert_eq!(bill.id, "id-1");
        assert_eq!(bill.date, "2023-01-01");
        assert_eq!(bill.status, BillStatus::Pending);
    }
}
