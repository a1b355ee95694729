//! Raw shapes of records that come from outside the fixture store.
//!
//! Spreadsheet rows arrive as an id plus a free-form `fields` bag. Payment-provider
//! invoices use minor-unit amounts and Unix-epoch-second timestamps. Neither shape is
//! canonical; both are converted by `core::normalize` and then dropped.

use crate::{entities::Invoice, errors::Result};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Field bag of a spreadsheet row, keyed by column name.
pub type Fields = Map<String, Value>;

/// A row from the spreadsheet-style API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpreadsheetRecord {
    /// Record id assigned by the spreadsheet
    pub id: String,
    /// Column values; any may be missing
    #[serde(default)]
    pub fields: Fields,
    /// Creation timestamp as sent by the API
    #[serde(
        default,
        rename = "createdTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<String>,
}

/// Lifecycle state of a provider invoice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderInvoiceStatus {
    /// Being prepared
    Draft,
    /// Sent and awaiting payment
    Open,
    /// Settled
    Paid,
    /// Marked overdue by the provider
    Overdue,
    /// Written off
    Uncollectible,
    /// Cancelled
    Void,
    /// Anything this crate does not know about, including a missing status
    #[default]
    #[serde(other)]
    Unknown,
}

/// Unit price attached to a provider line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPrice {
    /// Price per unit in minor units
    #[serde(default, deserialize_with = "lenient_i64")]
    pub unit_amount: i64,
    /// ISO currency code, lowercase; empty when not sent
    #[serde(default, deserialize_with = "lenient")]
    pub currency: String,
}

/// A single provider invoice line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLine {
    /// What was billed
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    /// Line amount in minor units
    #[serde(default, deserialize_with = "lenient_i64")]
    pub amount: i64,
    /// Units billed
    #[serde(default = "one", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    /// Unit price, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<ProviderPrice>,
}

/// Line list wrapper, as the provider nests it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLines {
    /// The lines
    #[serde(default, deserialize_with = "lenient")]
    pub data: Vec<ProviderLine>,
}

/// An invoice as the payment provider shapes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInvoice {
    /// Provider id, e.g. `in_...`
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Human-facing number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Customer id; empty when the provider sends none
    #[serde(default, deserialize_with = "lenient")]
    pub customer: String,
    /// Amount received, minor units
    #[serde(default, deserialize_with = "lenient_i64")]
    pub amount_paid: i64,
    /// Amount billed, minor units
    #[serde(default, deserialize_with = "lenient_i64")]
    pub amount_due: i64,
    /// Lifecycle state
    #[serde(default, deserialize_with = "lenient")]
    pub status: ProviderInvoiceStatus,
    /// Creation time, epoch seconds
    #[serde(default, deserialize_with = "lenient_i64")]
    pub created: i64,
    /// Due time, epoch seconds
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub due_date: Option<i64>,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hosted payment page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_invoice_url: Option<String>,
    /// PDF download
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_pdf: Option<String>,
    /// Billed lines
    #[serde(default, deserialize_with = "lenient")]
    pub lines: ProviderLines,
}

/// Invoice in whichever shape it arrived.
#[derive(Clone, Debug, PartialEq)]
pub enum InvoiceRecord {
    /// Fixture-style invoice: whole units and ISO dates
    Native(Invoice),
    /// Provider-style invoice: minor units and epoch seconds
    Provider(ProviderInvoice),
}

/// Keys whose presence marks a record as provider-shaped.
pub const PROVIDER_MARKERS: [&str; 3] = ["amount_due", "amount_paid", "created"];

impl InvoiceRecord {
    /// Decodes an invoice of either shape from JSON.
    ///
    /// Objects exposing any of `amount_due`, `amount_paid` or `created` are decoded as
    /// provider invoices; everything else as native invoices.
    pub fn classify(value: Value) -> Result<Self> {
        let provider_shaped = value
            .as_object()
            .is_some_and(|obj| PROVIDER_MARKERS.iter().any(|key| obj.contains_key(*key)));

        if provider_shaped {
            Ok(Self::Provider(serde_json::from_value(value)?))
        } else {
            Ok(Self::Native(serde_json::from_value(value)?))
        }
    }
}

impl From<Invoice> for InvoiceRecord {
    fn from(invoice: Invoice) -> Self {
        Self::Native(invoice)
    }
}

impl From<ProviderInvoice> for InvoiceRecord {
    fn from(invoice: ProviderInvoice) -> Self {
        Self::Provider(invoice)
    }
}

const fn one() -> u32 {
    1
}

// Provider numbers sometimes arrive as floats (e.g. `Date.now() / 1000`); keep the
// whole part.
#[allow(clippy::cast_possible_truncation)]
fn number_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        _ => None,
    }
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_to_i64(&value).unwrap_or_default())
}

// Null or mistyped values fall back to the type's default.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_quantity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_to_i64(&value)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_else(one))
}

fn lenient_opt_i64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_to_i64(&value))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spreadsheet_record_tolerates_missing_fields() {
        let record: SpreadsheetRecord = serde_json::from_value(json!({"id": "rec1"})).unwrap();
        assert_eq!(record.id, "rec1");
        assert!(record.fields.is_empty());
        assert!(record.created_time.is_none());
    }

    #[test]
    fn test_classify_provider_by_markers() -> Result<()> {
        let record = InvoiceRecord::classify(json!({
            "id": "in_1",
            "customer": "cus_1",
            "amount_due": 85000,
            "status": "open",
            "created": 1_721_000_000.75,
        }))?;

        let InvoiceRecord::Provider(invoice) = record else {
            panic!("expected provider invoice");
        };
        assert_eq!(invoice.amount_due, 85000);
        assert_eq!(invoice.amount_paid, 0);
        assert_eq!(invoice.created, 1_721_000_000);
        assert_eq!(invoice.due_date, None);
        Ok(())
    }

    #[test]
    fn test_classify_native_without_markers() -> Result<()> {
        let record = InvoiceRecord::classify(json!({
            "id": "INV-2024-009",
            "clientName": "Emma Chen",
            "horseNames": ["Moonlight"],
            "issueDate": "2024-06-01",
            "dueDate": "2024-06-30",
            "total": 850,
            "status": "pending",
            "items": []
        }))?;
        assert!(matches!(record, InvoiceRecord::Native(ref inv) if inv.id == "INV-2024-009"));
        Ok(())
    }

    #[test]
    fn test_classify_rejects_non_objects() {
        assert!(InvoiceRecord::classify(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_classify_provider_with_missing_status() -> Result<()> {
        let record = InvoiceRecord::classify(json!({"id": "in_2", "amount_due": 85000}))?;

        let InvoiceRecord::Provider(invoice) = record else {
            panic!("expected provider invoice");
        };
        assert_eq!(invoice.status, ProviderInvoiceStatus::Unknown);
        assert_eq!(invoice.customer, "");
        assert_eq!(invoice.amount_due, 85000);
        assert!(invoice.lines.data.is_empty());
        Ok(())
    }

    #[test]
    fn test_classify_provider_with_null_fields() -> Result<()> {
        let record = InvoiceRecord::classify(json!({
            "id": "in_1",
            "amount_due": 85000,
            "status": "open",
            "customer": null,
            "lines": {"data": [
                {"description": null, "amount": null, "quantity": null,
                 "price": {"unit_amount": 42500, "currency": null}},
                {"description": "Farrier"}
            ]}
        }))?;

        let InvoiceRecord::Provider(invoice) = record else {
            panic!("expected provider invoice");
        };
        assert_eq!(invoice.status, ProviderInvoiceStatus::Open);
        assert_eq!(invoice.customer, "");
        let lines = &invoice.lines.data;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].description, "");
        assert_eq!(lines[0].amount, 0);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[0].price.as_ref().unwrap().currency, "");
        assert_eq!(lines[1].amount, 0);
        assert_eq!(lines[1].quantity, 1);
        Ok(())
    }

    #[test]
    fn test_null_status_is_unknown() {
        let invoice: ProviderInvoice =
            serde_json::from_value(json!({"id": "in_3", "status": null, "created": 1})).unwrap();
        assert_eq!(invoice.status, ProviderInvoiceStatus::Unknown);
    }

    #[test]
    fn test_unknown_provider_status() {
        let status: ProviderInvoiceStatus = serde_json::from_value(json!("processing")).unwrap();
        assert_eq!(status, ProviderInvoiceStatus::Unknown);
    }
}
