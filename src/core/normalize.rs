//! Remote record normalization.
//!
//! Converts spreadsheet rows into canonical `Horse`s and invoices of either shape into
//! one display form. Conversions are total: a missing, null, empty or oddly typed field
//! falls back to a fixed default and never produces an error or a panic.

use crate::{
    core::records::{
        Fields, InvoiceRecord, ProviderInvoice, ProviderInvoiceStatus, SpreadsheetRecord,
    },
    entities::{FeedingPlan, HealthStatus, Horse, Invoice, InvoiceStatus},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

/// Spreadsheet column names for horse rows.
pub mod columns {
    /// Horse name
    pub const NAME: &str = "Name";
    /// Date of birth
    pub const DOB: &str = "DOB";
    /// Breed
    pub const BREED: &str = "Breed";
    /// Owner
    pub const OWNER: &str = "Owner";
    /// Tenant tag
    pub const TENANT_ID: &str = "Tenant ID";
    /// Tenant display name
    pub const TENANT_NAME: &str = "Tenant Name";
}

/// Fallback name for rows without one.
pub const UNNAMED_HORSE: &str = "Unnamed Horse";
/// Fallback breed.
pub const UNKNOWN_BREED: &str = "Unknown";
/// Fallback owner.
pub const UNKNOWN_OWNER: &str = "Unknown Owner";

// Columns the spreadsheet schema does not carry at all.
const DEFAULT_COLOR: &str = "Bay";
const DEFAULT_BOARDING_RATE: f64 = 850.0;
const DEFAULT_NOTES: &str = "No notes available.";
const DEFAULT_HAY: &str = "20 lbs Timothy hay, 2x daily";
const DEFAULT_GRAIN: &str = "4 qts sweet feed, 2x daily";
const DEFAULT_SUPPLEMENT: &str = "Joint Support";
const DEFAULT_LAST_VET_VISIT: (i32, u32, u32) = (2024, 7, 1);
const DEFAULT_LAST_FARRIER_VISIT: (i32, u32, u32) = (2024, 6, 15);

/// Renders a JSON value as display text. Null and empty strings have no text.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Reads `name` from a field bag as text, or returns `fallback`.
///
/// Arrays (linked records, multi-selects) are joined with ", " and nested objects are
/// serialized as JSON.
#[must_use]
pub fn field_text(fields: &Fields, name: &str, fallback: &str) -> String {
    fields
        .get(name)
        .and_then(value_text)
        .unwrap_or_else(|| fallback.to_string())
}

/// Parses the date formats spreadsheets hand back: ISO dates, RFC 3339 timestamps and
/// US-style `MM/DD/YYYY`.
#[must_use]
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok())
}

/// Whole years between `dob` and `today`, counting a year only once its anniversary
/// has been reached. Birth dates in the future give 0.
#[must_use]
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Age from an optional date-of-birth string; absent or unparseable gives 0.
#[must_use]
pub fn age_from_dob(dob: Option<&str>, today: NaiveDate) -> u32 {
    dob.and_then(parse_loose_date)
        .map_or(0, |dob| age_on(dob, today))
}

fn fixed_date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Converts a spreadsheet horse row into a canonical `Horse`.
///
/// Health status is always `Good`: the spreadsheet has no health column. Color,
/// boarding rate, visit dates, notes and feeding are not in the schema either and get
/// fixed placeholders.
#[must_use]
pub fn to_horse(record: &SpreadsheetRecord, today: NaiveDate) -> Horse {
    let fields = &record.fields;
    let dob = fields.get(columns::DOB).and_then(value_text);

    Horse {
        id: record.id.clone(),
        name: field_text(fields, columns::NAME, UNNAMED_HORSE),
        breed: field_text(fields, columns::BREED, UNKNOWN_BREED),
        age: age_from_dob(dob.as_deref(), today),
        color: DEFAULT_COLOR.to_string(),
        owner: field_text(fields, columns::OWNER, UNKNOWN_OWNER),
        boarding_rate: DEFAULT_BOARDING_RATE,
        health_status: HealthStatus::default(),
        last_vet_visit: fixed_date(DEFAULT_LAST_VET_VISIT),
        last_farrier_visit: fixed_date(DEFAULT_LAST_FARRIER_VISIT),
        feeding: FeedingPlan {
            hay: DEFAULT_HAY.to_string(),
            grain: DEFAULT_GRAIN.to_string(),
            supplements: vec![DEFAULT_SUPPLEMENT.to_string()],
        },
        notes: DEFAULT_NOTES.to_string(),
    }
}

/// Minor units (cents) to whole currency units.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn minor_to_major(minor: i64) -> f64 {
    minor as f64 / 100.0
}

/// Whole currency units to minor units, rounded to the nearest cent.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn major_to_minor(major: f64) -> i64 {
    (major * 100.0).round() as i64
}

/// Epoch seconds to a UTC instant, via milliseconds.
#[must_use]
pub fn epoch_to_datetime(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(seconds.saturating_mul(1000))
}

/// Two-decimal amount text, e.g. `850.00`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Where a display invoice came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceSource {
    /// Fixture store
    Native,
    /// Payment provider
    Provider,
}

/// Unified invoice status for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    /// Not sent yet
    Draft,
    /// Awaiting payment
    Open,
    /// Settled
    Paid,
    /// Past due and unpaid
    Overdue,
    /// Cancelled or written off
    Void,
}

/// An invoice of either origin, in whole currency units and calendar dates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInvoice {
    /// Source id
    pub id: String,
    /// Number shown to people
    pub number: String,
    /// Client name (native) or customer id (provider)
    pub client: String,
    /// Short description
    pub description: String,
    /// Amount billed
    pub total: f64,
    /// Amount received
    pub paid: f64,
    /// Status
    pub status: DisplayStatus,
    /// Issue or creation date
    pub issued: Option<NaiveDate>,
    /// Due date
    pub due: Option<NaiveDate>,
    /// Origin
    pub source: InvoiceSource,
}

impl DisplayInvoice {
    /// Billed amount as two-decimal text.
    #[must_use]
    pub fn total_text(&self) -> String {
        format_amount(self.total)
    }

    /// Amount still owed.
    #[must_use]
    pub fn outstanding(&self) -> f64 {
        (self.total - self.paid).max(0.0)
    }
}

impl InvoiceRecord {
    /// Converts to the display form. `now` decides whether an open provider invoice has
    /// slipped past its due date.
    #[must_use]
    pub fn to_display(&self, now: DateTime<Utc>) -> DisplayInvoice {
        match self {
            Self::Native(invoice) => native_to_display(invoice),
            Self::Provider(invoice) => provider_to_display(invoice, now),
        }
    }
}

fn native_to_display(invoice: &Invoice) -> DisplayInvoice {
    let status = match invoice.status {
        InvoiceStatus::Paid => DisplayStatus::Paid,
        InvoiceStatus::Pending => DisplayStatus::Open,
        InvoiceStatus::Overdue => DisplayStatus::Overdue,
    };
    let paid = if status == DisplayStatus::Paid {
        invoice.total
    } else {
        0.0
    };

    DisplayInvoice {
        id: invoice.id.clone(),
        number: invoice.id.clone(),
        client: invoice.client_name.clone(),
        description: invoice.horse_names.join(", "),
        total: invoice.total,
        paid,
        status,
        issued: Some(invoice.issue_date),
        due: Some(invoice.due_date),
        source: InvoiceSource::Native,
    }
}

fn provider_to_display(invoice: &ProviderInvoice, now: DateTime<Utc>) -> DisplayInvoice {
    let total = minor_to_major(invoice.amount_due);
    let due_at = invoice.due_date.and_then(epoch_to_datetime);

    let status = match invoice.status {
        ProviderInvoiceStatus::Paid => DisplayStatus::Paid,
        ProviderInvoiceStatus::Overdue => DisplayStatus::Overdue,
        ProviderInvoiceStatus::Open if due_at.is_some_and(|due| due < now) => {
            DisplayStatus::Overdue
        }
        ProviderInvoiceStatus::Open => DisplayStatus::Open,
        ProviderInvoiceStatus::Draft | ProviderInvoiceStatus::Unknown => DisplayStatus::Draft,
        ProviderInvoiceStatus::Uncollectible | ProviderInvoiceStatus::Void => DisplayStatus::Void,
    };

    let paid = if invoice.amount_paid != 0 {
        minor_to_major(invoice.amount_paid)
    } else if status == DisplayStatus::Paid {
        total
    } else {
        0.0
    };

    DisplayInvoice {
        id: invoice.id.clone(),
        number: invoice.number.clone().unwrap_or_else(|| invoice.id.clone()),
        client: invoice.customer.clone(),
        description: invoice
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "Invoice".to_string()),
        total,
        paid,
        status,
        issued: epoch_to_datetime(invoice.created).map(|dt| dt.date_naive()),
        due: due_at.map(|dt| dt.date_naive()),
        source: InvoiceSource::Provider,
    }
}
