//! Invoice entity - a billed statement to a horse owner.
//!
//! Invoices link horses by name rather than id. Ids follow `INV-YYYY-NNN`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payment state of a native invoice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Settled
    Paid,
    /// Issued, not yet due
    Pending,
    /// Past its due date and unpaid
    Overdue,
}

/// One billed line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// What was billed
    pub description: String,
    /// Number of units
    pub quantity: f64,
    /// Price per unit
    pub rate: f64,
    /// `quantity × rate`
    pub total: f64,
}

impl LineItem {
    /// Builds a line item with its total computed from quantity and rate.
    #[must_use]
    pub fn new(description: impl Into<String>, quantity: f64, rate: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
            total: quantity * rate,
        }
    }
}

/// Invoice model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice number, `INV-YYYY-NNN`
    pub id: String,
    /// Billed client
    pub client_name: String,
    /// Horses covered, by name
    pub horse_names: Vec<String>,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
    /// Stored total in whole currency units
    pub total: f64,
    /// Payment state
    pub status: InvoiceStatus,
    /// Billed lines
    pub items: Vec<LineItem>,
}

impl Invoice {
    /// Sum of the line-item totals. The stored `total` is not derived from this.
    #[must_use]
    pub fn line_items_total(&self) -> f64 {
        self.items.iter().map(|item| item.total).sum()
    }

    /// Whether the stored total agrees with the line items to the cent.
    #[must_use]
    pub fn total_matches_line_items(&self) -> bool {
        (self.total - self.line_items_total()).abs() < 0.005
    }
}
