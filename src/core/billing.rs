//! Billing summaries over invoices of both origins.
//!
//! Native and provider invoices are first converted to `DisplayInvoice`, so every
//! figure here is in whole currency units regardless of where an invoice came from.

use crate::{
    core::normalize::{DisplayInvoice, DisplayStatus, format_amount},
    entities::Invoice,
};
use serde::Serialize;
use tracing::warn;

/// Prefix shared by all native invoice ids.
pub const INVOICE_ID_PREFIX: &str = "INV";

/// Headline numbers for the billing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    /// Money received across all invoices
    pub total_revenue: f64,
    /// Money billed but not yet received
    pub outstanding: f64,
    /// Invoices settled
    pub paid_count: usize,
    /// Invoices awaiting payment and not yet overdue
    pub open_count: usize,
    /// Invoices past due
    pub overdue_count: usize,
    /// Drafts not sent yet
    pub draft_count: usize,
}

/// Aggregates `invoices` into a summary.
#[must_use]
pub fn summarize(invoices: &[DisplayInvoice]) -> BillingSummary {
    invoices
        .iter()
        .fold(BillingSummary::default(), |mut summary, invoice| {
            summary.total_revenue += invoice.paid;
            match invoice.status {
                DisplayStatus::Paid => summary.paid_count += 1,
                DisplayStatus::Open => {
                    summary.open_count += 1;
                    summary.outstanding += invoice.outstanding();
                }
                DisplayStatus::Overdue => {
                    summary.overdue_count += 1;
                    summary.outstanding += invoice.outstanding();
                }
                DisplayStatus::Draft => summary.draft_count += 1,
                DisplayStatus::Void => {}
            }
            summary
        })
}

/// Currency text for display, e.g. `$1,150.00`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let text = format_amount(amount.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Invoices whose stored total disagrees with their line items.
///
/// The stored total stays authoritative; this only reports drift.
#[must_use]
pub fn invoices_with_drifting_totals(invoices: &[Invoice]) -> Vec<&Invoice> {
    invoices
        .iter()
        .filter(|invoice| !invoice.total_matches_line_items())
        .inspect(|invoice| {
            warn!(
                id = %invoice.id,
                total = invoice.total,
                items = invoice.line_items_total(),
                "Invoice total does not match its line items"
            );
        })
        .collect()
}

/// Next `INV-YYYY-NNN` id for `year`, one past the highest sequence already used.
#[must_use]
pub fn next_invoice_id(invoices: &[Invoice], year: i32) -> String {
    let prefix = format!("{INVOICE_ID_PREFIX}-{year}-");
    let highest = invoices
        .iter()
        .filter_map(|invoice| invoice.id.strip_prefix(&prefix))
        .filter_map(|seq| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:03}", highest + 1)
}
