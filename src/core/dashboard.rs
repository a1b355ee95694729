//! Page-level composition of demo, spreadsheet and provider data.

use crate::{
    airtable::BarnRecords,
    core::{
        billing::{BillingSummary, summarize},
        inventory::items_needing_reorder,
        normalize::DisplayInvoice,
        personalize::personalize,
        records::InvoiceRecord,
    },
    entities::{DemoState, Horse},
    errors::Result,
    fixtures::Dataset,
    payments::MockPaymentProvider,
};
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Everything one dashboard render needs.
#[derive(Debug)]
pub struct DashboardView {
    /// Personalized offline dataset
    pub demo: Dataset,
    /// Spreadsheet roster; `None` when no spreadsheet is configured
    pub live_horses: Option<Result<Vec<Horse>>>,
    /// Fixture and provider invoices in display form, fixtures first
    pub invoices: Vec<DisplayInvoice>,
    /// Totals over `invoices`
    pub billing: BillingSummary,
    /// Inventory items at or below their minimum
    pub reorder_count: usize,
}

impl DashboardView {
    /// Horses to show: the live roster when it loaded, otherwise the demo roster.
    #[must_use]
    pub fn horses(&self) -> &[Horse] {
        match &self.live_horses {
            Some(Ok(horses)) => horses,
            _ => &self.demo.horses,
        }
    }
}

/// Builds the dashboard for `state`.
///
/// The spreadsheet roster and provider invoices are fetched concurrently and both
/// are awaited before returning. A failed spreadsheet fetch is logged and kept in
/// `live_horses`; the offline data is returned regardless.
pub async fn load_dashboard(
    state: &DemoState,
    baseline: &Dataset,
    barn: Option<&BarnRecords>,
    payments: &MockPaymentProvider,
    tenant_id: Option<&str>,
    now: DateTime<Utc>,
) -> DashboardView {
    let demo = personalize(state, baseline);
    let today = now.date_naive();

    let live = async {
        match barn {
            Some(barn) => Some(barn.fetch_horses(tenant_id, today).await),
            None => None,
        }
    };
    let (live_horses, provider_invoices) = tokio::join!(live, payments.invoices(None));

    if let Some(Err(e)) = &live_horses {
        error!("Failed to load spreadsheet horses: {}", e);
    }

    let invoices: Vec<DisplayInvoice> = demo
        .invoices
        .iter()
        .cloned()
        .map(InvoiceRecord::from)
        .chain(provider_invoices.into_iter().map(InvoiceRecord::from))
        .map(|record| record.to_display(now))
        .collect();
    let billing = summarize(&invoices);
    let reorder_count = items_needing_reorder(&demo.inventory).count();

    info!(
        barn = %state.barn_name,
        invoices = invoices.len(),
        reorder_count,
        "Dashboard assembled"
    );

    DashboardView {
        demo,
        live_horses,
        invoices,
        billing,
        reorder_count,
    }
}
