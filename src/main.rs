use barn_buddy::{
    airtable::{AirtableClient, BarnRecords, Tenant},
    config::{AppConfig, presets},
    core::{
        billing::{format_currency, invoices_with_drifting_totals, next_invoice_id},
        dashboard::load_dashboard,
        links::HorseDirectory,
    },
    entities::DemoState,
    errors::Result,
    fixtures,
    payments::{MockPaymentProvider, mock::SIMULATED_LATENCY},
};
use chrono::{Datelike, Utc};
use dotenvy::dotenv;
use std::env;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const PRESETS_PATH: &str = "demo.toml";
const PRESET_VAR: &str = "DEMO_PRESET";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the real environment
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Read and report configuration. Missing credentials only disable live data.
    let app_config = AppConfig::from_env();
    app_config.log_environment_status();

    // 4. Resolve the demo preset
    let presets = presets::load_presets_or_default(PRESETS_PATH)
        .inspect(|p| info!("Loaded {} demo presets", p.len()))
        .inspect_err(|e| error!("Failed to load demo presets: {}", e))?;
    let mut state = DemoState::default();
    if let Ok(name) = env::var(PRESET_VAR) {
        match presets::find_preset(&presets, &name) {
            Some(preset) => state = preset.to_demo_state(&state),
            None => warn!("Unknown demo preset {:?}, keeping defaults", name),
        }
    }

    // 5. Spreadsheet client, only when configured
    let barn = if app_config.validate().is_valid() {
        AirtableClient::from_config(&app_config.airtable)
            .map(BarnRecords::new)
            .inspect_err(|e| error!("Failed to build spreadsheet client: {}", e))
            .ok()
    } else {
        None
    };

    // 6. Assemble the dashboard
    let payments = MockPaymentProvider::seeded(Utc::now()).with_latency(SIMULATED_LATENCY);
    info!("{}", payments.notice());
    let tenant = Tenant::default();
    let view = load_dashboard(
        &state,
        &fixtures::baseline(),
        barn.as_ref(),
        &payments,
        Some(tenant.id.as_str()),
        Utc::now(),
    )
    .await;

    let directory = HorseDirectory::new(&view.demo.horses);
    for event in &view.demo.schedule_events {
        debug!(
            "{} {} {} ({})",
            event.date,
            event.start_time.format("%H:%M"),
            event.title,
            directory.event_horse_label(event).unwrap_or("whole barn")
        );
    }

    let drifting = invoices_with_drifting_totals(&view.demo.invoices).len();
    if drifting == 0 {
        info!("All invoice totals match their line items");
    }

    if let Some(featured) = view.horses().first() {
        info!(
            barn = %state.barn_name,
            theme = %state.theme,
            "Featured horse: {} ({}, {})",
            featured.name,
            featured.breed,
            featured.owner
        );
    }
    info!(
        "Billing: {} received, {} outstanding ({} paid, {} open, {} overdue)",
        format_currency(view.billing.total_revenue),
        format_currency(view.billing.outstanding),
        view.billing.paid_count,
        view.billing.open_count,
        view.billing.overdue_count
    );
    let next_id = next_invoice_id(&view.demo.invoices, Utc::now().year());
    info!("Next invoice id: {}", next_id);
    info!("{} inventory items need reordering", view.reorder_count);

    Ok(())
}
