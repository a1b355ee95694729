//! In-memory stand-in for the payment provider.

use super::{
    Customer, Metadata, NewCustomer, NewInvoice, PaymentIntent, PaymentIntentStatus,
    PaymentRequest,
};
use crate::{
    core::{
        normalize::major_to_minor,
        records::{
            ProviderInvoice, ProviderInvoiceStatus, ProviderLine, ProviderLines, ProviderPrice,
        },
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Notice shown wherever provider data is displayed.
pub const NOT_CONFIGURED_NOTICE: &str = "Using mock data - Stripe not configured";

/// Delay used when a remote-feeling provider is wanted.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(800);

const DAY_SECS: i64 = 86_400;
const INVOICE_TERM_DAYS: i64 = 30;
const CURRENCY: &str = "usd";
const DEFAULT_DESCRIPTION: &str = "New Invoice";

#[derive(Debug)]
struct ProviderState {
    customers: Vec<Customer>,
    invoices: Vec<ProviderInvoice>,
    next_id: u64,
}

impl ProviderState {
    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Mocked provider. Clones of returned values are snapshots; state changes only
/// through the provider's own methods.
#[derive(Debug)]
pub struct MockPaymentProvider {
    state: RwLock<ProviderState>,
    latency: Duration,
}

impl Default for MockPaymentProvider {
    fn default() -> Self {
        Self::seeded(Utc::now())
    }
}

impl MockPaymentProvider {
    /// Provider holding the three demo customers and invoices, timed relative to
    /// `now`. Calls are not delayed.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let customers = seed_customers();
        let invoices = seed_invoices(now.timestamp());
        let next_id = (customers.len() + invoices.len() + 1) as u64;
        Self {
            state: RwLock::new(ProviderState {
                customers,
                invoices,
                next_id,
            }),
            latency: Duration::ZERO,
        }
    }

    /// Delays every call by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Notice explaining where the data comes from.
    #[must_use]
    pub const fn notice(&self) -> &'static str {
        NOT_CONFIGURED_NOTICE
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// All customers in creation order.
    pub async fn customers(&self) -> Vec<Customer> {
        self.state.read().await.customers.clone()
    }

    /// Adds a customer.
    pub async fn create_customer(&self, new: NewCustomer) -> Customer {
        self.simulate_latency().await;

        let mut state = self.state.write().await;
        let customer = Customer {
            id: format!("cus_mock_{}", state.take_id()),
            email: new.email,
            name: new.name,
            phone: new.phone.unwrap_or_default(),
            metadata: new.metadata,
        };
        state.customers.push(customer.clone());

        info!("Created mock customer {}", customer.id);
        customer
    }

    /// Invoices in creation order, optionally only those billed to `customer`.
    pub async fn invoices(&self, customer: Option<&str>) -> Vec<ProviderInvoice> {
        let state = self.state.read().await;
        state
            .invoices
            .iter()
            .filter(|invoice| customer.is_none_or(|id| invoice.customer == id))
            .cloned()
            .collect()
    }

    /// Creates a draft invoice due in 30 days. Line prices are converted to minor
    /// units.
    ///
    /// # Errors
    /// Returns `CustomerNotFound` for an unknown customer and `InvalidAmount` for a
    /// negative or non-finite price, or one whose total does not fit in minor units.
    pub async fn create_invoice(&self, new: NewInvoice) -> Result<ProviderInvoice> {
        if let Some(bad) = new
            .line_items
            .iter()
            .find(|item| !item.amount.is_finite() || item.amount < 0.0)
        {
            return Err(Error::InvalidAmount { amount: bad.amount });
        }

        self.simulate_latency().await;

        let mut state = self.state.write().await;
        if !state.customers.iter().any(|c| c.id == new.customer) {
            return Err(Error::CustomerNotFound { id: new.customer });
        }

        let mut lines = Vec::with_capacity(new.line_items.len());
        let mut amount_due: i64 = 0;
        for item in new.line_items {
            let quantity = item.quantity.unwrap_or(1);
            let unit_amount = major_to_minor(item.amount);
            let amount = unit_amount
                .checked_mul(i64::from(quantity))
                .and_then(|amount| amount_due.checked_add(amount).map(|due| (amount, due)));
            let Some((amount, due)) = amount else {
                return Err(Error::InvalidAmount {
                    amount: item.amount,
                });
            };
            amount_due = due;
            lines.push(ProviderLine {
                description: item.description,
                amount,
                quantity,
                price: Some(ProviderPrice {
                    unit_amount,
                    currency: CURRENCY.to_string(),
                }),
            });
        }

        let id = state.take_id();
        let created = Utc::now().timestamp();
        let invoice = ProviderInvoice {
            id: format!("in_mock_{id}"),
            number: Some(format!("MOCK-{:03}", state.invoices.len() + 1)),
            customer: new.customer,
            amount_paid: 0,
            amount_due,
            status: ProviderInvoiceStatus::Draft,
            created,
            due_date: Some(created + DAY_SECS * INVOICE_TERM_DAYS),
            description: Some(
                new.description
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            ),
            hosted_invoice_url: Some(format!("https://invoice.stripe.com/mock_{id}")),
            invoice_pdf: Some(format!("https://files.stripe.com/mock_{id}.pdf")),
            lines: ProviderLines { data: lines },
        };
        state.invoices.push(invoice.clone());

        info!(
            "Created mock invoice {} for {} ({} cents)",
            invoice.id, invoice.customer, invoice.amount_due
        );
        Ok(invoice)
    }

    /// Marks an invoice as sent, whatever its current state.
    ///
    /// # Errors
    /// Returns `InvoiceNotFound` for an unknown id.
    pub async fn send_invoice(&self, invoice_id: &str) -> Result<ProviderInvoice> {
        self.simulate_latency().await;

        let mut state = self.state.write().await;
        let invoice = state
            .invoices
            .iter_mut()
            .find(|invoice| invoice.id == invoice_id)
            .ok_or_else(|| Error::InvoiceNotFound {
                id: invoice_id.to_string(),
            })?;
        invoice.status = ProviderInvoiceStatus::Open;

        debug!("Sent mock invoice {}", invoice_id);
        Ok(invoice.clone())
    }

    /// Starts a checkout for `request.amount` minor units.
    ///
    /// # Errors
    /// Returns `InvalidAmount` for a negative amount.
    #[allow(clippy::cast_precision_loss)]
    pub async fn create_payment_intent(&self, request: PaymentRequest) -> Result<PaymentIntent> {
        if request.amount < 0 {
            return Err(Error::InvalidAmount {
                amount: request.amount as f64,
            });
        }

        self.simulate_latency().await;

        let id = self.state.write().await.take_id();
        Ok(PaymentIntent {
            id: format!("pi_mock_{id}"),
            client_secret: format!("pi_mock_{id}_secret_{}", Utc::now().timestamp_millis()),
            amount: request.amount,
            currency: request.currency,
            status: PaymentIntentStatus::RequiresPaymentMethod,
        })
    }
}

fn seed_customers() -> Vec<Customer> {
    let customer = |n: u32, email: &str, name: &str, horses: &str| {
        let mut metadata = Metadata::new();
        metadata.insert("barnId".to_string(), "barn_1".to_string());
        metadata.insert("horseNames".to_string(), horses.to_string());
        Customer {
            id: format!("cus_mock_{n}"),
            email: email.to_string(),
            name: name.to_string(),
            phone: format!("+1-555-012{}", n + 2),
            metadata,
        }
    };

    vec![
        customer(1, "sarah@example.com", "Sarah Johnson", "Thunderbolt, Star"),
        customer(2, "mike@example.com", "Mike Wilson", "Lightning"),
        customer(3, "emma@example.com", "Emma Davis", "Star"),
    ]
}

fn line(description: &str, unit_amount: i64, quantity: u32) -> ProviderLine {
    ProviderLine {
        description: description.to_string(),
        amount: unit_amount * i64::from(quantity),
        quantity,
        price: Some(ProviderPrice {
            unit_amount,
            currency: CURRENCY.to_string(),
        }),
    }
}

fn seed_invoices(now: i64) -> Vec<ProviderInvoice> {
    let invoice = |n: u32,
                   (amount_paid, amount_due): (i64, i64),
                   status,
                   (created_days_ago, due_in_days): (i64, i64),
                   description: &str,
                   lines: Vec<ProviderLine>| ProviderInvoice {
        id: format!("in_mock_{n}"),
        number: Some(format!("MOCK-{n:03}")),
        customer: format!("cus_mock_{n}"),
        amount_paid,
        amount_due,
        status,
        created: now - DAY_SECS * created_days_ago,
        due_date: Some(now + DAY_SECS * due_in_days),
        description: Some(description.to_string()),
        hosted_invoice_url: Some(format!("https://invoice.stripe.com/mock{n}")),
        invoice_pdf: Some(format!("https://files.stripe.com/mock{n}.pdf")),
        lines: ProviderLines { data: lines },
    };

    vec![
        invoice(
            1,
            (85_000, 85_000),
            ProviderInvoiceStatus::Paid,
            (7, 30),
            "Monthly boarding - Thunderbolt",
            vec![line("Monthly boarding - Thunderbolt", 85_000, 1)],
        ),
        invoice(
            2,
            (0, 120_000),
            ProviderInvoiceStatus::Open,
            (3, 14),
            "Training sessions + boarding",
            vec![
                line("Monthly boarding - Lightning", 80_000, 1),
                line("Training sessions", 10_000, 4),
            ],
        ),
        invoice(
            3,
            (0, 65_000),
            ProviderInvoiceStatus::Overdue,
            (20, -5),
            "Monthly boarding - Star",
            vec![line("Monthly boarding - Star", 65_000, 1)],
        ),
    ]
}
