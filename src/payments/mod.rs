//! Payment provider surface.
//!
//! Only a mocked provider exists: state lives in memory, amounts are kept in minor
//! units like the real provider, and each call can be delayed to feel remote.

/// In-memory provider
pub mod mock;

pub use mock::{MockPaymentProvider, NOT_CONFIGURED_NOTICE};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form key/value annotations.
pub type Metadata = BTreeMap<String, String>;

/// A billed customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Provider id, `cus_...`
    pub id: String,
    /// Contact email
    pub email: String,
    /// Display name
    pub name: String,
    /// Phone; empty when not given
    #[serde(default)]
    pub phone: String,
    /// Annotations such as barn id and horse names
    #[serde(default)]
    pub metadata: Metadata,
}

/// Input for a new customer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewCustomer {
    /// Contact email
    pub email: String,
    /// Display name
    pub name: String,
    /// Phone
    pub phone: Option<String>,
    /// Annotations
    pub metadata: Metadata,
}

/// One line of a new invoice, priced in whole currency units.
#[derive(Clone, Debug, PartialEq)]
pub struct NewLineItem {
    /// What is billed
    pub description: String,
    /// Unit price in whole units
    pub amount: f64,
    /// Units; 1 when absent
    pub quantity: Option<u32>,
}

/// Input for a new invoice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewInvoice {
    /// Customer id to bill
    pub customer: String,
    /// Description; a generic one is used when absent
    pub description: Option<String>,
    /// Billed lines
    pub line_items: Vec<NewLineItem>,
}

/// Lifecycle state of a payment intent. The mock only ever creates the first one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    /// Waiting for the payer to supply a method
    RequiresPaymentMethod,
    /// Settled
    Succeeded,
    /// Abandoned
    Canceled,
}

/// Input for a payment intent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount in minor units
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
    /// Customer paying, if known
    pub customer: Option<String>,
    /// Annotations
    pub metadata: Metadata,
}

/// A started checkout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider id, `pi_...`
    pub id: String,
    /// Secret handed to the client-side checkout
    pub client_secret: String,
    /// Amount in minor units
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
    /// State
    pub status: PaymentIntentStatus,
}
