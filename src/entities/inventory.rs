//! Inventory entity - feed, bedding, supplements and supplies on hand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inventory grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryCategory {
    /// Hay and grain
    Feed,
    /// Shavings and straw
    Bedding,
    /// Dietary supplements
    Supplements,
    /// Tack and tools
    Equipment,
    /// Medical supplies
    Medical,
}

/// Inventory item model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Item identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Grouping
    pub category: InventoryCategory,
    /// Units on hand
    pub current_stock: f64,
    /// Reorder threshold
    pub min_stock: f64,
    /// Unit label, e.g. "bales"
    pub unit: String,
    /// Cost of a single unit
    pub cost_per_unit: f64,
    /// Supplier name
    pub supplier: String,
    /// Date of the last restock
    pub last_restocked: NaiveDate,
}
