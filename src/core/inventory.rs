//! Inventory stock status and reorder figures.

use crate::entities::InventoryItem;
use serde::Serialize;

/// Stock level relative to an item's minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// Below half the minimum
    Critical,
    /// At or below the minimum
    Low,
    /// Above the minimum
    Good,
}

/// Derives the stock status of `item`.
#[must_use]
pub fn stock_status(item: &InventoryItem) -> StockStatus {
    if item.current_stock < item.min_stock * 0.5 {
        StockStatus::Critical
    } else if item.current_stock <= item.min_stock {
        StockStatus::Low
    } else {
        StockStatus::Good
    }
}

/// Items in critical state.
pub fn critical_items(items: &[InventoryItem]) -> impl Iterator<Item = &InventoryItem> {
    items
        .iter()
        .filter(|item| stock_status(item) == StockStatus::Critical)
}

/// Items that need reordering (low or critical).
pub fn items_needing_reorder(items: &[InventoryItem]) -> impl Iterator<Item = &InventoryItem> {
    items
        .iter()
        .filter(|item| stock_status(item) != StockStatus::Good)
}

/// Value of everything on hand.
#[must_use]
pub fn stock_value(items: &[InventoryItem]) -> f64 {
    items
        .iter()
        .map(|item| item.current_stock * item.cost_per_unit)
        .sum()
}

/// Units to order to bring `item` back up to twice its minimum; 0 when already there.
#[must_use]
pub fn suggested_reorder_quantity(item: &InventoryItem) -> f64 {
    (item.min_stock * 2.0 - item.current_stock).max(0.0).ceil()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::fixtures::baseline;

    #[test]
    fn test_stock_status_thresholds() {
        let mut item = baseline().inventory.remove(0);
        item.min_stock = 20.0;

        item.current_stock = 9.0;
        assert_eq!(stock_status(&item), StockStatus::Critical);
        item.current_stock = 10.0;
        assert_eq!(stock_status(&item), StockStatus::Low);
        item.current_stock = 20.0;
        assert_eq!(stock_status(&item), StockStatus::Low);
        item.current_stock = 20.5;
        assert_eq!(stock_status(&item), StockStatus::Good);
    }

    #[test]
    fn test_fixture_statuses() {
        let items = baseline().inventory;
        let statuses: Vec<StockStatus> = items.iter().map(stock_status).collect();
        assert_eq!(
            statuses,
            [
                StockStatus::Low,
                StockStatus::Low,
                StockStatus::Good,
                StockStatus::Low,
                StockStatus::Good,
            ]
        );
        assert_eq!(critical_items(&items).count(), 0);
        assert_eq!(items_needing_reorder(&items).count(), 3);
    }

    #[test]
    fn test_stock_value_and_reorder() {
        let items = baseline().inventory;
        let expected = 15.0 * 12.50 + 8.0 * 18.75 + 35.0 * 8.25 + 5.0 * 45.0 + 12.0 * 28.50;
        assert!((stock_value(&items) - expected).abs() < 1e-9);

        assert_eq!(suggested_reorder_quantity(&items[0]), 35.0);
        assert_eq!(suggested_reorder_quantity(&items[2]), 5.0);
        assert_eq!(suggested_reorder_quantity(&items[4]), 0.0);
    }
}
