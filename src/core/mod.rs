//! Framework-agnostic dashboard logic.
//!
//! Everything here is pure except `dashboard`, which awaits the remote sources.

/// Billing totals, currency text and invoice ids
pub mod billing;
/// Concurrent page assembly
pub mod dashboard;
/// Stock status and reorder figures
pub mod inventory;
/// Horse name/id resolution for weak references
pub mod links;
/// Remote record conversion into canonical and display forms
pub mod normalize;
/// Featured-horse rewriting of the demo dataset
pub mod personalize;
/// Raw spreadsheet and provider record shapes
pub mod records;
