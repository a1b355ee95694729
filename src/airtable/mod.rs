//! Spreadsheet-backed barn records.
//!
//! `client` speaks the generic table API; `barn` maps the barn tables (horses, health
//! logs, barns) onto it.

/// Barn-domain table operations
pub mod barn;
/// Generic table client
pub mod client;

pub use barn::{BarnRecords, NewBarn, NewHealthLog, NewHorse};
pub use client::{AirtableClient, ListOptions, SortDirection, SortSpec, Tenant};
