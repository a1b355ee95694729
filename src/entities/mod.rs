//! Entity module - the canonical dashboard model.
//! Fixture data, the personalizer and the remote-record normalizer all produce these
//! types. Field and enum names serialize the way the dashboard reads them.

pub mod demo;
pub mod horse;
pub mod insight;
pub mod inventory;
pub mod invoice;
pub mod schedule;

pub use demo::{DEFAULT_PRIMARY_HORSE, DemoState, DemoUpdate};
pub use horse::{FeedingPlan, HealthStatus, Horse};
pub use insight::{AiInsight, InsightPriority, InsightType, RelatedEntity, RelatedEntityType};
pub use inventory::{InventoryCategory, InventoryItem};
pub use invoice::{Invoice, InvoiceStatus, LineItem};
pub use schedule::{EventType, Priority, ScheduleEvent};
