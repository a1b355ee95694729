//! AI insight entity - canned suggestions surfaced on the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Area an insight concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    /// Horse health
    Health,
    /// Calendar
    Scheduling,
    /// Stock levels
    Inventory,
    /// Invoices and payments
    Billing,
    /// Facility upkeep
    Maintenance,
}

/// Urgency of an insight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    /// Informational
    Low,
    /// Worth a look
    Medium,
    /// Act soon
    High,
    /// Act now
    Urgent,
}

/// Kind of entity an insight points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelatedEntityType {
    /// A `Horse`
    Horse,
    /// An `InventoryItem`
    Inventory,
    /// A `ScheduleEvent`
    Schedule,
}

/// Weak reference from an insight to another entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEntity {
    /// What kind of entity
    #[serde(rename = "type")]
    pub entity_type: RelatedEntityType,
    /// Id of the entity
    pub id: String,
    /// Display name of the entity
    pub name: String,
}

/// AI insight model
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsight {
    /// Insight identifier
    pub id: String,
    /// Area
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    /// Urgency
    pub priority: InsightPriority,
    /// Headline
    pub title: String,
    /// Body text
    pub description: String,
    /// Whether someone has to act on it
    pub action_required: bool,
    /// Suggested next step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    /// Entity the insight is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entity: Option<RelatedEntity>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
