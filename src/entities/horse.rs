//! Horse entity - a boarded horse and its care details.
//!
//! Each horse carries its owner, boarding rate, health status, the dates of its last
//! vet and farrier visits, and a feeding plan. The id is unique within a collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Overall health assessment shown on the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    /// No concerns
    Excellent,
    /// Normal condition; also the fallback for remote records
    #[default]
    Good,
    /// Something is due or being watched
    NeedsAttention,
    /// Requires immediate care
    Critical,
}

impl HealthStatus {
    /// Parses the serialized form, returning `None` for anything unrecognised.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "needs-attention" => Some(Self::NeedsAttention),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Daily feeding regimen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingPlan {
    /// Hay regimen, e.g. "3 flakes, 2x daily"
    pub hay: String,
    /// Grain regimen
    pub grain: String,
    /// Supplement names
    pub supplements: Vec<String>,
}

/// Horse model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    /// Stable identifier, unique within a collection
    pub id: String,
    /// Display name; also the key invoices and insights link by
    pub name: String,
    /// Breed
    pub breed: String,
    /// Age in whole years
    pub age: u32,
    /// Coat color
    pub color: String,
    /// Owner's name
    pub owner: String,
    /// Monthly boarding rate in whole currency units
    pub boarding_rate: f64,
    /// Current health assessment
    pub health_status: HealthStatus,
    /// Date of the last vet visit
    pub last_vet_visit: NaiveDate,
    /// Date of the last farrier visit
    pub last_farrier_visit: NaiveDate,
    /// Feeding plan
    pub feeding: FeedingPlan,
    /// Free-text notes
    pub notes: String,
}
