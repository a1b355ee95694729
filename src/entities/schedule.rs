//! Schedule event entity - lessons, feedings, vet and farrier visits.
//!
//! `horse_id` is a weak reference: it is looked up, never owned, and may dangle.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Kind of scheduled activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Riding lesson
    Lesson,
    /// Barn-wide feeding
    Feeding,
    /// Veterinary appointment
    Vet,
    /// Farrier appointment
    Farrier,
    /// Exercise session
    Exercise,
    /// Grooming
    Grooming,
}

/// Priority used by events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can slip
    Low,
    /// Normal
    Medium,
    /// Must happen on time
    High,
}

/// Schedule event model
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    /// Event identifier
    pub id: String,
    /// Display title; may embed a horse name
    pub title: String,
    /// Kind of event
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Weak reference to `Horse::id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horse_id: Option<String>,
    /// Start time of day
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// End time of day
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Calendar day
    pub date: NaiveDate,
    /// Instructor, for lessons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    /// Extra notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Priority
    pub priority: Priority,
}

/// Times of day travel as "HH:MM".
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serialized_form() {
        let event = ScheduleEvent {
            id: "3".to_string(),
            title: "Morning Feeding".to_string(),
            event_type: EventType::Feeding,
            horse_id: None,
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 7, 22).unwrap(),
            instructor: None,
            notes: None,
            priority: Priority::High,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "3",
                "title": "Morning Feeding",
                "type": "feeding",
                "startTime": "07:00",
                "endTime": "08:00",
                "date": "2024-07-22",
                "priority": "high"
            })
        );

        let back: ScheduleEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }
}
