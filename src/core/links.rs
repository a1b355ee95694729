//! Weak-reference resolution between horses, events, invoices and insights.
//!
//! Invoices and insights name horses instead of pointing at ids, so a rename breaks the
//! link silently. A `HorseDirectory` is built once per dataset and resolves those names
//! to ids; everything downstream works with ids and treats names as display labels.

use crate::entities::{AiInsight, Horse, Invoice, RelatedEntityType, ScheduleEvent};
use std::collections::HashMap;

/// Label shown when a reference does not resolve.
pub const UNKNOWN_HORSE: &str = "unknown horse";

/// Name and id lookup over one horse collection.
#[derive(Debug, Clone, Default)]
pub struct HorseDirectory {
    by_id: HashMap<String, String>,
    by_name: HashMap<String, String>,
}

/// An invoice's horse names, resolved against a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHorse {
    /// Name as stored on the invoice
    pub name: String,
    /// Matching horse id, if any horse carries that name
    pub id: Option<String>,
}

impl HorseDirectory {
    /// Indexes `horses`. If two horses share a name the first one wins.
    #[must_use]
    pub fn new(horses: &[Horse]) -> Self {
        let mut directory = Self::default();
        for horse in horses {
            directory
                .by_id
                .entry(horse.id.clone())
                .or_insert_with(|| horse.name.clone());
            directory
                .by_name
                .entry(horse.name.clone())
                .or_insert_with(|| horse.id.clone());
        }
        directory
    }

    /// Id of the horse called `name`.
    #[must_use]
    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Name of the horse with `id`.
    #[must_use]
    pub fn name_for_id(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Horse label for an event: its horse's name, `None` for barn-wide events, and
    /// [`UNKNOWN_HORSE`] when the id dangles.
    #[must_use]
    pub fn event_horse_label(&self, event: &ScheduleEvent) -> Option<&str> {
        event
            .horse_id
            .as_deref()
            .map(|id| self.name_for_id(id).unwrap_or(UNKNOWN_HORSE))
    }

    /// Resolves each horse name on `invoice`.
    #[must_use]
    pub fn invoice_horses(&self, invoice: &Invoice) -> Vec<ResolvedHorse> {
        invoice
            .horse_names
            .iter()
            .map(|name| ResolvedHorse {
                name: name.clone(),
                id: self.id_for_name(name).map(ToString::to_string),
            })
            .collect()
    }

    /// Id of the horse an insight is about, if it is about a known horse.
    #[must_use]
    pub fn insight_horse_id<'a>(&'a self, insight: &'a AiInsight) -> Option<&'a str> {
        let related = insight.related_entity.as_ref()?;
        if related.entity_type != RelatedEntityType::Horse {
            return None;
        }
        self.id_for_name(&related.name)
            .or_else(|| self.name_for_id(&related.id).map(|_| related.id.as_str()))
    }

    /// Events that resolve to the horse with `horse_id`.
    pub fn events_for_horse<'e>(
        events: &'e [ScheduleEvent],
        horse_id: &'e str,
    ) -> impl Iterator<Item = &'e ScheduleEvent> + 'e {
        events
            .iter()
            .filter(move |event| event.horse_id.as_deref() == Some(horse_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::baseline;

    #[test]
    fn test_names_and_ids_round_trip() {
        let data = baseline();
        let directory = HorseDirectory::new(&data.horses);
        assert_eq!(directory.id_for_name("Moonlight"), Some("3"));
        assert_eq!(directory.name_for_id("4"), Some("Storm"));
        assert_eq!(directory.id_for_name("Nobody"), None);
    }

    #[test]
    fn test_event_labels() {
        let mut data = baseline();
        let directory = HorseDirectory::new(&data.horses);

        assert_eq!(directory.event_horse_label(&data.schedule_events[1]), Some("Thunder"));
        // Morning Feeding is barn-wide
        assert_eq!(directory.event_horse_label(&data.schedule_events[2]), None);

        data.schedule_events[4].horse_id = Some("99".to_string());
        assert_eq!(
            directory.event_horse_label(&data.schedule_events[4]),
            Some(UNKNOWN_HORSE)
        );
    }

    #[test]
    fn test_invoice_horses_tolerate_unknown_names() {
        let mut data = baseline();
        data.invoices[0].horse_names = vec!["Bella".to_string(), "Ghost".to_string()];
        let directory = HorseDirectory::new(&data.horses);

        let resolved = directory.invoice_horses(&data.invoices[0]);
        assert_eq!(resolved[0].id.as_deref(), Some("1"));
        assert_eq!(resolved[1].name, "Ghost");
        assert_eq!(resolved[1].id, None);
    }

    #[test]
    fn test_insight_horse_id_ignores_inventory_links() {
        let data = baseline();
        let directory = HorseDirectory::new(&data.horses);
        assert_eq!(directory.insight_horse_id(&data.ai_insights[0]), Some("1"));
        assert_eq!(directory.insight_horse_id(&data.ai_insights[1]), None);
    }

    #[test]
    fn test_events_for_horse() {
        let data = baseline();
        let storm: Vec<&str> = HorseDirectory::events_for_horse(&data.schedule_events, "4")
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(storm, ["Storm - Exercise Session"]);
    }
}
