//! Demo personalization - rewrites the baseline so a chosen horse is featured.
//!
//! The baseline features Bella. Personalizing moves the primary horse to the front of
//! the roster and swaps Bella's name for the primary horse's name in schedule titles,
//! the featured invoice and the insights that point at her. The input is never
//! mutated; the output owns all of its data.

use crate::{
    entities::{AiInsight, DEFAULT_PRIMARY_HORSE, DemoState, Horse, Invoice, ScheduleEvent},
    fixtures::Dataset,
};
use tracing::{debug, info};

/// Id whose schedule slot belongs to whichever horse is primary.
pub const PRIMARY_HORSE_ID: &str = "1";

/// Invoice whose horse list always names the primary horse.
pub const FEATURED_INVOICE_ID: &str = "INV-2024-001";

/// Produces the personalized dataset for `state`.
///
/// When the primary horse is not on the baseline roster nothing is rewritten and an
/// equal copy of `baseline` is returned. Applying the same state twice gives the same
/// result as applying it once.
#[must_use]
pub fn personalize(state: &DemoState, baseline: &Dataset) -> Dataset {
    let primary = state.primary_horse.as_str();

    if !baseline.horses.iter().any(|h| h.name == primary) {
        info!(primary, "Primary horse has no profile, leaving demo data as-is");
        return baseline.clone();
    }

    let rename = !state.features_default_horse();
    debug!(primary, rename, barn = %state.barn_name, "Personalizing demo data");

    Dataset {
        horses: promote_horse(&baseline.horses, primary),
        schedule_events: baseline
            .schedule_events
            .iter()
            .map(|event| feature_in_event(event, primary, rename))
            .collect(),
        invoices: baseline
            .invoices
            .iter()
            .map(|invoice| feature_in_invoice(invoice, primary))
            .collect(),
        inventory: baseline.inventory.clone(),
        ai_insights: baseline
            .ai_insights
            .iter()
            .map(|insight| feature_in_insight(insight, primary, rename))
            .collect(),
    }
}

/// Moves the horse named `name` to the front, keeping everyone else in order.
#[must_use]
pub fn promote_horse(horses: &[Horse], name: &str) -> Vec<Horse> {
    let mut reordered = horses.to_vec();
    if let Some(index) = reordered.iter().position(|h| h.name == name) {
        reordered[..=index].rotate_right(1);
    }
    reordered
}

fn feature_in_event(event: &ScheduleEvent, primary: &str, rename: bool) -> ScheduleEvent {
    if rename && event.title.contains(DEFAULT_PRIMARY_HORSE) {
        ScheduleEvent {
            title: event.title.replace(DEFAULT_PRIMARY_HORSE, primary),
            horse_id: Some(PRIMARY_HORSE_ID.to_string()),
            ..event.clone()
        }
    } else {
        event.clone()
    }
}

fn feature_in_invoice(invoice: &Invoice, primary: &str) -> Invoice {
    if invoice.id == FEATURED_INVOICE_ID {
        Invoice {
            horse_names: vec![primary.to_string()],
            ..invoice.clone()
        }
    } else {
        invoice.clone()
    }
}

fn feature_in_insight(insight: &AiInsight, primary: &str, rename: bool) -> AiInsight {
    let Some(related) = insight.related_entity.as_ref() else {
        return insight.clone();
    };
    if !rename || related.name != DEFAULT_PRIMARY_HORSE {
        return insight.clone();
    }

    let mut related = related.clone();
    related.name = primary.to_string();
    AiInsight {
        title: insight.title.replace(DEFAULT_PRIMARY_HORSE, primary),
        description: insight.description.replace(DEFAULT_PRIMARY_HORSE, primary),
        related_entity: Some(related),
        ..insight.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixtures::baseline, test_utils::demo_state};

    fn names(horses: &[Horse]) -> Vec<&str> {
        horses.iter().map(|h| h.name.as_str()).collect()
    }

    #[test]
    fn test_promote_storm_is_stable_rotation() {
        let data = personalize(&demo_state("Storm"), &baseline());
        assert_eq!(names(&data.horses), ["Storm", "Bella", "Thunder", "Moonlight"]);
    }

    #[test]
    fn test_promote_first_horse_keeps_order() {
        let horses = baseline().horses;
        let promoted = promote_horse(&horses, "Bella");
        assert_eq!(promoted, horses);
    }

    #[test]
    fn test_unknown_primary_horse_is_a_no_op() {
        let base = baseline();
        let data = personalize(&demo_state("Nonexistent"), &base);
        assert_eq!(names(&data.horses), ["Bella", "Thunder", "Moonlight", "Storm"]);
        assert_eq!(data, base);
    }

    #[test]
    fn test_default_primary_horse_changes_nothing_visible() {
        let base = baseline();
        let data = personalize(&DemoState::default(), &base);

        assert_eq!(data.horses, base.horses);
        assert_eq!(data.schedule_events, base.schedule_events);
        assert_eq!(data.invoices[0].horse_names, ["Bella"]);
        assert_eq!(data.ai_insights, base.ai_insights);
    }

    #[test]
    fn test_thunder_end_to_end() {
        let base = baseline();
        let data = personalize(&demo_state("Thunder"), &base);

        assert_eq!(names(&data.horses), ["Thunder", "Bella", "Moonlight", "Storm"]);

        let lesson = &data.schedule_events[0];
        assert_eq!(lesson.title, "Thunder - Lesson with Sarah");
        assert_eq!(lesson.horse_id.as_deref(), Some(PRIMARY_HORSE_ID));
        assert_eq!(data.schedule_events[1..], base.schedule_events[1..]);

        let featured = data
            .invoices
            .iter()
            .find(|inv| inv.id == FEATURED_INVOICE_ID);
        assert_eq!(
            featured.map(|inv| inv.horse_names.clone()),
            Some(vec!["Thunder".to_string()])
        );
        assert_eq!(data.invoices[1..], base.invoices[1..]);

        let farrier = &data.ai_insights[0];
        assert_eq!(farrier.title, "Farrier Visit Overdue");
        assert!(farrier.description.starts_with("Thunder hasn't had a farrier visit"));
        assert!(!farrier.description.contains("Bella"));
        assert_eq!(
            farrier.related_entity.as_ref().map(|e| e.name.as_str()),
            Some("Thunder")
        );
        assert_eq!(data.ai_insights[1..], base.ai_insights[1..]);

        assert_eq!(data.inventory, base.inventory);
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let mut base = baseline();
        base.schedule_events[0].title = "Bella & Bella's foal".to_string();
        let data = personalize(&demo_state("Moonlight"), &base);
        assert_eq!(data.schedule_events[0].title, "Moonlight & Moonlight's foal");
    }

    #[test]
    fn test_personalize_is_idempotent() {
        let base = baseline();
        for horse in ["Bella", "Thunder", "Moonlight", "Storm", "Nonexistent"] {
            let state = demo_state(horse);
            let once = personalize(&state, &base);
            let twice = personalize(&state, &once);
            assert_eq!(once, twice, "double application changed data for {horse}");
        }
    }

    #[test]
    fn test_baseline_is_not_mutated() {
        let base = baseline();
        let snapshot = base.clone();
        let mut data = personalize(&demo_state("Storm"), &base);
        data.horses[0].name = "Edited".to_string();
        data.ai_insights[0].title = "Edited".to_string();
        assert_eq!(base, snapshot);
    }
}
