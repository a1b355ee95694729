//! Fixture store - the compiled-in baseline dataset.
//!
//! This is the data the offline demo starts from: four horses, five schedule events,
//! three invoices, five inventory items and four AI insights. The personalizer
//! transforms it and the dashboard falls back to it when remote fetches fail.
//! Every call to `baseline` builds a fresh, independently owned copy.

use crate::entities::{
    AiInsight, EventType, FeedingPlan, HealthStatus, Horse, InsightPriority, InsightType,
    InventoryCategory, InventoryItem, Invoice, InvoiceStatus, LineItem, Priority, RelatedEntity,
    RelatedEntityType, ScheduleEvent,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The five collections the dashboard renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Horse roster, primary horse first once personalized
    pub horses: Vec<Horse>,
    /// Calendar events
    pub schedule_events: Vec<ScheduleEvent>,
    /// Native invoices
    pub invoices: Vec<Invoice>,
    /// Stock on hand
    pub inventory: Vec<InventoryItem>,
    /// Canned suggestions
    pub ai_insights: Vec<AiInsight>,
}

/// Builds the baseline dataset.
#[must_use]
pub fn baseline() -> Dataset {
    Dataset {
        horses: horses(),
        schedule_events: schedule_events(),
        invoices: invoices(),
        inventory: inventory(),
        ai_insights: ai_insights(),
    }
}

// Fixture literals below are checked by the tests in this module.
#[allow(clippy::expect_used)]
fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid")
}

#[allow(clippy::expect_used)]
fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("fixture times are valid")
}

#[allow(clippy::expect_used)]
fn instant(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("fixture timestamps are valid")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[allow(clippy::too_many_lines)]
fn horses() -> Vec<Horse> {
    vec![
        Horse {
            id: "1".to_string(),
            name: "Bella".to_string(),
            breed: "Quarter Horse".to_string(),
            age: 10,
            color: "Bay".to_string(),
            owner: "Sarah Johnson".to_string(),
            boarding_rate: 850.0,
            health_status: HealthStatus::NeedsAttention,
            last_vet_visit: day(2024, 6, 15),
            last_farrier_visit: day(2024, 5, 10),
            feeding: FeedingPlan {
                hay: "3 flakes, 2x daily".to_string(),
                grain: "2 cups sweet feed, 2x daily".to_string(),
                supplements: strings(&["Joint Support", "Vitamin E"]),
            },
            notes: "Gentle mare, good with beginners. Needs farrier visit soon.".to_string(),
        },
        Horse {
            id: "2".to_string(),
            name: "Thunder".to_string(),
            breed: "Thoroughbred".to_string(),
            age: 8,
            color: "Dark Bay".to_string(),
            owner: "Mike Rodriguez".to_string(),
            boarding_rate: 950.0,
            health_status: HealthStatus::Excellent,
            last_vet_visit: day(2024, 7, 1),
            last_farrier_visit: day(2024, 6, 20),
            feeding: FeedingPlan {
                hay: "4 flakes, 3x daily".to_string(),
                grain: "3 cups performance feed, 2x daily".to_string(),
                supplements: strings(&["Electrolytes", "Probiotics"]),
            },
            notes: "High energy, excellent jumping prospect. Regular exercise needed."
                .to_string(),
        },
        Horse {
            id: "3".to_string(),
            name: "Moonlight".to_string(),
            breed: "Arabian".to_string(),
            age: 12,
            color: "Gray".to_string(),
            owner: "Emma Chen".to_string(),
            boarding_rate: 800.0,
            health_status: HealthStatus::Good,
            last_vet_visit: day(2024, 6, 28),
            last_farrier_visit: day(2024, 6, 18),
            feeding: FeedingPlan {
                hay: "2 flakes, 2x daily".to_string(),
                grain: "1.5 cups senior feed, 2x daily".to_string(),
                supplements: strings(&["Senior Support", "Omega-3"]),
            },
            notes: "Senior mare, very calm temperament. Great for trail rides.".to_string(),
        },
        Horse {
            id: "4".to_string(),
            name: "Storm".to_string(),
            breed: "Paint Horse".to_string(),
            age: 6,
            color: "Pinto".to_string(),
            owner: "David Wilson".to_string(),
            boarding_rate: 875.0,
            health_status: HealthStatus::Good,
            last_vet_visit: day(2024, 7, 5),
            last_farrier_visit: day(2024, 6, 25),
            feeding: FeedingPlan {
                hay: "3 flakes, 2x daily".to_string(),
                grain: "2.5 cups feed, 2x daily".to_string(),
                supplements: strings(&["Biotin", "Joint Support"]),
            },
            notes: "Friendly gelding, enjoys ground work and trail riding.".to_string(),
        },
    ]
}

fn schedule_events() -> Vec<ScheduleEvent> {
    vec![
        ScheduleEvent {
            id: "1".to_string(),
            title: "Bella - Lesson with Sarah".to_string(),
            event_type: EventType::Lesson,
            horse_id: Some("1".to_string()),
            start_time: time(9, 0),
            end_time: time(10, 0),
            date: day(2024, 7, 22),
            instructor: Some("Lisa Anderson".to_string()),
            notes: None,
            priority: Priority::Medium,
        },
        ScheduleEvent {
            id: "2".to_string(),
            title: "Thunder - Vet Checkup".to_string(),
            event_type: EventType::Vet,
            horse_id: Some("2".to_string()),
            start_time: time(14, 0),
            end_time: time(15, 0),
            date: day(2024, 7, 22),
            instructor: None,
            notes: Some("Annual physical and vaccinations".to_string()),
            priority: Priority::High,
        },
        ScheduleEvent {
            id: "3".to_string(),
            title: "Morning Feeding".to_string(),
            event_type: EventType::Feeding,
            horse_id: None,
            start_time: time(7, 0),
            end_time: time(8, 0),
            date: day(2024, 7, 22),
            instructor: None,
            notes: None,
            priority: Priority::High,
        },
        ScheduleEvent {
            id: "4".to_string(),
            title: "Moonlight - Farrier Visit".to_string(),
            event_type: EventType::Farrier,
            horse_id: Some("3".to_string()),
            start_time: time(11, 0),
            end_time: time(12, 0),
            date: day(2024, 7, 23),
            instructor: None,
            notes: None,
            priority: Priority::Medium,
        },
        ScheduleEvent {
            id: "5".to_string(),
            title: "Storm - Exercise Session".to_string(),
            event_type: EventType::Exercise,
            horse_id: Some("4".to_string()),
            start_time: time(16, 0),
            end_time: time(17, 0),
            date: day(2024, 7, 23),
            instructor: None,
            notes: None,
            priority: Priority::Low,
        },
    ]
}

fn invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: "INV-2024-001".to_string(),
            client_name: "Sarah Johnson".to_string(),
            horse_names: strings(&["Bella"]),
            issue_date: day(2024, 7, 1),
            due_date: day(2024, 7, 31),
            total: 985.0,
            status: InvoiceStatus::Pending,
            items: vec![
                LineItem::new("Monthly Boarding - Bella", 1.0, 850.0),
                LineItem::new("Farrier Service", 1.0, 135.0),
            ],
        },
        Invoice {
            id: "INV-2024-002".to_string(),
            client_name: "Mike Rodriguez".to_string(),
            horse_names: strings(&["Thunder"]),
            issue_date: day(2024, 7, 1),
            due_date: day(2024, 7, 31),
            total: 1150.0,
            status: InvoiceStatus::Paid,
            items: vec![
                LineItem::new("Monthly Boarding - Thunder", 1.0, 950.0),
                LineItem::new("Training Sessions (4)", 4.0, 50.0),
            ],
        },
        Invoice {
            id: "INV-2024-003".to_string(),
            client_name: "Emma Chen".to_string(),
            horse_names: strings(&["Moonlight"]),
            issue_date: day(2024, 6, 1),
            due_date: day(2024, 6, 30),
            total: 800.0,
            status: InvoiceStatus::Overdue,
            items: vec![LineItem::new("Monthly Boarding - Moonlight", 1.0, 800.0)],
        },
    ]
}

fn inventory() -> Vec<InventoryItem> {
    let item = |id: &str,
                name: &str,
                category: InventoryCategory,
                (current_stock, min_stock): (f64, f64),
                unit: &str,
                cost_per_unit: f64,
                supplier: &str,
                last_restocked: NaiveDate| InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        category,
        current_stock,
        min_stock,
        unit: unit.to_string(),
        cost_per_unit,
        supplier: supplier.to_string(),
        last_restocked,
    };

    vec![
        item(
            "1",
            "Timothy Hay",
            InventoryCategory::Feed,
            (15.0, 25.0),
            "bales",
            12.50,
            "Green Valley Farms",
            day(2024, 7, 10),
        ),
        item(
            "2",
            "Sweet Feed",
            InventoryCategory::Feed,
            (8.0, 12.0),
            "bags",
            18.75,
            "Purina Mills",
            day(2024, 7, 5),
        ),
        item(
            "3",
            "Pine Shavings",
            InventoryCategory::Bedding,
            (35.0, 20.0),
            "bales",
            8.25,
            "Mountain Bedding Co",
            day(2024, 7, 15),
        ),
        item(
            "4",
            "Joint Support Supplement",
            InventoryCategory::Supplements,
            (5.0, 8.0),
            "containers",
            45.00,
            "EquiHealth Solutions",
            day(2024, 6, 20),
        ),
        item(
            "5",
            "Electrolyte Powder",
            InventoryCategory::Supplements,
            (12.0, 6.0),
            "containers",
            28.50,
            "EquiHealth Solutions",
            day(2024, 7, 12),
        ),
    ]
}

fn ai_insights() -> Vec<AiInsight> {
    let related = |entity_type, id: &str, name: &str| {
        Some(RelatedEntity {
            entity_type,
            id: id.to_string(),
            name: name.to_string(),
        })
    };

    vec![
        AiInsight {
            id: "1".to_string(),
            insight_type: InsightType::Health,
            priority: InsightPriority::High,
            title: "Farrier Visit Overdue".to_string(),
            description: "Bella hasn't had a farrier visit in 6 weeks. Recommended interval \
                          is 4-6 weeks for optimal hoof health."
                .to_string(),
            action_required: true,
            suggested_action: Some("Schedule farrier appointment within the next week".to_string()),
            related_entity: related(RelatedEntityType::Horse, "1", "Bella"),
            created_at: instant(2024, 7, 20, 10, 30),
        },
        AiInsight {
            id: "2".to_string(),
            insight_type: InsightType::Inventory,
            priority: InsightPriority::Medium,
            title: "Low Hay Inventory".to_string(),
            description: "Timothy hay stock (15 bales) is below minimum threshold (25 bales). \
                          Consider reordering to avoid shortage."
                .to_string(),
            action_required: true,
            suggested_action: Some("Order 30-40 bales from Green Valley Farms".to_string()),
            related_entity: related(RelatedEntityType::Inventory, "1", "Timothy Hay"),
            created_at: instant(2024, 7, 21, 8, 15),
        },
        AiInsight {
            id: "3".to_string(),
            insight_type: InsightType::Billing,
            priority: InsightPriority::Medium,
            title: "Overdue Invoice".to_string(),
            description: "Emma Chen's invoice (INV-2024-003) for $800 is now 22 days overdue."
                .to_string(),
            action_required: true,
            suggested_action: Some(
                "Send payment reminder or schedule payment discussion".to_string(),
            ),
            related_entity: related(RelatedEntityType::Horse, "3", "Moonlight"),
            created_at: instant(2024, 7, 19, 14, 20),
        },
        AiInsight {
            id: "4".to_string(),
            insight_type: InsightType::Scheduling,
            priority: InsightPriority::Low,
            title: "Optimal Exercise Schedule".to_string(),
            description: "Thunder has high energy and would benefit from more frequent \
                          exercise sessions. Current schedule: 3x/week."
                .to_string(),
            action_required: false,
            suggested_action: Some(
                "Consider increasing exercise to 4-5 sessions per week".to_string(),
            ),
            related_entity: related(RelatedEntityType::Horse, "2", "Thunder"),
            created_at: instant(2024, 7, 18, 16, 45),
        },
    ]
}
