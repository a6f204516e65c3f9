//! Source seam for dashboard data.
//!
//! The engine consumes already-materialized collections; fetching lives
//! behind these traits. `SampleData` stands in for the live calendar client
//! and the email-derived tracker parser until those integrations land.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::calendar::{RawEvent, RawEventTime};
use crate::error::DashboardError;
use crate::trackers::{TrackerCategory, TrackerItem};

/// Supplies raw calendar events for the upcoming window.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<RawEvent>, DashboardError>;
}

/// Supplies tracker categories.
#[async_trait]
pub trait TrackerSource: Send + Sync {
    async fn fetch_trackers(&self) -> Result<Vec<TrackerCategory>, DashboardError>;
}

/// Built-in sample dataset: three events relative to now and four tracker
/// categories, shaped like what a connected account typically shows.
pub struct SampleData;

#[async_trait]
impl CalendarSource for SampleData {
    async fn fetch_events(&self) -> Result<Vec<RawEvent>, DashboardError> {
        let now = Utc::now();
        Ok(vec![
            sample_event("Team Meeting", now + Duration::hours(1), now + Duration::hours(2)),
            sample_event(
                "Lunch with Sarah",
                now + Duration::hours(3),
                now + Duration::hours(4),
            ),
            sample_event(
                "Doctor's Appointment",
                now + Duration::days(1),
                now + Duration::days(1),
            ),
        ])
    }
}

#[async_trait]
impl TrackerSource for SampleData {
    async fn fetch_trackers(&self) -> Result<Vec<TrackerCategory>, DashboardError> {
        Ok(vec![
            TrackerCategory {
                title: "Home Maintenance".to_string(),
                items: vec![
                    maintenance("HVAC Air Filter", date(2026, 7, 1), date(2026, 10, 1)),
                    maintenance(
                        "Smoke Detector Batteries",
                        date(2026, 6, 15),
                        date(2026, 12, 15),
                    ),
                ],
            },
            TrackerCategory {
                title: "Car Maintenance".to_string(),
                items: vec![
                    maintenance("Oil Change", date(2026, 5, 20), date(2026, 11, 20)),
                    maintenance("Tire Rotation", date(2026, 5, 20), date(2026, 11, 20)),
                ],
            },
            TrackerCategory {
                title: "Personal Health".to_string(),
                items: vec![
                    maintenance("Annual Check-up", date(2026, 3, 10), date(2027, 3, 10)),
                    maintenance("Tetanus Vaccine", date(2017, 8, 22), date(2027, 8, 22)),
                ],
            },
            TrackerCategory {
                title: "Deliveries".to_string(),
                items: vec![TrackerItem::Delivery {
                    id: Uuid::new_v4().to_string(),
                    name: "New Laptop".to_string(),
                    status: "Out for delivery".to_string(),
                    eta: date(2026, 8, 21),
                }],
            },
        ])
    }
}

fn sample_event(summary: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> RawEvent {
    RawEvent {
        id: Uuid::new_v4().to_string(),
        summary: Some(summary.to_string()),
        start: RawEventTime {
            date_time: Some(start.to_rfc3339()),
            date: None,
        },
        end: RawEventTime {
            date_time: Some(end.to_rfc3339()),
            date: None,
        },
    }
}

fn maintenance(name: &str, last: NaiveDate, next: NaiveDate) -> TrackerItem {
    TrackerItem::Maintenance {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        last,
        next,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid sample date")
}
