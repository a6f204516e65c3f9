//! Dashboard payload assembly.
//!
//! Pure projection of engine state into the serializable payload a
//! presentation layer renders: the next-event block with its countdown, the
//! upcoming-events list with display times, and tracker cards.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::countdown::{next_event, Countdown};
use crate::trackers::TrackerCategory;
use crate::types::Event;

/// The next-event block: target summary plus rendered countdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextEventBlock {
    pub id: String,
    pub summary: String,
    pub countdown: String,
}

/// One row of the upcoming-events list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRow {
    pub id: String,
    pub summary: String,
    pub time_range: String,
}

/// One entry on a tracker card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerLine {
    pub name: String,
    pub detail: String,
}

/// One tracker card: category title plus item display lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerCard {
    pub title: String,
    pub lines: Vec<TrackerLine>,
}

/// Complete dashboard payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_event: Option<NextEventBlock>,
    pub events: Vec<EventRow>,
    pub trackers: Vec<TrackerCard>,
}

/// Format a UTC instant as a display time like "9:00 AM" in the given timezone.
pub fn format_time_display(dt: DateTime<Utc>, tz: &Tz) -> String {
    dt.with_timezone(tz).format("%-I:%M %p").to_string()
}

/// Assemble the dashboard payload for one evaluation cycle.
///
/// Pure function of its inputs; the live refresh loop re-renders only the
/// countdown string, everything else holds until the sources change.
pub fn build(
    events: &[Event],
    trackers: &[TrackerCategory],
    now: DateTime<Utc>,
    tz: &Tz,
) -> DashboardData {
    let next = next_event(events, now).map(|e| NextEventBlock {
        id: e.id.clone(),
        summary: e.summary.clone(),
        countdown: Countdown::until(e.start, now).to_string(),
    });

    let rows = events
        .iter()
        .map(|e| EventRow {
            id: e.id.clone(),
            summary: e.summary.clone(),
            time_range: format!(
                "{} - {}",
                format_time_display(e.start, tz),
                format_time_display(e.end, tz)
            ),
        })
        .collect();

    let cards = trackers
        .iter()
        .map(|category| TrackerCard {
            title: category.title.clone(),
            lines: category
                .items
                .iter()
                .map(|item| TrackerLine {
                    name: item.name().to_string(),
                    detail: item.detail_line(),
                })
                .collect(),
        })
        .collect();

    DashboardData {
        next_event: next,
        events: rows,
        trackers: cards,
    }
}
