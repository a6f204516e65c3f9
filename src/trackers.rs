//! Maintenance-tracker model — named categories of tracked items.
//!
//! Items come from an external record parser (email-derived in the full
//! product); this crate only consumes already-materialized records. An item
//! is either a maintenance pair (last service / next due) or a delivery
//! (status / ETA). Records matching neither shape are rejected at
//! deserialization. No computed logic — the dashboard renders these as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single tracked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackerItem {
    #[serde(rename_all = "camelCase")]
    Maintenance {
        id: String,
        name: String,
        last: NaiveDate,
        next: NaiveDate,
    },
    #[serde(rename_all = "camelCase")]
    Delivery {
        id: String,
        name: String,
        status: String,
        eta: NaiveDate,
    },
}

impl TrackerItem {
    pub fn id(&self) -> &str {
        match self {
            TrackerItem::Maintenance { id, .. } | TrackerItem::Delivery { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TrackerItem::Maintenance { name, .. } | TrackerItem::Delivery { name, .. } => name,
        }
    }

    /// The secondary display line for a tracker card entry.
    pub fn detail_line(&self) -> String {
        match self {
            TrackerItem::Maintenance { last, next, .. } => {
                format!("Last: {} | Next: {}", last, next)
            }
            TrackerItem::Delivery { status, eta, .. } => {
                format!("Status: {} | ETA: {}", status, eta)
            }
        }
    }
}

/// A named group of tracked items ("Home Maintenance", "Deliveries", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerCategory {
    pub title: String,
    pub items: Vec<TrackerItem>,
}
