use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// A calendar event from an external calendar source.
///
/// Immutable once parsed; `start <= end` is enforced at the boundary
/// (see `calendar::parse_event`). Lifecycle is one evaluation cycle:
/// materialized from a source, rendered, discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Configuration stored in ~/.homeboard/config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// IANA timezone used for display times ("9:00 AM" rendering).
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Countdown refresh cadence in seconds.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_tick_secs() -> u64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            tick_secs: default_tick_secs(),
        }
    }
}

impl Config {
    /// Resolve the configured display timezone.
    pub fn display_tz(&self) -> Result<Tz, DashboardError> {
        self.timezone
            .parse()
            .map_err(|_| DashboardError::Config(format!("Invalid timezone: {}", self.timezone)))
    }
}
