//! Next-event selection and countdown formatting.
//!
//! The two pure functions at the heart of the dashboard: pick the soonest
//! strictly-future event from a collection, and break the time remaining
//! until it down into whole days/hours/minutes/seconds.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::Event;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

/// Remaining time until a target instant, in non-overlapping whole units.
///
/// `hours` is in `[0, 23]`, `minutes` and `seconds` in `[0, 59]`, `days`
/// unbounded. All fields are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Countdown {
    /// The target instant is strictly in the past.
    Passed,
    /// Whole-unit breakdown of the remaining duration.
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
}

impl Countdown {
    /// Compute the countdown from `now` to `target`.
    ///
    /// A target strictly before `now` is `Passed`. A target exactly at `now`
    /// is an all-zero breakdown — on the rendered dashboard the event is
    /// "due now", not gone.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if target < now {
            return Countdown::Passed;
        }

        let distance = (target - now).num_seconds();
        Countdown::Remaining {
            days: distance / SECS_PER_DAY,
            hours: (distance % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (distance % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: distance % SECS_PER_MINUTE,
        }
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Countdown::Passed => write!(f, "Event has passed"),
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => write!(f, "{}d {}h {}m {}s", days, hours, minutes, seconds),
        }
    }
}

/// Select the next upcoming event: the one with the earliest `start`
/// strictly later than `now`.
///
/// Ties on `start` keep their input order (stable sort), so the event that
/// appeared first in the collection wins. Returns `None` when every event
/// has already started.
pub fn next_event(events: &[Event], now: DateTime<Utc>) -> Option<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().collect();
    upcoming.sort_by_key(|e| e.start);
    upcoming.into_iter().find(|e| e.start > now)
}
