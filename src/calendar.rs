//! Calendar source boundary — raw event records into typed `Event`s.
//!
//! Raw records carry the calendar-API shape: `start`/`end` are objects with
//! either a `dateTime` (RFC 3339) or a `date` (all-day, date only). Instants
//! that fail to parse are rejected with `InvalidInstant` — never coerced to
//! "now" or zero.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::DashboardError;
use crate::types::Event;

/// A raw event as delivered by a calendar source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub start: RawEventTime,
    pub end: RawEventTime,
}

/// Start/end wrapper: timed events carry `dateTime`, all-day events `date`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
}

impl RawEventTime {
    fn raw_value(&self) -> &str {
        self.date_time
            .as_deref()
            .or(self.date.as_deref())
            .unwrap_or("")
    }
}

/// Parse an ISO instant string to a `DateTime<Utc>`.
///
/// Accepts full RFC 3339 datetimes and date-only values (all-day events,
/// treated as midnight UTC).
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, DashboardError> {
    let invalid = || DashboardError::InvalidInstant {
        value: s.to_string(),
    };

    if s.is_empty() {
        return Err(invalid());
    }

    if s.contains('T') {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| invalid())
    } else {
        chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
            .ok_or_else(invalid)
    }
}

/// Convert one raw record into a typed `Event`.
///
/// Enforces the `start <= end` invariant; a zero-length event is valid.
pub fn parse_event(raw: &RawEvent) -> Result<Event, DashboardError> {
    let start = parse_instant(raw.start.raw_value())?;
    let end = parse_instant(raw.end.raw_value())?;

    if end < start {
        return Err(DashboardError::InvalidEvent {
            id: raw.id.clone(),
            reason: format!("end {} precedes start {}", end, start),
        });
    }

    Ok(Event {
        id: raw.id.clone(),
        summary: raw
            .summary
            .clone()
            .unwrap_or_else(|| "(No title)".to_string()),
        start,
        end,
    })
}

/// Parse a batch of raw records. The batch is rejected on the first
/// malformed record — partial calendars are worse than an error.
pub fn parse_events(raw: &[RawEvent]) -> Result<Vec<Event>, DashboardError> {
    raw.iter().map(parse_event).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    fn timed(s: &str) -> RawEventTime {
        RawEventTime {
            date_time: Some(s.to_string()),
            date: None,
        }
    }

    #[test]
    fn test_parse_instant_rfc3339_offset() {
        let dt = parse_instant("2026-08-06T09:00:00-05:00").unwrap();
        assert_eq!(dt.hour(), 14); // 9 AM CDT-ish offset = 14:00 UTC
    }

    #[test]
    fn test_parse_instant_z_suffix() {
        let dt = parse_instant("2026-08-06T14:00:00Z").unwrap();
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_parse_instant_date_only_is_midnight_utc() {
        let dt = parse_instant("2026-08-06").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(
            dt.date_naive(),
            chrono::NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
        );
    }

    #[test]
    fn test_parse_instant_rejects_empty() {
        assert!(matches!(
            parse_instant(""),
            Err(DashboardError::InvalidInstant { .. })
        ));
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        for bad in ["not-a-date", "2026-13-45", "2026-08-06T25:00:00Z"] {
            let err = parse_instant(bad).unwrap_err();
            assert!(
                matches!(err, DashboardError::InvalidInstant { ref value } if value == bad),
                "expected InvalidInstant for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_event_end_before_start_rejected() {
        let raw = RawEvent {
            id: "evt-1".to_string(),
            summary: Some("Backwards".to_string()),
            start: timed("2026-08-06T15:00:00Z"),
            end: timed("2026-08-06T14:00:00Z"),
        };
        assert!(matches!(
            parse_event(&raw),
            Err(DashboardError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn test_parse_event_zero_length_allowed() {
        let raw = RawEvent {
            id: "evt-1".to_string(),
            summary: Some("Appointment".to_string()),
            start: timed("2026-08-07T10:00:00Z"),
            end: timed("2026-08-07T10:00:00Z"),
        };
        let event = parse_event(&raw).unwrap();
        assert_eq!(event.start, event.end);
    }

    #[test]
    fn test_parse_event_missing_summary_gets_placeholder() {
        let raw = RawEvent {
            id: "evt-1".to_string(),
            summary: None,
            start: timed("2026-08-06T14:00:00Z"),
            end: timed("2026-08-06T15:00:00Z"),
        };
        assert_eq!(parse_event(&raw).unwrap().summary, "(No title)");
    }

    #[test]
    fn test_raw_event_deserializes_api_shape() {
        let json = r#"{
            "id": "evt-42",
            "summary": "Team Meeting",
            "start": { "dateTime": "2026-08-06T13:00:00Z" },
            "end": { "dateTime": "2026-08-06T14:00:00Z" }
        }"#;
        let raw: RawEvent = serde_json::from_str(json).unwrap();
        let event = parse_event(&raw).unwrap();
        assert_eq!(event.summary, "Team Meeting");
        assert!(event.start < event.end);
    }

    #[test]
    fn test_parse_events_rejects_batch_on_bad_record() {
        let good = RawEvent {
            id: "ok".to_string(),
            summary: None,
            start: timed("2026-08-06T14:00:00Z"),
            end: timed("2026-08-06T15:00:00Z"),
        };
        let bad = RawEvent {
            id: "bad".to_string(),
            summary: None,
            start: timed("soon"),
            end: timed("2026-08-06T15:00:00Z"),
        };
        assert!(parse_events(&[good, bad]).is_err());
    }
}
