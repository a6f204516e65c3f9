//! Coordinating state for the dashboard engine.
//!
//! The selected next event and its live countdown are owned here, behind
//! explicit locks — one coordinating unit, no shared mutable globals. Also
//! owns config loading from ~/.homeboard/config.json.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use crate::countdown::{next_event, Countdown};
use crate::error::DashboardError;
use crate::ticker::Ticker;
use crate::trackers::TrackerCategory;
use crate::types::{Config, Event};

/// Application state shared across tasks.
pub struct AppState {
    pub config: Mutex<Config>,
    pub events: Mutex<Vec<Event>>,
    pub trackers: Mutex<Vec<TrackerCategory>>,
    ticker: Mutex<Option<Ticker>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Mutex::new(config),
            events: Mutex::new(Vec::new()),
            trackers: Mutex::new(Vec::new()),
            ticker: Mutex::new(None),
        }
    }

    /// Replace the event collection and retarget the countdown ticker.
    ///
    /// The previous ticker is dropped — and thereby cancelled — on every
    /// path where the selected event changes or disappears. When the
    /// selection is unchanged the running ticker is left alone.
    pub fn set_events(&self, events: Vec<Event>) {
        let selected = next_event(&events, Utc::now()).cloned();

        if let Ok(mut guard) = self.events.lock() {
            *guard = events;
        }

        let cadence = self.tick_cadence();
        if let Ok(mut guard) = self.ticker.lock() {
            let unchanged = match (guard.as_ref(), selected.as_ref()) {
                (Some(current), Some(event)) => current.event_id() == event.id,
                _ => false,
            };
            if unchanged {
                return;
            }

            match selected {
                Some(event) => {
                    log::info!("Next event: '{}' at {}", event.summary, event.start);
                    *guard = Some(Ticker::spawn(event, cadence));
                }
                None => {
                    if guard.is_some() {
                        log::info!("No upcoming event; stopping countdown");
                    }
                    *guard = None;
                }
            }
        }
    }

    /// Replace the tracker categories.
    pub fn set_trackers(&self, trackers: Vec<TrackerCategory>) {
        if let Ok(mut guard) = self.trackers.lock() {
            *guard = trackers;
        }
    }

    /// The event the ticker is currently counting down to.
    pub fn selected_event(&self) -> Option<Event> {
        let id = self
            .ticker
            .lock()
            .ok()?
            .as_ref()
            .map(|t| t.event_id().to_string())?;
        self.events
            .lock()
            .ok()?
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    /// Latest countdown for the selected event, if one is selected.
    pub fn current_countdown(&self) -> Option<Countdown> {
        self.ticker
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.latest()))
    }

    /// Subscribe to countdown updates for the selected event.
    pub fn subscribe_countdown(&self) -> Option<watch::Receiver<Countdown>> {
        self.ticker
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.subscribe()))
    }

    /// Stop the ticker on view teardown. Safe to call repeatedly.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.ticker.lock() {
            if guard.take().is_some() {
                log::debug!("Countdown ticker released");
            }
        }
    }

    fn tick_cadence(&self) -> Duration {
        let secs = self.config.lock().map(|c| c.tick_secs).unwrap_or(1);
        // A zero cadence would busy-spin the interval.
        Duration::from_secs(secs.max(1))
    }
}

/// Get the canonical config file path (~/.homeboard/config.json)
pub fn config_path() -> Result<PathBuf, DashboardError> {
    let home = dirs::home_dir()
        .ok_or_else(|| DashboardError::Config("Could not find home directory".to_string()))?;
    Ok(home.join(".homeboard").join("config.json"))
}

/// Load configuration from ~/.homeboard/config.json.
///
/// A missing file is not an error — the engine runs with defaults until the
/// user writes one. A present-but-malformed file is rejected.
pub fn load_config() -> Result<Config, DashboardError> {
    load_config_from(&config_path()?)
}

fn load_config_from(path: &Path) -> Result<Config, DashboardError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| DashboardError::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;
    use tokio::time::timeout;

    use super::*;

    fn make_event(id: &str, start: chrono::DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            summary: format!("Event {}", id),
            start,
            end: start + ChronoDuration::hours(1),
        }
    }

    #[tokio::test]
    async fn test_set_events_selects_and_starts_ticker() {
        let state = AppState::new(Config::default());
        let soon = make_event("soon", Utc::now() + ChronoDuration::minutes(30));
        let later = make_event("later", Utc::now() + ChronoDuration::hours(2));

        state.set_events(vec![later, soon.clone()]);

        assert_eq!(state.selected_event().unwrap().id, "soon");
        assert!(matches!(
            state.current_countdown(),
            Some(Countdown::Remaining { .. })
        ));
    }

    #[tokio::test]
    async fn test_set_events_empty_stops_ticker() {
        let state = AppState::new(Config::default());
        state.set_events(vec![make_event("a", Utc::now() + ChronoDuration::hours(1))]);
        assert!(state.current_countdown().is_some());

        state.set_events(Vec::new());
        assert!(state.current_countdown().is_none());
        assert!(state.selected_event().is_none());
    }

    #[tokio::test]
    async fn test_retarget_cancels_previous_ticker() {
        let state = AppState::new(Config::default());
        let first = make_event("first", Utc::now() + ChronoDuration::hours(1));
        state.set_events(vec![first.clone()]);
        let mut old_rx = state.subscribe_countdown().expect("ticker running");

        // A sooner event arrives — the selection changes, the old task dies.
        let sooner = make_event("sooner", Utc::now() + ChronoDuration::minutes(10));
        state.set_events(vec![first, sooner]);
        assert_eq!(state.selected_event().unwrap().id, "sooner");

        loop {
            match timeout(Duration::from_secs(5), old_rx.changed())
                .await
                .expect("old channel should close")
            {
                Ok(()) => continue,
                Err(_) => break,
            }
        }
    }

    #[tokio::test]
    async fn test_unchanged_selection_keeps_ticker() {
        let state = AppState::new(Config::default());
        let event = make_event("a", Utc::now() + ChronoDuration::hours(1));
        state.set_events(vec![event.clone()]);
        let rx = state.subscribe_countdown().expect("ticker running");

        state.set_events(vec![event]);

        // Same selection — the original channel is still open.
        assert!(rx.has_changed().is_ok());
        assert_eq!(state.selected_event().unwrap().id, "a");
    }

    #[tokio::test]
    async fn test_shutdown_releases_ticker() {
        let state = AppState::new(Config::default());
        state.set_events(vec![make_event("a", Utc::now() + ChronoDuration::hours(1))]);
        let rx = state.subscribe_countdown().expect("ticker running");

        state.shutdown();
        state.shutdown(); // idempotent

        assert!(state.current_countdown().is_none());
        let mut rx = rx;
        loop {
            match timeout(Duration::from_secs(5), rx.changed())
                .await
                .expect("channel should close")
            {
                Ok(()) => continue,
                Err(_) => break,
            }
        }
    }

    #[test]
    fn test_load_config_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.tick_secs, 1);
    }

    #[test]
    fn test_load_config_parses_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "timezone": "Europe/Berlin", "tickSecs": 5 }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.timezone, "Europe/Berlin");
        assert_eq!(config.tick_secs, 5);
    }

    #[test]
    fn test_load_config_malformed_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(DashboardError::Config(_))
        ));
    }
}
