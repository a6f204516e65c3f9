//! Homeboard binary — load config, materialize dashboard data from the
//! bundled sample sources, print the payload, then run the live countdown
//! loop until the next event starts.

use std::sync::Arc;

use chrono::Utc;

use homeboard::countdown::Countdown;
use homeboard::dashboard;
use homeboard::error::DashboardError;
use homeboard::sources::{CalendarSource, SampleData, TrackerSource};
use homeboard::state::{load_config, AppState};

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DashboardError> {
    let config = load_config()?;
    let tz = config.display_tz()?;
    let state = Arc::new(AppState::new(config));

    // Sample sources stand in for the live calendar client and the
    // email-derived tracker parser.
    let source = SampleData;
    let raw = source.fetch_events().await?;
    let events = homeboard::calendar::parse_events(&raw)?;
    let trackers = source.fetch_trackers().await?;

    log::info!(
        "Loaded {} events, {} tracker categories",
        events.len(),
        trackers.len()
    );

    state.set_trackers(trackers);
    state.set_events(events);

    // One-shot payload for the presentation layer.
    {
        let events = state.events.lock().map_err(|_| poisoned())?.clone();
        let trackers = state.trackers.lock().map_err(|_| poisoned())?.clone();
        let payload = dashboard::build(&events, &trackers, Utc::now(), &tz);
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Failed to serialize dashboard payload: {}", e),
        }
    }

    // Live countdown loop: log each refresh until the event starts.
    if let Some(selected) = state.selected_event() {
        log::info!("Counting down to '{}'", selected.summary);

        if let Some(mut rx) = state.subscribe_countdown() {
            loop {
                let countdown = *rx.borrow();
                match countdown {
                    Countdown::Passed => {
                        log::info!("'{}' has started", selected.summary);
                        break;
                    }
                    remaining => log::info!("{} in {}", selected.summary, remaining),
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    }

    state.shutdown();
    Ok(())
}

fn poisoned() -> DashboardError {
    DashboardError::Config("State lock poisoned".to_string())
}
