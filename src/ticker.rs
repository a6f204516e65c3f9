//! Countdown ticker — scoped periodic refresh for the selected next event.
//!
//! One ticker exists per selected event. Each tick recomputes the countdown
//! from the live wall clock (latest tick wins, no accumulated state) and
//! publishes it on a watch channel. The task is a scoped resource: `stop()`
//! and `Drop` both cancel it, so retargeting or tearing the view down never
//! leaks a timer.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::countdown::Countdown;
use crate::types::Event;

/// Handle to the repeating countdown task for one selected event.
pub struct Ticker {
    event_id: String,
    rx: watch::Receiver<Countdown>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn the repeating task for `event`, recomputing every `cadence`.
    ///
    /// The initial countdown is published synchronously, so `latest()` is
    /// meaningful before the first tick. Must be called within a tokio
    /// runtime.
    pub fn spawn(event: Event, cadence: Duration) -> Self {
        let initial = Countdown::until(event.start, Utc::now());
        let (tx, rx) = watch::channel(initial);
        let event_id = event.id.clone();

        log::debug!(
            "Ticker started for '{}' (start {}, cadence {:?})",
            event.summary,
            event.start,
            cadence
        );

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(cadence);
            // No catch-up bursts after a stall; every tick recomputes from
            // the live clock anyway.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately and the initial
            // value is already published — skip it.
            interval.tick().await;

            let mut passed_logged = false;
            loop {
                interval.tick().await;
                let countdown = Countdown::until(event.start, Utc::now());
                if countdown == Countdown::Passed && !passed_logged {
                    log::debug!("'{}' has started; countdown passed", event.summary);
                    passed_logged = true;
                }
                if tx.send(countdown).is_err() {
                    // Every receiver is gone — nothing is displaying this.
                    return;
                }
            }
        });

        Self {
            event_id,
            rx,
            handle,
        }
    }

    /// Id of the event this ticker tracks.
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Subscribe to countdown updates.
    pub fn subscribe(&self) -> watch::Receiver<Countdown> {
        self.rx.clone()
    }

    /// Latest published countdown.
    pub fn latest(&self) -> Countdown {
        *self.rx.borrow()
    }

    /// Cancel the repeating task. Idempotent; also runs on drop.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
