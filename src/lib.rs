//! Homeboard — personal dashboard engine.
//!
//! Selects the next upcoming calendar event, keeps a live countdown to it,
//! and assembles the dashboard payload (next-event block, upcoming events,
//! maintenance trackers) for a presentation layer. Data sources are a trait
//! seam; bundled sample data stands in for live integrations.

pub mod calendar;
pub mod countdown;
pub mod dashboard;
pub mod error;
pub mod sources;
pub mod state;
pub mod ticker;
pub mod trackers;
pub mod types;

pub use countdown::{next_event, Countdown};
pub use error::DashboardError;
pub use types::{Config, Event};
