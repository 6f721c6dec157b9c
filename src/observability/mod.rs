//! Observability subsystem
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and request events
//! - Lock-free counters
//!
//! # Usage
//!
//! ```ignore
//! use catalogd::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::ItemCreated, &[("id", "1718000000000")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_items_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
