//! Observable events
//!
//! Every log line the service emits names one of these.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    ConfigLoaded,
    ConfigDefaulted,
    ServerStart,
    ServerStop,
    StoreSeeded,

    // Requests
    HttpRequest,

    // Catalog
    ItemCreated,
    ItemNotFound,
    StatsCacheMiss,
    StatsCacheInvalidated,
    StoreReadFailed,
    StoreWriteFailed,

    // Store watching
    StoreWatchStart,
    StoreWatchChange,
    StoreWatchError,
    StoreWatchDisabled,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ConfigDefaulted => "CONFIG_DEFAULTED",
            Event::ServerStart => "SERVER_START",
            Event::ServerStop => "SERVER_STOP",
            Event::StoreSeeded => "STORE_SEEDED",
            Event::HttpRequest => "HTTP_REQUEST",
            Event::ItemCreated => "ITEM_CREATED",
            Event::ItemNotFound => "ITEM_NOT_FOUND",
            Event::StatsCacheMiss => "STATS_CACHE_MISS",
            Event::StatsCacheInvalidated => "STATS_CACHE_INVALIDATED",
            Event::StoreReadFailed => "STORE_READ_FAILED",
            Event::StoreWriteFailed => "STORE_WRITE_FAILED",
            Event::StoreWatchStart => "STORE_WATCH_START",
            Event::StoreWatchChange => "STORE_WATCH_CHANGE",
            Event::StoreWatchError => "STORE_WATCH_ERROR",
            Event::StoreWatchDisabled => "STORE_WATCH_DISABLED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::StoreReadFailed | Event::StoreWriteFailed | Event::StoreWatchError => {
                Severity::Error
            }
            Event::ConfigDefaulted | Event::ItemNotFound | Event::StoreWatchDisabled => {
                Severity::Warn
            }
            Event::StatsCacheMiss | Event::StoreWatchChange => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
