//! catalogd - a catalog browsing service backed by a single JSON document
//!
//! Lists, searches and paginates items, serves single items, accepts new
//! ones, and keeps a cached count/average-price aggregate that is
//! invalidated whenever the backing document changes.

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod item_store;
pub mod observability;
pub mod watcher;
