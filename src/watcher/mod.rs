//! # Store Watcher
//!
//! Watches the backing document for changes made outside this process (an
//! editor, a deploy script, another instance) and fires a callback, which
//! the server uses to invalidate the stats cache.
//!
//! The directory holding the document is watched rather than the file
//! itself: atomic saves replace the file by rename, which would orphan a
//! watch on the old inode. Access events are ignored so the service's own
//! reads never count as changes.
//!
//! Writes made through the service invalidate the cache directly; the
//! watcher only closes the gap for external edits, and does so
//! asynchronously.

use std::path::{Path, PathBuf};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event as LogEvent};

/// Result type for watcher setup
pub type WatchResult<T> = Result<T, WatchError>;

#[derive(Debug, Error)]
pub enum WatchError {
    /// The watched path has no usable parent directory
    #[error("Cannot watch {0}: no parent directory")]
    NoParent(String),

    /// The OS watcher could not be created or registered
    #[error("Watcher error: {0}")]
    Notify(#[from] notify::Error),
}

/// Live watch on one store document
///
/// Dropping it stops the watch.
pub struct StoreWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
}

impl std::fmt::Debug for StoreWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreWatcher")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl StoreWatcher {
    /// Start watching `path`, calling `on_change` for every relevant event
    ///
    /// `on_change` runs on the watcher's own thread.
    pub fn start<F>(path: &Path, on_change: F) -> WatchResult<Self>
    where
        F: Fn() + Send + 'static,
    {
        let dir = watch_dir(path)?;
        let target = path.to_path_buf();
        let target_for_handler = target.clone();

        let mut watcher = RecommendedWatcher::new(
            move |result: notify::Result<Event>| match result {
                Ok(event) => {
                    if is_relevant(&event, &target_for_handler) {
                        log_event_with_fields(
                            LogEvent::StoreWatchChange,
                            &[("kind", format!("{:?}", event.kind).as_str())],
                        );
                        on_change();
                    }
                }
                Err(err) => {
                    log_event_with_fields(
                        LogEvent::StoreWatchError,
                        &[("error", err.to_string().as_str())],
                    );
                }
            },
            Config::default(),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        log_event_with_fields(
            LogEvent::StoreWatchStart,
            &[("path", target.display().to_string().as_str())],
        );

        Ok(Self {
            path: target,
            _watcher: watcher,
        })
    }

    /// Document being watched
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn watch_dir(path: &Path) -> WatchResult<PathBuf> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(WatchError::NoParent(path.display().to_string())),
    }
}

/// Whether `event` means `target` may have changed
pub fn is_relevant(event: &Event, target: &Path) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }

    let Some(target_name) = target.file_name() else {
        return false;
    };
    event
        .paths
        .iter()
        .any(|p| p.file_name() == Some(target_name))
}
