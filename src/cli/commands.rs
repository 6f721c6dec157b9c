//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::catalog::{invalidate, seed_store, CatalogService};
use crate::http_server::HttpServer;
use crate::item_store::{ItemStore, JsonFileStore};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::watcher::StoreWatcher;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config, force } => init(&config, force),
        Command::Serve { config, port } => serve(&config, port),
        Command::Stats { config } => stats(&config),
    }
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);
    Ok(config)
}

/// Write the seed collection to `<data_dir>/items.json`
///
/// Refuses to replace an existing document unless `force` is set.
pub fn init(config_path: &Path, force: bool) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = JsonFileStore::in_dir(config.data_path());

    if store.path().exists() && !force {
        return Err(CliError::already_initialized(store.path().display()));
    }

    let count = seed_store(&store)?;
    log_event_with_fields(
        Event::StoreSeeded,
        &[
            ("items", count.to_string().as_str()),
            ("path", store.path().display().to_string().as_str()),
        ],
    );

    write_json(&serde_json::json!({ "initialized": true, "items": count }))
}

/// Serve the HTTP API until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let catalog = Arc::new(build_service(&config));

    // Held for the lifetime of the server; dropping it stops the watch.
    let _watcher = start_watcher(&config, &catalog);

    let server = HttpServer::with_config(config.http.clone(), catalog);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Compute stats from the store and print them
pub fn stats(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let catalog = build_service(&config);

    let snapshot = catalog.stats()?;
    write_json(&*snapshot)
}

/// Catalog service over the configured JSON file
pub fn build_service(config: &Config) -> CatalogService {
    let store: Arc<dyn ItemStore> = Arc::new(JsonFileStore::in_dir(config.data_path()));
    CatalogService::new(store).with_default_page_size(config.default_page_size)
}

/// Start the store watcher if enabled
///
/// A watcher that cannot start is logged and skipped: the write path still
/// invalidates the cache, only external edits go unnoticed.
fn start_watcher(config: &Config, catalog: &CatalogService) -> Option<StoreWatcher> {
    if !config.watch_store {
        log_event_with_fields(Event::StoreWatchDisabled, &[("reason", "config")]);
        return None;
    }

    let path = config.items_path();
    let cache = catalog.stats_cache();
    let metrics = catalog.metrics();

    match StoreWatcher::start(&path, move || invalidate(&cache, &metrics, "watcher")) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            log_event_with_fields(
                Event::StoreWatchError,
                &[("error", e.to_string().as_str())],
            );
            None
        }
    }
}

fn write_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("catalogd.json");
        let body = serde_json::json!({
            "data_dir": dir.join("data").display().to_string(),
            "watch_store": false
        });
        fs::write(&path, body.to_string()).unwrap();
        path
    }

    #[test]
    fn test_init_seeds_store() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path());

        init(&config_path, false).unwrap();

        let store = JsonFileStore::in_dir(&temp.path().join("data"));
        assert_eq!(store.load().unwrap().len(), 5);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path());

        init(&config_path, false).unwrap();
        let err = init(&config_path, false).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::AlreadyInitialized);

        init(&config_path, true).unwrap();
    }

    #[test]
    fn test_stats_requires_store() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path());

        assert!(stats(&config_path).is_err());

        init(&config_path, false).unwrap();
        stats(&config_path).unwrap();
    }

    #[test]
    fn test_build_service_uses_configured_page_size() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp.path().display().to_string(),
            default_page_size: 2,
            ..Default::default()
        };
        seed_store(&JsonFileStore::in_dir(temp.path())).unwrap();

        let service = build_service(&config);
        let page = service
            .list_items(&crate::catalog::ItemQuery {
                page: Some("1".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.items.len(), 2);
    }
}
