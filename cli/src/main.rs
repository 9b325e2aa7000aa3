//! CLI entrypoint for tablevote
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod scenario;

use anyhow::{Context, Result, bail};
use clap::Parser;
use scenario::{Scenario, ScenarioRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tablevote_application::{
    BehaviorConfig, CandidateSource, MealEventLogger, MealService, MealStore, NoMealEventLogger,
};
use tablevote_domain::{OutputFormat, Severity};
use tablevote_infrastructure::{
    ConfigLoader, FileConfig, InMemoryMealStore, InMemoryMembership, JsonFileCandidateSource,
    JsonFileMealStore, JsonlMealEventLogger, StaticCandidateSource, StoreBackend,
};
use tablevote_presentation::{Cli, Command, ConsoleFormatter};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so [logging] log_dir can be honored
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_tracing(cli.verbose, config.logging.log_dir.as_deref());
    info!("Starting tablevote");

    for issue in config.validate() {
        match issue.severity {
            Severity::Error => bail!("Invalid configuration: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::ShowConfig => {
            ConfigLoader::print_config_sources(cli.config.as_ref());
            println!();
            println!("{}", config.to_toml()?);
            Ok(())
        }
        Command::Run {
            scenario,
            output,
            catalog,
            event_log,
        } => {
            let format = output
                .map(OutputFormat::from)
                .or(config.output.format)
                .unwrap_or_default();
            run(&config, &scenario, catalog, event_log, format, cli.quiet).await
        }
    }
}

/// Initialize logging based on verbosity level.
///
/// When `log_dir` is set, diagnostics are also written to a daily rolling
/// file there; the returned guard must live until exit to flush it.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "tablevote.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(console)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(console)
                .init();
            None
        }
    }
}

async fn run(
    config: &FileConfig,
    scenario_path: &Path,
    catalog: Option<PathBuf>,
    event_log: Option<PathBuf>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(scenario_path)
        .await
        .with_context(|| format!("Failed to read scenario {}", scenario_path.display()))?;
    let scenario: Scenario = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid scenario {}", scenario_path.display()))?;

    // === Dependency Injection ===
    let membership = Arc::new(InMemoryMembership::new());
    let store = build_store(config).await?;
    let source = build_source(config, catalog, &scenario)?;
    let logger: Arc<dyn MealEventLogger> =
        match event_log.or_else(|| config.logging.event_log.clone()) {
            Some(path) => match JsonlMealEventLogger::new(&path) {
                Some(logger) => {
                    info!("Writing meal events to {}", logger.path().display());
                    Arc::new(logger)
                }
                None => Arc::new(NoMealEventLogger),
            },
            None => Arc::new(NoMealEventLogger),
        };

    let (default_preferences, _) = config.preferences.to_preferences();
    let behavior = BehaviorConfig::default()
        .with_default_preferences(default_preferences)
        .with_timeout_seconds(config.source.timeout());

    let service = MealService::new(membership.clone(), store, source)
        .with_logger(logger)
        .with_config(behavior);

    let runner = ScenarioRunner::new(Arc::new(service), membership);
    let report = runner.run(&scenario).await?;

    let output = match (format, quiet) {
        (OutputFormat::Json, _) => ConsoleFormatter::format_json(&report),
        (OutputFormat::Text, true) => ConsoleFormatter::format_summary(&report),
        (OutputFormat::Text, false) => ConsoleFormatter::format(&report),
    };
    println!("{}", output);

    Ok(())
}

async fn build_store(config: &FileConfig) -> Result<Arc<dyn MealStore>> {
    let (backend, _) = config.store.parse_backend();
    let store: Arc<dyn MealStore> = match backend {
        StoreBackend::Memory => Arc::new(InMemoryMealStore::new()),
        StoreBackend::Json => {
            let Some(dir) = config.store.resolved_dir() else {
                bail!("store.backend is 'json' but no store directory could be determined");
            };
            info!("Persisting meals under {}", dir.display());
            Arc::new(JsonFileMealStore::open(dir).await?)
        }
    };
    Ok(store)
}

/// Catalog precedence: `--catalog`, then `[source] catalog_file`, then the
/// scenario's embedded catalog
fn build_source(
    config: &FileConfig,
    catalog: Option<PathBuf>,
    scenario: &Scenario,
) -> Result<Arc<dyn CandidateSource>> {
    if let Some(path) = catalog.or_else(|| config.source.catalog_file.clone()) {
        return Ok(Arc::new(JsonFileCandidateSource::new(path)));
    }
    if scenario.catalog.is_empty() {
        bail!("Scenario has no catalog; pass --catalog or set [source] catalog_file");
    }
    Ok(Arc::new(StaticCandidateSource::new(scenario.catalog.clone())))
}
