//! CLI entrypoint for parcel-resolver
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use parcel_application::{
    ApiSource, DocumentSource, NoProgress, ResolutionConfig, ResolutionProgress,
    ResolvePropertyInput, ResolvePropertyUseCase, SourceQuery,
};
use parcel_domain::OutputFormat;
use parcel_infrastructure::{
    ConfigLoader, DEFAULT_USER_AGENT, FileConfig, HttpApiFetcher, HttpDocumentFetcher,
    JsonlAttemptLogger,
};
use parcel_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting parcel-resolver");

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    let (file_config, warnings) = file_config.into_validated()?;
    for issue in &warnings {
        warn!("{}", issue.message);
    }

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    if file_config.access.is_gated() {
        info!("Access key required");
    }
    if !file_config.access.permits(cli.access_key.as_deref()) {
        bail!("Access denied: --access-key does not match the configured access key");
    }

    // === Input ===
    let input = ResolvePropertyInput::new(
        cli.address.unwrap_or_default(),
        cli.city.unwrap_or_default(),
        cli.state.unwrap_or_default(),
        cli.zip,
    );
    let query = input.clone().into_query().context("Invalid address")?;

    // === Dependency Injection ===
    let resolution = file_config.to_resolution_config();
    let sources = build_sources(&file_config, &resolution)?;
    let mut use_case = ResolvePropertyUseCase::new(sources, resolution);

    if let Some(path) = &cli.attempt_log {
        match JsonlAttemptLogger::open(path) {
            Some(logger) => {
                info!("Writing attempt transcript to {}", logger.path().display());
                use_case = use_case.with_attempt_logger(Arc::new(logger));
            }
            None => warn!("Attempt log disabled: could not open {}", path.display()),
        }
    }

    // === Resolve ===
    let show_progress = !cli.quiet && file_config.output.show_progress;
    let progress: Box<dyn ResolutionProgress> = match (show_progress, cli.verbose) {
        (false, _) => Box::new(NoProgress),
        (true, 0) => Box::new(ProgressReporter::new()),
        (true, _) => Box::new(SimpleProgress),
    };
    let result = use_case.resolve_or_report(input, progress.as_ref()).await?;

    // === Output ===
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(file_config.output.format)
        .unwrap_or_default();
    let output = match format {
        OutputFormat::Summary => ConsoleFormatter::format(&result, Some(&query)),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };
    println!("{}", output);

    if !result.ok {
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// With `--log-file`, diagnostics go to that file through a non-blocking
/// writer; the returned guard must live until exit to flush it.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file {} has no file name", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Enabled sources in resolution order: page document first, then API.
fn build_sources(
    config: &FileConfig,
    resolution: &ResolutionConfig,
) -> Result<Vec<Arc<dyn SourceQuery>>> {
    let user_agent = config
        .document
        .user_agent
        .as_deref()
        .unwrap_or(DEFAULT_USER_AGENT);
    let mut sources: Vec<Arc<dyn SourceQuery>> = Vec::new();

    if config.document.enabled {
        let fetcher = HttpDocumentFetcher::new(
            user_agent,
            config.document.to_fetcher_config(resolution.attempt_timeout),
        )?;
        sources.push(Arc::new(DocumentSource::new(
            config.document.to_source_config(),
            Arc::new(fetcher),
        )));
    }

    if config.api.enabled {
        let fetcher = HttpApiFetcher::new(user_agent)?;
        sources.push(Arc::new(ApiSource::new(
            config.api.to_source_config(resolution.attempt_timeout),
            Arc::new(fetcher),
        )));
    }

    Ok(sources)
}
