use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use log::{info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode, ColorChoice};
use tokio::runtime::Runtime;
use clap::Parser;

mod cli;
mod models;
mod rebuffer;
mod upload;
mod fetch;
mod cloud;
mod jobs;
mod config;
mod error;
mod constants;

use cli::{Args, Commands};
use config::{UploadConfig, apply_env_overrides, load_or_create_config};
use fetch::HttpSourceFetcher;
use jobs::{JobQueue, JobSettings};
use models::{JobStats, UploadJob};

fn main() -> Result<()> {
    // Parse arguments
    let args = Args::parse();

    // Initialize logging
    initialize_logging(args.verbose)?;

    // Handle subcommands
    if let Some(cmd) = &args.command {
        return handle_subcommand(cmd);
    }

    if args.sources.is_empty() {
        return Err(anyhow!("No sources given; pass one or more URLs to upload"));
    }

    info!("Starting restream of {} source(s)", args.sources.len());

    // Load and merge configuration
    let config = load_and_merge_config(&args)?;

    // Run the upload jobs
    let runtime = Runtime::new().context("Failed to create Tokio runtime")?;
    let stats = runtime.block_on(run_jobs(&config, &args.sources))?;

    // Print the per-job report
    if !args.skip_report {
        print_report(&stats)?;
    }

    info!(
        "Restream finished: {} succeeded, {} failed",
        stats.succeeded, stats.failed
    );

    if stats.failed > 0 {
        return Err(anyhow!("{} upload(s) failed", stats.failed));
    }

    Ok(())
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ).context("Failed to initialize logger")?;
    Ok(())
}

/// Handle subcommands (init-config)
fn handle_subcommand(cmd: &Commands) -> Result<()> {
    match cmd {
        Commands::InitConfig { path } => {
            info!("Creating default configuration file at {}", path.display());
            UploadConfig::create_default_config_file(path)?;
            info!("Configuration created successfully");
            Ok(())
        }
    }
}

/// Load configuration, then apply environment and CLI overrides
fn load_and_merge_config(args: &Args) -> Result<UploadConfig> {
    let mut config = load_or_create_config(args.config.as_deref())?;

    apply_env_overrides(&mut config);

    // Command-line flags win over both the file and the environment
    if let Some(bucket) = &args.bucket {
        config.bucket = bucket.clone();
    }
    if let Some(namespace) = &args.namespace {
        config.namespace = namespace.clone();
    }
    if let Some(region) = &args.region {
        config.region = Some(region.clone());
    }
    if let Some(profile) = &args.profile {
        config.profile = Some(profile.clone());
    }
    if let Some(part_size) = args.part_size {
        config.part_size_mb = part_size;
    }
    if let Some(extension) = &args.extension {
        config.extension = extension.clone();
    }
    if let Some(content_type) = &args.content_type {
        config.content_type = content_type.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Wire up the backend, fetcher, and queue, then run every source through
async fn run_jobs(config: &UploadConfig, sources: &[String]) -> Result<JobStats> {
    let client = cloud::create_s3_client(config.region.as_deref(), config.profile.as_deref())?;
    let backend = Arc::new(cloud::S3MultipartBackend::new(client, config.bucket.clone()));
    let fetcher = Arc::new(HttpSourceFetcher::new());

    let settings = JobSettings {
        namespace: config.namespace.clone(),
        extension: config.extension.clone(),
        content_type: Some(config.content_type.clone()),
        part_size: config.effective_part_size(),
    };

    let queue = JobQueue::start(backend, fetcher, settings, config.queue_capacity);

    for source in sources {
        queue.dispatch(UploadJob::new(source.clone())).await?;
    }

    queue.shutdown().await
}

/// Print the per-job JSON report to stdout
fn print_report(stats: &JobStats) -> Result<()> {
    let report = serde_json::to_string_pretty(stats)
        .context("Failed to serialize upload report")?;
    println!("{}", report);
    Ok(())
}
