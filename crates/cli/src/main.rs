//! Spear command-line runner
//!
//! Ranks the activity file given as argument (or `input.path`):
//! 1. Loads configuration from files and SPEAR__ environment variables
//! 2. Reads and validates the activity records
//! 3. Runs the Spear ranking
//! 4. Prints experts and resources, best first

mod args;
mod input;
mod output;

use anyhow::{anyhow, Context};
use args::{Command, RunArgs};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use spear_common::config::{AppConfig, ObservabilitySettings};
use spear_common::metrics::{register_metrics, RUN_DURATION_BUCKETS};
use spear_common::VERSION;
use spear_ranking::Spear;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let run = match args::parse(std::env::args().skip(1))? {
        Command::Run(run) => run,
        Command::Help => {
            println!("{}", args::USAGE);
            return Ok(());
        }
        Command::Version => {
            println!("spear {}", VERSION);
            return Ok(());
        }
    };

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let loaded = match &run.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&ObservabilitySettings::default());
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    init_tracing(&config.observability);
    info!("Starting Spear v{}", VERSION);

    let metrics = if config.observability.metrics_enabled {
        Some(install_metrics().context("failed to install metrics recorder")?)
    } else {
        None
    };

    let RunArgs { input: path, .. } = run;
    let path = path
        .or_else(|| config.input.path.clone().map(Into::into))
        .ok_or_else(|| {
            anyhow!("no activity file given; pass a path or set SPEAR__INPUT__PATH")
        })?;

    let outcome = input::load_activities(&path, config.input.format)
        .map(Spear::from_log)
        .and_then(|spear| spear.run(&config.ranking))
        .map_err(|e| {
            error!(error = %e, code = ?e.code(), path = %path.display(), "Ranking failed");
            e
        })?;

    println!("{}", output::render(&outcome, &config.output)?);

    if let Some(handle) = metrics {
        eprintln!("{}", handle.render());
    }

    info!(
        users = outcome.stats.users,
        resources = outcome.stats.resources,
        "Spear run complete"
    );
    Ok(())
}

/// Install the stderr subscriber; RUST_LOG takes precedence over the config
fn init_tracing(settings: &ObservabilitySettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if settings.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Install the Prometheus recorder so run metrics can be rendered
fn install_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            RUN_DURATION_BUCKETS,
        )?
        .install_recorder()?;

    register_metrics();
    Ok(handle)
}
