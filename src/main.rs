//! Service health monitor.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────── MONITOR LOOP ─────────────────────────────────┐
//!   │                                                                                │
//!   │  ┌────────┐    ┌──────────┐    ┌──────────────────┐    ┌──────────┐            │
//!   │  │ timer  │───▶│  health  │───▶│ window + counters│───▶│ classify │            │
//!   │  │ sleep  │    │  probe   │    │  (MonitorState)  │    │ severity │            │
//!   │  └────▲───┘    └────┬─────┘    └──────────────────┘    └────┬─────┘            │
//!   │       │             │ GET /health                           │                  │
//!   │       │             ▼                                       ▼                  │
//!   │       │        Target service                  ┌──────────────────────┐        │
//!   │       │                                        │ recorder: log.jsonl  │        │
//!   │       └────────────────────────────────────────│ + metrics.jsonl      │        │
//!   │                                                │ reporter: console    │        │
//!   │                                                └──────────────────────┘        │
//!   │  Cross-cutting: config · lifecycle (signals, shutdown) · observability          │
//!   └────────────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use health_monitor::config::load_config;
use health_monitor::lifecycle::{signals, startup, Shutdown};
use health_monitor::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "health-monitor")]
#[command(about = "Poll a service health endpoint and record latency, error rate and severity", long_about = None)]
struct Cli {
    /// Path to the YAML or TOML configuration file.
    #[arg(short, long, default_value = "config/monitoring_config.yaml")]
    config: PathBuf,

    /// Stop after this many checks.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_checks: Option<u64>,

    /// Seed the latency window from the existing metrics file.
    #[arg(long)]
    warm_start: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: failed to load {}: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };
    if cli.max_checks.is_some() {
        config.monitoring.max_checks = cli.max_checks;
    }
    config.monitoring.warm_start |= cli.warm_start;

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("warning: logging not initialized: {}", e);
    }

    tracing::info!(
        config = %cli.config.display(),
        base_url = %config.service.base_url,
        interval_secs = config.monitoring.check_interval_seconds,
        timeout_secs = config.monitoring.request_timeout_seconds,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let monitor = startup::build_monitor(&config)?;

    let shutdown = Shutdown::new();
    let monitor_shutdown = shutdown.subscribe();
    tokio::spawn(signals::listen(shutdown.clone()));

    monitor.run(monitor_shutdown).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
