use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use health_monitor::health::{window::DEFAULT_CAPACITY, Counters, RollingWindow};
use health_monitor::monitor::report::{format_aggregate, AggregateSummary};
use health_monitor::recording::{read_records, recent_latencies};

#[derive(Parser)]
#[command(name = "monitor-report")]
#[command(about = "Summarize a health-monitor metrics file", long_about = None)]
struct Cli {
    /// Metrics (or log) file written by health-monitor.
    #[arg(short, long, default_value = "logs/metrics.jsonl")]
    file: PathBuf,

    /// Number of most recent latencies to aggregate.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    capacity: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let records = read_records(&cli.file)?;

    let mut counters = Counters::new();
    for record in &records {
        counters.record_outcome(&record.outcome);
    }

    let mut window = RollingWindow::new(cli.capacity);
    window.extend(recent_latencies(&records, cli.capacity));

    println!("{}: {} records", cli.file.display(), records.len());
    if let Some(last) = records.last() {
        println!(
            "Last check: {} ({} failures in a row)",
            last.timestamp.to_rfc3339(),
            last.consecutive_failures
        );
    }

    match AggregateSummary::from_parts(&window, counters.error_rate_percent(), counters.total_checks) {
        Some(summary) => println!("{}", format_aggregate(&summary)),
        None => println!("No latency samples recorded"),
    }

    Ok(())
}
