use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use daytally::parse::{self, Records};
use daytally::{ReportConfig, TextReport, TrafficReport};
use tracing::{info, Level};

/// Daily sums, running total, top values and the least-sum window of a `<label> <value>` stream.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input file; standard input when omitted.
    file: Option<PathBuf>,

    /// Number of consecutive events in the least-sum window.
    #[arg(short, long, default_value_t = ReportConfig::default().window)]
    window: NonZeroUsize,

    /// Number of top values to report.
    #[arg(short, long, default_value_t = ReportConfig::default().top)]
    top: NonZeroUsize,

    /// Logging level, written to stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let level = Level::from_str(level).map_err(|err| format!("invalid logging level: {err}"))?;
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let config = ReportConfig::new(args.window, args.top);
    let input = parse::open(args.file.as_deref())?;

    info!(file = ?args.file, ?config, "Starting report");

    let mut report = TrafficReport::new(config);
    let mut output = TextReport::new(io::stdout().lock());

    let summary = report.run(Records::new(input), &mut output)?;
    output.summary(&summary)?;

    Ok(())
}
