//! ABC segmentation CLI binary.
//!
//! Runs the quarterly segmentation pipeline over a synthetic transaction set
//! and classifies individual customer-quarters.

mod sample;

use abc_core::{
    ExclusionList, InMemorySource, MalformedPolicy, ReportConfig, SegmentInput, classify,
    run_report,
};
use abc_output::{ExportFormat, Exporter, Report};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use sample::{SampleShape, generate_transactions};
use serde_json::json;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "abc-report")]
#[command(about = "Quarterly ABC customer segmentation", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a synthetic transaction set
    Run {
        /// Number of customers
        #[arg(long, default_value = "40")]
        customers: usize,

        /// Number of quarters of history
        #[arg(long, default_value = "4")]
        quarters: u32,

        /// First transaction date
        #[arg(long, default_value = "2023-01-01")]
        start: NaiveDate,

        /// Customer ids to exclude (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Append this many negative-amount rows to the input
        #[arg(long, default_value = "0")]
        malformed: usize,

        /// Drop malformed rows instead of failing
        #[arg(long, conflicts_with = "fail_malformed")]
        reject_malformed: bool,

        /// Fail the run on any malformed row (default)
        #[arg(long)]
        fail_malformed: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print only the per-quarter summaries
        #[arg(long)]
        summary_only: bool,
    },

    /// Classify a single customer-quarter
    Classify {
        /// Customer sales in the quarter
        #[arg(long)]
        sales: f64,

        /// Running share of quarterly sales through this customer
        #[arg(long)]
        running_pct: Option<f64>,

        /// Output format (json or text)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
    Csv,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run {
            customers,
            quarters,
            start,
            exclude,
            malformed,
            reject_malformed,
            fail_malformed,
            format,
            summary_only,
        } => {
            let shape = SampleShape {
                customers,
                quarters,
                start,
                malformed,
            };
            let policy = if reject_malformed && !fail_malformed {
                MalformedPolicy::Reject
            } else {
                MalformedPolicy::FailBatch
            };
            run_segmentation(shape, &exclude, policy, format, summary_only)?;
        }
        Commands::Classify {
            sales,
            running_pct,
            format,
        } => {
            classify_one(sales, running_pct, format)?;
        }
    }

    Ok(())
}

fn run_segmentation(
    shape: SampleShape,
    exclude: &[String],
    policy: MalformedPolicy,
    format: OutputFormat,
    summary_only: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = generate_transactions(shape)?;
    debug!(records = records.len(), ?shape, "generated synthetic transactions");

    let mut source = InMemorySource::from_records("synthetic", &records)?;
    let exclusions: ExclusionList = exclude.iter().map(String::as_str).collect();
    let config = ReportConfig {
        malformed_policy: policy,
    };

    let segmented = run_report(&mut source, &exclusions, &config)?;
    let report = Report::from_segmented(&segmented)?;
    info!(
        rows = report.rows.len(),
        quarters = report.summaries.len(),
        "report ready"
    );

    let output = match (format, summary_only) {
        (OutputFormat::Text, false) => report.to_ascii_table(),
        (OutputFormat::Text, true) => abc_output::summaries_to_ascii_table(&report.summaries),
        (OutputFormat::Markdown, _) => report.to_markdown(),
        (OutputFormat::Json, false) => report.to_json()?,
        (OutputFormat::Json, true) => report.summaries.export_to_string(ExportFormat::PrettyJson)?,
        (OutputFormat::Csv, false) => report.rows.export_to_string(ExportFormat::Csv)?,
        (OutputFormat::Csv, true) => report.summaries.export_to_string(ExportFormat::Csv)?,
    };
    print!("{output}");

    Ok(())
}

fn classify_one(
    sales: f64,
    running_pct: Option<f64>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let segment = classify(SegmentInput { sales, running_pct });

    if format == OutputFormat::Json {
        let value = json!({
            "sales": sales,
            "running_pct": running_pct,
            "segment": segment,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{segment}");
    }

    Ok(())
}
