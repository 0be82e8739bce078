//! income_reporter - build an HTML income report from CSV files of income items

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use income_reporter::{
    default_sample_start, generate_sample_records, parse_date, write_report, HtmlRenderer,
    IncomeReporter, JsonRenderer, RecordSet, ReportConfig, ReportRenderer, DEFAULT_OUTPUT_FILE,
    DEFAULT_SAMPLE_WEEKS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "income_reporter",
    version,
    about = "Make an HTML income report from CSV files of income items",
    long_about = "Make an HTML income report from CSV files of income items.\n\
                  \n\
                  The first (header) row of each CSV file is ignored. Only the first three\n\
                  columns are read, in this order:\n\
                  \n\
                    1. the date the income was received (yyyy-mm-dd)\n\
                    2. the amount received, without currency symbols\n\
                    3. the number of hours worked for that income\n\
                  \n\
                  One currency is assumed throughout. With no input files, a report of\n\
                  randomly generated sample data is produced.\n\
                  \n\
                  The report holds four summaries: the current year, the last 12 months,\n\
                  the current tax year and all data."
)]
struct Cli {
    /// CSV files of income items (default: randomly generated data)
    #[arg(value_name = "INPUT_FILE")]
    infiles: Vec<PathBuf>,

    /// Path of the report to write
    #[arg(short, long, value_name = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    outfile: PathBuf,

    /// JSON report configuration
    #[arg(short, long, env = "INCOME_REPORTER_CONFIG")]
    config: Option<PathBuf>,

    /// Currency prefix for monetary values (overrides the config file)
    #[arg(long)]
    currency: Option<String>,

    /// Date to treat as today, YYYY-MM-DD (default: the local date)
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Seed for the sample data generator
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
}

fn parse_today(text: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(text).map_err(|e| e.to_string())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_records(cli: &Cli) -> Result<RecordSet> {
    if !cli.infiles.is_empty() {
        return RecordSet::load_files(&cli.infiles).context("Failed to load income files");
    }

    log::warn!("No input files given; reporting on randomly generated sample data");
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(generate_sample_records(
        DEFAULT_SAMPLE_WEEKS,
        default_sample_start()?,
        &mut rng,
    ))
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(currency) = &cli.currency {
        config.currency = currency.clone();
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let records = load_records(&cli)?;

    let reporter = IncomeReporter::new(config)?;
    let report = reporter
        .build_report(&records, today)
        .context("Failed to build income report")?;

    let renderer: Box<dyn ReportRenderer> = match cli.format {
        OutputFormat::Html => Box::new(HtmlRenderer::from_config(reporter.config())),
        OutputFormat::Json => Box::new(JsonRenderer),
    };
    write_report(renderer.as_ref(), &report, &cli.outfile)
        .with_context(|| format!("Failed to write {}", cli.outfile.display()))?;

    println!("Wrote {}", cli.outfile.display());
    Ok(())
}
