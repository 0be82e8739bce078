//! # Income Reporter
//!
//! Turns CSV files of dated income items into a report of summary periods,
//! each with a bar chart of income per period and a block of statistics.
//!
//! ## Core Concepts
//!
//! - **Records**: `(date, income, hours)` rows, merged from every input file and deduplicated
//! - **Buckets**: records summed onto a regular monthly (or weekly) grid, with empty periods zero-filled
//! - **Slices**: the buckets of one summary period: a calendar year, the last 12 months, a tax year, or any range
//! - **Stats**: totals plus income per month, week and hour over a slice
//!
//! The date that counts as "today" is always passed in, so every summary is
//! reproducible.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use income_reporter::*;
//!
//! let records = RecordSet::new(vec![
//!     IncomeRecord::new(NaiveDate::from_ymd_opt(2013, 1, 5).unwrap(), 500.0, 20.0),
//!     IncomeRecord::new(NaiveDate::from_ymd_opt(2013, 2, 10).unwrap(), 300.0, 15.0),
//! ]);
//!
//! let series = resample(&records, Frequency::Monthly).unwrap();
//! let today = NaiveDate::from_ymd_opt(2014, 6, 1).unwrap();
//! let year = Slicer::new(&series, today).calendar_year(Some(2013), true).unwrap();
//! let stats = compute_stats(&year).unwrap();
//!
//! assert_eq!(stats.total_income, 800.0);
//! assert_eq!(stats.end_date, NaiveDate::from_ymd_opt(2013, 2, 28).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod ingestion;
pub mod render;
pub mod report;
pub mod resample;
pub mod schema;
pub mod slicer;
pub mod stats;
pub mod synthetic;
pub mod utils;

pub use config::{ReportConfig, DEFAULT_CURRENCY, DEFAULT_OUTPUT_FILE};
pub use error::{IncomeReportError, Result};
pub use ingestion::{parse_record, read_records, RecordSet};
pub use render::{format_stats, write_report, HtmlRenderer, JsonRenderer, ReportRenderer};
pub use report::{assemble, assemble_report};
pub use resample::{resample, BucketSeries};
pub use schema::*;
pub use slicer::{Heading, Slice, Slicer, DEFAULT_TAX_YEAR_START_MONTH, TAX_YEAR_SPAN_DAYS};
pub use stats::{compute_stats, DAYS_PER_MONTH, DAYS_PER_WEEK, MIN_RATE_PERIODS};
pub use synthetic::{default_sample_start, generate_sample_records, DEFAULT_SAMPLE_WEEKS};
pub use utils::*;

use chrono::NaiveDate;
use log::{debug, info};

pub struct IncomeReporter {
    config: ReportConfig,
}

impl IncomeReporter {
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The standard summaries, in report order: the current calendar year,
    /// the last 12 months, the current tax year and all data.
    pub fn summaries(&self, records: &RecordSet, today: NaiveDate) -> Result<Vec<Slice>> {
        let series = resample(records, self.config.frequency)?;
        debug!(
            "Series spans {:?} to {:?} in {} bucket(s)",
            series.first_period(),
            series.last_period(),
            series.buckets.len()
        );

        let slicer = Slicer::new(&series, today);
        Ok(vec![
            slicer.calendar_year(None, true)?,
            slicer.last_12_months(true)?,
            slicer.tax_year(None, Some(self.config.tax_year_start_month), true)?,
            slicer.range(None, None, "All Data")?,
        ])
    }

    pub fn build_report(&self, records: &RecordSet, today: NaiveDate) -> Result<Report> {
        info!(
            "Building income report from {} record(s) as of {}",
            records.len(),
            today
        );

        let slices = self.summaries(records, today)?;
        assemble_report(&slices, &self.config)
    }
}

pub fn build_report(records: &RecordSet, config: &ReportConfig, today: NaiveDate) -> Result<Report> {
    IncomeReporter::new(config.clone())?.build_report(records, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn records() -> RecordSet {
        RecordSet::new(vec![
            IncomeRecord::new(d(2013, 1, 5), 500.0, 20.0),
            IncomeRecord::new(d(2013, 2, 10), 300.0, 15.0),
            IncomeRecord::new(d(2013, 5, 2), 250.0, 10.0),
            IncomeRecord::new(d(2013, 11, 20), 1000.0, 40.0),
        ])
    }

    #[test]
    fn test_summaries_in_report_order() {
        let reporter = IncomeReporter::new(ReportConfig::default()).unwrap();
        let slices = reporter.summaries(&records(), d(2013, 12, 3)).unwrap();

        let headings: Vec<&str> = slices
            .iter()
            .map(|s| s.heading.as_deref().unwrap())
            .collect();
        assert_eq!(
            headings,
            vec!["Year 2013", "Last 12 Months", "Tax Year 2013", "All Data"]
        );

        let tax_year = &slices[2];
        assert_eq!(tax_year.start, d(2013, 4, 1));
        assert_eq!(tax_year.end, d(2014, 3, 31));
        assert_eq!(tax_year.buckets.len(), 8);
    }

    #[test]
    fn test_end_to_end_report() {
        let report = build_report(&records(), &ReportConfig::default(), d(2013, 12, 3)).unwrap();

        assert_eq!(report.sections.len(), 4);
        assert_eq!(report.currency, "NZD ");

        let year = &report.sections[0];
        assert_eq!(year.stats.total_income, 2050.0);
        assert_eq!(year.stats.total_hours, 85.0);
        assert_eq!(year.stats.start_date, d(2013, 1, 1));
        assert_eq!(year.stats.end_date, d(2013, 11, 30));
        assert_eq!(year.chart_data.len(), 11);

        let all = &report.sections[3];
        assert_eq!(all.heading, "All Data");
        assert_eq!(all.stats.total_income, 2050.0);
    }

    #[test]
    fn test_tax_year_month_from_config() {
        let config = ReportConfig {
            tax_year_start_month: 7,
            ..ReportConfig::default()
        };
        let reporter = IncomeReporter::new(config).unwrap();
        let slices = reporter.summaries(&records(), d(2013, 12, 3)).unwrap();
        assert_eq!(slices[2].start, d(2013, 7, 1));
        assert_eq!(slices[2].end, d(2014, 6, 30));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ReportConfig {
            tax_year_start_month: 13,
            ..ReportConfig::default()
        };
        assert!(IncomeReporter::new(config).is_err());
    }
}
