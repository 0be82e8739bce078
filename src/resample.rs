use crate::error::{IncomeReportError, Result};
use crate::ingestion::RecordSet;
use crate::schema::{Bucket, Direction, Frequency};
use crate::utils::{next_period_start, round_date};
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// A contiguous, gap-free run of buckets at a single frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSeries {
    pub frequency: Frequency,
    pub buckets: Vec<Bucket>,
}

impl BucketSeries {
    pub fn first_period(&self) -> Option<NaiveDate> {
        self.buckets.first().map(|b| b.period_start)
    }

    pub fn last_period(&self) -> Option<NaiveDate> {
        self.buckets.last().map(|b| b.period_start)
    }

    pub fn total_income(&self) -> f64 {
        self.buckets.iter().map(|b| b.income_sum).sum()
    }

    pub fn total_hours(&self) -> f64 {
        self.buckets.iter().map(|b| b.hours_sum).sum()
    }
}

/// Sums income and hours per period of `frequency`, from the period holding
/// the earliest record to the period holding the latest. Periods without
/// records are present with zero sums.
pub fn resample(records: &RecordSet, frequency: Frequency) -> Result<BucketSeries> {
    let (first, last) = match (records.first_date(), records.last_date()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(IncomeReportError::EmptyData),
    };

    let mut sums: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for record in records.records() {
        let period = round_date(record.date, frequency, Direction::Earliest);
        let entry = sums.entry(period).or_insert((0.0, 0.0));
        entry.0 += record.income;
        entry.1 += record.hours;
    }

    let last_period = round_date(last, frequency, Direction::Earliest);
    let mut period = round_date(first, frequency, Direction::Earliest);
    let mut buckets = Vec::new();

    loop {
        let bucket = match sums.get(&period) {
            Some(&(income_sum, hours_sum)) => Bucket {
                period_start: period,
                income_sum,
                hours_sum,
            },
            None => Bucket::empty(period),
        };
        buckets.push(bucket);

        if period >= last_period {
            break;
        }
        period = next_period_start(period, frequency)?;
    }

    debug!(
        "Resampled {} record(s) into {} {:?} bucket(s) ({} filled)",
        records.len(),
        buckets.len(),
        frequency,
        sums.len()
    );

    Ok(BucketSeries { frequency, buckets })
}
