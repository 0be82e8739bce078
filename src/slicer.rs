use crate::error::{IncomeReportError, Result};
use crate::resample::BucketSeries;
use crate::schema::{Bucket, Direction, Frequency};
use crate::utils::{round_date, shift_months, validate_tax_year_start_month, ymd};
use chrono::{Datelike, Days, NaiveDate};
use log::debug;

/// Length of a tax year after its first day. Not leap-year aware.
pub const TAX_YEAR_SPAN_DAYS: u64 = 364;

pub const DEFAULT_TAX_YEAR_START_MONTH: u32 = 4;

/// How a slice should be labelled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Heading {
    #[default]
    None,
    /// Use the label of the slicing mode, e.g. "Year 2013".
    Auto,
    Custom(String),
}

impl Heading {
    fn resolve(self, auto: impl FnOnce() -> String) -> Option<String> {
        match self {
            Heading::None => None,
            Heading::Auto => Some(auto()),
            Heading::Custom(text) => Some(text),
        }
    }
}

impl From<bool> for Heading {
    fn from(auto: bool) -> Self {
        if auto {
            Heading::Auto
        } else {
            Heading::None
        }
    }
}

impl From<&str> for Heading {
    fn from(text: &str) -> Self {
        Heading::Custom(text.to_string())
    }
}

impl From<String> for Heading {
    fn from(text: String) -> Self {
        Heading::Custom(text)
    }
}

/// Buckets whose period start lies in `[start, end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub frequency: Frequency,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub buckets: Vec<Bucket>,
    pub heading: Option<String>,
}

impl Slice {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn range_label(&self) -> String {
        format!("{}--{}", self.start, self.end)
    }
}

/// Cuts summary periods out of a resampled series. `reference_date` stands in
/// for "today" in the trailing-window and current-year modes.
pub struct Slicer<'a> {
    series: &'a BucketSeries,
    reference_date: NaiveDate,
}

impl<'a> Slicer<'a> {
    pub fn new(series: &'a BucketSeries, reference_date: NaiveDate) -> Self {
        Self {
            series,
            reference_date,
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Omitted bounds default to the first and last bucket of the series.
    pub fn range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        heading: impl Into<Heading>,
    ) -> Result<Slice> {
        let start = match start {
            Some(start) => start,
            None => self
                .series
                .first_period()
                .ok_or(IncomeReportError::EmptyData)?,
        };
        let end = match end {
            Some(end) => end,
            None => self
                .series
                .last_period()
                .ok_or(IncomeReportError::EmptyData)?,
        };

        let heading: Heading = heading.into();
        let heading = heading.resolve(|| format!("{}--{}", start, end));
        self.extract(start, end, heading)
    }

    pub fn last_12_months(&self, heading: impl Into<Heading>) -> Result<Slice> {
        self.trailing_months(12, heading)
    }

    /// The `months` calendar months up to and including the reference month.
    pub fn trailing_months(&self, months: u32, heading: impl Into<Heading>) -> Result<Slice> {
        if months == 0 {
            return Err(IncomeReportError::DateError(
                "A trailing window needs at least one month".to_string(),
            ));
        }

        let end = round_date(self.reference_date, Frequency::Monthly, Direction::Latest);
        let back_months = i32::try_from(months - 1).map_err(|_| {
            IncomeReportError::DateError(format!(
                "Trailing window of {} months is too long",
                months
            ))
        })?;
        let back = shift_months(end, -back_months)?;
        let start = round_date(back, Frequency::Monthly, Direction::Earliest);

        let heading: Heading = heading.into();
        let heading = heading.resolve(|| format!("Last {} Months", months));
        self.extract(start, end, heading)
    }

    /// A past year runs to Dec 31. The current year stops at the end of the
    /// reference month so months that have not happened yet are left out.
    pub fn calendar_year(&self, year: Option<i32>, heading: impl Into<Heading>) -> Result<Slice> {
        let current_month_end =
            round_date(self.reference_date, Frequency::Monthly, Direction::Latest);
        let year = year.unwrap_or(current_month_end.year());

        let start = ymd(year, 1, 1)?;
        let end = if year == current_month_end.year() {
            current_month_end
        } else {
            ymd(year, 12, 31)?
        };

        let heading: Heading = heading.into();
        let heading = heading.resolve(|| format!("Year {}", year));
        self.extract(start, end, heading)
    }

    /// A tax year starts on the 1st of `start_month` and ends 364 days later.
    pub fn tax_year(
        &self,
        year: Option<i32>,
        start_month: Option<u32>,
        heading: impl Into<Heading>,
    ) -> Result<Slice> {
        let year = year.unwrap_or(self.reference_date.year());
        let start_month = start_month.unwrap_or(DEFAULT_TAX_YEAR_START_MONTH);
        validate_tax_year_start_month(start_month)?;

        let start = ymd(year, start_month, 1)?;
        let end = start
            .checked_add_days(Days::new(TAX_YEAR_SPAN_DAYS))
            .ok_or_else(|| {
                IncomeReportError::DateError(format!("Tax year starting {} overflows", start))
            })?;

        let heading: Heading = heading.into();
        let heading = heading.resolve(|| format!("Tax Year {}", year));
        self.extract(start, end, heading)
    }

    fn extract(&self, start: NaiveDate, end: NaiveDate, heading: Option<String>) -> Result<Slice> {
        if start > end {
            return Err(IncomeReportError::InvalidRange { start, end });
        }

        let buckets: Vec<Bucket> = self
            .series
            .buckets
            .iter()
            .filter(|b| b.period_start >= start && b.period_start <= end)
            .copied()
            .collect();

        debug!(
            "Slice {}--{} ({:?}) holds {} bucket(s)",
            start,
            end,
            heading,
            buckets.len()
        );

        Ok(Slice {
            frequency: self.series.frequency,
            start,
            end,
            buckets,
            heading,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::RecordSet;
    use crate::resample::resample;
    use crate::schema::IncomeRecord;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// One record on the 15th of every month from Jan 2012 to Jun 2014,
    /// with income equal to the month number.
    fn monthly_series() -> BucketSeries {
        let mut records = Vec::new();
        let mut date = d(2012, 1, 15);
        while date <= d(2014, 6, 15) {
            records.push(IncomeRecord::new(date, date.month() as f64, 1.0));
            date = shift_months(date, 1).unwrap();
        }
        resample(&RecordSet::new(records), Frequency::Monthly).unwrap()
    }

    fn starts(slice: &Slice) -> Vec<NaiveDate> {
        slice.buckets.iter().map(|b| b.period_start).collect()
    }

    #[test]
    fn test_range_defaults_to_whole_series() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 6, 20));
        let slice = slicer.range(None, None, true).unwrap();

        assert_eq!(slice.buckets.len(), 30);
        assert_eq!(slice.start, d(2012, 1, 1));
        assert_eq!(slice.end, d(2014, 6, 1));
        assert_eq!(slice.heading.as_deref(), Some("2012-01-01--2014-06-01"));
    }

    #[test]
    fn test_range_is_inclusive() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 6, 20));
        let slice = slicer
            .range(Some(d(2013, 2, 1)), Some(d(2013, 4, 1)), false)
            .unwrap();

        assert_eq!(starts(&slice), vec![d(2013, 2, 1), d(2013, 3, 1), d(2013, 4, 1)]);
        assert_eq!(slice.heading, None);
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 6, 20));
        assert!(matches!(
            slicer.range(Some(d(2013, 5, 1)), Some(d(2013, 4, 1)), false),
            Err(IncomeReportError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_custom_heading_overrides_auto() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 6, 20));
        let slice = slicer.range(None, None, "All Data").unwrap();
        assert_eq!(slice.heading.as_deref(), Some("All Data"));
    }

    #[test]
    fn test_last_12_months_targets_twelve_buckets() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 3, 31));
        let slice = slicer.last_12_months(true).unwrap();

        assert_eq!(slice.start, d(2013, 4, 1));
        assert_eq!(slice.end, d(2014, 3, 31));
        assert_eq!(slice.buckets.len(), 12);
        assert_eq!(slice.heading.as_deref(), Some("Last 12 Months"));
    }

    #[test]
    fn test_trailing_window_past_the_data_is_shorter() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 10, 2));
        let slice = slicer.last_12_months(false).unwrap();

        assert_eq!(slice.start, d(2013, 11, 1));
        assert_eq!(slice.end, d(2014, 10, 31));
        assert_eq!(slice.buckets.len(), 8);
        assert_eq!(slice.buckets.last().unwrap().period_start, d(2014, 6, 1));
    }

    #[test]
    fn test_trailing_window_length_is_checked() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 10, 2));

        assert!(matches!(
            slicer.trailing_months(0, false),
            Err(IncomeReportError::DateError(_))
        ));
        assert!(matches!(
            slicer.trailing_months(2_147_483_649, false),
            Err(IncomeReportError::DateError(_))
        ));
        assert!(matches!(
            slicer.trailing_months(u32::MAX, false),
            Err(IncomeReportError::DateError(_))
        ));
    }

    #[test]
    fn test_past_calendar_year_ends_dec_31() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 3, 10));
        let slice = slicer.calendar_year(Some(2012), true).unwrap();

        assert_eq!(slice.start, d(2012, 1, 1));
        assert_eq!(slice.end, d(2012, 12, 31));
        assert_eq!(slice.buckets.len(), 12);
        assert_eq!(slice.heading.as_deref(), Some("Year 2012"));
    }

    #[test]
    fn test_current_calendar_year_stops_at_reference_month() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 3, 10));
        let slice = slicer.calendar_year(None, true).unwrap();

        assert_eq!(slice.start, d(2014, 1, 1));
        assert_eq!(slice.end, d(2014, 3, 31));
        assert_eq!(starts(&slice), vec![d(2014, 1, 1), d(2014, 2, 1), d(2014, 3, 1)]);
        assert_eq!(slice.heading.as_deref(), Some("Year 2014"));
    }

    #[test]
    fn test_tax_year_is_fixed_364_days() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 6, 1));
        let slice = slicer.tax_year(Some(2013), None, true).unwrap();

        assert_eq!(slice.start, d(2013, 4, 1));
        assert_eq!(slice.end, d(2014, 3, 31));
        assert_eq!(slice.buckets.len(), 12);
        assert_eq!(slice.heading.as_deref(), Some("Tax Year 2013"));
    }

    #[test]
    fn test_tax_year_span_ignores_leap_day() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2014, 6, 1));
        // Spans Feb 29 2012, so the end lands on Jun 29 instead of Jun 30
        let slice = slicer.tax_year(Some(2011), Some(7), false).unwrap();
        assert_eq!(slice.start, d(2011, 7, 1));
        assert_eq!(slice.end, d(2012, 6, 29));
    }

    #[test]
    fn test_tax_year_defaults_to_reference_year() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2013, 8, 1));
        let slice = slicer.tax_year(None, None, false).unwrap();
        assert_eq!(slice.start, d(2013, 4, 1));
    }

    #[test]
    fn test_tax_year_rejects_bad_month() {
        let series = monthly_series();
        let slicer = Slicer::new(&series, d(2013, 8, 1));
        assert!(matches!(
            slicer.tax_year(Some(2013), Some(13), false),
            Err(IncomeReportError::InvalidTaxYearStartMonth(13))
        ));
    }

    #[test]
    fn test_slice_keeps_series_frequency() {
        let records = RecordSet::new(vec![
            IncomeRecord::new(d(2013, 1, 7), 10.0, 1.0),
            IncomeRecord::new(d(2013, 2, 20), 10.0, 1.0),
        ]);
        let series = resample(&records, Frequency::Weekly).unwrap();
        let slicer = Slicer::new(&series, d(2013, 3, 1));
        let slice = slicer.calendar_year(Some(2013), false).unwrap();
        assert_eq!(slice.frequency, Frequency::Weekly);
        assert_eq!(slice.buckets.len(), series.buckets.len());
    }
}
