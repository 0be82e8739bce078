use crate::error::{IncomeReportError, Result};
use crate::schema::{Direction, SummaryStats};
use crate::slicer::Slice;
use crate::utils::{round_date, round_to};

pub const DAYS_PER_WEEK: f64 = 7.0;

pub const DAYS_PER_MONTH: f64 = 30.4;

/// Rates are never spread over less than one period, so slices shorter than
/// a week (or month) report the raw total as the per-week (per-month) figure.
pub const MIN_RATE_PERIODS: f64 = 1.0;

/// Number of whole-or-partial periods of `period_days` in `delta_days`,
/// clamped below at [`MIN_RATE_PERIODS`].
pub fn rate_periods(delta_days: i64, period_days: f64) -> f64 {
    (delta_days as f64 / period_days).max(MIN_RATE_PERIODS)
}

/// Computes totals and rates over a slice.
///
/// The covered range is widened to full periods: it runs from the first day
/// of the first bucket's period to the last day of the last bucket's period.
///
/// # Errors
///
/// - [`IncomeReportError::EmptyData`] if the slice has no buckets.
/// - [`IncomeReportError::DivisionByZero`] if total hours is exactly zero.
///   The other rates are clamped and never fail; income per hour is not.
pub fn compute_stats(slice: &Slice) -> Result<SummaryStats> {
    let (first, last) = match (slice.buckets.first(), slice.buckets.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(IncomeReportError::EmptyData),
    };

    let start_date = round_date(first.period_start, slice.frequency, Direction::Earliest);
    let end_date = round_date(last.period_start, slice.frequency, Direction::Latest);
    let delta_days = (end_date - start_date).num_days();

    let total_income: f64 = slice.buckets.iter().map(|b| b.income_sum).sum();
    let total_hours: f64 = slice.buckets.iter().map(|b| b.hours_sum).sum();

    let weeks = rate_periods(delta_days, DAYS_PER_WEEK);
    let months = rate_periods(delta_days, DAYS_PER_MONTH);

    if total_hours == 0.0 {
        return Err(IncomeReportError::DivisionByZero);
    }

    Ok(SummaryStats {
        total_income: round_to(total_income, 2),
        start_date,
        end_date,
        total_hours,
        hours_per_week: round_to(total_hours / weeks, 1),
        income_per_month: round_to(total_income / months, 2),
        income_per_week: round_to(total_income / weeks, 2),
        income_per_hour: round_to(total_income / total_hours, 2),
    })
}
