use crate::error::{IncomeReportError, Result};
use crate::schema::{Direction, Frequency};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Rounds `date` to the first or last day of the period that contains it.
///
/// - Monthly: the 1st, or the last calendar day of the month.
/// - Weekly: the Monday, or the Sunday of the ISO week.
/// - Daily: the date itself; a day is its own period.
pub fn round_date(date: NaiveDate, frequency: Frequency, direction: Direction) -> NaiveDate {
    match (frequency, direction) {
        (Frequency::Monthly, Direction::Earliest) => date.with_day(1).unwrap_or(date),
        (Frequency::Monthly, Direction::Latest) => last_day_of_month(date.year(), date.month()),
        (Frequency::Weekly, Direction::Earliest) => week_start(date),
        (Frequency::Weekly, Direction::Latest) => week_start(date)
            .checked_add_days(Days::new(6))
            .unwrap_or(date),
        (Frequency::Daily, _) => date,
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Start of the period following the one that begins at `period_start`.
pub fn next_period_start(period_start: NaiveDate, frequency: Frequency) -> Result<NaiveDate> {
    let next = match frequency {
        Frequency::Monthly => period_start.checked_add_months(Months::new(1)),
        Frequency::Weekly => period_start.checked_add_days(Days::new(7)),
        Frequency::Daily => period_start.succ_opt(),
    };

    next.ok_or_else(|| {
        IncomeReportError::DateError(format!(
            "No {:?} period follows {}",
            frequency, period_start
        ))
    })
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Moves `date` by a signed number of months. Days past the end of the target
/// month are clamped to its last day (Mar 31 - 1 month = Feb 28).
pub fn shift_months(date: NaiveDate, months: i32) -> Result<NaiveDate> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };

    shifted.ok_or_else(|| {
        IncomeReportError::DateError(format!("Cannot shift {} by {} months", date, months))
    })
}

pub fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        IncomeReportError::DateError(format!(
            "Invalid calendar date {:04}-{:02}-{:02}",
            year, month, day
        ))
    })
}

/// Parses a date in `YYYY-MM-DD` form.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        IncomeReportError::DateError(format!(
            "Invalid date '{}'. Expected YYYY-MM-DD",
            text.trim()
        ))
    })
}

/// Rounds to `decimals` places from the exact binary value: a true tie goes to
/// the even digit, anything else to the nearer side.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if (scaled - scaled.trunc()).abs() != 0.5 {
        return scaled.round() / factor;
    }

    // Exact remainder of the multiplication; zero means `scaled` is a real tie
    let error = value.mul_add(factor, -scaled);
    let rounded = if error == 0.0 {
        scaled.round_ties_even()
    } else if error > 0.0 {
        scaled.ceil()
    } else {
        scaled.floor()
    };
    rounded / factor
}

pub fn validate_tax_year_start_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(IncomeReportError::InvalidTaxYearStartMonth(month));
    }
    Ok(())
}
