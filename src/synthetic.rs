use crate::error::Result;
use crate::ingestion::RecordSet;
use crate::schema::IncomeRecord;
use crate::utils::ymd;
use chrono::{Days, NaiveDate};
use log::info;
use rand::Rng;

pub const DEFAULT_SAMPLE_WEEKS: usize = 100;

/// First Sunday of 2012.
pub fn default_sample_start() -> Result<NaiveDate> {
    ymd(2012, 1, 1)
}

/// One record per week, `weeks` weeks starting at `first_day`. Hours are drawn
/// from `0..25` and paid at a rate drawn from `50..100` per hour.
pub fn generate_sample_records<R: Rng>(
    weeks: usize,
    first_day: NaiveDate,
    rng: &mut R,
) -> RecordSet {
    let records: Vec<IncomeRecord> = (0..weeks)
        .filter_map(|week| {
            let date = first_day.checked_add_days(Days::new(7 * week as u64))?;
            let hours = rng.gen_range(0u32..25) as f64;
            let rate = rng.gen_range(50u32..100) as f64;
            Some(IncomeRecord::new(date, hours * rate, hours))
        })
        .collect();

    info!(
        "Generated {} week(s) of sample income data from {}",
        records.len(),
        first_day
    );
    RecordSet::new(records)
}
