use chrono::NaiveDate;
use income_reporter::{
    compute_stats, format_stats, resample, Frequency, IncomeRecord, RecordSet, Slicer,
};

fn main() {
    let records = RecordSet::new(vec![
        IncomeRecord::new(NaiveDate::from_ymd_opt(2013, 4, 3).unwrap(), 1_200.0, 40.0),
        IncomeRecord::new(NaiveDate::from_ymd_opt(2013, 6, 18).unwrap(), 850.0, 30.0),
        IncomeRecord::new(NaiveDate::from_ymd_opt(2013, 9, 2).unwrap(), -120.0, 0.0),
        IncomeRecord::new(NaiveDate::from_ymd_opt(2014, 1, 27).unwrap(), 2_400.0, 64.0),
        IncomeRecord::new(NaiveDate::from_ymd_opt(2014, 3, 31).unwrap(), 600.0, 16.0),
    ]);

    let today = NaiveDate::from_ymd_opt(2014, 5, 12).unwrap();

    for frequency in [Frequency::Monthly, Frequency::Weekly] {
        let series = resample(&records, frequency).expect("records are not empty");
        let slice = Slicer::new(&series, today)
            .tax_year(Some(2013), Some(4), true)
            .expect("April is a valid start month");
        let stats = compute_stats(&slice).expect("hours were worked in the tax year");

        println!(
            "{} ({:?}, {} buckets)",
            slice.heading.as_deref().unwrap_or_default(),
            frequency,
            slice.buckets.len()
        );
        println!("{}", format_stats(&stats, "NZD "));
    }
}
