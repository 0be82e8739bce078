use crate::error::{IncomeReportError, Result};
use crate::schema::IncomeRecord;
use crate::utils::parse_date;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Deduplicated income records, sorted ascending by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<IncomeRecord>,
}

impl RecordSet {
    /// Builds a record set from records in any order. Records that are
    /// bit-identical in date, income and hours are kept once.
    pub fn new(mut records: Vec<IncomeRecord>) -> Self {
        records.sort_by(compare_records);
        records.dedup_by(|a, b| is_same_record(a, b));

        let negative_hours = records.iter().filter(|r| r.hours < 0.0).count();
        if negative_hours > 0 {
            warn!(
                "{} record(s) have negative hours; they are kept as given",
                negative_hours
            );
        }

        Self { records }
    }

    /// Reads every CSV source and merges the results. Each source is a
    /// `(name, reader)` pair; the name only appears in error messages.
    pub fn load_sources<R: Read>(sources: Vec<(String, R)>) -> Result<Self> {
        if sources.is_empty() {
            return Err(IncomeReportError::NoData);
        }

        let mut records = Vec::new();
        for (name, reader) in sources {
            let parsed = read_records(reader, &name)?;
            debug!("Read {} record(s) from {}", parsed.len(), name);
            records.extend(parsed);
        }

        let set = Self::new(records);
        info!("Loaded {} distinct income record(s)", set.len());
        Ok(set)
    }

    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            sources.push((path.display().to_string(), File::open(path)?));
        }
        Self::load_sources(sources)
    }

    pub fn records(&self) -> &[IncomeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    pub fn total_income(&self) -> f64 {
        self.records.iter().map(|r| r.income).sum()
    }

    pub fn total_hours(&self) -> f64 {
        self.records.iter().map(|r| r.hours).sum()
    }
}

fn compare_records(a: &IncomeRecord, b: &IncomeRecord) -> Ordering {
    a.date
        .cmp(&b.date)
        .then(a.income.total_cmp(&b.income))
        .then(a.hours.total_cmp(&b.hours))
}

fn is_same_record(a: &IncomeRecord, b: &IncomeRecord) -> bool {
    a.date == b.date
        && a.income.to_bits() == b.income.to_bits()
        && a.hours.to_bits() == b.hours.to_bits()
}

/// Parses one CSV stream. The header row is skipped and only the first three
/// columns (date, income, hours) are read.
pub fn read_records<R: Read>(reader: R, source_name: &str) -> Result<Vec<IncomeRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(|e| from_csv_error(e, source_name))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<&str> = row.iter().collect();
        records.push(parse_record(&fields, source_name, line)?);
    }

    Ok(records)
}

/// Undecodable bytes are a bad row, not a broken stream.
fn from_csv_error(error: csv::Error, source_name: &str) -> IncomeReportError {
    if let csv::ErrorKind::Utf8 { pos, err } = error.kind() {
        return IncomeReportError::MalformedRecord {
            source_name: source_name.to_string(),
            line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            details: format!("Invalid UTF-8 in column {}", err.field() + 1),
        };
    }
    error.into()
}

pub fn parse_record(fields: &[&str], source_name: &str, line: u64) -> Result<IncomeRecord> {
    let malformed = |details: String| IncomeReportError::MalformedRecord {
        source_name: source_name.to_string(),
        line,
        details,
    };

    if fields.len() < 3 {
        return Err(malformed(format!(
            "Expected at least 3 columns (date, income, hours), found {}",
            fields.len()
        )));
    }

    let date = parse_date(fields[0]).map_err(|e| malformed(e.to_string()))?;
    let income = parse_amount(fields[1], "income").map_err(malformed)?;
    let hours = parse_amount(fields[2], "hours").map_err(malformed)?;

    Ok(IncomeRecord::new(date, income, hours))
}

fn parse_amount(text: &str, column: &str) -> std::result::Result<f64, String> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("Non-numeric {} '{}'", column, text.trim()))?;

    if !value.is_finite() {
        return Err(format!("Non-finite {} '{}'", column, text.trim()));
    }
    Ok(value)
}
