use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IncomeReportError {
    #[error("Malformed record in {source_name} at line {line}: {details}")]
    MalformedRecord {
        source_name: String,
        line: u64,
        details: String,
    },

    #[error("No income data provided")]
    NoData,

    #[error("Cannot resample or summarise an empty set of records")]
    EmptyData,

    #[error("Cannot compute income per hour: total hours is zero")]
    DivisionByZero,

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid tax year start month {0}: must be between 1 and 12")]
    InvalidTaxYearStartMonth(u32),

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IncomeReportError>;
