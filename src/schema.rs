use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single dated income item as read from an input file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub date: NaiveDate,
    pub income: f64,
    pub hours: f64,
}

impl IncomeRecord {
    pub fn new(date: NaiveDate, income: f64, hours: f64) -> Self {
        Self {
            date,
            income,
            hours,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Frequency {
    #[schemars(description = "One bucket per calendar month, starting on the 1st.")]
    Monthly,

    #[schemars(description = "One bucket per ISO week, starting on Monday.")]
    Weekly,

    #[schemars(
        description = "One bucket per day. Dates are never rounded at this frequency."
    )]
    Daily,
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Monthly
    }
}

/// Which end of its enclosing period a date is rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Earliest,
    Latest,
}

/// Aggregated income and hours for one period of a resampled grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub period_start: NaiveDate,
    pub income_sum: f64,
    pub hours_sum: f64,
}

impl Bucket {
    pub fn empty(period_start: NaiveDate) -> Self {
        Self {
            period_start,
            income_sum: 0.0,
            hours_sum: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryStats {
    #[schemars(description = "Sum of income over the summary period, rounded to cents.")]
    pub total_income: f64,

    #[schemars(description = "First day of the first period covered by the summary.")]
    pub start_date: NaiveDate,

    #[schemars(description = "Last day of the last period covered by the summary.")]
    pub end_date: NaiveDate,

    #[schemars(description = "Sum of hours worked over the summary period.")]
    pub total_hours: f64,

    #[schemars(description = "Hours worked per week, rounded to one decimal place.")]
    pub hours_per_week: f64,

    #[schemars(description = "Income per 30.4-day month, rounded to cents.")]
    pub income_per_month: f64,

    #[schemars(description = "Income per week, rounded to cents.")]
    pub income_per_week: f64,

    #[schemars(description = "Income per hour worked, rounded to cents.")]
    pub income_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartPoint {
    #[schemars(description = "Start date of the bucket (YYYY-MM-DD).")]
    pub x: NaiveDate,

    #[schemars(description = "Income received in the bucket.")]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RenderableSection {
    pub heading: String,
    pub chart_data: Vec<ChartPoint>,
    pub stats: SummaryStats,
}

/// The data handed to a renderer. Monetary values are plain numbers; the
/// renderer is responsible for attaching the currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    #[schemars(description = "Title shown at the top of the report.")]
    pub title: String,

    #[schemars(description = "Currency prefix for monetary values, e.g. 'NZD '.")]
    pub currency: String,

    #[schemars(description = "Summary sections in display order.")]
    pub sections: Vec<RenderableSection>,
}

impl Report {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Report)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
