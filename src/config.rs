use crate::error::{IncomeReportError, Result};
use crate::schema::Frequency;
use crate::slicer::DEFAULT_TAX_YEAR_START_MONTH;
use crate::utils::validate_tax_year_start_month;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CURRENCY: &str = "NZD ";

pub const DEFAULT_OUTPUT_FILE: &str = "income_reporter.html";

/// Settings for one report run. Every field has a default, so a config file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    /// Prefix placed before monetary values by the renderer, e.g. "NZD ".
    pub currency: String,
    pub frequency: Frequency,
    /// Month (1-12) on whose first day the tax year starts.
    pub tax_year_start_month: u32,
    /// Leave out summaries whose period holds no data instead of failing.
    pub skip_empty_sections: bool,
    pub chart_width: u32,
    pub chart_height: u32,
    pub stylesheet: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Income Report".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            frequency: Frequency::Monthly,
            tax_year_start_month: DEFAULT_TAX_YEAR_START_MONTH,
            skip_empty_sections: true,
            chart_width: 700,
            chart_height: 400,
            stylesheet: "income_reporter.css".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        validate_tax_year_start_month(self.tax_year_start_month)?;

        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(IncomeReportError::ConfigError(format!(
                "Chart dimensions must be non-zero (got {}x{})",
                self.chart_width, self.chart_height
            )));
        }

        Ok(())
    }
}
