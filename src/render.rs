use crate::config::ReportConfig;
use crate::error::{IncomeReportError, Result};
use crate::schema::{Report, SummaryStats};
use handlebars::Handlebars;
use log::info;
use serde::Serialize;
use std::path::Path;

pub trait ReportRenderer {
    fn render(&self, report: &Report) -> Result<String>;
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{{title}}</title>
    <link href="{{stylesheet}}" rel="stylesheet">
    <link media="all" href="nvd3/src/nv.d3.css" type="text/css" rel="stylesheet" />
    <script src="nvd3/lib/d3.v2.js" type="text/javascript"></script>
    <script src="nvd3/nv.d3.js" type="text/javascript"></script>
</head>
<body>
    <h1>{{title}}</h1>
{{#each sections}}
    <h2>{{heading}}</h2>
{{> chart}}
    <pre>
{{#each stats}}{{label}} = {{value}}
{{/each}}</pre>
{{/each}}
</body>
</html>
"#;

// `values` and `currency` are JSON literals and go in unescaped
const CHART_TEMPLATE: &str = r#"    <div id="chart{{id}}"><svg style="width:{{width}}px; height:{{height}}px;"></svg></div>
    <script type="text/javascript">
        var data{{id}} = [{"values": {{{values}}}, "key": "Income", "yAxis": "1"}];
        nv.addGraph(function() {
            var chart = nv.models.discreteBarChart()
                .margin({top: 10, right: 10, bottom: 70, left: 70});
            chart.color(d3.scale.category10().range());
            chart.xAxis.rotateLabels(-45);
            chart.yAxis
                .axisLabel({{{currency}}})
                .tickFormat(d3.format('.00f'));
            chart.tooltipContent(function(key, x, y, e, graph) {
                return 'y = ' + String(graph.point.y) + ' ' + {{{currency}}} + '<br>x = ' + String(graph.point.x);
            });
            d3.select('#chart{{id}} svg')
                .datum(data{{id}})
                .transition().duration(500)
                .attr('width', {{width}})
                .attr('height', {{height}})
                .call(chart);
            return chart;
        });
    </script>
"#;

#[derive(Serialize)]
struct PageData<'a> {
    title: &'a str,
    stylesheet: &'a str,
    sections: Vec<SectionData<'a>>,
}

#[derive(Serialize)]
struct SectionData<'a> {
    id: usize,
    heading: &'a str,
    width: u32,
    height: u32,
    values: String,
    currency: String,
    stats: Vec<StatLine>,
}

#[derive(Serialize)]
struct StatLine {
    label: &'static str,
    value: String,
}

/// Renders a report as a standalone HTML page with one NVD3 bar chart and
/// one statistics block per section. Expects local copies of NVD3 and d3 under
/// `nvd3/` next to the output file.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    pub chart_width: u32,
    pub chart_height: u32,
    pub stylesheet: String,
}

impl HtmlRenderer {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            chart_width: config.chart_width,
            chart_height: config.chart_height,
            stylesheet: config.stylesheet.clone(),
        }
    }

    fn registry() -> Result<Handlebars<'static>> {
        let mut reg = Handlebars::new();
        reg.register_template_string("page", PAGE_TEMPLATE)
            .map_err(|e| IncomeReportError::TemplateError(e.to_string()))?;
        reg.register_partial("chart", CHART_TEMPLATE)
            .map_err(|e| IncomeReportError::TemplateError(e.to_string()))?;
        Ok(reg)
    }

    fn page_data<'a>(&'a self, report: &'a Report) -> Result<PageData<'a>> {
        let currency = script_json(report.currency.trim_end())?;
        let sections = report
            .sections
            .iter()
            .enumerate()
            .map(|(id, section)| {
                Ok(SectionData {
                    id,
                    heading: &section.heading,
                    width: self.chart_width,
                    height: self.chart_height,
                    values: script_json(&section.chart_data)?,
                    currency: currency.clone(),
                    stats: stat_lines(&section.stats, &report.currency),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PageData {
            title: &report.title,
            stylesheet: &self.stylesheet,
            sections,
        })
    }
}

impl ReportRenderer for HtmlRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let data = self.page_data(report)?;
        Self::registry()?
            .render("page", &data)
            .map_err(|e| IncomeReportError::TemplateError(e.to_string()))
    }
}

/// JSON for embedding in a `<script>` block; `</` would end the block early.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Pretty-printed JSON, for renderers that live outside this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

fn stat_lines(stats: &SummaryStats, currency: &str) -> Vec<StatLine> {
    let money = |value: f64| format!("{}{:.2}", currency, value);
    vec![
        StatLine {
            label: "Total income",
            value: money(stats.total_income),
        },
        StatLine {
            label: "Start date",
            value: stats.start_date.to_string(),
        },
        StatLine {
            label: "End date",
            value: stats.end_date.to_string(),
        },
        StatLine {
            label: "Total hours",
            value: stats.total_hours.to_string(),
        },
        StatLine {
            label: "Hours per week",
            value: format!("{:.1}", stats.hours_per_week),
        },
        StatLine {
            label: "Income per month",
            value: money(stats.income_per_month),
        },
        StatLine {
            label: "Income per week",
            value: money(stats.income_per_week),
        },
        StatLine {
            label: "Income per hour",
            value: money(stats.income_per_hour),
        },
    ]
}

/// The statistics block shown under each chart, one `label = value` per line.
pub fn format_stats(stats: &SummaryStats, currency: &str) -> String {
    stat_lines(stats, currency)
        .iter()
        .map(|line| format!("{} = {}\n", line.label, line.value))
        .collect()
}

pub fn write_report(
    renderer: &dyn ReportRenderer,
    report: &Report,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let output = renderer.render(report)?;
    std::fs::write(path, output)?;
    info!(
        "Wrote report with {} section(s) to {}",
        report.sections.len(),
        path.display()
    );
    Ok(())
}
