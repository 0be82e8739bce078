use crate::config::ReportConfig;
use crate::error::Result;
use crate::schema::{ChartPoint, RenderableSection, Report};
use crate::slicer::Slice;
use crate::stats::compute_stats;
use log::{debug, warn};

/// Turns slices into report sections, in the order given. A slice without a
/// heading is labelled with its date range.
pub fn assemble(slices: &[Slice]) -> Result<Vec<RenderableSection>> {
    slices.iter().map(section_for).collect()
}

fn section_for(slice: &Slice) -> Result<RenderableSection> {
    let stats = compute_stats(slice)?;
    let heading = slice
        .heading
        .clone()
        .unwrap_or_else(|| slice.range_label());

    let chart_data = slice
        .buckets
        .iter()
        .map(|b| ChartPoint {
            x: b.period_start,
            y: b.income_sum,
        })
        .collect();

    debug!("Assembled section '{}'", heading);

    Ok(RenderableSection {
        heading,
        chart_data,
        stats,
    })
}

/// Builds the full report for a renderer. With `skip_empty_sections` set,
/// slices that hold no buckets are left out rather than failing the run.
pub fn assemble_report(slices: &[Slice], config: &ReportConfig) -> Result<Report> {
    let kept: Vec<Slice> = if config.skip_empty_sections {
        slices
            .iter()
            .filter(|slice| {
                if slice.is_empty() {
                    warn!(
                        "Skipping '{}': no income data between {} and {}",
                        slice.heading.as_deref().unwrap_or("untitled"),
                        slice.start,
                        slice.end
                    );
                    false
                } else {
                    true
                }
            })
            .cloned()
            .collect()
    } else {
        slices.to_vec()
    };

    Ok(Report {
        title: config.title.clone(),
        currency: config.currency.clone(),
        sections: assemble(&kept)?,
    })
}
