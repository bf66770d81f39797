//! Bar chart of the top storage cost contributors.
//!
//! Renders a ranked bar chart to a fixed-name PNG, one bar per user,
//! costs converted to gibibytes and each bar annotated with its value.

use crate::models::ReconciledRecord;
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Fixed name of the chart artifact.
pub const CHART_FILE_NAME: &str = "top_10_users_plot.png";

/// How many users the chart shows.
const TOP_USER_COUNT: usize = 10;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

const CHART_SIZE: (u32, u32) = (1000, 600);

/// Rank records by storage cost descending and keep the top `count`.
///
/// Records without a cost rank as zero. Returns `(user, cost_gib)` pairs.
pub fn top_by_cost(records: &[ReconciledRecord], count: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = records
        .iter()
        .map(|r| (r.user.clone(), r.storage_cost.unwrap_or(0.0)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(count);
    ranked
        .into_iter()
        .map(|(user, cost)| (user, cost / BYTES_PER_GIB))
        .collect()
}

/// Render the top-ten storage cost chart to `path`.
pub fn render_top_users(records: &[ReconciledRecord], path: &Path) -> Result<()> {
    let ranked = top_by_cost(records, TOP_USER_COUNT);
    let users: Vec<String> = ranked.iter().map(|(user, _)| user.clone()).collect();
    let costs_gib: Vec<f64> = ranked.iter().map(|(_, gib)| *gib).collect();

    let y_max = costs_gib.iter().copied().fold(0.0, f64::max).max(1.0) * 1.15;
    let x_segments = users.len().max(1);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("failed to render chart {}", path.display()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top 10 Users by Storage Cost", ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(70)
        .y_label_area_size(70)
        .build_cartesian_2d((0..x_segments).into_segmented(), 0f64..y_max)
        .context("failed to lay out chart")?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Users")
        .y_desc("Storage Cost (GiB)")
        .x_labels(x_segments)
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) if *index < users.len() => users[*index].clone(),
            _ => String::new(),
        })
        .draw()
        .context("failed to draw chart axes")?;

    chart
        .draw_series(costs_gib.iter().enumerate().map(|(index, gib)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(index), 0.0),
                    (SegmentValue::Exact(index + 1), *gib),
                ],
                Palette99::pick(index).filled(),
            );
            bar.set_margin(0, 0, 12, 12);
            bar
        }))
        .context("failed to draw chart bars")?;

    chart
        .draw_series(costs_gib.iter().enumerate().map(|(index, gib)| {
            Text::new(
                format!("{:.2}", gib),
                (SegmentValue::CenterOf(index), *gib + y_max * 0.01),
                ("sans-serif", 14),
            )
        }))
        .context("failed to draw chart labels")?;

    root.present()
        .with_context(|| format!("failed to render chart {}", path.display()))?;

    info!(path = %path.display(), users = users.len(), "chart rendered");
    Ok(())
}
