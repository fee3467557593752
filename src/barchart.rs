// Bar chart construction: population by single year of age, one bar per
// age, categorical x-axis.

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

#[derive(Debug, Clone)]
pub struct BarChartSpec {
    pub caption: String,
    pub x_label: String,
    pub y_label: String,
    pub color: RGBColor,
}

// Mirrors the original's bargap of 0.2.
const BAR_WIDTH: f64 = 0.8;

pub fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    categories: &[String],
    values: &[f64],
    spec: &BarChartSpec,
) -> Result<()> {
    if categories.len() != values.len() {
        anyhow::bail!(
            "Categories and values must have the same length (categories: {}, values: {})",
            categories.len(),
            values.len()
        );
    }
    if categories.is_empty() {
        anyhow::bail!("Cannot create bar chart with no data");
    }

    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill background: {}", e))?;

    let y_max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let y_max = if y_max <= 0.0 { 1.0 } else { y_max * 1.05 };
    let x_range = 0.0..(categories.len() as f64);

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .caption(&spec.caption, ("sans-serif", 18))
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, 0.0..y_max)
        .map_err(|e| anyhow!("Failed to build chart: {}", e))?;

    let category_labels = categories.to_vec();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len().min(20))
        .x_label_formatter(&|x| {
            let idx = *x as usize;
            category_labels.get(idx).cloned().unwrap_or_default()
        })
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()
        .map_err(|e| anyhow!("Failed to draw mesh: {}", e))?;

    for (idx, &value) in values.iter().enumerate() {
        let x_center = idx as f64 + 0.5;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (x_center - BAR_WIDTH / 2.0, 0.0),
                    (x_center + BAR_WIDTH / 2.0, value),
                ],
                spec.color.filled(),
            )))
            .map_err(|e| anyhow!("Failed to draw bar: {}", e))?;
    }

    root.present()
        .map_err(|e| anyhow!("Failed to present drawing: {}", e))?;
    Ok(())
}
