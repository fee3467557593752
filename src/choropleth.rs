// Choropleth map construction: filled district polygons coloured by the
// resolved density column, with a colour bar on the right margin.

use crate::geo::Boundaries;
use crate::palette::{SequentialPalette, BOUNDARY_LINE, OCEAN, UNMATCHED_AREA};
use crate::scale::ColorScale;
use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::HashMap;

/// Text placed on the map: caption above the plot, legend title and the
/// resolved population label next to the colour bar.
#[derive(Debug, Clone)]
pub struct MapSpec {
    pub caption: String,
    pub legend_title: String,
    pub context_label: String,
}

const LEGEND_WIDTH: u32 = 150;
const LEGEND_STEPS: usize = 64;

/// Draw the full map onto a drawing area: ocean backdrop, one filled
/// polygon per district (grey when the table has no row for it), boundary
/// outlines, and the colour bar.
pub fn draw_map<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    boundaries: &Boundaries,
    values: &HashMap<String, f64>,
    scale: &ColorScale,
    palette: &SequentialPalette,
    spec: &MapSpec,
) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill background: {}", e))?;

    let (width, _) = root.dim_in_pixel();
    let legend_width = LEGEND_WIDTH.min(width / 4);
    let (map_area, legend_area) = root.split_horizontally((width - legend_width) as i32);

    let (min_lon, min_lat, max_lon, max_lat) = boundaries.bounding_box();
    let lon_pad = ((max_lon - min_lon) * 0.03).max(0.05);
    let lat_pad = ((max_lat - min_lat) * 0.03).max(0.05);

    let mut chart = ChartBuilder::on(&map_area)
        .margin(10)
        .caption(&spec.caption, ("sans-serif", 18))
        .build_cartesian_2d(
            (min_lon - lon_pad)..(max_lon + lon_pad),
            (min_lat - lat_pad)..(max_lat + lat_pad),
        )
        .map_err(|e| anyhow!("Failed to build map chart: {}", e))?;

    chart
        .plotting_area()
        .fill(&OCEAN)
        .map_err(|e| anyhow!("Failed to fill map backdrop: {}", e))?;

    // Fills first, outlines after, so shared borders stay visible.
    for area in &boundaries.areas {
        let color = match values.get(&area.code) {
            Some(&v) => palette.color_at(scale.normalize(v)),
            None => UNMATCHED_AREA,
        };

        for polygon in &area.polygons {
            if polygon.exterior.len() < 3 {
                continue;
            }
            chart
                .draw_series(std::iter::once(Polygon::new(
                    polygon.exterior.clone(),
                    color.filled(),
                )))
                .map_err(|e| anyhow!("Failed to fill area '{}': {}", area.code, e))?;
        }
    }

    for area in &boundaries.areas {
        for polygon in &area.polygons {
            for ring in std::iter::once(&polygon.exterior).chain(polygon.holes.iter()) {
                if ring.len() < 2 {
                    continue;
                }
                let mut path = ring.clone();
                if path.first() != path.last() {
                    if let Some(&first) = path.first() {
                        path.push(first);
                    }
                }
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        path,
                        BOUNDARY_LINE.stroke_width(1),
                    )))
                    .map_err(|e| anyhow!("Failed to outline area '{}': {}", area.code, e))?;
            }
        }
    }

    draw_color_bar(&legend_area, scale, palette, spec)?;

    root.present()
        .map_err(|e| anyhow!("Failed to present drawing: {}", e))?;
    Ok(())
}

/// Vertical colour gradient with the domain extremes labelled, low at the
/// bottom to match the map colouring.
fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: &ColorScale,
    palette: &SequentialPalette,
    spec: &MapSpec,
) -> Result<()> {
    let (_, height) = area.dim_in_pixel();
    let bar_left = 20;
    let bar_right = 45;
    let top = 70;
    let bottom = height as i32 - 50;
    if bottom <= top {
        return Ok(());
    }

    area.draw(&Text::new(
        spec.legend_title.clone(),
        (10, 30),
        ("sans-serif", 15).into_font(),
    ))
    .map_err(|e| anyhow!("Failed to draw legend title: {}", e))?;

    let span = (bottom - top) as f64;
    for i in 0..LEGEND_STEPS {
        let t0 = i as f64 / LEGEND_STEPS as f64;
        let t1 = (i + 1) as f64 / LEGEND_STEPS as f64;
        let y0 = bottom - (t1 * span).round() as i32;
        let y1 = bottom - (t0 * span).round() as i32;
        let color = palette.color_at((t0 + t1) / 2.0);
        area.draw(&Rectangle::new([(bar_left, y0), (bar_right, y1)], color.filled()))
            .map_err(|e| anyhow!("Failed to draw colour bar: {}", e))?;
    }

    let (min, max) = scale.domain();
    area.draw(&Text::new(
        format_tick(max),
        (bar_right + 6, top - 7),
        ("sans-serif", 13).into_font(),
    ))
    .map_err(|e| anyhow!("Failed to draw legend label: {}", e))?;
    area.draw(&Text::new(
        format_tick(min),
        (bar_right + 6, bottom - 7),
        ("sans-serif", 13).into_font(),
    ))
    .map_err(|e| anyhow!("Failed to draw legend label: {}", e))?;

    area.draw(&Text::new(
        spec.context_label.clone(),
        (10, bottom + 20),
        ("sans-serif", 13).into_font(),
    ))
    .map_err(|e| anyhow!("Failed to draw legend context: {}", e))?;

    Ok(())
}

fn format_tick(v: f64) -> String {
    if v.abs() >= 100.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}
