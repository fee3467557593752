// One rendering pass per request: load the tables, resolve columns, draw,
// encode. The original re-ran its whole script on every selector change;
// here each CLI invocation is one pass.

use crate::barchart::{self, BarChartSpec};
use crate::choropleth::{self, MapSpec};
use crate::geo::Boundaries;
use crate::palette::{self, PaletteKind};
use crate::resolve;
use crate::scale::ColorScale;
use crate::selection::{AgeGroup, Gender, Year};
use crate::table::Table;
use crate::transform;
use crate::{OutputFormat, RenderOptions};
use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Boundary file shipped alongside the CSVs.
pub const DEFAULT_BOUNDARY_FILE: &str = "Local_Authority_Districts_May_2024_Boundaries_UK.geojson";

/// Long-format population table used by the bar chart.
pub const POPULATION_FILE: &str = "df_uk_population.csv";

/// Feature property joining boundaries to table rows.
pub const AREA_ID_PROPERTY: &str = "LAD24CD";

#[derive(Debug, Clone, Copy)]
pub struct MapRequest {
    pub year: Year,
    pub gender: Gender,
    pub age_group: AgeGroup,
    pub palette: PaletteKind,
}

#[derive(Debug, Clone, Copy)]
pub struct BarsRequest {
    pub year: Year,
    pub gender: Gender,
}

/// Render the density choropleth for one selection, returning encoded
/// PNG or SVG bytes.
pub fn render_map(
    data_dir: &Path,
    boundaries_path: Option<&Path>,
    req: &MapRequest,
    opts: &RenderOptions,
) -> Result<Vec<u8>> {
    let density_path = data_dir.join(req.year.density_file());
    let mut table = Table::from_path(&density_path)?;
    resolve::verify_schema(&table)
        .with_context(|| format!("Schema check failed for '{}'", density_path.display()))?;

    let default_path;
    let boundaries_path = match boundaries_path {
        Some(path) => path,
        None => {
            default_path = data_dir.join(DEFAULT_BOUNDARY_FILE);
            &default_path
        }
    };
    let boundaries = Boundaries::from_path(boundaries_path, AREA_ID_PROPERTY)?;
    if boundaries.skipped > 0 {
        eprintln!(
            "Warning: skipped {} boundary feature(s) without '{}' or polygon geometry",
            boundaries.skipped, AREA_ID_PROPERTY
        );
    }

    // The source data has no combined per-age-group density column, so the
    // map falls back to the overall figure while the legend still shows the
    // age-group population. Say so rather than doing it silently.
    if req.gender == Gender::Both && req.age_group != AgeGroup::All {
        eprintln!(
            "Warning: no combined density column exists for '{}'; colouring by overall '{}'",
            req.age_group.label(),
            resolve::PERSON_DENSITY
        );
    }

    let density_col = resolve::density_column(req.gender, req.age_group);
    let population_col = resolve::population_column(req.gender, req.age_group, &mut table)?;
    let population_label = resolve::population_label(req.gender, req.age_group, &population_col);

    let codes = table.column("code")?;
    let densities = table.numeric_column(&density_col)?;
    let values: HashMap<String, f64> = codes
        .iter()
        .cloned()
        .zip(densities.iter().copied())
        .collect();

    let area_codes: HashSet<&str> = boundaries
        .areas
        .iter()
        .map(|a| a.code.as_str())
        .collect();
    let unmatched = codes
        .iter()
        .filter(|c| !area_codes.contains(c.as_str()))
        .count();
    if unmatched > 0 {
        eprintln!(
            "Warning: {} table row(s) have no matching boundary feature",
            unmatched
        );
    }

    let scale = ColorScale::from_values(&densities);
    let palette = req.palette.palette();
    let spec = MapSpec {
        caption: format!(
            "UK Population Density by Local Authority District {} - {} - {}",
            req.year,
            req.gender.title(),
            req.age_group.label()
        ),
        legend_title: "Population Density".to_string(),
        context_label: population_label,
    };

    match opts.format {
        OutputFormat::Png => {
            let mut buffer = rgb_buffer(opts);
            {
                let root = BitMapBackend::with_buffer(&mut buffer, (opts.width, opts.height))
                    .into_drawing_area();
                choropleth::draw_map(&root, &boundaries, &values, &scale, &palette, &spec)?;
            }
            encode_png(&buffer, opts.width, opts.height)
        }
        OutputFormat::Svg => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (opts.width, opts.height))
                    .into_drawing_area();
                choropleth::draw_map(&root, &boundaries, &values, &scale, &palette, &spec)?;
            }
            Ok(svg.into_bytes())
        }
    }
}

/// Render the population-by-age bar chart for one selection.
pub fn render_bars(data_dir: &Path, req: &BarsRequest, opts: &RenderOptions) -> Result<Vec<u8>> {
    let population_path = data_dir.join(POPULATION_FILE);
    let table = Table::from_path(&population_path)?;

    let (ages, values) = transform::population_by_age(&table, req.year, req.gender)?;

    let gender_title = match req.gender {
        Gender::Both => "All Genders",
        Gender::Male => "Male",
        Gender::Female => "Female",
    };
    let spec = BarChartSpec {
        caption: format!("UK Population by Age - {} ({})", gender_title, req.year),
        x_label: "Age".to_string(),
        y_label: "Population".to_string(),
        color: palette::gender_color(req.gender),
    };

    match opts.format {
        OutputFormat::Png => {
            let mut buffer = rgb_buffer(opts);
            {
                let root = BitMapBackend::with_buffer(&mut buffer, (opts.width, opts.height))
                    .into_drawing_area();
                barchart::draw_bars(&root, &ages, &values, &spec)?;
            }
            encode_png(&buffer, opts.width, opts.height)
        }
        OutputFormat::Svg => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (opts.width, opts.height))
                    .into_drawing_area();
                barchart::draw_bars(&root, &ages, &values, &spec)?;
            }
            Ok(svg.into_bytes())
        }
    }
}

fn rgb_buffer(opts: &RenderOptions) -> Vec<u8> {
    vec![0u8; opts.width as usize * opts.height as usize * 3]
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }
    Ok(png_bytes)
}
