// GeoJSON boundary loading. The charting layer only needs, per area, the
// joining code and the polygon rings in lon/lat, so that is all we keep.

use anyhow::{Context, Result};
use geojson::{GeoJson, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A single polygon: exterior ring plus any interior (hole) rings, each a
/// closed sequence of (lon, lat) points.
#[derive(Debug, Clone)]
pub struct Ring {
    pub exterior: Vec<(f64, f64)>,
    pub holes: Vec<Vec<(f64, f64)>>,
}

/// One geographic area: the joining code plus its polygons (more than one
/// for island districts).
#[derive(Debug, Clone)]
pub struct Area {
    pub code: String,
    pub polygons: Vec<Ring>,
}

/// Boundary set loaded from a FeatureCollection.
#[derive(Debug, Clone)]
pub struct Boundaries {
    pub areas: Vec<Area>,
    /// Features dropped for lacking the id property or polygonal geometry.
    pub skipped: usize,
}

impl Boundaries {
    pub fn from_path(path: &Path, id_property: &str) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open GeoJSON file '{}'", path.display()))?;
        let geojson = GeoJson::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse GeoJSON file '{}'", path.display()))?;
        Self::from_geojson(geojson, id_property)
    }

    pub fn from_str(content: &str, id_property: &str) -> Result<Self> {
        let geojson: GeoJson = content.parse().context("Failed to parse GeoJSON")?;
        Self::from_geojson(geojson, id_property)
    }

    fn from_geojson(geojson: GeoJson, id_property: &str) -> Result<Self> {
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => anyhow::bail!("GeoJSON must be a FeatureCollection"),
        };

        let mut areas = Vec::new();
        let mut skipped = 0;

        for feature in collection.features {
            let code = feature
                .properties
                .as_ref()
                .and_then(|props| props.get(id_property))
                .and_then(|v| v.as_str())
                .map(str::to_string);

            let geometry = feature.geometry;
            let (code, geometry) = match (code, geometry) {
                (Some(code), Some(geometry)) => (code, geometry),
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            let polygons = match geometry.value {
                Value::Polygon(rings) => vec![convert_polygon(&rings)],
                Value::MultiPolygon(multi) => multi.iter().map(|p| convert_polygon(p)).collect(),
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            areas.push(Area { code, polygons });
        }

        if areas.is_empty() {
            anyhow::bail!("GeoJSON contains no usable polygon features");
        }

        Ok(Self { areas, skipped })
    }

    /// Lon/lat bounding box over every ring: (min_lon, min_lat, max_lon,
    /// max_lat).
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let mut min_lon = f64::INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut max_lat = f64::NEG_INFINITY;

        for area in &self.areas {
            for polygon in &area.polygons {
                for &(lon, lat) in &polygon.exterior {
                    min_lon = min_lon.min(lon);
                    max_lon = max_lon.max(lon);
                    min_lat = min_lat.min(lat);
                    max_lat = max_lat.max(lat);
                }
            }
        }

        (min_lon, min_lat, max_lon, max_lat)
    }
}

fn convert_polygon(rings: &[Vec<Vec<f64>>]) -> Ring {
    let exterior = rings.first().map(|r| convert_ring(r)).unwrap_or_default();
    let holes = rings.iter().skip(1).map(|r| convert_ring(r)).collect();
    Ring { exterior, holes }
}

fn convert_ring(ring: &[Vec<f64>]) -> Vec<(f64, f64)> {
    ring.iter()
        .filter(|pos| pos.len() >= 2)
        .map(|pos| (pos[0], pos[1]))
        .collect()
}
