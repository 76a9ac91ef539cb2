//! GeoJSON line loading and route export.
//!
//! # What is loaded
//!
//! | Geometry             | Result                                  |
//! |----------------------|-----------------------------------------|
//! | `LineString`         | one [`LineFeature`]                     |
//! | `MultiLineString`    | one [`LineFeature`] per part            |
//! | `GeometryCollection` | members are loaded recursively          |
//! | anything else        | skipped with a warning                  |
//!
//! A feature's `class` property, or failing that its `highway` property,
//! becomes the line class used for per-class speed overrides.

use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, warn};

use cr_core::Coordinate;

use crate::engine::Route;
use crate::graph::LineFeature;
use crate::{SpatialError, SpatialResult};

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parse line features from a GeoJSON document (FeatureCollection, Feature
/// or bare Geometry).
///
/// # Errors
///
/// [`SpatialError::GeoJson`] on malformed JSON/GeoJSON or a position with
/// fewer than two components.
pub fn load_lines_from_str(text: &str) -> SpatialResult<Vec<LineFeature>> {
    let doc: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| SpatialError::GeoJson(e.to_string()))?;

    let mut lines = Vec::new();
    match doc {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                collect_feature(feature, &mut lines)?;
            }
        }
        GeoJson::Feature(feature) => collect_feature(&feature, &mut lines)?,
        GeoJson::Geometry(geometry) => collect_geometry(&geometry, None, &mut lines)?,
    }

    debug!(lines = lines.len(), "loaded GeoJSON line features");
    Ok(lines)
}

/// Read and parse a GeoJSON file.  See [`load_lines_from_str`].
pub fn load_lines_from_path(path: &Path) -> SpatialResult<Vec<LineFeature>> {
    let text = std::fs::read_to_string(path)?;
    load_lines_from_str(&text)
}

fn collect_feature(feature: &Feature, out: &mut Vec<LineFeature>) -> SpatialResult<()> {
    let Some(geometry) = &feature.geometry else {
        return Ok(());
    };
    let class = feature.properties.as_ref().and_then(line_class);
    collect_geometry(geometry, class.as_deref(), out)
}

fn line_class(props: &Map<String, JsonValue>) -> Option<String> {
    ["class", "highway"]
        .iter()
        .find_map(|k| props.get(*k).and_then(JsonValue::as_str))
        .map(str::to_owned)
}

fn collect_geometry(geometry: &Geometry, class: Option<&str>, out: &mut Vec<LineFeature>) -> SpatialResult<()> {
    match &geometry.value {
        Value::LineString(positions) => out.push(to_line(positions, class)?),
        Value::MultiLineString(parts) => {
            for positions in parts {
                out.push(to_line(positions, class)?);
            }
        }
        Value::GeometryCollection(members) => {
            for member in members {
                collect_geometry(member, class, out)?;
            }
        }
        other => warn!(geometry = geometry_name(other), "skipping non-line geometry"),
    }
    Ok(())
}

fn to_line(positions: &[Vec<f64>], class: Option<&str>) -> SpatialResult<LineFeature> {
    let coords = positions
        .iter()
        .map(|p| match p.as_slice() {
            [lon, lat, ..] => Ok(Coordinate::new(*lon, *lat)),
            _ => Err(SpatialError::GeoJson(format!(
                "position needs at least two components, got {}",
                p.len()
            ))),
        })
        .collect::<SpatialResult<Vec<_>>>()?;
    Ok(LineFeature { coords, class: class.map(str::to_owned) })
}

fn geometry_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

// ── Export ────────────────────────────────────────────────────────────────────

/// Render a route as a GeoJSON `LineString` feature with `distance_km`,
/// `time_minutes` and `mode` properties.
pub fn route_to_geojson(route: &Route) -> Feature {
    let positions: Vec<Vec<f64>> = route.coords.iter().map(|c| vec![c.lon, c.lat]).collect();

    let mut properties = Map::new();
    properties.insert("distance_km".into(), JsonValue::from(route.summary.distance_km));
    properties.insert("time_minutes".into(), JsonValue::from(route.summary.time_minutes));
    properties.insert("mode".into(), JsonValue::from(route.mode.as_str()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(positions))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Wrap route features in a FeatureCollection.
pub fn routes_to_collection(routes: &[Route]) -> GeoJson {
    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features: routes.iter().map(route_to_geojson).collect(),
        foreign_members: None,
    })
}
