use serde_json::Value;
use std::path::Path;
use thiserror::Error;

use crate::domain::{Boundary, Coordinate};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported boundary document: {0}")]
    Unsupported(String),

    #[error("position {index} is not a pair of finite numbers")]
    InvalidPosition { index: usize },
}

/// Axis order of a position array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    /// `[lat, lng]`, as drawn by the map widget and stored on records
    LatLng,
    /// `[lng, lat]`, as in GeoJSON
    LngLat,
}

/// Read a boundary from a JSON or GeoJSON file
pub fn read_boundary_file(path: &Path) -> Result<Boundary, ParseError> {
    parse_boundary(&read_to_string(path)?)
}

pub(crate) fn read_to_string(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parse a boundary document
///
/// Accepts:
/// - an array of `[lat, lng]` pairs or `{"lat": .., "lng": ..}` objects
/// - a saved record, i.e. an object with a `coordinates` array of pairs
/// - a GeoJSON `Polygon`, or a `Feature`/`FeatureCollection` holding one;
///   only the outer ring is used
///
/// A trailing point equal to the first one is dropped since the ring is
/// closed implicitly.
pub fn parse_boundary(contents: &str) -> Result<Boundary, ParseError> {
    let value: Value = serde_json::from_str(contents)?;
    let points = parse_value(&value)?;
    let boundary = Boundary::new(drop_closing_point(points));
    tracing::debug!(points = boundary.len(), "parsed boundary");
    Ok(boundary)
}

fn parse_value(value: &Value) -> Result<Vec<Coordinate>, ParseError> {
    match value {
        Value::Array(items) => parse_positions(items, Order::LatLng),
        Value::Object(obj) => match obj.get("type").and_then(Value::as_str) {
            Some("Polygon") => parse_geojson_polygon(value),
            Some("Feature") => {
                let geometry = obj
                    .get("geometry")
                    .ok_or_else(|| ParseError::Unsupported("Feature without geometry".into()))?;
                parse_geojson_polygon(geometry)
            }
            Some("FeatureCollection") => {
                let features = obj
                    .get("features")
                    .and_then(Value::as_array)
                    .ok_or_else(|| {
                        ParseError::Unsupported("FeatureCollection without features".into())
                    })?;
                let polygon = features
                    .iter()
                    .filter_map(|f| f.get("geometry"))
                    .find(|g| g.get("type").and_then(Value::as_str) == Some("Polygon"))
                    .ok_or_else(|| {
                        ParseError::Unsupported("FeatureCollection has no Polygon feature".into())
                    })?;
                if features.len() > 1 {
                    tracing::warn!(
                        features = features.len(),
                        "using the first Polygon feature only"
                    );
                }
                parse_geojson_polygon(polygon)
            }
            Some(other) => Err(ParseError::Unsupported(format!(
                "GeoJSON type {other:?} (expected Polygon)"
            ))),
            None => match obj.get("coordinates") {
                Some(Value::Array(items)) => parse_positions(items, Order::LatLng),
                _ => Err(ParseError::Unsupported(
                    "object has neither a GeoJSON type nor a coordinates array".into(),
                )),
            },
        },
        _ => Err(ParseError::Unsupported(
            "expected an array of points or an object".into(),
        )),
    }
}

fn parse_geojson_polygon(geometry: &Value) -> Result<Vec<Coordinate>, ParseError> {
    if geometry.get("type").and_then(Value::as_str) != Some("Polygon") {
        return Err(ParseError::Unsupported("geometry is not a Polygon".into()));
    }

    let rings = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::Unsupported("Polygon without coordinates".into()))?;

    let outer = match rings.first() {
        Some(Value::Array(ring)) => ring,
        Some(_) => return Err(ParseError::Unsupported("Polygon ring is not an array".into())),
        None => return Ok(Vec::new()),
    };

    if rings.len() > 1 {
        tracing::warn!(holes = rings.len() - 1, "ignoring polygon holes");
    }

    parse_positions(outer, Order::LngLat)
}

fn parse_positions(items: &[Value], order: Order) -> Result<Vec<Coordinate>, ParseError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse_position(item, order).ok_or(ParseError::InvalidPosition { index })
        })
        .collect()
}

fn parse_position(item: &Value, order: Order) -> Option<Coordinate> {
    let (lat, lng) = match item {
        // Extra elements (altitude) are ignored
        Value::Array(pair) if pair.len() >= 2 => {
            let a = pair[0].as_f64()?;
            let b = pair[1].as_f64()?;
            match order {
                Order::LatLng => (a, b),
                Order::LngLat => (b, a),
            }
        }
        Value::Object(obj) => {
            let lat = obj.get("lat")?.as_f64()?;
            let lng = obj.get("lng").or_else(|| obj.get("lon"))?.as_f64()?;
            (lat, lng)
        }
        _ => return None,
    };

    let point = Coordinate::new(lat, lng);
    point.is_finite().then_some(point)
}

/// Refuse the first point with a NaN or infinite component
pub(crate) fn finite_points(boundary: Boundary) -> Result<Vec<Coordinate>, ParseError> {
    let points = boundary.into_points();
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(ParseError::InvalidPosition { index }),
        None => Ok(points),
    }
}

pub(crate) fn drop_closing_point(mut points: Vec<Coordinate>) -> Vec<Coordinate> {
    if points.len() >= 2 {
        let first = points[0];
        if points.last().is_some_and(|last| last.same_position(&first)) {
            points.pop();
        }
    }
    points
}
