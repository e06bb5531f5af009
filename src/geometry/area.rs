//! Parcel area from a ring of (lat, lng) degrees
//!
//! The default is the flat approximation the land records system has always
//! stored: shoelace area in square degrees multiplied by `111320²`. It does
//! not correct longitude degrees for latitude, so parcels away from the
//! equator come out larger than they are. The other [`AreaMethod`]s are
//! opt-in and change the numbers for existing records.

use clap::ValueEnum;
use geo::{GeodesicArea, LineString, Polygon};
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::projection::{METERS_PER_DEGREE, Projector};
use crate::domain::Coordinate;

/// Square meters per square degree under the flat approximation
pub const SQ_METERS_PER_SQ_DEGREE: f64 = METERS_PER_DEGREE * METERS_PER_DEGREE;

/// How degrees are turned into square meters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AreaMethod {
    /// Fixed 111320 m per degree on both axes
    #[default]
    Flat,
    /// Local equirectangular projection around the parcel centroid
    Projected,
    /// Ellipsoidal area on WGS84
    Geodesic,
}

/// Ring orientation in the (lat, lng) plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    Degenerate,
}

/// Signed shoelace area in square degrees
///
/// Accumulates `lat[i] * lng[j] - lat[j] * lng[i]` over every edge `(i, j)`
/// with `j = (i + 1) mod n`, then halves. Returns 0 for fewer than three
/// points.
pub fn signed_area_deg2(points: &[Coordinate]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].lat * points[j].lng - points[j].lat * points[i].lng;
    }

    sum / 2.0
}

/// Parcel area in square meters using the flat approximation
///
/// Never fails: degenerate input yields 0 and self-intersecting rings get
/// whatever the signed sum produces.
pub fn polygon_area(points: &[Coordinate]) -> f64 {
    signed_area_deg2(points).abs() * SQ_METERS_PER_SQ_DEGREE
}

/// Parcel area in square meters with an explicit conversion method
pub fn area_with_method(points: &[Coordinate], method: AreaMethod) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    match method {
        AreaMethod::Flat => polygon_area(points),
        AreaMethod::Projected => projected_area(points),
        AreaMethod::Geodesic => geodesic_area(points),
    }
}

pub fn winding(points: &[Coordinate]) -> Winding {
    let signed = signed_area_deg2(points);
    if signed > 0.0 {
        Winding::CounterClockwise
    } else if signed < 0.0 {
        Winding::Clockwise
    } else {
        Winding::Degenerate
    }
}

fn projected_area(points: &[Coordinate]) -> f64 {
    let center = match Bounds::from_coordinates(points) {
        Some(b) => b.center(),
        None => return 0.0,
    };
    let projector = Projector::new(center);
    let projected = projector.project_points(points);

    let n = projected.len();
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let (xi, yi) = projected[i];
        let (xj, yj) = projected[j];
        sum += xi * yj - xj * yi;
    }

    (sum / 2.0).abs()
}

fn geodesic_area(points: &[Coordinate]) -> f64 {
    let ring: LineString<f64> = points
        .iter()
        .map(|c| geo::coord! { x: c.lng, y: c.lat })
        .collect();
    // Signed area keeps clockwise rings small instead of measuring the
    // rest of the globe.
    Polygon::new(ring, vec![]).geodesic_area_signed().abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(pairs: &[(f64, f64)]) -> Vec<Coordinate> {
        pairs.iter().copied().map(Coordinate::from).collect()
    }

    fn assert_close(a: f64, b: f64) {
        let tol = 1e-9 * a.abs().max(b.abs()).max(1.0);
        assert!((a - b).abs() <= tol, "{} != {}", a, b);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&pts(&[(1.0, 1.0)])), 0.0);
        assert_eq!(polygon_area(&pts(&[(1.0, 1.0), (2.0, 2.0)])), 0.0);
    }

    #[test]
    fn test_triangle() {
        let tri = pts(&[(0.0, 0.0), (0.0, 2.0), (2.0, 0.0)]);
        assert_close(signed_area_deg2(&tri).abs(), 2.0);
        assert_close(polygon_area(&tri), 2.0 * 111320.0 * 111320.0);
    }

    #[test]
    fn test_small_square_at_equator() {
        let d = 0.001;
        let square = pts(&[(0.0, 0.0), (0.0, d), (d, d), (d, 0.0)]);
        assert_close(polygon_area(&square), d * d * 111320.0 * 111320.0);
    }

    #[test]
    fn test_collinear_is_zero() {
        let line = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(polygon_area(&line), 0.0);
        assert_eq!(winding(&line), Winding::Degenerate);
    }

    #[test]
    fn test_duplicate_consecutive_points() {
        let square = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let doubled = pts(&[(0.0, 0.0), (0.0, 1.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert_close(polygon_area(&square), polygon_area(&doubled));
    }

    #[test]
    fn test_winding_sign() {
        // lat on the first axis, lng on the second
        let ccw = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(winding(&ccw), Winding::CounterClockwise);
        let mut cw = ccw.clone();
        cw.reverse();
        assert_eq!(winding(&cw), Winding::Clockwise);
    }

    #[test]
    fn test_flat_method_matches_default() {
        let tri = pts(&[(6.9, 79.8), (6.91, 79.8), (6.9, 79.81)]);
        assert_eq!(area_with_method(&tri, AreaMethod::Flat), polygon_area(&tri));
    }

    #[test]
    fn test_upgraded_methods_degenerate() {
        let two = pts(&[(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(area_with_method(&two, AreaMethod::Projected), 0.0);
        assert_eq!(area_with_method(&two, AreaMethod::Geodesic), 0.0);
    }

    #[test]
    fn test_projected_and_geodesic_agree_in_sri_lanka() {
        // ~100 m square near the island's center
        let d = 0.0009;
        let (lat, lng) = (7.8731, 80.7718);
        let square = pts(&[(lat, lng), (lat, lng + d), (lat + d, lng + d), (lat + d, lng)]);

        let flat = area_with_method(&square, AreaMethod::Flat);
        let projected = area_with_method(&square, AreaMethod::Projected);
        let geodesic = area_with_method(&square, AreaMethod::Geodesic);

        assert!((projected - geodesic).abs() / geodesic < 0.01);

        let cos_lat = lat.to_radians().cos();
        assert!((projected / flat - cos_lat).abs() < 1e-3);
    }

    #[test]
    fn test_geodesic_orientation_independent() {
        let tri = pts(&[(6.9, 79.8), (6.91, 79.8), (6.9, 79.81)]);
        let mut rev = tri.clone();
        rev.reverse();
        let a = area_with_method(&tri, AreaMethod::Geodesic);
        let b = area_with_method(&rev, AreaMethod::Geodesic);
        assert!(a > 0.0);
        assert!((a - b).abs() / a < 1e-6);
    }
}
