use serde::{Deserialize, Serialize};

use crate::geometry::area::{self, AreaMethod};

/// A point on the Earth's surface in WGS84 degrees
///
/// Serialized as a `[lat, lng]` pair, the shape the land records API uses
/// for `coordinates`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Equal within `1e-12` degrees (well under a millimeter)
    pub fn same_position(&self, other: &Coordinate) -> bool {
        (self.lat - other.lat).abs() < 1e-12 && (self.lng - other.lng).abs() < 1e-12
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(c: Coordinate) -> Self {
        (c.lat, c.lng)
    }
}

/// Ordered, implicitly closed ring of coordinates describing a parcel
///
/// Insertion order defines the winding. The first and last points are
/// connected without a repeated closing point. Fewer than three points is
/// allowed and simply encloses no area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Boundary {
    points: Vec<Coordinate>,
}

impl Boundary {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Build from `(lat, lng)` tuples
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self::new(pairs.iter().copied().map(Coordinate::from).collect())
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the ring cannot enclose any area
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Same ring traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Same ring starting at vertex `start` (taken modulo the length)
    pub fn rotated(&self, start: usize) -> Self {
        let mut points = self.points.clone();
        if !points.is_empty() {
            let n = points.len();
            points.rotate_left(start % n);
        }
        Self { points }
    }

    /// Area in square meters using the flat degree-to-meter conversion
    pub fn area(&self) -> f64 {
        area::polygon_area(&self.points)
    }

    pub fn area_with(&self, method: AreaMethod) -> f64 {
        area::area_with_method(&self.points, method)
    }

    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|&c| c.into()).collect()
    }
}

impl From<Vec<Coordinate>> for Boundary {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Coordinate> for Boundary {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_serializes_as_pair() {
        let c = Coordinate::new(7.8731, 80.7718);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "[7.8731,80.7718]");

        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_boundary_is_transparent_list() {
        let b: Boundary = serde_json::from_str("[[0.0,0.0],[0.0,1.0],[1.0,1.0]]").unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(b.points()[1], Coordinate::new(0.0, 1.0));
    }

    #[test]
    fn test_rotated_wraps_start() {
        let b = Boundary::from_pairs(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let r = b.rotated(4);
        assert_eq!(r.points()[0], Coordinate::new(1.0, 0.0));
        assert_eq!(r.points()[2], Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_rotated_empty() {
        assert!(Boundary::default().rotated(3).is_empty());
    }

    #[test]
    fn test_same_position_tolerance() {
        let a = Coordinate::new(6.9271, 79.8612);
        assert!(a.same_position(&Coordinate::new(6.9271 + 1e-13, 79.8612)));
        assert!(!a.same_position(&Coordinate::new(6.9271 + 1e-9, 79.8612)));
    }

    #[test]
    fn test_degenerate() {
        assert!(Boundary::from_pairs(&[(1.0, 1.0), (2.0, 2.0)]).is_degenerate());
        assert!(!Boundary::from_pairs(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]).is_degenerate());
    }
}
