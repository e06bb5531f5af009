use serde::Serialize;

use crate::domain::Coordinate;

/// Bounding box of a boundary in degrees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from a set of coordinates
    pub fn from_coordinates(points: &[Coordinate]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Midpoint of the box
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_coordinates() {
        let points = vec![
            Coordinate::new(6.90, 79.85),
            Coordinate::new(6.95, 79.80),
            Coordinate::new(6.92, 79.90),
        ];
        let bounds = Bounds::from_coordinates(&points).unwrap();

        assert_eq!(bounds.min_lat, 6.90);
        assert_eq!(bounds.max_lat, 6.95);
        assert_eq!(bounds.min_lng, 79.80);
        assert_eq!(bounds.max_lng, 79.90);
        assert!(bounds.contains(Coordinate::new(6.93, 79.86)));
        assert!(!bounds.contains(Coordinate::new(7.0, 79.86)));
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_coordinates(&[]).is_none());
    }

    #[test]
    fn test_center() {
        let bounds = Bounds {
            min_lat: 0.0,
            max_lat: 2.0,
            min_lng: 10.0,
            max_lng: 20.0,
        };
        assert_eq!(bounds.center(), Coordinate::new(1.0, 15.0));
        assert_eq!(bounds.lat_span(), 2.0);
        assert_eq!(bounds.lng_span(), 10.0);
    }
}
