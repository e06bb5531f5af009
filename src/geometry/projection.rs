use crate::domain::Coordinate;

/// Meters per degree of latitude (and of longitude at the equator)
pub const METERS_PER_DEGREE: f64 = 111320.0;

/// Equirectangular projection from WGS84 to local meters
///
/// Uses approximation suitable for parcel-scale shapes:
/// - x = (lng - center_lng) * cos(center_lat) * 111320
/// - y = (lat - center_lat) * 111320
///
/// Accurate to well under a percent for anything a surveyor would draw as
/// a single parcel.
#[derive(Debug, Clone)]
pub struct Projector {
    center: Coordinate,
    cos_lat: f64,
}

impl Projector {
    /// Create a new projector centered at the given coordinate
    pub fn new(center: Coordinate) -> Self {
        Self {
            center,
            cos_lat: center.lat.to_radians().cos(),
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    /// Project a point to local meters
    ///
    /// # Returns
    /// * (x, y) in meters, east and north of the projection center
    pub fn project(&self, point: Coordinate) -> (f64, f64) {
        let x = (point.lng - self.center.lng) * self.cos_lat * METERS_PER_DEGREE;
        let y = (point.lat - self.center.lat) * METERS_PER_DEGREE;

        (x, y)
    }

    /// Project a slice of points
    pub fn project_points(&self, points: &[Coordinate]) -> Vec<(f64, f64)> {
        points.iter().map(|&p| self.project(p)).collect()
    }
}
