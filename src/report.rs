use serde::Serialize;

use crate::domain::Boundary;
use crate::geometry::{
    AreaMethod, AreaUnit, Bounds, Winding, area_with_method, find_crossings, format_area, units,
    winding,
};

/// Everything the CLI prints about a boundary
#[derive(Debug, Clone, Serialize)]
pub struct AreaReport {
    pub points: usize,
    pub method: AreaMethod,
    pub area_m2: f64,
    pub unit: AreaUnit,
    pub area: f64,
    pub winding: Winding,
    pub bounds: Option<Bounds>,
    /// Crossing edge pairs; empty for a simple ring
    pub crossings: Vec<(usize, usize)>,
}

impl AreaReport {
    pub fn compute(boundary: &Boundary, method: AreaMethod, unit: AreaUnit) -> Self {
        let points = boundary.points();
        let area_m2 = area_with_method(points, method);

        Self {
            points: points.len(),
            method,
            area_m2,
            unit,
            area: units::from_square_meters(area_m2, unit),
            winding: winding(points),
            bounds: Bounds::from_coordinates(points),
            crossings: find_crossings(points).crossings,
        }
    }

    pub fn is_simple(&self) -> bool {
        self.crossings.is_empty()
    }

    pub fn formatted_area(&self, precision: usize) -> String {
        format_area(self.area_m2, self.unit, precision)
    }
}
