use thiserror::Error;

use super::{Boundary, Coordinate};
use crate::geometry::{area, simplicity};

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("boundary needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    #[error("point ({lat}, {lng}) would make the boundary cross itself")]
    EdgeCrossing { lat: f64, lng: f64 },

    #[error("point ({lat}, {lng}) is not a finite coordinate")]
    NonFinite { lat: f64, lng: f64 },
}

/// A boundary being drawn point by point
///
/// Append-only apart from [`BoundaryDraft::undo`]. Completing the draft
/// hands back an immutable [`Boundary`].
#[derive(Debug, Clone, Default)]
pub struct BoundaryDraft {
    points: Vec<Coordinate>,
}

impl BoundaryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point without any checks
    pub fn push(&mut self, point: Coordinate) {
        self.points.push(point);
    }

    /// Append a point unless it is non-finite or its new edge crosses one
    /// already drawn
    pub fn push_checked(&mut self, point: Coordinate) -> Result<(), DraftError> {
        if !point.is_finite() {
            return Err(DraftError::NonFinite {
                lat: point.lat,
                lng: point.lng,
            });
        }
        if simplicity::new_edge_crosses(&self.points, point) {
            return Err(DraftError::EdgeCrossing {
                lat: point.lat,
                lng: point.lng,
            });
        }
        self.points.push(point);
        Ok(())
    }

    /// Drop the last point
    pub fn undo(&mut self) -> Option<Coordinate> {
        self.points.pop()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Live area of what has been drawn so far, closing the ring implicitly
    pub fn area(&self) -> f64 {
        area::polygon_area(&self.points)
    }

    pub fn complete(self) -> Result<Boundary, DraftError> {
        if self.points.len() < 3 {
            return Err(DraftError::TooFewPoints(self.points.len()));
        }
        Ok(Boundary::new(self.points))
    }
}
