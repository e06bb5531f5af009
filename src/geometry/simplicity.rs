//! Edge-crossing checks for parcel boundaries
//!
//! The area calculator accepts self-intersecting rings; these checks only
//! report them so callers can warn or refuse a point while drawing.

use geo::{Intersects, Line};

use crate::domain::Coordinate;

/// Pairs of ring edges that cross each other
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SimplicityReport {
    /// Edge indices `(i, k)` with `i < k`; edge `i` runs from vertex `i` to `i + 1 mod n`
    pub crossings: Vec<(usize, usize)>,
}

impl SimplicityReport {
    pub fn is_simple(&self) -> bool {
        self.crossings.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_simple() {
            "Boundary is simple".to_string()
        } else {
            let pairs: Vec<String> = self
                .crossings
                .iter()
                .map(|(a, b)| format!("{}x{}", a, b))
                .collect();
            format!(
                "Boundary edges cross {} time(s): {}",
                self.crossings.len(),
                pairs.join(", ")
            )
        }
    }
}

fn edge(a: Coordinate, b: Coordinate) -> Line<f64> {
    Line::new(
        geo::coord! { x: a.lng, y: a.lat },
        geo::coord! { x: b.lng, y: b.lat },
    )
}

/// Indices of vertices that differ from the next one around the ring
///
/// A repeated vertex only adds a zero-length edge, so each run keeps its
/// last index and the edge leaving it has real length.
fn distinct_ring_vertices(points: &[Coordinate]) -> Vec<usize> {
    let n = points.len();
    (0..n)
        .filter(|&i| !points[i].same_position(&points[(i + 1) % n]))
        .collect()
}

/// Find every pair of non-adjacent edges of the closed ring that touch
///
/// Zero-length edges from repeated consecutive points are skipped; the
/// edges around them count as adjacent.
pub fn find_crossings(points: &[Coordinate]) -> SimplicityReport {
    let n = points.len();
    let mut report = SimplicityReport::default();

    let kept = distinct_ring_vertices(points);
    let m = kept.len();
    if m < 4 {
        return report;
    }

    let edges: Vec<Line<f64>> = kept
        .iter()
        .map(|&i| edge(points[i], points[(i + 1) % n]))
        .collect();

    for a in 0..m {
        for b in (a + 2)..m {
            // First and last edges share a vertex
            if a == 0 && b == m - 1 {
                continue;
            }
            if edges[a].intersects(&edges[b]) {
                report.crossings.push((kept[a], kept[b]));
            }
        }
    }

    report
}

pub fn is_simple(points: &[Coordinate]) -> bool {
    find_crossings(points).is_simple()
}

/// Would appending `candidate` to an open drawing make its new edge cross
/// one already drawn?
pub fn new_edge_crosses(drawn: &[Coordinate], candidate: Coordinate) -> bool {
    let mut path: Vec<Coordinate> = Vec::with_capacity(drawn.len());
    for &point in drawn {
        if !path.last().is_some_and(|last| last.same_position(&point)) {
            path.push(point);
        }
    }

    let m = path.len();
    if m < 3 || path[m - 1].same_position(&candidate) {
        return false;
    }

    let new_edge = edge(path[m - 1], candidate);
    // The edge ending at the last point shares a vertex with the new one
    (0..m - 2).any(|k| edge(path[k], path[k + 1]).intersects(&new_edge))
}
