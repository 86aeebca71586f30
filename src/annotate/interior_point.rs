use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;

use crate::math::distance_2d::point_to_ring_dist;
use crate::math::polygon_2d::{self, Bounds2};
use crate::math::{Point2, Vector2};

use super::RepairPolygon;

/// Search tolerance used for label placement, in plane units.
pub const ANNOTATION_PRECISION: f64 = 0.1;

/// Inputs with fewer vertices than this have no annotation point.
const MIN_VERTICES: usize = 4;

/// Scanline heights, as fractions of the bounding box, tried when the grid
/// search ends on the boundary.
const SCANLINE_FRACTIONS: [f64; 7] = [0.5, 0.25, 0.75, 0.375, 0.625, 0.125, 0.875];

/// Finds a label anchor strictly inside a polygon: the pole of
/// inaccessibility, the interior point farthest from the boundary.
///
/// Self-intersecting input is repaired first and only its largest simple
/// piece is searched.
pub struct FindInteriorPoint<'a> {
    points: &'a [Point2],
    precision: f64,
}

impl<'a> FindInteriorPoint<'a> {
    /// Creates a new `FindInteriorPoint` with [`ANNOTATION_PRECISION`].
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            precision: ANNOTATION_PRECISION,
        }
    }

    /// Sets the search tolerance. Non-positive or non-finite values are
    /// ignored.
    #[must_use]
    pub fn with_precision(mut self, precision: f64) -> Self {
        if precision.is_finite() && precision > 0.0 {
            self.precision = precision;
        }
        self
    }

    /// Executes the search.
    ///
    /// Returns `None` for fewer than four input vertices or a polygon that
    /// does not enclose any area after repair.
    #[must_use]
    pub fn execute(&self) -> Option<Point2> {
        if self.points.len() < MIN_VERTICES {
            return None;
        }
        let ring = match RepairPolygon::new(self.points).execute() {
            Ok(ring) => ring,
            Err(e) => {
                tracing::debug!(error = %e, "no interior point for degenerate polygon");
                return None;
            }
        };
        pole_of_inaccessibility(&ring, self.precision)
    }
}

/// Square search cell, ordered by the best distance any point inside it
/// could reach.
#[derive(Debug, Clone, Copy)]
struct Cell {
    center: Point2,
    half: f64,
    distance: f64,
    potential: f64,
}

impl Cell {
    fn new(center: Point2, half: f64, ring: &[Point2]) -> Self {
        let distance = inside_distance(&center, ring);
        Self {
            center,
            half,
            distance,
            potential: distance + half * SQRT_2,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.potential.total_cmp(&other.potential)
    }
}

/// Distance to the boundary for points inside, `-inf` outside.
fn inside_distance(point: &Point2, ring: &[Point2]) -> f64 {
    if polygon_2d::contains_point(ring, point) {
        point_to_ring_dist(point, ring)
    } else {
        f64::NEG_INFINITY
    }
}

/// Branch-and-bound search for the pole of inaccessibility of a simple
/// open ring, to within `precision`.
///
/// The returned point is strictly inside the ring; `None` only if the ring
/// has no interior.
#[must_use]
pub fn pole_of_inaccessibility(ring: &[Point2], precision: f64) -> Option<Point2> {
    let bounds = Bounds2::of(ring)?;
    let precision = if precision.is_finite() && precision > 0.0 {
        precision
    } else {
        ANNOTATION_PRECISION
    };

    let cell_size = bounds.width().min(bounds.height()) / 4.0;
    let half = cell_size / 2.0;

    let mut best = Cell::new(bounds.center(), 0.0, ring);
    if half > 0.0 {
        let mut queue = BinaryHeap::new();
        let mut i = 0u32;
        loop {
            let x = bounds.min.x + half + f64::from(i) * cell_size;
            if x >= bounds.max.x {
                break;
            }
            let mut j = 0u32;
            loop {
                let y = bounds.min.y + half + f64::from(j) * cell_size;
                if y >= bounds.max.y {
                    break;
                }
                let cell = Cell::new(Point2::new(x, y), half, ring);
                if cell.distance.is_finite() {
                    queue.push(cell);
                }
                j += 1;
            }
            i += 1;
        }

        let mut explored = queue.len();
        while let Some(cell) = queue.pop() {
            if cell.potential - best.distance <= precision {
                break;
            }
            if cell.distance > best.distance {
                best = cell;
            }
            if cell.half > precision / 2.0 {
                let h = cell.half / 2.0;
                for (dx, dy) in [(-h, -h), (h, -h), (-h, h), (h, h)] {
                    let child = Cell::new(cell.center + Vector2::new(dx, dy), h, ring);
                    if child.distance.is_finite() && child.potential > best.distance + precision {
                        queue.push(child);
                        explored += 1;
                    }
                }
            }
        }
        tracing::trace!(explored, distance = best.distance, "interior point search finished");
    }

    if best.distance > 0.0 {
        return Some(best.center);
    }
    scanline_point(ring, &bounds)
}

/// Midpoint of the widest inside span along a few horizontal lines; the
/// first one strictly inside wins.
fn scanline_point(ring: &[Point2], bounds: &Bounds2) -> Option<Point2> {
    let n = ring.len();
    for fraction in SCANLINE_FRACTIONS {
        let y = bounds.min.y + bounds.height() * fraction;
        let mut crossings: Vec<f64> = (0..n)
            .filter_map(|i| {
                let (a, b) = (ring[i], ring[(i + 1) % n]);
                let spans = (a.y <= y && y < b.y) || (b.y <= y && y < a.y);
                spans.then(|| a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x))
            })
            .collect();
        crossings.sort_by(f64::total_cmp);

        let widest = crossings
            .chunks_exact(2)
            .max_by(|p, q| (p[1] - p[0]).total_cmp(&(q[1] - q[0])));
        if let Some(span) = widest {
            let candidate = Point2::new((span[0] + span[1]) / 2.0, y);
            if inside_distance(&candidate, ring) > 0.0 {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn poly(coords: &[[f64; 2]]) -> Vec<Point2> {
        coords.iter().map(|c| Point2::new(c[0], c[1])).collect()
    }

    fn assert_strictly_inside(points: &[Point2]) -> Point2 {
        let found = FindInteriorPoint::new(points).execute().unwrap();
        let ring = RepairPolygon::new(points).execute().unwrap();
        assert!(polygon_2d::contains_point(&ring, &found), "{found:?} outside {ring:?}");
        assert!(point_to_ring_dist(&found, &ring) > 0.0, "{found:?} on boundary");
        found
    }

    #[test]
    fn open_rectangle() {
        let p = assert_strictly_inside(&poly(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]));
        assert_relative_eq!(p, Point2::new(0.5, 0.5), epsilon = 0.1);
    }

    #[test]
    fn concave() {
        let c = poly(&[
            [0.0, 0.0],
            [0.0, 2.0],
            [2.0, 2.0],
            [2.0, 1.5],
            [0.5, 1.5],
            [0.5, 0.5],
            [2.0, 0.5],
            [2.0, 0.0],
        ]);
        let p = assert_strictly_inside(&c);
        // The bounding box center is in the notch.
        assert!(!polygon_2d::contains_point(&c, &Point2::new(1.0, 1.0)));
        assert!(p.x < 0.5 || p.y < 0.5 || p.y > 1.5);
    }

    #[test]
    fn tiny() {
        let s = 0.0001;
        assert_strictly_inside(&poly(&[[0.0, 0.0], [0.0, s], [s, s], [s, 0.0]]));
    }

    #[test]
    fn narrow_c_shape() {
        assert_strictly_inside(&poly(&[
            [0.0, 0.0],
            [0.0, 2.0],
            [0.2, 2.0],
            [0.2, 0.2],
            [1.8, 0.2],
            [1.8, 1.8],
            [0.2, 1.8],
            [0.2, 0.0],
            [0.0, 0.0],
        ]));
    }

    #[test]
    fn crossing_edges() {
        assert_strictly_inside(&poly(&[[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 2.0]]));
    }

    #[test]
    fn self_touching_bowtie() {
        assert_strictly_inside(&poly(&[
            [0.0, 0.0],
            [1.0, 1.0],
            [0.0, 2.0],
            [2.0, 2.0],
            [1.0, 1.0],
            [2.0, 0.0],
        ]));
    }

    #[test]
    fn too_few_vertices() {
        assert!(FindInteriorPoint::new(&poly(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]))
            .execute()
            .is_none());
        assert!(FindInteriorPoint::new(&[]).execute().is_none());
    }

    #[test]
    fn collinear_has_no_point() {
        let line = poly(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
        assert!(FindInteriorPoint::new(&line).execute().is_none());
    }

    #[test]
    fn finer_precision_finds_wide_part() {
        // L-shape: the pole sits in the 4 x 4 block, not the thin arm.
        let l = poly(&[[0.0, 0.0], [10.0, 0.0], [10.0, 1.0], [4.0, 1.0], [4.0, 4.0], [0.0, 4.0]]);
        let p = FindInteriorPoint::new(&l).with_precision(0.01).execute().unwrap();
        assert!(point_to_ring_dist(&p, &l) > 1.9, "{p:?}");
    }

    #[test]
    fn invalid_precision_is_ignored() {
        let square = poly(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
        let p = FindInteriorPoint::new(&square).with_precision(-1.0).execute().unwrap();
        assert!(polygon_2d::contains_point(&square, &p));
    }

    #[test]
    fn scanline_avoids_boundary() {
        let square = poly(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        let bounds = Bounds2::of(&square).unwrap();
        let p = scanline_point(&square, &bounds).unwrap();
        assert_relative_eq!(p, Point2::new(0.5, 0.5));
    }
}
