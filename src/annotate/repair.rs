use clipper2::{union, Centi, FillRule};

use crate::error::{RepairError, Result};
use crate::math::polygon_2d::{self, Bounds2};
use crate::math::{Point2, TOLERANCE};

/// Side of the square frame polygons are scaled into before clipping.
/// Clipping works on fixed-point coordinates, so very small or very large
/// polygons are normalized first.
const CLIP_FRAME: f64 = 10_000.0;

/// Turns an arbitrary closed ring into one simple polygon.
///
/// A ring that is already simple is returned as an open ring. Otherwise it
/// is rebuilt with a non-zero union, which splits self-intersections into
/// simple pieces; the piece with the largest area is kept.
pub struct RepairPolygon<'a> {
    points: &'a [Point2],
}

impl<'a> RepairPolygon<'a> {
    /// Creates a new `RepairPolygon` operation.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the repair, returning an open simple ring.
    ///
    /// # Errors
    ///
    /// Returns [`RepairError::Empty`] if the ring encloses no area, or
    /// [`RepairError::Clipper`] if the union fails.
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let ring = polygon_2d::open_ring(self.points);
        if ring.len() < 3 {
            return Err(RepairError::Empty.into());
        }
        if polygon_2d::is_simple(&ring) {
            return Ok(ring);
        }

        let bounds = Bounds2::of(&ring).ok_or(RepairError::Empty)?;
        let extent = bounds.width().max(bounds.height());
        if !extent.is_finite() || extent < TOLERANCE {
            return Err(RepairError::Empty.into());
        }
        let scale = CLIP_FRAME / extent;

        let path: Vec<(f64, f64)> = ring
            .iter()
            .map(|p| ((p.x - bounds.min.x) * scale, (p.y - bounds.min.y) * scale))
            .collect();
        let merged = union::<Centi>(vec![path.clone()], vec![path], FillRule::NonZero)
            .map_err(|e| RepairError::Clipper(format!("{e:?}")))?;
        let pieces: Vec<Vec<(f64, f64)>> = merged.into();

        let largest = pieces
            .iter()
            .flat_map(|piece| split_pinches(piece))
            .filter(|piece| piece.len() >= 3)
            .map(|piece| {
                piece
                    .into_iter()
                    .map(|(x, y)| Point2::new(x / scale + bounds.min.x, y / scale + bounds.min.y))
                    .collect::<Vec<_>>()
            })
            .map(|piece| (polygon_2d::area(&piece), piece))
            .filter(|(area, _)| *area > 0.0)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, piece)| piece)
            .ok_or(RepairError::Empty)?;

        tracing::debug!(
            input = self.points.len(),
            output = largest.len(),
            "self-intersecting polygon repaired"
        );
        Ok(polygon_2d::open_ring(&largest))
    }
}

/// Splits a ring that touches itself at a repeated vertex into separate
/// rings, one per loop.
fn split_pinches(path: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut loops = Vec::new();
    let mut stack: Vec<(f64, f64)> = Vec::with_capacity(path.len());
    for &p in path {
        if let Some(k) = stack.iter().position(|&q| q == p) {
            let closed: Vec<(f64, f64)> = stack.drain(k..).collect();
            if closed.len() >= 3 {
                loops.push(closed);
            }
        }
        stack.push(p);
    }
    if stack.len() >= 3 {
        loops.push(stack);
    }
    loops
}
