use super::Point2;

/// Returns the minimum distance from point `(px, py)` to the line segment
/// from `(ax, ay)` to `(bx, by)`.
#[must_use]
pub fn point_to_segment_dist(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Zero-length edge collapses to its start vertex.
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }

    let t = ((px - ax) * dx + (py - ay) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let closest_x = ax + t * dx;
    let closest_y = ay + t * dy;

    ((px - closest_x).powi(2) + (py - closest_y).powi(2)).sqrt()
}

/// Returns the minimum distance from `point` to any edge of the closed ring
/// `ring` (the last vertex connects back to the first).
///
/// Returns `f64::INFINITY` for an empty ring.
#[must_use]
pub fn point_to_ring_dist(point: &Point2, ring: &[Point2]) -> f64 {
    let n = ring.len();
    let mut best = f64::INFINITY;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let d = point_to_segment_dist(point.x, point.y, a.x, a.y, b.x, b.y);
        if d < best {
            best = d;
        }
    }
    best
}
