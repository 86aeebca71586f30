use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The ring is
/// treated as closed whether or not the last vertex repeats the first.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Unsigned area of a closed ring: `0.5 * |sum(x_i * y_{i+1} - y_i * x_{i+1})|`.
#[must_use]
pub fn area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Winding number of `point` with respect to the closed ring `ring`.
///
/// Non-zero => inside, zero => outside.
#[must_use]
pub fn winding_number(point: &Point2, ring: &[Point2]) -> i32 {
    let n = ring.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];

        if a.y <= point.y {
            if b.y > point.y && cross_2d(b.x - a.x, b.y - a.y, point.x - a.x, point.y - a.y) > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y
            && cross_2d(b.x - a.x, b.y - a.y, point.x - a.x, point.y - a.y) < 0.0
        {
            winding -= 1;
        }
    }
    winding
}

/// Point-in-polygon test using the non-zero winding rule.
#[must_use]
pub fn contains_point(ring: &[Point2], point: &Point2) -> bool {
    ring.len() >= 3 && winding_number(point, ring) != 0
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Axis-aligned bounds of a set of 2D points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Bounds2 {
    /// Computes the bounds of `points`, or `None` if empty.
    #[must_use]
    pub fn of(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Width along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center of the bounds.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            self.min.x + self.width() / 2.0,
            self.min.y + self.height() / 2.0,
        )
    }
}

/// Drops consecutive duplicate vertices and a trailing vertex that repeats
/// the first one, returning an open ring.
#[must_use]
pub fn open_ring(points: &[Point2]) -> Vec<Point2> {
    let mut ring: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if ring.last().is_some_and(|q| (p - q).norm() < TOLERANCE) {
            continue;
        }
        ring.push(p);
    }
    while ring.len() > 1 {
        let (first, last) = (ring[0], ring[ring.len() - 1]);
        if (first - last).norm() < TOLERANCE {
            ring.pop();
        } else {
            break;
        }
    }
    ring
}

/// Returns `true` if the open ring has at least three vertices, non-zero
/// area and no two non-adjacent edges touching or crossing.
#[must_use]
pub fn is_simple(ring: &[Point2]) -> bool {
    let n = ring.len();
    if n < 3 || area(ring) < TOLERANCE * TOLERANCE {
        return false;
    }
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        for j in (i + 1)..n {
            // Edges sharing a vertex.
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (c, d) = (ring[j], ring[(j + 1) % n]);
            if segments_touch(&a, &b, &c, &d) {
                return false;
            }
        }
    }
    true
}

/// Closed-segment intersection test, including collinear overlap.
fn segments_touch(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> bool {
    let orient = |p: &Point2, q: &Point2, r: &Point2| {
        let v = cross_2d(q.x - p.x, q.y - p.y, r.x - p.x, r.y - p.y);
        if v.abs() < TOLERANCE {
            0
        } else if v > 0.0 {
            1
        } else {
            -1
        }
    };
    let on_segment = |p: &Point2, q: &Point2, r: &Point2| {
        r.x >= p.x.min(q.x) - TOLERANCE
            && r.x <= p.x.max(q.x) + TOLERANCE
            && r.y >= p.y.min(q.y) - TOLERANCE
            && r.y <= p.y.max(q.y) + TOLERANCE
    };

    let (o1, o2, o3, o4) = (orient(a, b, c), orient(a, b, d), orient(c, d, a), orient(c, d, b));
    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && on_segment(a, b, c))
        || (o2 == 0 && on_segment(a, b, d))
        || (o3 == 0 && on_segment(c, d, a))
        || (o4 == 0 && on_segment(c, d, b))
}
