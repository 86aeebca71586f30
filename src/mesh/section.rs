use std::collections::{HashMap, HashSet};

use crate::geometry::Plane;
use crate::math::Point3;

use super::{quantize, TriMesh};

/// Ordered 3D points forming one chained component of a section.
pub type Polyline3 = Vec<Point3>;

/// Distance below which a vertex counts as lying on the cutting plane.
const ON_PLANE_EPS: f64 = 1e-10;

/// Geometry that can be cut by a plane.
///
/// This is the seam to the mesh library: anything that can report the
/// segments where a plane crosses its surface can be sliced and projected.
pub trait PlaneSection {
    /// Returns the intersection of the surface with `plane`. Empty when the
    /// plane does not cross the surface.
    fn intersect_with_plane(&self, plane: &Plane) -> Section3;
}

impl<T: PlaneSection + ?Sized> PlaneSection for &T {
    fn intersect_with_plane(&self, plane: &Plane) -> Section3 {
        (**self).intersect_with_plane(plane)
    }
}

/// The intersection of a surface with a plane: a set of line segments over
/// shared points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section3 {
    points: Vec<Point3>,
    edges: Vec<[usize; 2]>,
}

impl Section3 {
    /// Builds a section from loose segments, merging endpoints closer than
    /// `tolerance`.
    #[must_use]
    pub fn from_segments(segments: &[[Point3; 2]], tolerance: f64) -> Self {
        let mut lookup: HashMap<[i64; 3], usize> = HashMap::new();
        let mut section = Self::default();
        let mut seen = HashSet::new();

        for seg in segments {
            let [a, b] = seg.map(|p| {
                *lookup.entry(quantize(&p, tolerance)).or_insert_with(|| {
                    section.points.push(p);
                    section.points.len() - 1
                })
            });
            if a != b && seen.insert((a.min(b), a.max(b))) {
                section.edges.push([a, b]);
            }
        }
        section
    }

    /// Returns `true` if the plane did not cross the surface.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct intersection points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.edges.len()
    }

    /// Distinct intersection points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Iterates over the segments as point pairs.
    pub fn segments(&self) -> impl Iterator<Item = [Point3; 2]> + '_ {
        self.edges
            .iter()
            .map(|&[a, b]| [self.points[a], self.points[b]])
    }

    /// Splits the section into connected components, each joined into one
    /// ordered chain. Closed loops do not repeat their first point.
    ///
    /// Components are returned in the order their first segment appears.
    #[must_use]
    pub fn split(&self) -> Vec<Polyline3> {
        let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); self.points.len()];
        for (e, &[a, b]) in self.edges.iter().enumerate() {
            adjacency[a].push((b, e));
            adjacency[b].push((a, e));
        }

        let mut component_of = vec![usize::MAX; self.points.len()];
        let mut components: Vec<Vec<usize>> = Vec::new();
        for &[seed, _] in &self.edges {
            if component_of[seed] != usize::MAX {
                continue;
            }
            let id = components.len();
            let mut members = Vec::new();
            let mut stack = vec![seed];
            component_of[seed] = id;
            while let Some(p) = stack.pop() {
                members.push(p);
                for &(q, _) in &adjacency[p] {
                    if component_of[q] == usize::MAX {
                        component_of[q] = id;
                        stack.push(q);
                    }
                }
            }
            components.push(members);
        }

        let mut used = vec![false; self.edges.len()];
        components
            .iter()
            .map(|members| self.chain(members, &adjacency, &mut used))
            .collect()
    }

    /// Walks every edge of one component, starting from an open end if the
    /// component has one.
    fn chain(
        &self,
        members: &[usize],
        adjacency: &[Vec<(usize, usize)>],
        used: &mut [bool],
    ) -> Polyline3 {
        let mut ordered = Vec::new();

        loop {
            let unused_degree =
                |p: usize| adjacency[p].iter().filter(|&&(_, e)| !used[e]).count();
            let start = members
                .iter()
                .copied()
                .find(|&p| unused_degree(p) % 2 == 1)
                .or_else(|| members.iter().copied().find(|&p| unused_degree(p) > 0));
            let Some(start) = start else {
                break;
            };

            let mut walk = vec![start];
            let mut current = start;
            while let Some(&(next, e)) = adjacency[current].iter().find(|&&(_, e)| !used[e]) {
                used[e] = true;
                walk.push(next);
                current = next;
            }
            if walk.len() > 2 && walk.first() == walk.last() {
                walk.pop();
            }
            ordered.extend(walk.into_iter().map(|p| self.points[p]));
        }

        ordered
    }
}

/// Endpoints of section segments closer than this are merged, so meshes
/// stored without shared vertices still give connected loops.
const WELD_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CutPoint {
    Vertex(usize),
    Edge(usize, usize),
}

impl PlaneSection for TriMesh {
    fn intersect_with_plane(&self, plane: &Plane) -> Section3 {
        let dist: Vec<f64> = self
            .vertices
            .iter()
            .map(|v| plane.signed_distance(v))
            .collect();

        let mut segments: Vec<[Point3; 2]> = Vec::new();
        for tri in &self.indices {
            let idx = tri.map(|i| i as usize);
            if idx.iter().any(|&i| i >= dist.len()) {
                continue;
            }
            let d = idx.map(|i| dist[i]);

            // All on one side, or the triangle lies in the plane.
            if d.iter().all(|&x| x > ON_PLANE_EPS)
                || d.iter().all(|&x| x < -ON_PLANE_EPS)
                || d.iter().all(|&x| x.abs() <= ON_PLANE_EPS)
            {
                continue;
            }

            let mut cuts: Vec<CutPoint> = Vec::with_capacity(2);
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                let (da, db) = (d[a], d[b]);
                if (da > ON_PLANE_EPS && db < -ON_PLANE_EPS)
                    || (da < -ON_PLANE_EPS && db > ON_PLANE_EPS)
                {
                    cuts.push(self.edge_cut(idx[a], idx[b]));
                } else if da.abs() <= ON_PLANE_EPS {
                    cuts.push(CutPoint::Vertex(idx[a]));
                }
            }

            if cuts.len() < 2 || cuts[0] == cuts[1] {
                continue;
            }
            segments.push([cuts[0], cuts[1]].map(|cut| self.cut_point(cut, &dist)));
        }

        let section = Section3::from_segments(&segments, WELD_TOLERANCE);
        tracing::trace!(
            points = section.points.len(),
            segments = section.edges.len(),
            "mesh intersected with plane"
        );
        section
    }
}

impl TriMesh {
    /// Edge cut with its endpoints in lexicographic position order, so every
    /// triangle sharing the edge, by index or only by position, interpolates
    /// identically.
    fn edge_cut(&self, i: usize, j: usize) -> CutPoint {
        let (a, b) = (&self.vertices[i], &self.vertices[j]);
        let a_first = a
            .coords
            .iter()
            .zip(b.coords.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .map_or(i <= j, std::cmp::Ordering::is_lt);
        if a_first {
            CutPoint::Edge(i, j)
        } else {
            CutPoint::Edge(j, i)
        }
    }

    /// Position of a cut point, interpolated from the first edge endpoint.
    fn cut_point(&self, cut: CutPoint, dist: &[f64]) -> Point3 {
        match cut {
            CutPoint::Vertex(i) => self.vertices[i],
            CutPoint::Edge(i, j) => {
                let t = dist[i] / (dist[i] - dist[j]);
                self.vertices[i] + (self.vertices[j] - self.vertices[i]) * t
            }
        }
    }
}
