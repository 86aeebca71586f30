mod section;

pub use section::{PlaneSection, Polyline3, Section3};

use std::collections::HashMap;

use crate::math::{Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Creates a mesh from vertices and triangle indices.
    #[must_use]
    pub fn new(vertices: Vec<Point3>, indices: Vec<[u32; 3]>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Bounding box of all vertices, or `None` for a mesh without vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        let first = self.vertices.first()?;
        let mut min = *first;
        let mut max = *first;
        for v in &self.vertices[1..] {
            min = min.inf(v);
            max = max.sup(v);
        }
        Some(Aabb { min, max })
    }

    /// Mean of the vertex positions, or `None` for a mesh without vertices.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn center_of_mass(&self) -> Option<Point3> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Some(Point3::from(sum / self.vertices.len() as f64))
    }

    /// Appends another mesh, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn append(&mut self, other: &TriMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices
            .extend(other.indices.iter().map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]));
    }

    /// Returns a copy with vertices closer than `tolerance` merged.
    ///
    /// Meshes loaded with per-face vertices need this before plane
    /// intersection, which relies on shared vertices for connectivity.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn welded(&self, tolerance: f64) -> TriMesh {
        let mut lookup: HashMap<[i64; 3], u32> = HashMap::new();
        let mut vertices = Vec::new();
        let mut remap = Vec::with_capacity(self.vertices.len());

        for v in &self.vertices {
            let key = quantize(v, tolerance);
            let idx = *lookup.entry(key).or_insert_with(|| {
                vertices.push(*v);
                (vertices.len() - 1) as u32
            });
            remap.push(idx);
        }

        let indices = self
            .indices
            .iter()
            .filter_map(|t| {
                let tri = [
                    *remap.get(t[0] as usize)?,
                    *remap.get(t[1] as usize)?,
                    *remap.get(t[2] as usize)?,
                ];
                (tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]).then_some(tri)
            })
            .collect();

        TriMesh { vertices, indices }
    }

    /// Axis-aligned box between two corners, with outward-facing triangles.
    #[must_use]
    pub fn cuboid(min: Point3, max: Point3) -> TriMesh {
        let vertices = vec![
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, max.z),
            Point3::new(min.x, max.y, max.z),
        ];
        let indices = vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        TriMesh { vertices, indices }
    }

    /// Latitude/longitude sphere with shared pole vertices.
    ///
    /// `segments` is clamped to at least 3 and `rings` to at least 2.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn uv_sphere(center: Point3, radius: f64, segments: u32, rings: u32) -> TriMesh {
        use std::f64::consts::{PI, TAU};

        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut vertices = vec![center + Vector3::new(0.0, 0.0, radius)];
        for r in 1..rings {
            let phi = PI * f64::from(r) / f64::from(rings);
            for s in 0..segments {
                let theta = TAU * f64::from(s) / f64::from(segments);
                vertices.push(
                    center
                        + Vector3::new(
                            radius * phi.sin() * theta.cos(),
                            radius * phi.sin() * theta.sin(),
                            radius * phi.cos(),
                        ),
                );
            }
        }
        vertices.push(center - Vector3::new(0.0, 0.0, radius));

        let bottom = vertices.len() as u32 - 1;
        let ring_start = |r: u32| 1 + (r - 1) * segments;
        let mut indices = Vec::new();

        for s in 0..segments {
            let next = (s + 1) % segments;
            indices.push([0, ring_start(1) + s, ring_start(1) + next]);
        }
        for r in 1..rings - 1 {
            let (a, b) = (ring_start(r), ring_start(r + 1));
            for s in 0..segments {
                let next = (s + 1) % segments;
                indices.push([a + s, b + s, b + next]);
                indices.push([a + s, b + next, a + next]);
            }
        }
        let last = ring_start(rings - 1);
        for s in 0..segments {
            let next = (s + 1) % segments;
            indices.push([last + s, bottom, last + next]);
        }

        TriMesh { vertices, indices }
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn quantize(p: &Point3, tolerance: f64) -> [i64; 3] {
    let scale = 1.0 / tolerance.max(f64::MIN_POSITIVE);
    [
        (p.x * scale).round() as i64,
        (p.y * scale).round() as i64,
        (p.z * scale).round() as i64,
    ]
}
