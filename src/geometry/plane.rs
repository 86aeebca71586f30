use nalgebra::Matrix3x2;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, ORTHOGONALITY_TOLERANCE, TOLERANCE};
use crate::mesh::{Aabb, PlaneSection, Polyline3, Section3, TriMesh};

/// An oriented cutting plane in 3D space.
///
/// Defined by an origin point and two orthonormal in-plane directions
/// (`u`, `v`). The normal is `u x v`. Points on the plane map to local 2D
/// coordinates with `u` as the x axis and `v` as the y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    origin: Point3,
    u: Vector3,
    v: Vector3,
    normal: Vector3,
    projection: Matrix3x2<f64>,
}

impl Plane {
    /// Creates a plane from an origin and two orthogonal direction vectors.
    ///
    /// `u` and `v` are normalized.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if either direction is
    /// zero-length, or [`GeometryError::InvalidBasis`] if they are not
    /// orthogonal.
    pub fn new(origin: Point3, u: Vector3, v: Vector3) -> Result<Self> {
        let u_len = u.norm();
        let v_len = v.norm();
        if u_len < TOLERANCE || v_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let u = u / u_len;
        let v = v / v_len;

        let dot = u.dot(&v);
        if dot.abs() >= ORTHOGONALITY_TOLERANCE {
            return Err(GeometryError::InvalidBasis { dot }.into());
        }

        let normal = u.cross(&v).normalize();
        let projection = Matrix3x2::from_columns(&[u, v]);

        tracing::debug!(
            origin = ?origin.coords.as_slice(),
            normal = ?normal.as_slice(),
            "plane constructed"
        );

        Ok(Self {
            origin,
            u,
            v,
            normal,
            projection,
        })
    }

    /// Creates a plane from an origin and an arbitrary normal vector.
    ///
    /// The in-plane basis is deterministic: with `m` the first non-zero
    /// component of `normal` and `n = (m + 1) % 3`, `u` has
    /// `u[n] = normal[m]`, `u[m] = -normal[n]` and zeros elsewhere, and
    /// `v = normal x u`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `normal` is zero.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let Some(m) = (0..3).find(|&i| normal[i] != 0.0) else {
            return Err(GeometryError::ZeroVector.into());
        };
        let n = (m + 1) % 3;

        let mut u = Vector3::zeros();
        u[n] = normal[m];
        u[m] = -normal[n];

        let normal = normal.normalize();
        let u = u.normalize();
        let v = normal.cross(&u).normalize();

        Self::new(origin, u, v)
    }

    /// Returns the origin (center) of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the in-plane x direction.
    #[must_use]
    pub fn u(&self) -> &Vector3 {
        &self.u
    }

    /// Returns the in-plane y direction.
    #[must_use]
    pub fn v(&self) -> &Vector3 {
        &self.v
    }

    /// Returns the unit normal `u x v`.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the 3x2 projection matrix `[u | v]`.
    #[must_use]
    pub fn projection(&self) -> &Matrix3x2<f64> {
        &self.projection
    }

    /// Maps a 3D point to plane-local coordinates: `(p - origin) . [u | v]`.
    #[must_use]
    pub fn project_point(&self, point: &Point3) -> Point2 {
        let local = self.projection.transpose() * (point - self.origin);
        Point2::from(local)
    }

    /// Maps a sequence of 3D points to plane-local coordinates.
    #[must_use]
    pub fn project(&self, points: &[Point3]) -> Vec<Point2> {
        points.iter().map(|p| self.project_point(p)).collect()
    }

    /// Maps plane-local coordinates back to a 3D point on the plane.
    #[must_use]
    pub fn lift(&self, point: &Point2) -> Point3 {
        self.origin + self.u * point.x + self.v * point.y
    }

    /// Signed distance from a point to the plane.
    /// Positive = on the normal side, negative = opposite.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    /// Intersects a mesh with this plane. Empty when they do not cross.
    #[must_use]
    pub fn intersect<M: PlaneSection + ?Sized>(&self, mesh: &M) -> Section3 {
        mesh.intersect_with_plane(self)
    }

    /// Splits an intersection into connected components, each ordered as a
    /// single chained loop.
    #[must_use]
    pub fn split_into_components(&self, section: &Section3) -> Vec<Polyline3> {
        section.split()
    }

    /// Builds a square mesh lying on the plane, centered on its origin, with
    /// a side of 4/3 of the largest extent of `bounds`.
    #[must_use]
    pub fn to_quad(&self, bounds: &Aabb) -> TriMesh {
        let extent = bounds.size();
        let side = extent.x.max(extent.y).max(extent.z);
        let half = (side + side / 3.0) / 2.0;

        let corners = [
            Point2::new(-half, -half),
            Point2::new(half, -half),
            Point2::new(half, half),
            Point2::new(-half, half),
        ];
        TriMesh {
            vertices: corners.iter().map(|c| self.lift(c)).collect(),
            indices: vec![[0, 1, 2], [0, 2, 3]],
        }
    }
}
