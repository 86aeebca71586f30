mod cap;
mod projector;

pub use cap::SectionCap;
pub use projector::{ProjectRegions, ProjectedRegions, ProjectedSegment, SegmentKey};

use std::collections::BTreeMap;

use tracing::debug;

use crate::atlas::{Atlas, ROOT};
use crate::error::{GeometryError, Result, SlicingError, ValueError};
use crate::geometry::{Orientation, Plane};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::mesh::TriMesh;

/// Thickness of the slab used by [`structures_slice_coords`].
pub const STRUCTURES_SLAB_THICKNESS: f64 = 100.0;

/// Where the front plane of the slab sits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Position {
    /// Center of mass of the root mesh.
    #[default]
    Auto,
    /// Coordinate along the axis of a named orientation; the other two
    /// coordinates come from the root center of mass.
    Axis(f64),
    /// Explicit point in atlas coordinates.
    Point(Point3),
}

impl From<f64> for Position {
    fn from(v: f64) -> Self {
        Self::Axis(v)
    }
}

impl From<Point3> for Position {
    fn from(p: Point3) -> Self {
        Self::Point(p)
    }
}

impl From<[f64; 3]> for Position {
    fn from(p: [f64; 3]) -> Self {
        Self::Point(Point3::from(p))
    }
}

/// Mapping from user-facing atlas coordinates to mesh coordinates.
///
/// The reference atlas stores meshes with one axis mirrored relative to the
/// coordinates users pass in, so user-supplied coordinates on that axis are
/// negated before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisConvention {
    inverted_axis: Option<usize>,
}

impl AxisConvention {
    /// No axis inversion.
    #[must_use]
    pub const fn identity() -> Self {
        Self { inverted_axis: None }
    }

    /// Inverts the given axis (0, 1 or 2).
    #[must_use]
    pub const fn inverting(axis: usize) -> Self {
        Self {
            inverted_axis: Some(axis),
        }
    }

    /// The inverted axis, if any.
    #[must_use]
    pub fn inverted_axis(&self) -> Option<usize> {
        self.inverted_axis
    }

    /// Converts one user coordinate on `axis` into mesh space.
    #[must_use]
    pub fn coordinate(&self, axis: usize, value: f64) -> f64 {
        if self.inverted_axis == Some(axis) {
            -value
        } else {
            value
        }
    }

    /// Converts a user point into mesh space.
    #[must_use]
    pub fn point(&self, p: &Point3) -> Point3 {
        Point3::new(
            self.coordinate(0, p.x),
            self.coordinate(1, p.y),
            self.coordinate(2, p.z),
        )
    }
}

impl Default for AxisConvention {
    /// The reference atlas convention: axis 2 is inverted.
    fn default() -> Self {
        Self::inverting(2)
    }
}

/// Two parallel planes with opposite normals bounding a slab.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicingSlab {
    plane0: Plane,
    plane1: Plane,
    thickness: f64,
}

impl SlicingSlab {
    /// Front plane, used for 2D projection.
    #[must_use]
    pub fn plane0(&self) -> &Plane {
        &self.plane0
    }

    /// Back plane, `thickness` along the slicing direction from `plane0`.
    #[must_use]
    pub fn plane1(&self) -> &Plane {
        &self.plane1
    }

    /// Distance between the planes.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Returns `true` if `point` lies between the two planes (inclusive).
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        self.plane0.signed_distance(point) >= -TOLERANCE
            && self.plane1.signed_distance(point) >= -TOLERANCE
    }
}

/// Builds the slab for a position, orientation and thickness.
#[derive(Debug, Clone)]
pub struct PlaneSlicer {
    position: Position,
    orientation: Orientation,
    thickness: f64,
    convention: AxisConvention,
}

impl PlaneSlicer {
    /// Creates a new `PlaneSlicer` with the default axis convention.
    #[must_use]
    pub fn new(position: impl Into<Position>, orientation: impl Into<Orientation>, thickness: f64) -> Self {
        Self {
            position: position.into(),
            orientation: orientation.into(),
            thickness,
            convention: AxisConvention::default(),
        }
    }

    /// Sets the coordinate convention for user positions.
    #[must_use]
    pub fn with_convention(mut self, convention: AxisConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Resolves the position of the front plane in mesh coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`SlicingError::InvalidPosition`] for a single-value position
    /// with a free-vector orientation, or [`SlicingError::MissingRoot`] if
    /// the root center is needed but the root mesh has no vertices.
    pub fn resolve_position(&self, root: &TriMesh) -> Result<Point3> {
        let root_center = || root.center_of_mass().ok_or(SlicingError::MissingRoot);
        let position = match self.position {
            Position::Auto => root_center()?,
            Position::Axis(value) => {
                let axis = self
                    .orientation
                    .axis_index()
                    .ok_or(SlicingError::InvalidPosition)?;
                let mut center = root_center()?;
                center[axis] = self.convention.coordinate(axis, value);
                center
            }
            Position::Point(p) => self.convention.point(&p),
        };
        Ok(position)
    }

    /// Executes the construction, returning the slab.
    ///
    /// Zero thickness is accepted and gives two coincident planes with
    /// opposite normals.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite thickness, an
    /// unresolvable position, or a zero orientation vector.
    pub fn execute(&self, root: &TriMesh) -> Result<SlicingSlab> {
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(SlicingError::InvalidThickness(self.thickness).into());
        }
        let position = self.resolve_position(root)?;

        let (plane0, plane1) = match self.orientation {
            Orientation::Vector(direction) => {
                let len = direction.norm();
                if len < TOLERANCE {
                    return Err(GeometryError::ZeroVector.into());
                }
                let direction = direction / len;
                let p1 = position + direction * self.thickness;
                (
                    Plane::from_normal(position, direction)?,
                    Plane::from_normal(p1, -direction)?,
                )
            }
            named => {
                let (axis, (u0, v0)) = named
                    .axis_index()
                    .zip(named.named_basis())
                    .ok_or_else(|| SlicingError::UnknownOrientation(named.to_string()))?;
                let mut shift = Vector3::zeros();
                shift[axis] = self.thickness;
                (
                    Plane::new(position, u0, v0)?,
                    Plane::new(position + shift, u0, -v0)?,
                )
            }
        };

        debug!(
            orientation = %self.orientation,
            thickness = self.thickness,
            origin = ?plane0.origin().coords.as_slice(),
            "slab constructed"
        );

        Ok(SlicingSlab {
            plane0,
            plane1,
            thickness: self.thickness,
        })
    }
}

/// Cross-section polygons of the named regions and the root, per region,
/// on the front plane of a slab at `position`.
///
/// # Errors
///
/// Returns [`SlicingError::MissingRoot`] if the atlas has no root mesh,
/// [`ValueError::UnknownRegion`] for a name the atlas does not know, and
/// propagates slab construction errors.
pub fn structures_slice_coords<A: Atlas + ?Sized>(
    atlas: &A,
    regions: &[&str],
    position: impl Into<Position>,
    orientation: impl Into<Orientation>,
) -> Result<BTreeMap<String, Vec<Vec<Point2>>>> {
    let root = atlas.root_mesh().ok_or(SlicingError::MissingRoot)?;
    let slab = PlaneSlicer::new(position, orientation, STRUCTURES_SLAB_THICKNESS).execute(root)?;

    let mut meshes = Vec::with_capacity(regions.len() + 1);
    for &name in regions.iter().filter(|&&name| name != ROOT) {
        let mesh = atlas
            .region_mesh(name)
            .ok_or_else(|| ValueError::UnknownRegion(name.to_owned()))?;
        meshes.push((name, mesh));
    }
    meshes.push((ROOT, root));

    Ok(ProjectRegions::new(slab.plane0()).execute(meshes).grouped())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::HeatmapError;

    fn root() -> TriMesh {
        TriMesh::cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(100.0, 60.0, 80.0))
    }

    #[test]
    fn named_slabs_have_opposite_normals() {
        for orientation in [Orientation::Frontal, Orientation::Sagittal, Orientation::Horizontal] {
            let slab = PlaneSlicer::new(Position::Auto, orientation, 10.0)
                .execute(&root())
                .unwrap();
            assert_eq!(*slab.plane1().normal(), -*slab.plane0().normal());
            let axis = orientation.axis_index().unwrap();
            assert_relative_eq!(slab.plane0().normal()[axis], 1.0);
            let gap = slab.plane1().origin() - slab.plane0().origin();
            assert_relative_eq!(gap[axis], 10.0);
            assert_relative_eq!(gap.norm(), 10.0);
        }
    }

    #[test]
    fn vector_slab_normals() {
        let v = Vector3::new(1.0, 2.0, -2.0);
        let slab = PlaneSlicer::new(Point3::new(10.0, 10.0, -10.0), v, 6.0)
            .execute(&root())
            .unwrap();
        assert_relative_eq!(*slab.plane0().normal(), v.normalize(), epsilon = 1e-12);
        assert_relative_eq!(*slab.plane1().normal(), -v.normalize(), epsilon = 1e-12);
        let gap = slab.plane1().origin() - slab.plane0().origin();
        assert_relative_eq!(gap.norm(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn scalar_position_overwrites_axis_of_root_center() {
        let slab = PlaneSlicer::new(42.0, Orientation::Frontal, 10.0)
            .execute(&root())
            .unwrap();
        assert_relative_eq!(*slab.plane0().origin(), Point3::new(42.0, 30.0, 40.0));
    }

    #[test]
    fn scalar_position_on_inverted_axis() {
        let slab = PlaneSlicer::new(42.0, Orientation::Sagittal, 10.0)
            .execute(&root())
            .unwrap();
        assert_relative_eq!(*slab.plane0().origin(), Point3::new(50.0, 30.0, -42.0));

        let slab = PlaneSlicer::new(42.0, Orientation::Sagittal, 10.0)
            .with_convention(AxisConvention::identity())
            .execute(&root())
            .unwrap();
        assert_relative_eq!(*slab.plane0().origin(), Point3::new(50.0, 30.0, 42.0));
    }

    #[test]
    fn point_position_is_converted() {
        let resolved = PlaneSlicer::new([1.0, 2.0, 3.0], Orientation::Frontal, 1.0)
            .resolve_position(&root())
            .unwrap();
        assert_eq!(resolved, Point3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn auto_position_is_root_center() {
        let resolved = PlaneSlicer::new(Position::Auto, Orientation::Horizontal, 1.0)
            .resolve_position(&root())
            .unwrap();
        assert_relative_eq!(resolved, Point3::new(50.0, 30.0, 40.0));
    }

    #[test]
    fn scalar_with_vector_orientation_fails() {
        let err = PlaneSlicer::new(5.0, [1.0, 0.0, 0.0], 1.0)
            .execute(&root())
            .unwrap_err();
        assert!(matches!(err, HeatmapError::Slicing(SlicingError::InvalidPosition)));
    }

    #[test]
    fn missing_root_fails_for_auto() {
        let err = PlaneSlicer::new(Position::Auto, Orientation::Frontal, 1.0)
            .execute(&TriMesh::default())
            .unwrap_err();
        assert!(matches!(err, HeatmapError::Slicing(SlicingError::MissingRoot)));
    }

    #[test]
    fn zero_thickness_gives_coincident_planes() {
        let slab = PlaneSlicer::new(Position::Auto, Orientation::Frontal, 0.0)
            .execute(&root())
            .unwrap();
        assert_eq!(slab.plane0().origin(), slab.plane1().origin());
        assert_eq!(*slab.plane1().normal(), -*slab.plane0().normal());
        assert_eq!(slab.thickness(), 0.0);
    }

    #[test]
    fn negative_thickness_fails() {
        let err = PlaneSlicer::new(Position::Auto, Orientation::Frontal, -1.0)
            .execute(&root())
            .unwrap_err();
        assert!(matches!(err, HeatmapError::Slicing(SlicingError::InvalidThickness(_))));
    }

    #[test]
    fn zero_vector_orientation_fails() {
        let err = PlaneSlicer::new(Position::Auto, [0.0, 0.0, 0.0], 1.0)
            .execute(&root())
            .unwrap_err();
        assert!(matches!(err, HeatmapError::Geometry(GeometryError::ZeroVector)));
    }

    #[test]
    fn structures_coords_include_root() {
        use crate::atlas::{RegionData, RegionStore};

        let mut atlas = RegionStore::new();
        atlas.add_region(RegionData::new(ROOT, root()));
        atlas.add_region(RegionData::new(
            "TH",
            TriMesh::cuboid(Point3::new(40.0, 10.0, 10.0), Point3::new(60.0, 12.0, 14.0)),
        ));

        let grouped = structures_slice_coords(&atlas, &["TH"], 50.0, Orientation::Frontal).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["TH"].len(), 1);
        assert_relative_eq!(crate::math::polygon_2d::area(&grouped["TH"][0]), 8.0, epsilon = 1e-9);
        assert_relative_eq!(crate::math::polygon_2d::area(&grouped[ROOT][0]), 60.0 * 80.0, epsilon = 1e-6);

        let err = structures_slice_coords(&atlas, &["RSP"], 50.0, Orientation::Frontal).unwrap_err();
        assert!(matches!(err, HeatmapError::Value(ValueError::UnknownRegion(_))));
    }

    #[test]
    fn auto_position_keeps_root_center_unflipped() {
        for orientation in [Orientation::Frontal, Orientation::Sagittal, Orientation::Horizontal] {
            let slab = PlaneSlicer::new(Position::Auto, orientation, 10.0)
                .execute(&root())
                .unwrap();
            assert_relative_eq!(*slab.plane0().origin(), Point3::new(50.0, 30.0, 40.0));
        }

        // Only the user-supplied coordinate on the inverted axis is negated.
        let slab = PlaneSlicer::new(20.0, Orientation::Sagittal, 10.0)
            .execute(&root())
            .unwrap();
        assert_relative_eq!(*slab.plane0().origin(), Point3::new(50.0, 30.0, -20.0));
    }

    #[test]
    fn root_listed_as_region_is_sliced_once() {
        use crate::atlas::{RegionData, RegionStore};

        let mut atlas = RegionStore::new();
        atlas.add_region(RegionData::new(ROOT, root()));
        let grouped = structures_slice_coords(&atlas, &[ROOT], 50.0, Orientation::Frontal).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[ROOT].len(), 1);
    }

    #[test]
    fn slab_contains_points_between_planes() {
        let slab = PlaneSlicer::new(50.0, Orientation::Frontal, 10.0)
            .execute(&root())
            .unwrap();
        assert!(slab.contains(&Point3::new(55.0, 0.0, 0.0)));
        assert!(slab.contains(&Point3::new(50.0, 0.0, 0.0)));
        assert!(!slab.contains(&Point3::new(49.0, 0.0, 0.0)));
        assert!(!slab.contains(&Point3::new(61.0, 0.0, 0.0)));
    }
}
