use std::fmt;

use tracing::{debug, info};

use crate::atlas::{Atlas, ROOT};
use crate::color::{Rgb, ROOT_COLOR};
use crate::error::{Result, SlicingError, ValueError};
use crate::geometry::Plane;
use crate::heatmap::{Camera, Heatmap, Scene};
use crate::math::{Point3, Vector3};
use crate::slicer::SectionCap;

/// Color of the front plane quad.
pub const PLANE0_COLOR: Rgb = Rgb::new(0.082, 0.396, 0.753);

/// Color of the back plane quad.
pub const PLANE1_COLOR: Rgb = Rgb::new(0.678, 0.078, 0.341);

/// Opacity of the front plane quad.
pub const PLANE0_ALPHA: f64 = 0.8;

/// Opacity of the back plane quad.
pub const PLANE1_ALPHA: f64 = 0.3;

/// Human-readable description of a plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSummary {
    /// Plane origin.
    pub center: Point3,
    /// Unit normal.
    pub normal: Vector3,
    /// First in-plane axis.
    pub u: Vector3,
    /// Second in-plane axis.
    pub v: Vector3,
}

impl From<&Plane> for PlaneSummary {
    fn from(plane: &Plane) -> Self {
        Self {
            center: *plane.origin(),
            normal: *plane.normal(),
            u: *plane.u(),
            v: *plane.v(),
        }
    }
}

fn round2(x: f64) -> f64 {
    let r = (x * 100.0).round() / 100.0;
    // Avoid printing "-0".
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

fn triple(f: &mut fmt::Formatter<'_>, c: &[f64]) -> fmt::Result {
    write!(f, "({}, {}, {})", round2(c[0]), round2(c[1]), round2(c[2]))
}

impl fmt::Display for PlaneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("center point: ")?;
        triple(f, self.center.coords.as_slice())?;
        f.write_str(", norm: ")?;
        triple(f, self.normal.as_slice())?;
        f.write_str(", u: ")?;
        triple(f, self.u.as_slice())?;
        f.write_str(", v: ")?;
        triple(f, self.v.as_slice())
    }
}

/// 3D view of the slab itself: section caps on the front plane and both
/// planes drawn as translucent quads.
#[derive(Debug)]
pub struct Planner<'h, A: Atlas> {
    heatmap: &'h Heatmap<A>,
}

impl<'h, A: Atlas> Planner<'h, A> {
    /// Creates a planner and logs both plane summaries.
    #[must_use]
    pub fn new(heatmap: &'h Heatmap<A>) -> Self {
        let slab = heatmap.slab();
        info!(plane = "plane0", summary = %PlaneSummary::from(slab.plane0()));
        info!(plane = "plane1", summary = %PlaneSummary::from(slab.plane1()));
        Self { heatmap }
    }

    /// Summaries of the front and back planes.
    #[must_use]
    pub fn summaries(&self) -> [PlaneSummary; 2] {
        let slab = self.heatmap.slab();
        [slab.plane0().into(), slab.plane1().into()]
    }

    /// Adds the front-plane cross-section of every valued region and the
    /// root as a flat cap mesh, then removes the non-root region meshes.
    ///
    /// # Errors
    ///
    /// Returns an error if a region is no longer in the atlas or a cap
    /// cannot be triangulated.
    pub fn show_plane_intersection<S: Scene + ?Sized>(&self, scene: &mut S) -> Result<()> {
        let atlas = self.heatmap.atlas();
        let plane = self.heatmap.slab().plane0();
        let names = self.heatmap.regions().chain(std::iter::once(ROOT));

        for name in names {
            let mesh = if name == ROOT {
                atlas.root_mesh().ok_or(SlicingError::MissingRoot)?
            } else {
                atlas
                    .region_mesh(name)
                    .ok_or_else(|| ValueError::UnknownRegion(name.to_owned()))?
            };

            let section = plane.intersect(mesh);
            let loops: Vec<_> = plane
                .split_into_components(&section)
                .iter()
                .map(|component| plane.project(component))
                .collect();
            let cap = SectionCap::new(plane).execute(&loops)?;
            debug!(region = name, triangles = cap.indices.len(), "section cap built");

            if !cap.is_empty() {
                let color = self.heatmap.color_of(name).unwrap_or(ROOT_COLOR);
                scene.add_mesh(&format!("{name}_section"), cap, color, 1.0);
            }
            if name != ROOT {
                scene.remove_region(name);
            }
        }
        Ok(())
    }

    /// Draws the section caps and both plane quads, then renders.
    ///
    /// # Errors
    ///
    /// Propagates [`Planner::show_plane_intersection`] errors and fails
    /// with [`SlicingError::MissingRoot`] if the root has no vertices.
    pub fn show<S: Scene + ?Sized>(&self, scene: &mut S) -> Result<Camera> {
        self.show_plane_intersection(scene)?;

        let bounds = self
            .heatmap
            .atlas()
            .root_mesh()
            .and_then(|root| root.bounds())
            .ok_or(SlicingError::MissingRoot)?;
        let slab = self.heatmap.slab();
        scene.add_mesh("plane0", slab.plane0().to_quad(&bounds), PLANE0_COLOR, PLANE0_ALPHA);
        scene.add_mesh("plane1", slab.plane1().to_quad(&bounds), PLANE1_COLOR, PLANE1_ALPHA);

        let camera = Camera::for_orientation(&self.heatmap.config().orientation, slab.plane0());
        scene.render(&camera);
        Ok(camera)
    }
}
