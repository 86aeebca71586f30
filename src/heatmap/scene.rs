use std::fmt;

use crate::color::Rgb;
use crate::geometry::{Orientation, Plane};
use crate::math::{Point3, Vector3};
use crate::mesh::TriMesh;

/// Viewpoint for a 3D rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Camera {
    /// Looking along the frontal axis.
    Frontal,
    /// Looking along the sagittal axis.
    Sagittal,
    /// Looking down from above.
    Top,
    /// Arbitrary viewpoint.
    Custom {
        /// Eye position.
        position: Point3,
        /// Point looked at.
        focal_point: Point3,
        /// Up direction of the view.
        view_up: Vector3,
    },
}

impl Camera {
    /// Default camera for a slab orientation.
    ///
    /// Named orientations get a matching named camera. A free direction
    /// looks along itself at the front plane center from twice the center's
    /// distance to the origin.
    #[must_use]
    pub fn for_orientation(orientation: &Orientation, plane0: &Plane) -> Self {
        match orientation {
            Orientation::Frontal => Self::Frontal,
            Orientation::Sagittal => Self::Sagittal,
            Orientation::Horizontal => Self::Top,
            Orientation::Vector(_) => {
                let center = *plane0.origin();
                let direction = *plane0.normal();
                Self::Custom {
                    position: center - direction * 2.0 * center.coords.norm(),
                    focal_point: center,
                    view_up: Vector3::new(0.0, -1.0, 0.0),
                }
            }
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frontal => f.write_str("frontal"),
            Self::Sagittal => f.write_str("sagittal"),
            Self::Top => f.write_str("top"),
            Self::Custom { position, .. } => {
                write!(f, "custom ({}, {}, {})", position.x, position.y, position.z)
            }
        }
    }
}

/// A 3D scene holding the atlas region meshes, e.g. a rendering backend.
pub trait Scene {
    /// Cuts the named regions with `plane`, keeping the side the normal
    /// points to. `close` caps the cut surfaces.
    fn slice(&mut self, plane: &Plane, regions: &[&str], close: bool);

    /// Colors a region.
    fn set_region_color(&mut self, region: &str, color: Rgb);

    /// Adds an extra mesh.
    fn add_mesh(&mut self, name: &str, mesh: TriMesh, color: Rgb, alpha: f64);

    /// Removes a region from the scene.
    fn remove_region(&mut self, region: &str);

    /// Renders the scene.
    fn render(&mut self, camera: &Camera);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn named_cameras() {
        let plane = Plane::from_normal(Point3::origin(), Vector3::x()).unwrap();
        assert_eq!(Camera::for_orientation(&Orientation::Frontal, &plane), Camera::Frontal);
        assert_eq!(Camera::for_orientation(&Orientation::Sagittal, &plane), Camera::Sagittal);
        assert_eq!(Camera::for_orientation(&Orientation::Horizontal, &plane), Camera::Top);
        assert_eq!(Camera::Top.to_string(), "top");
    }

    #[test]
    fn custom_camera_looks_along_normal() {
        let center = Point3::new(3.0, 4.0, 0.0);
        let plane = Plane::from_normal(center, Vector3::new(0.0, 0.0, 2.0)).unwrap();
        let camera = Camera::for_orientation(&Orientation::from([0.0, 0.0, 2.0]), &plane);
        let Camera::Custom {
            position,
            focal_point,
            view_up,
        } = camera
        else {
            panic!("expected a custom camera");
        };
        assert_relative_eq!(position, Point3::new(3.0, 4.0, -10.0), epsilon = 1e-12);
        assert_eq!(focal_point, center);
        assert_eq!(view_up, Vector3::new(0.0, -1.0, 0.0));
    }
}
