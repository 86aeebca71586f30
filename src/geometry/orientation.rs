use std::fmt;
use std::str::FromStr;

use crate::error::SlicingError;
use crate::math::Vector3;

/// Direction of the cutting plane.
///
/// Named orientations are the three anatomical conventions and map to a
/// fixed in-plane basis; any other direction is given as a free normal vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Orientation {
    /// Coronal cut, orthogonal to axis 0.
    #[default]
    Frontal,
    /// Cut orthogonal to axis 2.
    Sagittal,
    /// Cut orthogonal to axis 1.
    Horizontal,
    /// Arbitrary plane normal. Must be non-zero.
    Vector(Vector3),
}

impl Orientation {
    /// Index of the atlas axis orthogonal to a named orientation.
    #[must_use]
    pub fn axis_index(&self) -> Option<usize> {
        match self {
            Self::Frontal => Some(0),
            Self::Horizontal => Some(1),
            Self::Sagittal => Some(2),
            Self::Vector(_) => None,
        }
    }

    /// Fixed `(u, v)` basis of the front plane for a named orientation.
    ///
    /// Each pair is chosen so that `u x v` points along the positive slicing
    /// axis. The vectors are tied to the reference atlas axes and must not be
    /// re-derived.
    #[must_use]
    pub fn named_basis(&self) -> Option<(Vector3, Vector3)> {
        match self {
            Self::Frontal => Some((Vector3::new(0.0, 0.0, -1.0), Vector3::new(0.0, 1.0, 0.0))),
            Self::Sagittal => Some((Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0))),
            Self::Horizontal => Some((Vector3::new(0.0, 0.0, -1.0), Vector3::new(-1.0, 0.0, 0.0))),
            Self::Vector(_) => None,
        }
    }

    /// Returns the name for named orientations.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Frontal => Some("frontal"),
            Self::Sagittal => Some("sagittal"),
            Self::Horizontal => Some("horizontal"),
            Self::Vector(_) => None,
        }
    }

    /// Returns `true` for the three named orientations.
    #[must_use]
    pub fn is_named(&self) -> bool {
        !matches!(self, Self::Vector(_))
    }
}

impl FromStr for Orientation {
    type Err = SlicingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontal" => Ok(Self::Frontal),
            "sagittal" => Ok(Self::Sagittal),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(SlicingError::UnknownOrientation(other.to_owned())),
        }
    }
}

impl From<Vector3> for Orientation {
    fn from(v: Vector3) -> Self {
        Self::Vector(v)
    }
}

impl From<[f64; 3]> for Orientation {
    fn from(v: [f64; 3]) -> Self {
        Self::Vector(Vector3::from(v))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_named() {
        assert_eq!("frontal".parse::<Orientation>().unwrap(), Orientation::Frontal);
        assert_eq!("sagittal".parse::<Orientation>().unwrap(), Orientation::Sagittal);
        assert_eq!("horizontal".parse::<Orientation>().unwrap(), Orientation::Horizontal);
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "coronal".parse::<Orientation>().unwrap_err();
        assert!(matches!(err, SlicingError::UnknownOrientation(ref s) if s == "coronal"));
        assert!("Frontal".parse::<Orientation>().is_err());
    }

    #[test]
    fn axis_indices() {
        assert_eq!(Orientation::Frontal.axis_index(), Some(0));
        assert_eq!(Orientation::Horizontal.axis_index(), Some(1));
        assert_eq!(Orientation::Sagittal.axis_index(), Some(2));
        assert_eq!(Orientation::from([1.0, 1.0, 0.0]).axis_index(), None);
    }

    #[test]
    fn named_basis_normal_points_along_axis() {
        for orientation in [Orientation::Frontal, Orientation::Sagittal, Orientation::Horizontal] {
            let (u, v) = orientation.named_basis().unwrap();
            let n = u.cross(&v);
            let axis = orientation.axis_index().unwrap();
            assert!((n[axis] - 1.0).abs() < 1e-12, "{orientation}: {n:?}");
            assert!(u.dot(&v).abs() < 1e-12);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Orientation::Frontal.to_string(), "frontal");
        assert_eq!(Orientation::from([0.0, 0.5, 1.0]).to_string(), "(0, 0.5, 1)");
    }
}
