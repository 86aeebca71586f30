use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::atlas::ROOT;
use crate::geometry::Plane;
use crate::math::polygon_2d;
use crate::math::Point2;
use crate::mesh::PlaneSection;

const SEGMENT_SEPARATOR: &str = "_segment_";

/// Identifies one connected cross-section of a region: `"{region}_segment_{index}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentKey {
    region: String,
    index: usize,
}

impl SegmentKey {
    /// Creates a key for the `index`-th component of `region`.
    #[must_use]
    pub fn new(region: impl Into<String>, index: usize) -> Self {
        Self {
            region: region.into(),
            index,
        }
    }

    /// Name of the owning region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Index of the component within the region, in section order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` for keys of the root outline.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.region == ROOT
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEGMENT_SEPARATOR}{}", self.region, self.index)
    }
}

impl FromStr for SegmentKey {
    type Err = std::num::ParseIntError;

    /// Parses `"{region}_segment_{index}"`. A string without the separator
    /// is read as segment 0 of the whole string, which makes any index
    /// parse error come only from a malformed suffix.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.rsplit_once(SEGMENT_SEPARATOR) {
            Some((region, index)) => Ok(Self::new(region, index.parse()?)),
            None => Ok(Self::new(s, 0)),
        }
    }
}

/// One projected cross-section polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedSegment {
    key: SegmentKey,
    points: Vec<Point2>,
}

impl ProjectedSegment {
    /// Creates a segment from its key and plane-local points.
    #[must_use]
    pub fn new(key: SegmentKey, points: Vec<Point2>) -> Self {
        Self { key, points }
    }

    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &SegmentKey {
        &self.key
    }

    /// Returns the plane-local polygon points.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Absolute area of the polygon, closing it implicitly.
    #[must_use]
    pub fn area(&self) -> f64 {
        polygon_2d::area(&self.points)
    }
}

/// Projected cross-sections of a set of regions.
///
/// Segments keep the order of the regions passed in and, within a region,
/// the order of its connected components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedRegions {
    regions: Vec<String>,
    segments: Vec<ProjectedSegment>,
}

impl ProjectedRegions {
    /// Returns `true` if no region crossed the plane.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Names of the projected regions, in input order.
    #[must_use]
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// All segments in order.
    #[must_use]
    pub fn segments(&self) -> &[ProjectedSegment] {
        &self.segments
    }

    /// Iterates over the segment keys.
    pub fn keys(&self) -> impl Iterator<Item = &SegmentKey> + '_ {
        self.segments.iter().map(ProjectedSegment::key)
    }

    /// Looks up a segment by key.
    #[must_use]
    pub fn get(&self, key: &SegmentKey) -> Option<&ProjectedSegment> {
        self.segments.iter().find(|s| &s.key == key)
    }

    /// Segments belonging to one region.
    pub fn region_segments<'a>(
        &'a self,
        region: &'a str,
    ) -> impl Iterator<Item = &'a ProjectedSegment> + 'a {
        self.segments.iter().filter(move |s| s.key.region == region)
    }

    /// Polygons per region. Every projected region is present, with an
    /// empty list if the plane missed it.
    #[must_use]
    pub fn grouped(&self) -> BTreeMap<String, Vec<Vec<Point2>>> {
        let mut grouped: BTreeMap<String, Vec<Vec<Point2>>> = self
            .regions
            .iter()
            .map(|name| (name.clone(), Vec::new()))
            .collect();
        for segment in &self.segments {
            grouped
                .entry(segment.key.region.clone())
                .or_default()
                .push(segment.points.clone());
        }
        grouped
    }

    /// Appends a segment, registering its region if it is new.
    pub fn push(&mut self, segment: ProjectedSegment) {
        if !self.regions.iter().any(|r| r == segment.key.region()) {
            self.regions.push(segment.key.region.clone());
        }
        self.segments.push(segment);
    }

    /// Consumes the result, returning the segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<ProjectedSegment> {
        self.segments
    }
}

/// Intersects region meshes with a plane and projects each connected
/// component into the plane's 2D frame.
#[derive(Debug, Clone, Copy)]
pub struct ProjectRegions<'a> {
    plane: &'a Plane,
}

impl<'a> ProjectRegions<'a> {
    /// Creates a new `ProjectRegions` for the given plane.
    #[must_use]
    pub fn new(plane: &'a Plane) -> Self {
        Self { plane }
    }

    /// Executes the projection over `(name, mesh)` pairs.
    ///
    /// Regions the plane misses contribute no segments but are still listed
    /// in [`ProjectedRegions::regions`].
    pub fn execute<'m, I, M>(&self, regions: I) -> ProjectedRegions
    where
        I: IntoIterator<Item = (&'m str, &'m M)>,
        M: PlaneSection + ?Sized + 'm,
    {
        let mut result = ProjectedRegions::default();

        for (name, mesh) in regions {
            let section = self.plane.intersect(mesh);
            let components = self.plane.split_into_components(&section);
            tracing::trace!(region = name, components = components.len(), "region projected");

            for (index, component) in components.iter().enumerate() {
                result.segments.push(ProjectedSegment::new(
                    SegmentKey::new(name, index),
                    self.plane.project(component),
                ));
            }
            result.regions.push(name.to_owned());
        }

        tracing::debug!(
            regions = result.regions.len(),
            segments = result.segments.len(),
            "regions projected onto plane"
        );
        result
    }
}
