pub mod annotate;
pub mod atlas;
pub mod color;
pub mod error;
pub mod geometry;
pub mod heatmap;
pub mod math;
pub mod mesh;
pub mod planner;
pub mod slicer;

pub use atlas::{Atlas, RegionData, RegionStore, ROOT};
pub use error::{HeatmapError, Result};
pub use geometry::{Orientation, Plane};
pub use heatmap::{Format, Heatmap, HeatmapConfig, RegionValues};
pub use slicer::{structures_slice_coords, PlaneSlicer, Position, SlicingSlab};
