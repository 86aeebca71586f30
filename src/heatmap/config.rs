use std::str::FromStr;

use crate::annotate::{AnnotationPolicy, ANNOTATION_PRECISION};
use crate::geometry::Orientation;
use crate::slicer::{AxisConvention, Position};

/// Default slab thickness in atlas units.
pub const DEFAULT_THICKNESS: f64 = 10.0;

/// Default colormap name.
pub const DEFAULT_COLORMAP: &str = "Reds";

/// Output mode of a heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Flat cross-section polygons for a 2D plot.
    TwoD,
    /// Meshes sliced by the slab in a 3D scene.
    #[default]
    ThreeD,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2D" => Ok(Self::TwoD),
            "3D" => Ok(Self::ThreeD),
            other => Err(format!("unknown heatmap format \"{other}\"")),
        }
    }
}

/// Settings of one heatmap visualization.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    /// Direction of the cutting planes.
    pub orientation: Orientation,
    /// Position of the front plane.
    pub position: Position,
    /// Distance between the two slab planes.
    pub thickness: f64,
    /// Colormap name, e.g. `"Reds"`.
    pub colormap: String,
    /// Lower end of the color range; data minimum if `None`.
    pub vmin: Option<f64>,
    /// Upper end of the color range; data maximum if `None`.
    pub vmax: Option<f64>,
    /// Output mode.
    pub format: Format,
    /// Put region names on the colorbar (2D only).
    pub label_regions: bool,
    /// Which regions get text labels (2D only).
    pub annotate: AnnotationPolicy,
    /// Search tolerance for label placement.
    pub annotation_precision: f64,
    /// Include a colorbar in the 2D plot.
    pub show_colorbar: bool,
    /// Colorbar caption.
    pub colorbar_label: Option<String>,
    /// Plot title.
    pub title: Option<String>,
    /// Mapping of user coordinates onto mesh coordinates.
    pub convention: AxisConvention,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            position: Position::default(),
            thickness: DEFAULT_THICKNESS,
            colormap: DEFAULT_COLORMAP.to_owned(),
            vmin: None,
            vmax: None,
            format: Format::default(),
            label_regions: false,
            annotate: AnnotationPolicy::default(),
            annotation_precision: ANNOTATION_PRECISION,
            show_colorbar: true,
            colorbar_label: None,
            title: None,
            convention: AxisConvention::default(),
        }
    }
}

impl HeatmapConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: impl Into<Orientation>) -> Self {
        self.orientation = orientation.into();
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap = name.into();
        self
    }

    /// Overrides either end of the color range. `Some(0.0)` is a valid bound.
    #[must_use]
    pub fn with_range(mut self, vmin: Option<f64>, vmax: Option<f64>) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_label_regions(mut self, label_regions: bool) -> Self {
        self.label_regions = label_regions;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, policy: impl Into<AnnotationPolicy>) -> Self {
        self.annotate = policy.into();
        self
    }

    #[must_use]
    pub fn with_annotation_precision(mut self, precision: f64) -> Self {
        self.annotation_precision = precision;
        self
    }

    #[must_use]
    pub fn with_colorbar(mut self, show: bool, label: Option<String>) -> Self {
        self.show_colorbar = show;
        self.colorbar_label = label;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_convention(mut self, convention: AxisConvention) -> Self {
        self.convention = convention;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HeatmapConfig::default();
        assert_eq!(config.orientation, Orientation::Frontal);
        assert_eq!(config.position, Position::Auto);
        assert_eq!(config.thickness, 10.0);
        assert_eq!(config.colormap, "Reds");
        assert_eq!(config.format, Format::ThreeD);
        assert!(!config.label_regions);
        assert_eq!(config.annotate, AnnotationPolicy::None);
        assert_eq!(config.annotation_precision, 0.1);
        assert_eq!(config.convention.inverted_axis(), Some(2));
    }

    #[test]
    fn builders() {
        let config = HeatmapConfig::new()
            .with_orientation(Orientation::Sagittal)
            .with_position(5000.0)
            .with_thickness(20.0)
            .with_range(Some(0.0), None)
            .with_format(Format::TwoD)
            .with_annotation(true);
        assert_eq!(config.orientation, Orientation::Sagittal);
        assert_eq!(config.position, Position::Axis(5000.0));
        assert_eq!(config.vmin, Some(0.0));
        assert_eq!(config.annotate, AnnotationPolicy::All);
    }
}
