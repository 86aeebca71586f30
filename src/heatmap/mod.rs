mod config;
mod plot;
mod scene;
mod values;

pub use config::{Format, HeatmapConfig, DEFAULT_COLORMAP, DEFAULT_THICKNESS};
pub use plot::{Annotation, Colorbar, ColorbarTick, FilledSegment, PlotSink, SlicePlot};
pub use scene::{Camera, Scene};
pub use values::RegionValues;

use tracing::{debug, info};

use crate::atlas::{Atlas, ROOT};
use crate::color::{ColorRange, NamedColormap, Rgb, ROOT_COLOR};
use crate::error::{Result, SlicingError, ValueError};
use crate::mesh::TriMesh;
use crate::slicer::{PlaneSlicer, ProjectRegions, ProjectedRegions, SlicingSlab};

/// Result of [`Heatmap::show`].
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// A 2D plot, for [`Format::TwoD`].
    Plot(SlicePlot),
    /// The camera the scene was rendered with, for [`Format::ThreeD`].
    Rendered(Camera),
}

/// A scalar-per-region visualization of one atlas slab.
///
/// Values and slab are validated and resolved on construction; the
/// instance is immutable afterwards.
#[derive(Debug)]
pub struct Heatmap<A: Atlas> {
    atlas: A,
    values: RegionValues,
    config: HeatmapConfig,
    colormap: NamedColormap,
    range: ColorRange,
    slab: SlicingSlab,
}

impl<A: Atlas> Heatmap<A> {
    /// Validates the values against the atlas and builds the slab.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] for an infinite value or a region the atlas
    /// does not know, [`SlicingError::MissingRoot`] if the atlas has no root
    /// mesh, and any slab construction error.
    pub fn new(atlas: A, values: impl Into<RegionValues>, config: HeatmapConfig) -> Result<Self> {
        let values = values.into();
        values.validate(&atlas)?;

        let root = atlas.root_mesh().ok_or(SlicingError::MissingRoot)?;
        let slab = PlaneSlicer::new(config.position, config.orientation, config.thickness)
            .with_convention(config.convention)
            .execute(root)?;

        let range = ColorRange::from_values(values.values()).with_overrides(config.vmin, config.vmax);
        let colormap = NamedColormap::from_name(&config.colormap);

        info!(
            regions = values.len(),
            vmin = range.vmin,
            vmax = range.vmax,
            orientation = %config.orientation,
            "heatmap prepared"
        );

        Ok(Self {
            atlas,
            values,
            config,
            colormap,
            range,
            slab,
        })
    }

    /// Returns the atlas.
    #[must_use]
    pub fn atlas(&self) -> &A {
        &self.atlas
    }

    /// Returns the region values.
    #[must_use]
    pub fn values(&self) -> &RegionValues {
        &self.values
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Returns the slab.
    #[must_use]
    pub fn slab(&self) -> &SlicingSlab {
        &self.slab
    }

    /// Returns the resolved color range.
    #[must_use]
    pub fn range(&self) -> ColorRange {
        self.range
    }

    /// Returns the colormap.
    #[must_use]
    pub fn colormap(&self) -> &NamedColormap {
        &self.colormap
    }

    /// Valued region names in value order. A value given for the root is
    /// ignored here: the root is always handled as the outline.
    pub fn regions(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.names().filter(|&name| name != ROOT)
    }

    /// Color of a region: the fixed root color for the root, the mapped
    /// value otherwise. `None` for regions without a value.
    #[must_use]
    pub fn color_of(&self, region: &str) -> Option<Rgb> {
        if region == ROOT {
            return Some(ROOT_COLOR);
        }
        self.range
            .color_for(&self.colormap, self.values.get(region)?)
    }

    /// Colors of every valued region followed by the root.
    #[must_use]
    pub fn colors(&self) -> Vec<(String, Option<Rgb>)> {
        self.regions()
            .chain(std::iter::once(ROOT))
            .map(|name| (name.to_owned(), self.color_of(name)))
            .collect()
    }

    /// Region meshes in value order, followed by the root mesh.
    fn region_meshes(&self) -> Result<Vec<(&str, &TriMesh)>> {
        let mut meshes = Vec::with_capacity(self.values.len() + 1);
        for name in self.regions() {
            let mesh = self
                .atlas
                .region_mesh(name)
                .ok_or_else(|| ValueError::UnknownRegion(name.to_owned()))?;
            meshes.push((name, mesh));
        }
        let root = self.atlas.root_mesh().ok_or(SlicingError::MissingRoot)?;
        meshes.push((ROOT, root));
        Ok(meshes)
    }

    /// Cross-sections of the valued regions and the root on the front
    /// plane.
    ///
    /// # Errors
    ///
    /// Returns an error if a region mesh is no longer in the atlas.
    pub fn project(&self) -> Result<ProjectedRegions> {
        let meshes = self.region_meshes()?;
        Ok(ProjectRegions::new(self.slab.plane0()).execute(meshes))
    }

    /// Colorbar ticks: regions seen in `projected` (root excluded) whose
    /// value lies within the color range, in value order.
    #[must_use]
    pub fn colorbar_ticks(&self, projected: &ProjectedRegions) -> Vec<ColorbarTick> {
        self.values
            .iter()
            .filter(|&(region, value)| {
                region != ROOT
                    && self.range.contains(value)
                    && projected.keys().any(|k| k.region() == region)
            })
            .map(|(region, value)| ColorbarTick {
                region: region.to_owned(),
                value,
            })
            .collect()
    }

    /// Builds the 2D plot of the front plane.
    ///
    /// Text labels are placed only when the configured format is
    /// [`Format::TwoD`].
    ///
    /// # Errors
    ///
    /// Returns an error if a region mesh is no longer in the atlas.
    pub fn plot(&self) -> Result<SlicePlot> {
        let projected = self.project()?;
        let ticks = if self.config.label_regions {
            self.colorbar_ticks(&projected)
        } else {
            Vec::new()
        };

        let segments = plot::fill_segments(projected, |region| self.color_of(region));
        let annotations = if self.config.format == Format::TwoD {
            plot::place_annotations(
                &segments,
                |region| self.config.annotate.should_annotate(region),
                self.config.annotation_precision,
            )
        } else {
            Vec::new()
        };
        debug!(
            segments = segments.len(),
            annotations = annotations.len(),
            "slice plot built"
        );

        let colorbar = self.config.show_colorbar.then(|| Colorbar {
            colormap: self.colormap.name().to_owned(),
            vmin: self.range.vmin,
            vmax: self.range.vmax,
            label: self.config.colorbar_label.clone(),
            ticks,
        });

        Ok(SlicePlot {
            segments,
            annotations,
            colorbar,
            title: self.config.title.clone(),
        })
    }

    /// Slices the scene with the slab, colors the regions and renders it.
    ///
    /// Regions are cut by both planes with closed caps; the root is cut by
    /// the front plane only and left open.
    pub fn render<S: Scene + ?Sized>(&self, scene: &mut S) -> Camera {
        let regions: Vec<&str> = self.regions().collect();
        scene.slice(self.slab.plane0(), &regions, true);
        scene.slice(self.slab.plane1(), &regions, true);
        scene.slice(self.slab.plane0(), &[ROOT], false);

        for region in &regions {
            if let Some(color) = self.color_of(region) {
                scene.set_region_color(region, color);
            }
        }

        let camera = Camera::for_orientation(&self.config.orientation, self.slab.plane0());
        debug!(%camera, "rendering scene");
        scene.render(&camera);
        camera
    }

    /// Produces the view selected by the configured format.
    ///
    /// # Errors
    ///
    /// Propagates [`Heatmap::plot`] errors in 2D mode.
    pub fn show<S: Scene + ?Sized>(&self, scene: &mut S) -> Result<View> {
        match self.config.format {
            Format::TwoD => Ok(View::Plot(self.plot()?)),
            Format::ThreeD => Ok(View::Rendered(self.render(scene))),
        }
    }
}
