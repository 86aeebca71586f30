use crate::annotate::FindInteriorPoint;
use crate::color::{Rgb, ROOT_ALPHA, ROOT_COLOR};
use crate::math::Point2;
use crate::slicer::{ProjectedRegions, SegmentKey};

/// One cross-section polygon ready to be filled.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledSegment {
    /// Segment identity.
    pub key: SegmentKey,
    /// Plane-local polygon points.
    pub points: Vec<Point2>,
    /// Polygon area.
    pub area: f64,
    /// Fill color; `None` for regions without a value.
    pub color: Option<Rgb>,
    /// Fill opacity.
    pub alpha: f64,
    /// Legend entry, set on the first segment of each non-root region.
    pub label: Option<String>,
    /// Draw behind every other segment.
    pub background: bool,
}

/// A text label placed inside a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Segment the label belongs to.
    pub key: SegmentKey,
    /// Label text.
    pub text: String,
    /// Anchor point, strictly inside the segment.
    pub position: Point2,
}

/// A named tick on the colorbar.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarTick {
    /// Region name.
    pub region: String,
    /// Tick position on the value axis.
    pub value: f64,
}

/// Colorbar description.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    /// Colormap name.
    pub colormap: String,
    /// Lower end of the value axis.
    pub vmin: f64,
    /// Upper end of the value axis.
    pub vmax: f64,
    /// Caption.
    pub label: Option<String>,
    /// Region ticks; empty unless region labelling is on.
    pub ticks: Vec<ColorbarTick>,
}

/// Receiver of a 2D plot, e.g. a plotting backend.
pub trait PlotSink {
    /// Fills one polygon.
    fn fill(&mut self, segment: &FilledSegment);

    /// Places one text label.
    fn annotate(&mut self, annotation: &Annotation);

    /// Draws the colorbar.
    fn colorbar(&mut self, colorbar: &Colorbar);

    /// Sets the plot title. Ignored by default.
    fn title(&mut self, _title: &str) {}
}

/// Everything needed to draw a 2D heatmap slice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlicePlot {
    /// Filled segments, largest area first.
    pub segments: Vec<FilledSegment>,
    /// Text labels.
    pub annotations: Vec<Annotation>,
    /// Colorbar, if shown.
    pub colorbar: Option<Colorbar>,
    /// Plot title.
    pub title: Option<String>,
}

impl SlicePlot {
    /// Sends the plot to `sink`: fills in order, then labels, then the
    /// colorbar.
    pub fn draw<S: PlotSink + ?Sized>(&self, sink: &mut S) {
        if let Some(title) = &self.title {
            sink.title(title);
        }
        for segment in &self.segments {
            sink.fill(segment);
        }
        for annotation in &self.annotations {
            sink.annotate(annotation);
        }
        if let Some(colorbar) = &self.colorbar {
            sink.colorbar(colorbar);
        }
    }

    /// Looks up a filled segment by key.
    #[must_use]
    pub fn segment(&self, key: &SegmentKey) -> Option<&FilledSegment> {
        self.segments.iter().find(|s| &s.key == key)
    }
}

/// Turns projected regions into filled segments sorted by area,
/// largest first. Ties keep projection order.
pub(crate) fn fill_segments(
    projected: ProjectedRegions,
    color_of: impl Fn(&str) -> Option<Rgb>,
) -> Vec<FilledSegment> {
    let mut segments: Vec<FilledSegment> = projected
        .into_segments()
        .into_iter()
        .map(|segment| {
            let area = segment.area();
            let key = segment.key().clone();
            let root = key.is_root();
            FilledSegment {
                color: if root { Some(ROOT_COLOR) } else { color_of(key.region()) },
                alpha: if root { ROOT_ALPHA } else { 1.0 },
                label: (!root && key.index() == 0).then(|| key.region().to_owned()),
                background: root,
                points: segment.points().to_vec(),
                area,
                key,
            }
        })
        .collect();
    segments.sort_by(|a, b| b.area.total_cmp(&a.area));
    segments
}

/// Places a label inside every segment whose region has label text.
pub(crate) fn place_annotations(
    segments: &[FilledSegment],
    text_of: impl Fn(&str) -> Option<String>,
    precision: f64,
) -> Vec<Annotation> {
    segments
        .iter()
        .filter_map(|segment| {
            let text = text_of(segment.key.region())?;
            let position = FindInteriorPoint::new(&segment.points)
                .with_precision(precision)
                .execute();
            if position.is_none() {
                tracing::warn!(segment = %segment.key, "segment too degenerate to annotate");
            }
            Some(Annotation {
                key: segment.key.clone(),
                text,
                position: position?,
            })
        })
        .collect()
}
