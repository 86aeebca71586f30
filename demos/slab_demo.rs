//! Slab demo: builds a small synthetic atlas, slices it and prints the 2D
//! plot and the 3D scene calls as text.
//!
//! Usage:
//! ```text
//! cargo run --example slab_demo
//! RUST_LOG=atlas_heatmap=debug cargo run --example slab_demo
//! ```

use atlas_heatmap::annotate::AnnotationPolicy;
use atlas_heatmap::color::Rgb;
use atlas_heatmap::heatmap::{Annotation, Camera, Colorbar, FilledSegment, PlotSink, Scene};
use atlas_heatmap::math::Point3;
use atlas_heatmap::mesh::TriMesh;
use atlas_heatmap::planner::Planner;
use atlas_heatmap::{
    structures_slice_coords, Format, Heatmap, HeatmapConfig, HeatmapError, Orientation, Plane,
    RegionData, RegionStore, ROOT,
};

struct TextPlot;

impl PlotSink for TextPlot {
    fn fill(&mut self, segment: &FilledSegment) {
        let color = segment
            .color
            .map_or_else(|| "none".to_owned(), |c| format!("({:.2}, {:.2}, {:.2})", c.r(), c.g(), c.b()));
        println!(
            "fill {:<16} area {:>9.1}  color {color}  alpha {}",
            segment.key.to_string(),
            segment.area,
            segment.alpha
        );
    }

    fn annotate(&mut self, annotation: &Annotation) {
        println!(
            "text {:?} at ({:.1}, {:.1})",
            annotation.text, annotation.position.x, annotation.position.y
        );
    }

    fn colorbar(&mut self, colorbar: &Colorbar) {
        println!(
            "colorbar {} [{}, {}] ticks {:?}",
            colorbar.colormap,
            colorbar.vmin,
            colorbar.vmax,
            colorbar.ticks.iter().map(|t| t.region.as_str()).collect::<Vec<_>>()
        );
    }

    fn title(&mut self, title: &str) {
        println!("== {title} ==");
    }
}

struct TextScene;

impl Scene for TextScene {
    fn slice(&mut self, plane: &Plane, regions: &[&str], close: bool) {
        println!("slice {regions:?} at {:?} (close: {close})", plane.origin().coords.as_slice());
    }

    fn set_region_color(&mut self, region: &str, color: Rgb) {
        println!("color {region} {:?}", color.0);
    }

    fn add_mesh(&mut self, name: &str, mesh: TriMesh, _color: Rgb, alpha: f64) {
        println!("add {name} ({} triangles, alpha {alpha})", mesh.indices.len());
    }

    fn remove_region(&mut self, region: &str) {
        println!("remove {region}");
    }

    fn render(&mut self, camera: &Camera) {
        println!("render with {camera} camera");
    }
}

fn synthetic_atlas() -> RegionStore {
    let mut store = RegionStore::new();
    store.add_region(RegionData::new(
        ROOT,
        TriMesh::uv_sphere(Point3::new(6000.0, 4000.0, -5500.0), 4000.0, 48, 24),
    ));
    store.add_region(RegionData::new(
        "TH",
        TriMesh::cuboid(Point3::new(5500.0, 3000.0, -6500.0), Point3::new(7000.0, 4500.0, -4500.0)),
    ));
    store.add_region(RegionData::new(
        "RSP",
        TriMesh::uv_sphere(Point3::new(6200.0, 1500.0, -5500.0), 600.0, 32, 16),
    ));
    store.add_region(RegionData::new(
        "CB",
        TriMesh::uv_sphere(Point3::new(9000.0, 5000.0, -5500.0), 700.0, 32, 16),
    ));
    store
}

fn main() -> Result<(), HeatmapError> {
    // Default: WARN for everything, INFO for atlas_heatmap.
    // Override with RUST_LOG env var.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("atlas_heatmap=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let atlas = synthetic_atlas();
    let values = [("TH", 1.0), ("RSP", 0.2), ("CB", 0.7)];

    let config = HeatmapConfig::new()
        .with_format(Format::TwoD)
        .with_position(6200.0)
        .with_label_regions(true)
        .with_annotation(AnnotationPolicy::custom([("TH", "Thalamus")]))
        .with_title("frontal slab at 6200");
    let heatmap = Heatmap::new(&atlas, values, config)?;
    heatmap.plot()?.draw(&mut TextPlot);

    println!();
    let config = HeatmapConfig::new().with_orientation([1.0, 0.2, 0.0]).with_position([6200.0, 4000.0, 5500.0]);
    let heatmap = Heatmap::new(&atlas, values, config)?;
    heatmap.render(&mut TextScene);

    println!();
    Planner::new(&heatmap).show(&mut TextScene)?;

    println!();
    let coords = structures_slice_coords(&atlas, &["TH", "RSP"], 4000.0, Orientation::Horizontal)?;
    for (region, polygons) in &coords {
        let points: usize = polygons.iter().map(Vec::len).sum();
        println!("{region}: {} polygons, {points} points", polygons.len());
    }

    Ok(())
}
