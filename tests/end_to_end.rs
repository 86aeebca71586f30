//! End-to-end slicing over a synthetic atlas.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;

use atlas_heatmap::color::Colormap;
use atlas_heatmap::heatmap::View;
use atlas_heatmap::math::polygon_2d;
use atlas_heatmap::math::{Point3, Vector3};
use atlas_heatmap::mesh::TriMesh;
use atlas_heatmap::{
    structures_slice_coords, Format, Heatmap, HeatmapConfig, Orientation, RegionData,
    RegionStore, ROOT,
};

fn cuboid(min: [f64; 3], max: [f64; 3]) -> TriMesh {
    TriMesh::cuboid(Point3::from(min), Point3::from(max))
}

/// Root spans x in [0, 13000]; TH and the two RSP lobes straddle x = 9000.
fn atlas() -> RegionStore {
    let mut rsp = cuboid([8800.0, 1000.0, -6000.0], [9200.0, 1500.0, -5000.0]);
    rsp.append(&cuboid([8800.0, 1000.0, -3000.0], [9200.0, 1500.0, -2000.0]));

    let mut store = RegionStore::new();
    store.add_region(RegionData::new(ROOT, cuboid([0.0, 0.0, -11000.0], [13000.0, 8000.0, 0.0])));
    store.add_region(RegionData::new("TH", cuboid([8000.0, 3000.0, -7000.0], [10000.0, 5000.0, -4000.0])));
    store.add_region(RegionData::new("RSP", rsp));
    store.add_region(RegionData::new("CB", cuboid([11000.0, 3000.0, -7000.0], [12000.0, 5000.0, -4000.0])));
    store
}

#[test]
fn frontal_slice_at_scalar_position() {
    let config = HeatmapConfig::new()
        .with_format(Format::TwoD)
        .with_orientation("frontal".parse::<Orientation>().unwrap())
        .with_position(9000.0);
    let heatmap = Heatmap::new(atlas(), [("TH", 1.0), ("RSP", 0.2)], config).unwrap();

    let plane0 = heatmap.slab().plane0();
    assert_relative_eq!(*plane0.normal(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(plane0.origin().x, 9000.0);
    assert_relative_eq!(plane0.origin().y, 4000.0);
    assert_relative_eq!(plane0.origin().z, -5500.0);

    let projected = heatmap.project().unwrap();
    let mut keys: Vec<String> = projected.keys().map(ToString::to_string).collect();
    keys.sort();
    assert_eq!(
        keys,
        ["RSP_segment_0", "RSP_segment_1", "TH_segment_0", "root_segment_0"]
    );
    for key in projected.keys() {
        assert!(["TH", "RSP", ROOT].contains(&key.region()));
    }
}

#[test]
fn disjoint_components_are_separate_segments() {
    let coords = structures_slice_coords(&atlas(), &["RSP"], 9000.0, Orientation::Frontal).unwrap();
    assert_eq!(coords.len(), 2);

    let rsp = &coords["RSP"];
    assert_eq!(rsp.len(), 2);
    for polygon in rsp {
        assert!(polygon_2d::is_simple(polygon));
        assert_relative_eq!(polygon_2d::area(polygon), 500.0 * 1000.0, epsilon = 1e-6);
    }
    assert_eq!(coords[ROOT].len(), 1);
}

#[test]
fn nan_values_keep_geometry_but_lose_color() {
    let mut store = atlas();
    store.add_region(RegionData::new("A", cuboid([8500.0, 500.0, -9000.0], [9500.0, 2500.0, -8000.0])));
    store.add_region(RegionData::new("B", cuboid([8500.0, 6000.0, -9000.0], [9500.0, 7000.0, -8000.0])));

    let config = HeatmapConfig::new().with_format(Format::TwoD).with_position(9000.0);
    let heatmap = Heatmap::new(store, [("A", 1.0), ("B", f64::NAN)], config).unwrap();

    let range = heatmap.range();
    assert_relative_eq!(range.vmin, 1.0);
    assert_relative_eq!(range.vmax, 1.0);

    let top = heatmap.colormap().map(1.0, 1.0, 1.0);
    assert_eq!(heatmap.color_of("A"), Some(top));
    assert_eq!(heatmap.color_of("B"), None);

    let plot = heatmap.plot().unwrap();
    let b = plot
        .segments
        .iter()
        .find(|s| s.key.region() == "B")
        .unwrap();
    assert_eq!(b.color, None);
    assert_eq!(b.label.as_deref(), Some("B"));
}

#[test]
fn annotated_plot_places_labels_inside() {
    let config = HeatmapConfig::new()
        .with_format(Format::TwoD)
        .with_position(9000.0)
        .with_annotation(true)
        .with_label_regions(true);
    let heatmap = Heatmap::new(atlas(), [("TH", 1.0), ("RSP", 0.2), ("CB", 0.5)], config).unwrap();

    let View::Plot(plot) = heatmap.show(&mut NoScene).unwrap() else {
        panic!("expected a 2D plot");
    };

    // CB misses the plane: no segments, no tick.
    let ticks: Vec<_> = plot
        .colorbar
        .as_ref()
        .unwrap()
        .ticks
        .iter()
        .map(|t| t.region.as_str())
        .collect();
    assert_eq!(ticks, ["TH", "RSP"]);

    assert_eq!(plot.annotations.len(), 3);
    for annotation in &plot.annotations {
        let segment = plot.segment(&annotation.key).unwrap();
        assert!(polygon_2d::contains_point(&segment.points, &annotation.position));
        assert_eq!(annotation.text, annotation.key.region());
    }
    assert_eq!(plot.segments[0].key.region(), ROOT);
}

struct NoScene;

impl atlas_heatmap::heatmap::Scene for NoScene {
    fn slice(&mut self, _: &atlas_heatmap::Plane, _: &[&str], _: bool) {}
    fn set_region_color(&mut self, _: &str, _: atlas_heatmap::color::Rgb) {}
    fn add_mesh(&mut self, _: &str, _: TriMesh, _: atlas_heatmap::color::Rgb, _: f64) {}
    fn remove_region(&mut self, _: &str) {}
    fn render(&mut self, _: &atlas_heatmap::heatmap::Camera) {}
}
