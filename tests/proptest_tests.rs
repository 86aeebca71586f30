//! Property-based tests for plane construction and label placement.

#![allow(clippy::unwrap_used)]

use std::f64::consts::TAU;

use atlas_heatmap::annotate::{pole_of_inaccessibility, FindInteriorPoint};
use atlas_heatmap::geometry::Plane;
use atlas_heatmap::math::distance_2d::point_to_ring_dist;
use atlas_heatmap::math::polygon_2d;
use atlas_heatmap::math::{Point2, Point3, Vector3};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

/// Star-shaped polygon around the origin: sorted angles, random radii.
fn star_polygon_strategy() -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec((0.0..1.0f64, 0.5..10.0f64), 4..24).prop_map(|mut spokes| {
        let n = spokes.len();
        // Spread angles so consecutive vertices never coincide.
        spokes
            .iter_mut()
            .enumerate()
            .map(|(i, (jitter, radius))| {
                #[allow(clippy::cast_precision_loss)]
                let angle = TAU * (i as f64 + 0.8 * *jitter) / n as f64;
                Point2::new(*radius * angle.cos(), *radius * angle.sin())
            })
            .collect()
    })
}

fn normal_strategy() -> impl Strategy<Value = Vector3> {
    (-1.0..1.0f64, -1.0..1.0f64, -1.0..1.0f64)
        .prop_filter("normal must not be near zero", |(x, y, z)| {
            x * x + y * y + z * z > 1e-4
        })
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn interior_point_is_strictly_inside_star(polygon in star_polygon_strategy()) {
        let point = FindInteriorPoint::new(&polygon).execute();
        prop_assert!(point.is_some());
        let point = point.unwrap();
        prop_assert!(polygon_2d::contains_point(&polygon, &point));
        prop_assert!(point_to_ring_dist(&point, &polygon) > 0.0);
    }

    #[test]
    fn rectangle_pole_is_near_center(w in 1.0..50.0f64, h in 1.0..50.0f64, x in -100.0..100.0f64, y in -100.0..100.0f64) {
        let ring = vec![
            Point2::new(x, y),
            Point2::new(x + w, y),
            Point2::new(x + w, y + h),
            Point2::new(x, y + h),
        ];
        let precision = 0.1;
        let pole = pole_of_inaccessibility(&ring, precision).unwrap();
        prop_assert!(point_to_ring_dist(&pole, &ring) >= w.min(h) / 2.0 - precision);
    }

    #[test]
    fn plane_basis_is_orthonormal(normal in normal_strategy(), ox in -1e4..1e4f64, oy in -1e4..1e4f64, oz in -1e4..1e4f64) {
        let plane = Plane::from_normal(Point3::new(ox, oy, oz), normal).unwrap();
        prop_assert!((plane.u().norm() - 1.0).abs() < 1e-9);
        prop_assert!((plane.v().norm() - 1.0).abs() < 1e-9);
        prop_assert!(plane.u().dot(plane.v()).abs() < 1e-6);
        prop_assert!((*plane.normal() - normal.normalize()).norm() < 1e-9);
        prop_assert!((*plane.normal() - plane.u().cross(plane.v())).norm() < 1e-9);
    }

    #[test]
    fn projection_recovers_local_coordinates(normal in normal_strategy(), a in -500.0..500.0f64, b in -500.0..500.0f64) {
        let plane = Plane::from_normal(Point3::new(10.0, -20.0, 30.0), normal).unwrap();
        let p = *plane.origin() + *plane.u() * a + *plane.v() * b;
        let local = plane.project_point(&p);
        prop_assert!((local.x - a).abs() < 1e-8);
        prop_assert!((local.y - b).abs() < 1e-8);
    }
}
