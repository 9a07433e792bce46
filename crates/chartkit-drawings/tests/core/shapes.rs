use chartkit_core::geometry::{ChartTransform, DataPoint};
use chartkit_drawings::model::FIB_RATIOS;
use chartkit_drawings::{Geometry, GeometryPatch, LineExtent, ShapeKind};
use serde_json::json;

// 0..100 on both axes over 1200x800: 12px per x unit, 8px per y unit.
fn transform() -> ChartTransform {
    ChartTransform::default()
}

fn dp(x: f64, y: f64) -> DataPoint {
    DataPoint::new(x, y)
}

#[test]
fn test_kind_table_arity() {
    let arities: Vec<(ShapeKind, usize)> = ShapeKind::all().map(|k| (k, k.arity())).collect();

    assert_eq!(arities.len(), 9);
    assert_eq!(ShapeKind::TrendLine.arity(), 2);
    assert_eq!(ShapeKind::HorizontalLine.arity(), 1);
    assert_eq!(ShapeKind::VerticalLine.arity(), 1);
    assert_eq!(ShapeKind::ParallelChannel.arity(), 3);
    assert_eq!(ShapeKind::Triangle.arity(), 3);
}

#[test]
fn test_kind_parses_from_type_key() {
    assert_eq!("trendline".parse::<ShapeKind>(), Ok(ShapeKind::TrendLine));
    assert_eq!(
        "horizontal_ray".parse::<ShapeKind>(),
        Ok(ShapeKind::HorizontalRay)
    );
    assert!("pitchfork".parse::<ShapeKind>().is_err());
    assert_eq!(
        serde_json::to_value(ShapeKind::FibonacciRetracement).unwrap(),
        json!("fibonacci_retracement")
    );
}

#[test]
fn test_build_needs_full_arity() {
    assert_eq!(ShapeKind::TrendLine.build(&[dp(1.0, 2.0)]), None);
    assert_eq!(
        ShapeKind::TrendLine.build(&[dp(1.0, 2.0), dp(3.0, 4.0)]),
        Some(Geometry::Line {
            start: dp(1.0, 2.0),
            end: dp(3.0, 4.0),
            extent: LineExtent::Bounded,
        })
    );
    assert_eq!(
        ShapeKind::HorizontalLine.build(&[dp(5.0, 42.0)]),
        Some(Geometry::HorizontalLine { y: 42.0 })
    );
    assert_eq!(
        ShapeKind::VerticalLine.build(&[dp(5.0, 42.0)]),
        Some(Geometry::VerticalLine { x: 5.0 })
    );
}

#[test]
fn test_horizontal_ray_locks_price() {
    let built = ShapeKind::HorizontalRay.build(&[dp(10.0, 50.0), dp(40.0, 70.0)]);
    assert_eq!(
        built,
        Some(Geometry::Line {
            start: dp(10.0, 50.0),
            end: dp(40.0, 50.0),
            extent: LineExtent::Ray,
        })
    );

    let geometry = built.unwrap();
    let end_patch = ShapeKind::HorizontalRay
        .handle_patch(&geometry, 1, dp(60.0, 80.0))
        .unwrap();
    assert_eq!(
        geometry.apply_patch(&end_patch),
        Geometry::Line {
            start: dp(10.0, 50.0),
            end: dp(60.0, 50.0),
            extent: LineExtent::Ray,
        }
    );

    let start_patch = ShapeKind::HorizontalRay
        .handle_patch(&geometry, 0, dp(5.0, 30.0))
        .unwrap();
    assert_eq!(
        geometry.apply_patch(&start_patch),
        Geometry::Line {
            start: dp(5.0, 30.0),
            end: dp(40.0, 30.0),
            extent: LineExtent::Ray,
        }
    );
}

#[test]
fn test_channel_offset_from_third_point() {
    let built = ShapeKind::ParallelChannel.build(&[dp(10.0, 10.0), dp(50.0, 30.0), dp(30.0, 40.0)]);

    assert_eq!(
        built,
        Some(Geometry::Channel {
            start: dp(10.0, 10.0),
            end: dp(50.0, 30.0),
            offset_y: 20.0,
        })
    );
}

#[test]
fn test_preview_of_three_point_shape() {
    let kind = ShapeKind::ParallelChannel;

    assert_eq!(
        kind.preview(&[dp(10.0, 10.0)], dp(50.0, 10.0)),
        Some(Geometry::Line {
            start: dp(10.0, 10.0),
            end: dp(50.0, 10.0),
            extent: LineExtent::Bounded,
        })
    );
    assert_eq!(
        kind.preview(&[dp(10.0, 10.0), dp(50.0, 10.0)], dp(30.0, 25.0)),
        Some(Geometry::Channel {
            start: dp(10.0, 10.0),
            end: dp(50.0, 10.0),
            offset_y: 15.0,
        })
    );
}

#[test]
fn test_channel_handles_and_moves() {
    let channel = Geometry::Channel {
        start: dp(10.0, 10.0),
        end: dp(50.0, 10.0),
        offset_y: 20.0,
    };

    let handles = channel.control_points(&transform());
    assert_eq!(handles.as_slice(), &[dp(10.0, 10.0), dp(50.0, 10.0), dp(30.0, 30.0)]);

    let widened = channel.apply_patch(&channel.handle_patch(2, dp(30.0, 35.0)).unwrap());
    assert_eq!(
        widened,
        Geometry::Channel {
            start: dp(10.0, 10.0),
            end: dp(50.0, 10.0),
            offset_y: 25.0,
        }
    );

    let moved = channel.apply_patch(&channel.translate(5.0, 5.0));
    assert_eq!(
        moved,
        Geometry::Channel {
            start: dp(15.0, 15.0),
            end: dp(55.0, 15.0),
            offset_y: 20.0,
        }
    );
}

#[test]
fn test_full_span_handles_sit_mid_window() {
    let t = transform();

    assert_eq!(
        Geometry::HorizontalLine { y: 42.0 }.control_points(&t).as_slice(),
        &[dp(50.0, 42.0)]
    );
    assert_eq!(
        Geometry::VerticalLine { x: 7.0 }.control_points(&t).as_slice(),
        &[dp(7.0, 50.0)]
    );
    assert_eq!(Geometry::HorizontalLine { y: 42.0 }.handle_patch(1, dp(0.0, 0.0)), None);
}

#[test]
fn test_line_extent_changes_hit_area() {
    let t = transform();
    let line = |extent| Geometry::Line {
        start: dp(10.0, 50.0),
        end: dp(20.0, 50.0),
        extent,
    };
    let ahead = dp(80.0, 50.0);
    let behind = dp(5.0, 50.0);

    assert!(!line(LineExtent::Bounded).hit_test(ahead, 6.0, &t));
    assert!(line(LineExtent::Ray).hit_test(ahead, 6.0, &t));
    assert!(!line(LineExtent::Ray).hit_test(behind, 6.0, &t));
    assert!(line(LineExtent::Infinite).hit_test(behind, 6.0, &t));
}

#[test]
fn test_horizontal_line_hit_tolerance() {
    let t = transform();
    let hline = Geometry::HorizontalLine { y: 50.0 };

    // 0.5 price units is 4px
    assert!(hline.hit_test(dp(3.0, 50.5), 6.0, &t));
    // 2 price units is 16px
    assert!(!hline.hit_test(dp(3.0, 52.0), 6.0, &t));
}

#[test]
fn test_channel_band_is_hittable() {
    let t = transform();
    let channel = Geometry::Channel {
        start: dp(10.0, 10.0),
        end: dp(50.0, 10.0),
        offset_y: 20.0,
    };

    assert!(channel.hit_test(dp(30.0, 20.0), 6.0, &t));
    assert!(!channel.hit_test(dp(30.0, 40.0), 6.0, &t));
}

#[test]
fn test_triangle_hits_and_degenerate_triangle() {
    let t = transform();
    let triangle = Geometry::Triangle {
        p1: dp(0.0, 0.0),
        p2: dp(40.0, 0.0),
        p3: dp(20.0, 40.0),
    };
    let flat = Geometry::Triangle {
        p1: dp(0.0, 0.0),
        p2: dp(10.0, 10.0),
        p3: dp(20.0, 20.0),
    };

    assert!(triangle.hit_test(dp(20.0, 13.0), 6.0, &t));
    assert!(!triangle.hit_test(dp(80.0, 80.0), 6.0, &t));
    assert!(!flat.hit_test(dp(5.0, 5.0), 6.0, &t));
}

#[test]
fn test_fibonacci_levels_and_hits() {
    let t = transform();
    let fib = Geometry::FibonacciRetracement {
        start: dp(10.0, 20.0),
        end: dp(50.0, 80.0),
    };

    let levels = fib.fib_levels();
    assert_eq!(levels.len(), FIB_RATIOS.len());
    assert_eq!(levels[0], (0.0, 80.0));
    assert_eq!(levels[3], (0.5, 50.0));
    assert_eq!(levels[6], (1.0, 20.0));

    assert!(fib.hit_test(dp(45.0, 50.0), 6.0, &t));
    assert!(!fib.hit_test(dp(45.0, 55.0), 6.0, &t));
    assert!(Geometry::HorizontalLine { y: 1.0 }.fib_levels().is_empty());
}

#[test]
fn test_geometry_json_shape() {
    let parsed: Geometry = serde_json::from_value(json!({
        "type": "line",
        "start": { "x": 1.0, "y": 2.0 },
        "end": { "x": 3.0, "y": 4.0 }
    }))
    .unwrap();
    assert_eq!(
        parsed,
        Geometry::Line {
            start: dp(1.0, 2.0),
            end: dp(3.0, 4.0),
            extent: LineExtent::Bounded,
        }
    );

    let patch = GeometryPatch {
        y1: Some(3.0),
        ..Default::default()
    };
    assert_eq!(serde_json::to_value(patch).unwrap(), json!({ "y1": 3.0 }));
}
