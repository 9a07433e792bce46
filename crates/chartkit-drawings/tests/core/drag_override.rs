use chartkit_core::geometry::DataPoint;
use chartkit_drawings::{
    Annotation, DragOverride, DragState, Geometry, GeometryPatch, LineExtent,
};

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Geometry {
    Geometry::Line {
        start: DataPoint::new(x1, y1),
        end: DataPoint::new(x2, y2),
        extent: LineExtent::Bounded,
    }
}

fn items() -> Vec<Annotation> {
    vec![
        Annotation::new(line(0.0, 0.0, 10.0, 10.0)).with_selected(true),
        Annotation::new(line(5.0, 5.0, 15.0, 15.0)),
        Annotation::new(line(10.0, 100.0, 20.0, 200.0)),
    ]
}

#[test]
fn test_last_patch_wins_and_missing_keys_keep_original() {
    let items = items();
    let mut drag = DragOverride::new();

    drag.begin(
        2,
        GeometryPatch {
            y1: Some(300.0),
            ..Default::default()
        },
    );
    drag.update(GeometryPatch {
        y1: Some(400.0),
        ..Default::default()
    });

    let resolved = drag.resolve(2, &items[2].geometry);
    assert_eq!(resolved, line(10.0, 400.0, 20.0, 200.0));
}

#[test]
fn test_update_replaces_rather_than_merges() {
    let items = items();
    let mut drag = DragOverride::new();

    drag.begin(
        2,
        GeometryPatch {
            x1: Some(-5.0),
            y1: Some(300.0),
            ..Default::default()
        },
    );
    drag.update(GeometryPatch {
        y2: Some(250.0),
        ..Default::default()
    });

    let committed = drag.commit(&items).expect("committed items");
    assert_eq!(committed[2].geometry, line(10.0, 100.0, 20.0, 250.0));
    assert_eq!(drag.state(), DragState::Idle);
}

#[test]
fn test_commit_selects_only_dragged_item() {
    let items = items();
    let mut drag = DragOverride::new();
    drag.begin(1, GeometryPatch::default());

    let committed = drag.commit(&items).expect("committed items");

    let flags: Vec<bool> = committed.iter().map(|a| a.selected).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert_eq!(committed[1].geometry, items[1].geometry);
}

#[test]
fn test_resolve_leaves_other_indices_alone() {
    let items = items();
    let mut drag = DragOverride::new();
    drag.begin(
        0,
        GeometryPatch {
            x2: Some(99.0),
            ..Default::default()
        },
    );

    let rendered = drag.resolve_items(&items);

    assert_eq!(rendered[0].geometry, line(0.0, 0.0, 99.0, 10.0));
    assert_eq!(rendered[1], items[1]);
    assert_eq!(rendered[2], items[2]);
}

#[test]
fn test_idle_operations_are_noops() {
    let items = items();
    let mut drag = DragOverride::new();

    drag.update(GeometryPatch {
        y1: Some(1.0),
        ..Default::default()
    });

    assert!(!drag.is_active());
    assert_eq!(drag.resolve(0, &items[0].geometry), items[0].geometry);
    assert!(drag.commit(&items).is_none());
    assert!(!drag.cancel());
}

#[test]
fn test_commit_with_vanished_index_drops_stage() {
    let mut drag = DragOverride::new();
    drag.begin(5, GeometryPatch::default());

    assert!(drag.commit(&items()).is_none());
    assert!(!drag.is_active());
}

#[test]
fn test_begin_on_new_index_discards_previous_stage() {
    let mut drag = DragOverride::new();
    drag.begin(
        0,
        GeometryPatch {
            y1: Some(1.0),
            ..Default::default()
        },
    );
    drag.begin(1, GeometryPatch::default());

    assert_eq!(drag.state(), DragState::Staging { index: 1 });
    assert_eq!(drag.patch(), Some(&GeometryPatch::default()));
}
