use std::cell::Cell;

use chartkit_core::geometry::DataPoint;
use chartkit_drawings::{
    Annotation, AnnotationCollection, AnnotationRegistry, Geometry, LineExtent, Scene,
    SelectionHit, VecCollection,
};
use proptest::prelude::*;

fn trendline(y: f64) -> Annotation {
    Annotation::new(Geometry::Line {
        start: DataPoint::new(10.0, y),
        end: DataPoint::new(20.0, y + 10.0),
        extent: LineExtent::Bounded,
    })
}

fn triangle() -> Annotation {
    Annotation::new(Geometry::Triangle {
        p1: DataPoint::new(0.0, 0.0),
        p2: DataPoint::new(10.0, 0.0),
        p3: DataPoint::new(5.0, 10.0),
    })
}

fn hline(y: f64) -> Annotation {
    Annotation::new(Geometry::HorizontalLine { y })
}

#[test]
fn test_complete_snapshots_and_selects_new_item() {
    let mut registry = AnnotationRegistry::new();
    registry.register("trendline", VecCollection::new());

    let item0 = trendline(50.0).with_selected(true);
    let calls = Cell::new(0);
    let mut seen = None;
    let next = registry.complete("trendline", vec![item0.clone()], &Scene::new(), |scene| {
        calls.set(calls.get() + 1);
        seen = Some(scene.clone());
    });

    let expected = Scene::new().with_items("trendline", vec![item0]);
    assert_eq!(calls.get(), 1);
    assert_eq!(seen, Some(expected.clone()));
    assert_eq!(next, expected);
    assert_eq!(
        registry.selections().get("trendline").map(Vec::as_slice),
        Some(&[0][..])
    );
}

#[test]
fn test_complete_without_growth_skips_snapshot() {
    let mut registry = AnnotationRegistry::new();
    registry.register("trendline", VecCollection::with_items(vec![trendline(1.0)]));

    let scene = registry.scene();
    let mut called = false;
    registry.complete("trendline", vec![trendline(2.0)], &scene, |_| called = true);

    assert!(!called);
    assert_eq!(registry.items("trendline").map(<[_]>::len), Some(1));
}

#[test]
fn test_select_clears_other_collections() {
    let mut registry = AnnotationRegistry::new();
    registry.register(
        "trendline",
        VecCollection::with_items(vec![trendline(50.0).with_selected(true)]),
    );
    registry.register("triangle", VecCollection::with_items(vec![triangle()]));
    assert_eq!(registry.selection("trendline"), &[0]);

    let scene = registry.scene();
    let resolved = registry.select("triangle", &[SelectionHit::index(0)], &scene);

    assert_eq!(resolved, vec![0]);
    assert!(registry.selection("trendline").is_empty());
    assert_eq!(registry.selection("triangle"), &[0]);
    assert!(!registry.items("trendline").unwrap()[0].selected);
    assert!(registry.items("triangle").unwrap()[0].selected);

    let selections = registry.selections();
    assert_eq!(selections.len(), 1);
    assert_eq!(selections["triangle"], vec![0]);
}

#[test]
fn test_select_without_index_takes_latest_item() {
    let mut registry = AnnotationRegistry::new();
    registry.register(
        "horizontal_line",
        VecCollection::with_items(vec![hline(1.0), hline(2.0), hline(3.0)]),
    );

    let scene = registry.scene();
    let resolved = registry.select("horizontal_line", &[SelectionHit::latest()], &scene);

    assert_eq!(resolved, vec![2]);
}

#[test]
fn test_select_uses_type_matcher() {
    let mut registry = AnnotationRegistry::new();
    registry.register_with_matcher(
        "horizontal_line",
        VecCollection::with_items(vec![hline(10.0), hline(50.0)]),
        Box::new(|hit: &SelectionHit, items: &[Annotation]| {
            let point = hit.point?;
            items.iter().position(|item| {
                matches!(item.geometry, Geometry::HorizontalLine { y } if (y - point.y).abs() < 1.0)
            })
        }),
    );

    let scene = registry.scene();
    let resolved = registry.select(
        "horizontal_line",
        &[SelectionHit::at(DataPoint::new(0.0, 50.2))],
        &scene,
    );

    assert_eq!(resolved, vec![1]);
}

#[test]
fn test_select_on_unregistered_type_is_noop() {
    let mut registry = AnnotationRegistry::new();
    registry.register(
        "trendline",
        VecCollection::with_items(vec![trendline(1.0).with_selected(true)]),
    );

    let resolved = registry.select("pitchfork", &[SelectionHit::index(0)], &Scene::new());

    assert!(resolved.is_empty());
    assert_eq!(registry.selection("trendline"), &[0]);
}

#[test]
fn test_select_skips_out_of_range_hits() {
    let mut registry = AnnotationRegistry::new();
    registry.register("trendline", VecCollection::with_items(vec![trendline(1.0)]));

    let scene = registry.scene();
    let resolved = registry.select(
        "trendline",
        &[SelectionHit::index(7), SelectionHit::index(0)],
        &scene,
    );

    assert_eq!(resolved, vec![0]);
}

#[test]
fn test_delete_removes_only_selected_items() {
    let mut registry = AnnotationRegistry::new();
    registry.register(
        "trendline",
        VecCollection::with_items(vec![trendline(1.0), trendline(2.0).with_selected(true)]),
    );
    registry.register("triangle", VecCollection::with_items(vec![triangle()]));

    let scene = registry.scene();
    let outcome = registry.delete(&scene);

    assert!(outcome.deletion_occurred);
    let next = outcome.scene.expect("scene after delete");
    assert_eq!(next.get("trendline"), &[trendline(1.0)]);
    assert_eq!(next.get("triangle"), &[triangle()]);
    assert_eq!(registry.items("trendline").map(<[_]>::len), Some(1));
    assert!(registry.selections().is_empty());
}

#[test]
fn test_delete_with_nothing_selected() {
    let mut registry = AnnotationRegistry::with_shape_kinds();
    let scene = registry.scene();

    let outcome = registry.delete(&scene);

    assert!(!outcome.deletion_occurred);
    assert!(outcome.scene.is_none());
}

#[test]
fn test_restore_replaces_items_and_clears_selection() {
    let mut registry = AnnotationRegistry::new();
    registry.register(
        "trendline",
        VecCollection::with_items(vec![trendline(1.0).with_selected(true)]),
    );
    registry.register("triangle", VecCollection::with_items(vec![triangle()]));

    let scene = Scene::new().with_items(
        "trendline",
        vec![trendline(5.0).with_selected(true), trendline(6.0)],
    );
    registry.restore(&scene);

    assert_eq!(registry.items("trendline").map(<[_]>::len), Some(2));
    assert!(registry.items("trendline").unwrap().iter().all(|a| !a.selected));
    assert_eq!(registry.items("triangle").map(<[_]>::len), Some(0));
    assert!(registry.selections().is_empty());
}

#[test]
fn test_with_shape_kinds_registers_every_kind() {
    let registry = AnnotationRegistry::with_shape_kinds();
    let keys: Vec<&str> = registry.type_keys().collect();

    assert_eq!(keys.len(), 9);
    assert_eq!(keys[0], "trendline");
    assert!(registry.is_registered("fibonacci_retracement"));
    assert!(registry.scene().is_empty());
}

#[test]
fn test_delete_removes_several_indices_and_reindexes() {
    let mut registry = AnnotationRegistry::new();
    registry.register(
        "b",
        VecCollection::with_items(vec![
            hline(1.0).with_selected(true),
            hline(2.0),
            hline(3.0).with_selected(true),
            hline(4.0),
        ]),
    );
    registry.register(
        "a",
        VecCollection::with_items(vec![hline(9.0).with_selected(true)]),
    );

    let scene = registry.scene();
    let outcome = registry.delete(&scene);

    assert!(outcome.deletion_occurred);
    let next = outcome.scene.expect("scene after delete");
    assert_eq!(next.get("b"), &[hline(2.0), hline(4.0)]);
    assert_eq!(registry.items("b").unwrap(), &[hline(2.0), hline(4.0)]);
    assert!(registry.selection("b").is_empty());
    assert_eq!(registry.selection("a"), &[0]);
    assert_eq!(next.get("a"), &[hline(9.0).with_selected(true)]);

    // The next delete moves on to the remaining selection.
    let outcome = registry.delete(&registry.scene());
    assert!(outcome.deletion_occurred);
    assert!(registry.items("a").unwrap().is_empty());
    assert_eq!(registry.items("b").map(<[_]>::len), Some(2));
}

#[test]
fn test_delete_honours_flagged_items() {
    let mut collection = VecCollection::new();
    collection.replace_items(vec![hline(1.0).with_selected(true), hline(2.0)]);
    assert!(collection.selection().is_empty());

    let mut registry = AnnotationRegistry::new();
    registry.register("horizontal_line", collection);
    assert_eq!(registry.selected(), Some(("horizontal_line", 0)));

    let outcome = registry.delete(&registry.scene());

    assert!(outcome.deletion_occurred);
    assert_eq!(registry.items("horizontal_line").unwrap(), &[hline(2.0)]);
    assert!(!registry.delete(&registry.scene()).deletion_occurred);
}

#[test]
fn test_scene_follows_registration_order() {
    let mut registry = AnnotationRegistry::new();
    registry.register("b", VecCollection::with_items(vec![hline(1.0)]));
    registry.register("a", VecCollection::new());
    registry.register("b", VecCollection::with_items(vec![hline(2.0)]));

    let scene = registry.scene();

    assert_eq!(scene.type_keys().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(scene.get("b"), &[hline(2.0)]);
}

fn flagged(flags: &[bool], offset: f64) -> Vec<Annotation> {
    flags
        .iter()
        .enumerate()
        .map(|(i, &selected)| hline(offset + i as f64).with_selected(selected))
        .collect()
}

fn survivors(flags: &[bool], offset: f64) -> Vec<Annotation> {
    flags
        .iter()
        .enumerate()
        .filter(|(_, &selected)| !selected)
        .map(|(i, _)| hline(offset + i as f64))
        .collect()
}

proptest! {
    #[test]
    fn delete_acts_on_first_selected_collection(
        first in prop::collection::vec(any::<bool>(), 0..8),
        second in prop::collection::vec(any::<bool>(), 0..8),
    ) {
        let mut registry = AnnotationRegistry::new();
        registry.register("first", VecCollection::with_items(flagged(&first, 0.0)));
        registry.register("second", VecCollection::with_items(flagged(&second, 100.0)));

        let first_selected = first.iter().any(|&s| s);
        let second_selected = second.iter().any(|&s| s);

        let outcome = registry.delete(&registry.scene());

        if first_selected {
            prop_assert!(outcome.deletion_occurred);
            let next = outcome.scene.expect("scene after delete");
            let first_survivors = survivors(&first, 0.0);
            let second_flagged = flagged(&second, 100.0);
            prop_assert_eq!(next.get("first"), first_survivors.as_slice());
            prop_assert_eq!(registry.items("first").unwrap(), first_survivors.as_slice());
            prop_assert!(registry.selection("first").is_empty());
            prop_assert_eq!(next.get("second"), second_flagged.as_slice());
            prop_assert_eq!(registry.items("second").unwrap(), second_flagged.as_slice());
        } else if second_selected {
            prop_assert!(outcome.deletion_occurred);
            let next = outcome.scene.expect("scene after delete");
            let first_flagged = flagged(&first, 0.0);
            let second_survivors = survivors(&second, 100.0);
            prop_assert_eq!(next.get("first"), first_flagged.as_slice());
            prop_assert_eq!(next.get("second"), second_survivors.as_slice());
            prop_assert!(registry.selection("second").is_empty());
        } else {
            prop_assert!(!outcome.deletion_occurred);
            prop_assert!(outcome.scene.is_none());
        }

        if first_selected && second_selected {
            prop_assert!(registry.delete(&registry.scene()).deletion_occurred);
            let second_survivors = survivors(&second, 100.0);
            prop_assert_eq!(registry.items("second").unwrap(), second_survivors.as_slice());
        }

        let outcome = registry.delete(&registry.scene());
        prop_assert!(!outcome.deletion_occurred);
        prop_assert!(outcome.scene.is_none());
        prop_assert!(registry.selections().is_empty());
    }
}
