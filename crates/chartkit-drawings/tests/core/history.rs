use chartkit_drawings::{Annotation, Geometry, HistoryManager, Scene};

fn lines(n: usize) -> Scene {
    let items = (0..n)
        .map(|i| Annotation::new(Geometry::HorizontalLine { y: i as f64 * 10.0 }))
        .collect();
    Scene::new().with_items("horizontal_line", items)
}

#[test]
fn test_history_starts_at_initial_scene() {
    let history = HistoryManager::new(lines(2), 50);

    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 0);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.current(), Some(&lines(2)));
}

#[test]
fn test_snapshot_strips_selection() {
    let mut history = HistoryManager::new(Scene::new(), 50);
    let selected = Scene::new().with_items(
        "horizontal_line",
        vec![Annotation::new(Geometry::HorizontalLine { y: 1.0 }).with_selected(true)],
    );

    history.snapshot(&selected);

    let current = history.current().expect("current snapshot");
    assert!(current.get("horizontal_line").iter().all(|a| !a.selected));
}

#[test]
fn test_snapshot_after_undo_drops_redo_tail() {
    let mut history = HistoryManager::new(lines(0), 50);
    history.snapshot(&lines(1));
    history.snapshot(&lines(2));
    history.snapshot(&lines(3));

    assert_eq!(history.undo(), Some(lines(2)));
    assert_eq!(history.undo(), Some(lines(1)));
    assert!(history.can_redo());

    history.snapshot(&lines(7));

    assert!(!history.can_redo());
    assert_eq!(history.len(), 3);
    assert_eq!(history.undo(), Some(lines(1)));
    assert_eq!(history.redo(), Some(lines(7)));
}

#[test]
fn test_depth_limit_rebases_cursor() {
    let mut history = HistoryManager::new(lines(0), 4);
    for n in 1..=10 {
        history.snapshot(&lines(n));
    }

    assert_eq!(history.len(), 4);
    assert_eq!(history.cursor(), 3);
    assert_eq!(history.current(), Some(&lines(10)));

    let mut undone = 0;
    while history.undo().is_some() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(history.current(), Some(&lines(7)));
}

#[test]
fn test_zero_depth_keeps_one_snapshot() {
    let mut history = HistoryManager::new(lines(0), 0);
    history.snapshot(&lines(1));

    assert_eq!(history.max_depth(), 1);
    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
    assert_eq!(history.current(), Some(&lines(1)));
}

#[test]
fn test_clear_with_resets() {
    let mut history = HistoryManager::default();
    history.snapshot(&lines(1));
    history.snapshot(&lines(2));

    history.clear_with(&lines(5));

    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
    assert_eq!(history.current(), Some(&lines(5)));
}

#[test]
fn test_boundaries_leave_cursor_unchanged() {
    let mut history = HistoryManager::new(lines(0), 50);
    assert_eq!(history.undo(), None);
    assert_eq!(history.cursor(), 0);

    history.snapshot(&lines(1));
    assert_eq!(history.redo(), None);
    assert_eq!(history.cursor(), 1);
}
