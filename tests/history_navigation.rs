use egui::{Color32, pos2};
use rasterpad::canvas::Canvas;
use rasterpad::history::{DEFAULT_CAPACITY, Snapshot, SnapshotHistory};
use rasterpad::tools::DrawingStyle;

/// Produce a snapshot visually distinct from the previous one by stamping a
/// dot of the given color.
fn marked(canvas: &mut Canvas, color: Color32) -> Snapshot {
    let style = DrawingStyle { color, width: 2.0 };
    canvas.stroke_segment(pos2(2.0, 2.0), pos2(2.0, 2.0), &style);
    canvas.snapshot()
}

#[test]
fn undo_then_redo_round_trips() {
    let mut canvas = Canvas::new(8, 8);
    let mut history = SnapshotHistory::new();

    history.push(canvas.snapshot());
    let inked = marked(&mut canvas, Color32::RED);
    history.push(inked.clone());

    let undone = history.undo().expect("one undo available");
    assert_ne!(undone, inked);
    let redone = history.redo().expect("one redo available");
    assert_eq!(redone, inked);
    assert!(history.redo().is_none());
}

#[test]
fn empty_history_has_nothing_to_navigate() {
    let mut history = SnapshotHistory::new();
    assert!(history.is_empty());
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert!(history.current().is_none());
}

#[test]
fn push_after_undo_discards_redo_branch() {
    let mut canvas = Canvas::new(8, 8);
    let mut history = SnapshotHistory::new();

    let s1 = marked(&mut canvas, Color32::RED);
    history.push(s1.clone());
    let s2 = marked(&mut canvas, Color32::GREEN);
    history.push(s2.clone());
    let s3 = marked(&mut canvas, Color32::BLUE);
    history.push(s3);

    assert_eq!(history.undo().expect("undo to s2"), s2);

    let s4 = marked(&mut canvas, Color32::YELLOW);
    history.push(s4.clone());

    // [s1, s2, s4]: s3 is gone and redo is a no-op.
    assert_eq!(history.len(), 3);
    assert!(history.redo().is_none());
    assert_eq!(history.current(), Some(&s4));
    assert_eq!(history.undo().expect("undo to s2"), s2);
    assert_eq!(history.undo().expect("undo to s1"), s1);
    assert!(history.undo().is_none());
}

#[test]
fn capacity_evicts_oldest_and_preserves_cursor_target() {
    let mut canvas = Canvas::new(8, 8);
    let mut history = SnapshotHistory::with_capacity(3);

    let s1 = marked(&mut canvas, Color32::RED);
    history.push(s1);
    let s2 = marked(&mut canvas, Color32::GREEN);
    history.push(s2.clone());
    let s3 = marked(&mut canvas, Color32::BLUE);
    history.push(s3.clone());
    let s4 = marked(&mut canvas, Color32::YELLOW);
    history.push(s4.clone());

    // s1 evicted; the cursor still refers to the snapshot just pushed.
    assert_eq!(history.len(), 3);
    assert_eq!(history.current(), Some(&s4));

    assert_eq!(history.undo().expect("undo to s3"), s3);
    assert_eq!(history.undo().expect("undo to s2"), s2);
    assert!(history.undo().is_none(), "s1 was evicted");
}

#[test]
fn length_never_exceeds_default_capacity() {
    let mut canvas = Canvas::new(8, 8);
    let mut history = SnapshotHistory::new();

    for i in 0..(DEFAULT_CAPACITY * 2) {
        let shade = (i * 10) as u8;
        history.push(marked(&mut canvas, Color32::from_gray(shade)));
        assert!(history.len() <= DEFAULT_CAPACITY);
        assert!(history.current().is_some());
    }
    assert_eq!(history.len(), DEFAULT_CAPACITY);
}
