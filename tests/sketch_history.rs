use digit_sketchpad::sketch::{Brush, SketchSurface};

fn surface() -> SketchSurface {
    SketchSurface::new(280, 280, Brush::default())
}

fn stroke(surface: &mut SketchSurface, from: (f32, f32), to: (f32, f32)) {
    surface.begin_stroke(from);
    surface.extend_stroke(((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0));
    surface.extend_stroke(to);
    surface.end_stroke();
}

#[test]
fn undo_redo_restores_raster_bit_for_bit_across_strokes() {
    let mut surface = surface();
    stroke(&mut surface, (40.0, 40.0), (200.0, 220.0));
    let after_first = surface.raster().clone();
    stroke(&mut surface, (220.0, 40.0), (60.0, 230.0));
    let after_second = surface.raster().clone();

    surface.undo();
    assert_eq!(surface.raster(), &after_first);
    surface.redo();
    assert_eq!(surface.raster(), &after_second);

    surface.undo();
    surface.undo();
    assert!(surface.raster().is_empty());
    surface.redo();
    assert_eq!(surface.raster(), &after_first);
}

#[test]
fn undo_at_origin_and_redo_at_tail_leave_state_untouched() {
    let mut surface = surface();
    stroke(&mut surface, (10.0, 10.0), (100.0, 100.0));
    let painted = surface.raster().clone();

    surface.redo();
    assert_eq!(surface.raster(), &painted);
    assert_eq!(surface.history().len(), 2);

    surface.undo();
    surface.undo();
    assert!(surface.raster().is_empty());
    assert_eq!(surface.history().cursor(), 0);
    assert_eq!(surface.history().len(), 2);
}

#[test]
fn drawing_after_undo_discards_the_redo_tail() {
    let mut surface = surface();
    stroke(&mut surface, (10.0, 10.0), (50.0, 50.0));
    stroke(&mut surface, (60.0, 60.0), (120.0, 120.0));
    stroke(&mut surface, (130.0, 130.0), (200.0, 200.0));
    assert_eq!(surface.history().len(), 4);

    surface.undo();
    surface.undo();
    assert!(surface.can_redo());

    stroke(&mut surface, (200.0, 30.0), (30.0, 200.0));
    assert!(!surface.can_redo());
    assert_eq!(surface.history().len(), 3);
    assert_eq!(surface.history().cursor(), 2);
}

#[test]
fn clear_collapses_history_and_passes_the_empty_check() {
    let mut surface = surface();
    stroke(&mut surface, (10.0, 10.0), (250.0, 250.0));
    stroke(&mut surface, (250.0, 10.0), (10.0, 250.0));

    surface.clear();
    assert_eq!(surface.history().len(), 1);
    assert_eq!(surface.history().cursor(), 0);
    assert!(surface.is_empty());
}

#[test]
fn click_without_movement_does_not_duplicate_history() {
    let mut surface = surface();
    surface.begin_stroke((140.0, 140.0));
    assert!(surface.end_stroke());

    // Same dot again: the raster does not change, so neither does history.
    surface.begin_stroke((140.0, 140.0));
    assert!(!surface.end_stroke());
    assert_eq!(surface.history().len(), 2);
}
