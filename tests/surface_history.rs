use doodle_museum::surface::{BACKGROUND, DrawingSurface, PALETTE, SurfaceConfig, Tool};
use doodle_museum::{InputEvent, SurfaceError};
use doodle_museum::input::route_event;
use egui::{Pos2, pos2};
use std::num::NonZeroUsize;

const SIZE: u32 = 48;

fn new_surface() -> DrawingSurface {
    DrawingSurface::new(SurfaceConfig::square(SIZE)).unwrap()
}

// Begin at the first point, extend through the rest, then end
fn draw(surface: &mut DrawingSurface, points: &[Pos2]) {
    let (first, rest) = points.split_first().unwrap();
    surface.begin_stroke(*first);
    for point in rest {
        surface.extend_stroke(*point);
    }
    assert!(surface.end_stroke());
}

fn stroke_at(i: usize) -> [Pos2; 2] {
    let y = 4.0 + (i as f32 * 7.0) % 40.0;
    [pos2(4.0, y), pos2(40.0, y)]
}

#[test]
fn test_history_tracks_completed_strokes() {
    for n in 0..6 {
        let mut surface = new_surface();
        for i in 0..n {
            draw(&mut surface, &stroke_at(i));
        }
        assert_eq!(surface.history().len(), n + 1);
        assert_eq!(surface.history().cursor(), n);
    }
}

#[test]
fn test_undo_then_redo_is_bit_identical() {
    let mut surface = new_surface();
    for (i, color) in PALETTE.iter().take(4).enumerate() {
        surface.set_color(*color);
        draw(&mut surface, &stroke_at(i));
    }

    // walk all the way back, checking each step can be replayed
    while surface.can_undo() {
        let before = surface.frame().snapshot();
        assert!(surface.undo());
        assert!(surface.redo());
        assert!(surface.frame().matches(&before));
        assert!(surface.undo());
    }
    assert_eq!(surface.history().cursor(), 0);
    assert!(surface.frame().is_uniform(BACKGROUND));
}

#[test]
fn test_new_stroke_after_undo_discards_redo() {
    let mut surface = new_surface();
    for i in 0..5 {
        draw(&mut surface, &stroke_at(i));
    }

    let k = 3;
    for _ in 0..k {
        surface.undo();
    }
    draw(&mut surface, &[pos2(10.0, 10.0), pos2(12.0, 30.0)]);

    assert_eq!(surface.history().len(), 6 - k + 1);
    assert_eq!(surface.history().cursor(), 6 - k);
    assert!(!surface.can_redo());
    let before = surface.frame().snapshot();
    assert!(!surface.redo());
    assert!(surface.frame().matches(&before));
}

#[test]
fn test_clear_appends_one_uniform_snapshot() {
    let mut surface = new_surface();
    draw(&mut surface, &stroke_at(0));
    draw(&mut surface, &stroke_at(1));
    let len = surface.history().len();

    surface.clear();

    assert!(surface.frame().is_uniform(BACKGROUND));
    assert_eq!(surface.history().len(), len + 1);
    assert_eq!(surface.history().cursor(), len);

    // clearing a blank canvas is still an edit
    surface.clear();
    assert_eq!(surface.history().len(), len + 2);
}

#[test]
fn test_undo_at_start_and_redo_at_end_are_absorbed() {
    let mut surface = new_surface();
    let blank = surface.frame().snapshot();
    for _ in 0..3 {
        assert!(!surface.undo());
    }
    assert_eq!(surface.history().cursor(), 0);
    assert!(surface.frame().matches(&blank));

    draw(&mut surface, &stroke_at(2));
    let drawn = surface.frame().snapshot();
    for _ in 0..3 {
        assert!(!surface.redo());
    }
    assert_eq!(surface.history().cursor(), surface.history().len() - 1);
    assert!(surface.frame().matches(&drawn));
}

#[test]
fn test_undo_restores_state_after_first_stroke() {
    let mut surface = new_surface();
    draw(
        &mut surface,
        &[pos2(5.0, 5.0), pos2(20.0, 5.0), pos2(20.0, 20.0)],
    );
    let after_a = surface.frame().snapshot();
    draw(&mut surface, &[pos2(30.0, 40.0), pos2(44.0, 10.0)]);
    assert!(!surface.frame().matches(&after_a));

    assert!(surface.undo());

    assert!(surface.frame().matches(&after_a));
    assert_eq!(surface.history().cursor(), 1);
    assert_eq!(surface.history().len(), 3);
}

#[test]
fn test_cleared_export_decodes_to_blank_canvas() {
    let config = SurfaceConfig {
        width: 64,
        height: 40,
        history_limit: None,
    };
    let mut surface = DrawingSurface::new(config).unwrap();
    draw(&mut surface, &[pos2(1.0, 1.0), pos2(60.0, 38.0)]);
    surface.clear();

    let png = surface.export_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();

    assert_eq!(decoded.dimensions(), (64, 40));
    assert!(decoded.pixels().all(|p| p.0 == BACKGROUND.to_array()));
    // export leaves the history alone
    assert_eq!(surface.history().len(), 3);
}

#[test]
fn test_tap_commits_a_dot() {
    let mut surface = new_surface();
    surface.begin_stroke(pos2(24.0, 24.0));
    assert!(surface.end_stroke());

    assert_eq!(surface.history().len(), 2);
    assert_eq!(surface.frame().pixel(24, 24), Some(PALETTE[0]));
}

#[test]
fn test_fast_motion_leaves_no_gaps() {
    let mut surface = new_surface();
    draw(&mut surface, &[pos2(2.0, 24.0), pos2(46.0, 24.0)]);
    for x in 2..=46 {
        assert_eq!(surface.frame().pixel(x, 24), Some(PALETTE[0]), "gap at x={x}");
    }
}

#[test]
fn test_eraser_paints_background() {
    let mut surface = new_surface();
    draw(&mut surface, &[pos2(2.0, 24.0), pos2(46.0, 24.0)]);
    surface.set_tool(Tool::Eraser);
    draw(&mut surface, &[pos2(0.0, 24.0), pos2(47.0, 24.0)]);
    assert!(surface.frame().is_uniform(BACKGROUND));

    // picking a colour goes back to the pencil
    surface.set_color(PALETTE[3]);
    assert_eq!(surface.tools().tool(), Tool::Pencil);
}

#[test]
fn test_extend_without_stroke_is_ignored() {
    let mut surface = new_surface();
    surface.extend_stroke(pos2(10.0, 10.0));
    assert!(!surface.end_stroke());
    assert!(surface.frame().is_uniform(BACKGROUND));
    assert_eq!(surface.history().len(), 1);
}

#[test]
fn test_pointer_leave_and_cancel_commit_the_stroke() {
    for ending in [InputEvent::PointerLeave, InputEvent::PointerCancel] {
        let mut surface = new_surface();
        route_event(&InputEvent::PointerDown { position: pos2(5.0, 5.0) }, &mut surface);
        route_event(&InputEvent::PointerMove { position: pos2(15.0, 5.0) }, &mut surface);
        let drawn = surface.frame().snapshot();
        route_event(&ending, &mut surface);

        assert!(!surface.is_drawing());
        assert_eq!(surface.history().len(), 2);
        assert!(surface.history().current().same_pixels(&drawn));
    }
}

#[test]
fn test_history_limit_drops_oldest() {
    let config = SurfaceConfig {
        history_limit: NonZeroUsize::new(3),
        ..SurfaceConfig::square(SIZE)
    };
    let mut surface = DrawingSurface::new(config).unwrap();
    for i in 0..5 {
        draw(&mut surface, &stroke_at(i));
    }
    assert_eq!(surface.history_len(), 3);
    assert_eq!(surface.cursor(), 2);
    assert!(surface.undo());
    assert!(surface.undo());
    assert!(!surface.undo());
    // a bounded history no longer starts at the blank canvas
    assert_eq!(surface.cursor(), 0);
    assert!(!surface.frame().is_uniform(BACKGROUND));
    assert!(!surface.history().current().pixels().pixels().all(|p| p.0 == BACKGROUND.to_array()));
}

#[test]
fn test_zero_sized_surface_is_rejected() {
    let result = DrawingSurface::new(SurfaceConfig::square(0));
    assert!(matches!(
        result,
        Err(SurfaceError::InvalidDimensions { width: 0, height: 0 })
    ));
}
