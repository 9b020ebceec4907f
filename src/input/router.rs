use crate::surface::DrawingSurface;

use super::InputEvent;

/// Apply one pointer event to the drawing surface
pub fn route_event(event: &InputEvent, surface: &mut DrawingSurface) {
    match *event {
        InputEvent::PointerDown { position } => surface.begin_stroke(position),
        InputEvent::PointerMove { position } => surface.extend_stroke(position),
        InputEvent::PointerUp { position } => {
            surface.extend_stroke(position);
            surface.end_stroke();
        }
        InputEvent::PointerLeave | InputEvent::PointerCancel => {
            surface.cancel_stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{BACKGROUND, SurfaceConfig};
    use egui::pos2;

    #[test]
    fn test_gesture_commits_once() {
        let mut surface = DrawingSurface::new(SurfaceConfig::square(16)).unwrap();
        for event in [
            InputEvent::PointerDown { position: pos2(2.0, 2.0) },
            InputEvent::PointerMove { position: pos2(6.0, 6.0) },
            InputEvent::PointerUp { position: pos2(9.0, 9.0) },
        ] {
            route_event(&event, &mut surface);
        }
        assert_eq!(surface.history().len(), 2);
        assert!(!surface.is_drawing());
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut surface = DrawingSurface::new(SurfaceConfig::square(16)).unwrap();
        route_event(&InputEvent::PointerDown { position: pos2(2.0, 2.0) }, &mut surface);
        route_event(&InputEvent::PointerLeave, &mut surface);
        assert!(!surface.is_drawing());
        assert_eq!(surface.history().len(), 2);

        // a stray move after leaving paints nothing
        let before = surface.frame().snapshot();
        route_event(&InputEvent::PointerMove { position: pos2(12.0, 12.0) }, &mut surface);
        assert!(surface.frame().matches(&before));
        assert!(!surface.frame().is_uniform(BACKGROUND));
    }
}
