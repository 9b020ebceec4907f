use egui::{Context, Event, PointerButton, Pos2, Rect, Vec2};

mod router;
pub use router::route_event;

/// Pointer events in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved while the button is held
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp { position: Pos2 },
    /// Pointer left the canvas mid-gesture
    PointerLeave,
    /// The host abandoned the gesture (window lost the pointer)
    PointerCancel,
}

/// Maps a canvas rectangle on screen onto frame pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    pub screen_rect: Rect,
    pub frame_size: Vec2,
}

impl CanvasMapping {
    pub fn new(screen_rect: Rect, frame_size: Vec2) -> Self {
        Self {
            screen_rect,
            frame_size,
        }
    }

    pub fn contains(&self, screen_pos: Pos2) -> bool {
        self.screen_rect.contains(screen_pos)
    }

    pub fn to_frame(&self, screen_pos: Pos2) -> Pos2 {
        let scale = self.frame_size / self.screen_rect.size();
        ((screen_pos - self.screen_rect.min) * scale).to_pos2()
    }
}

/// Converts raw egui pointer input over the canvas into [`InputEvent`]s.
///
/// Reads every queued pointer event rather than the latest position, so fast
/// movements still produce one segment per sample.
#[derive(Debug, Default)]
pub struct InputHandler {
    pressed: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context, mapping: CanvasMapping) -> Vec<InputEvent> {
        ctx.input(|input| self.process_events(&input.events, mapping))
    }

    pub fn process_events(&mut self, raw: &[Event], mapping: CanvasMapping) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for event in raw {
            match event {
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    ..
                } if mapping.contains(*pos) => {
                    self.pressed = true;
                    events.push(InputEvent::PointerDown {
                        position: mapping.to_frame(*pos),
                    });
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } if self.pressed => {
                    self.pressed = false;
                    events.push(InputEvent::PointerUp {
                        position: mapping.to_frame(*pos),
                    });
                }
                Event::PointerMoved(pos) if self.pressed => {
                    if mapping.contains(*pos) {
                        events.push(InputEvent::PointerMove {
                            position: mapping.to_frame(*pos),
                        });
                    } else {
                        self.pressed = false;
                        events.push(InputEvent::PointerLeave);
                    }
                }
                Event::PointerGone if self.pressed => {
                    self.pressed = false;
                    events.push(InputEvent::PointerCancel);
                }
                _ => {}
            }
        }
        events
    }

    /// Forget a gesture in progress, e.g. when the canvas is hidden
    pub fn reset(&mut self) -> Option<InputEvent> {
        std::mem::take(&mut self.pressed).then_some(InputEvent::PointerCancel)
    }
}
