//! Drawing surface: a raster frame, its snapshot history and the active tool.

mod frame;
mod history;
mod tool;

use std::num::NonZeroUsize;

use egui::{Color32, Pos2};

use crate::error::SurfaceError;
use crate::stroke::ActiveStroke;

pub use frame::{Frame, Snapshot};
pub use history::History;
pub use tool::{BACKGROUND, DRAW_WIDTH, ERASE_WIDTH, PALETTE, Tool, ToolState};

/// Side length of the square canvas used when nothing else is configured
pub const DEFAULT_CANVAS_SIZE: u32 = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    /// Maximum number of snapshots retained, unbounded when `None`.
    ///
    /// With a limit the oldest snapshots are dropped, so once it is reached
    /// index 0 is no longer the blank canvas and undo cannot return to it.
    pub history_limit: Option<NonZeroUsize>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::square(DEFAULT_CANVAS_SIZE)
    }
}

impl SurfaceConfig {
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            history_limit: None,
        }
    }
}

/// Turns pointer gestures into frame edits and keeps the history in step.
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    frame: Frame,
    history: History,
    tools: ToolState,
    stroke: Option<ActiveStroke>,
}

impl DrawingSurface {
    pub fn new(config: SurfaceConfig) -> Result<Self, SurfaceError> {
        let frame = Frame::new(config.width, config.height, BACKGROUND)?;
        let history = History::new(frame.snapshot(), config.history_limit);
        log::debug!("Drawing surface created ({}x{})", config.width, config.height);
        Ok(Self {
            frame,
            history,
            tools: ToolState::default(),
            stroke: None,
        })
    }

    /// Start a stroke and paint a dot where it begins.
    pub fn begin_stroke(&mut self, point: Pos2) {
        if self.stroke.is_some() {
            // a missed pointer-up; keep the dangling stroke rather than lose it
            self.end_stroke();
        }
        let stroke = ActiveStroke::begin(point, &self.tools);
        self.frame.stamp_dot(point, stroke.thickness(), stroke.color());
        self.stroke = Some(stroke);
    }

    /// Paint the segment from the previous sample to `point`.
    /// Ignored when no stroke is active.
    pub fn extend_stroke(&mut self, point: Pos2) {
        let Some(stroke) = &mut self.stroke else {
            return;
        };
        let (from, to) = stroke.advance(point);
        self.frame
            .stamp_segment(from, to, stroke.thickness(), stroke.color());
    }

    /// Finish the active stroke and commit it to the history.
    /// Returns false when there was nothing to finish.
    pub fn end_stroke(&mut self) -> bool {
        let Some(stroke) = self.stroke.take() else {
            return false;
        };
        log::debug!("Stroke committed ({} samples)", stroke.samples());
        self.commit();
        true
    }

    /// Pointer left the canvas or the gesture was cancelled by the host.
    pub fn cancel_stroke(&mut self) -> bool {
        self.end_stroke()
    }

    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        match self.history.undo() {
            Some(snapshot) => {
                self.frame.restore(snapshot);
                log::debug!("Undo to {}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.end_stroke();
        match self.history.redo() {
            Some(snapshot) => {
                self.frame.restore(snapshot);
                log::debug!("Redo to {}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    /// Wipe the frame to the background colour as a single undoable edit.
    pub fn clear(&mut self) {
        self.end_stroke();
        self.frame.fill(BACKGROUND);
        self.commit();
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tools.set_tool(tool);
    }

    pub fn set_color(&mut self, color: Color32) {
        self.tools.set_color(color);
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// Encode the current frame as PNG
    pub fn export_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.frame.encode_png()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    /// Number of snapshots in the history
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Index of the snapshot the frame currently shows
    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self) {
        self.history.commit(self.frame.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn surface() -> DrawingSurface {
        DrawingSurface::new(SurfaceConfig::square(32)).unwrap()
    }

    #[test]
    fn test_starts_with_single_blank_snapshot() {
        let surface = surface();
        assert_eq!(surface.history().len(), 1);
        assert_eq!(surface.history().cursor(), 0);
        assert!(surface.frame().is_uniform(BACKGROUND));
        assert!(!surface.can_undo());
        assert!(!surface.can_redo());
    }

    #[test]
    fn test_history_accessors_follow_undo() {
        let mut surface = surface();
        surface.begin_stroke(pos2(4.0, 4.0));
        surface.end_stroke();
        surface.clear();
        assert_eq!(surface.history_len(), 3);
        assert_eq!(surface.cursor(), 2);

        surface.undo();
        assert_eq!(surface.history_len(), 3);
        assert_eq!(surface.cursor(), 1);
        assert_eq!(surface.cursor(), surface.history().cursor());
    }

    #[test]
    fn test_extend_without_stroke_is_ignored() {
        let mut surface = surface();
        surface.extend_stroke(pos2(5.0, 5.0));
        assert!(!surface.end_stroke());
        assert!(surface.frame().is_uniform(BACKGROUND));
        assert_eq!(surface.history().len(), 1);
    }

    #[test]
    fn test_tap_commits_a_dot() {
        let mut surface = surface();
        surface.begin_stroke(pos2(10.0, 10.0));
        assert!(surface.is_drawing());
        assert_eq!(surface.history().len(), 1);
        assert!(surface.end_stroke());
        assert!(!surface.is_drawing());
        assert_eq!(surface.history().len(), 2);
        assert!(!surface.frame().is_uniform(BACKGROUND));
    }

    #[test]
    fn test_cancel_commits_like_end() {
        let mut surface = surface();
        surface.begin_stroke(pos2(3.0, 3.0));
        surface.extend_stroke(pos2(12.0, 3.0));
        assert!(surface.cancel_stroke());
        assert!(!surface.is_drawing());
        assert_eq!(surface.history().cursor(), 1);
        assert!(surface.frame().matches(surface.history().current()));
    }

    #[test]
    fn test_second_begin_keeps_dangling_stroke() {
        let mut surface = surface();
        surface.begin_stroke(pos2(3.0, 3.0));
        surface.begin_stroke(pos2(20.0, 20.0));
        surface.end_stroke();
        assert_eq!(surface.history().len(), 3);
    }

    #[test]
    fn test_eraser_paints_background() {
        let mut surface = surface();
        surface.begin_stroke(pos2(16.0, 16.0));
        surface.end_stroke();
        surface.set_tool(Tool::Eraser);
        surface.begin_stroke(pos2(16.0, 16.0));
        surface.end_stroke();
        assert!(surface.frame().is_uniform(BACKGROUND));
        assert_eq!(surface.history().len(), 3);
    }

    #[test]
    fn test_stroke_uses_selected_color() {
        let mut surface = surface();
        surface.set_tool(Tool::Eraser);
        surface.set_color(PALETTE[1]);
        surface.begin_stroke(pos2(8.5, 8.5));
        surface.end_stroke();
        assert_eq!(surface.frame().pixel(8, 8), Some(PALETTE[1]));
    }
}
