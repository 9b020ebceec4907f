use egui::{Color32, Pos2};

use crate::surface::ToolState;

/// In-progress gesture between pointer down and pointer up.
///
/// Paint settings are captured when the stroke starts so a tool change
/// mid-gesture does not alter the line being drawn.
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    last_point: Pos2,
    color: Color32,
    thickness: f32,
    samples: usize,
}

impl ActiveStroke {
    pub fn begin(point: Pos2, tools: &ToolState) -> Self {
        Self {
            last_point: point,
            color: tools.paint_color(),
            thickness: tools.width(),
            samples: 1,
        }
    }

    /// Record the next sample, returning the segment to paint
    pub fn advance(&mut self, point: Pos2) -> (Pos2, Pos2) {
        let from = std::mem::replace(&mut self.last_point, point);
        self.samples += 1;
        (from, point)
    }

    pub fn last_point(&self) -> Pos2 {
        self.last_point
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}
