use egui::Color32;
use serde::{Deserialize, Serialize};

/// Width of the pencil in frame pixels
pub const DRAW_WIDTH: f32 = 3.0;

/// Width of the eraser in frame pixels
pub const ERASE_WIDTH: f32 = 20.0;

/// Colour every frame starts with and the eraser paints with
pub const BACKGROUND: Color32 = Color32::WHITE;

/// The colours offered by the palette, charcoal first
pub const PALETTE: [Color32; 9] = [
    Color32::from_rgb(0x2d, 0x2d, 0x2d), // charcoal
    Color32::from_rgb(0xdc, 0x26, 0x26), // red
    Color32::from_rgb(0xea, 0x58, 0x0c), // orange
    Color32::from_rgb(0xca, 0x8a, 0x04), // dark yellow
    Color32::from_rgb(0x16, 0xa3, 0x4a), // green
    Color32::from_rgb(0x25, 0x63, 0xeb), // blue
    Color32::from_rgb(0x93, 0x33, 0xea), // purple
    Color32::from_rgb(0xdb, 0x27, 0x77), // pink
    Color32::from_rgb(0x57, 0x53, 0x4e), // stone
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Eraser => "Eraser",
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            Self::Pencil => DRAW_WIDTH,
            Self::Eraser => ERASE_WIDTH,
        }
    }
}

/// Active tool and the colour the pencil draws with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    tool: Tool,
    color: Color32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            color: PALETTE[0],
        }
    }
}

impl ToolState {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Picking a colour always switches back to the pencil.
    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
        self.tool = Tool::Pencil;
    }

    /// Width of the line the active tool paints
    pub fn width(&self) -> f32 {
        self.tool.width()
    }

    /// Colour the active tool paints with; the eraser paints background
    pub fn paint_color(&self) -> Color32 {
        match self.tool {
            Tool::Pencil => self.color,
            Tool::Eraser => BACKGROUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_selection_forces_pencil() {
        let mut state = ToolState::default();
        state.set_tool(Tool::Eraser);
        assert_eq!(state.paint_color(), BACKGROUND);

        state.set_color(PALETTE[5]);
        assert_eq!(state.tool(), Tool::Pencil);
        assert_eq!(state.paint_color(), PALETTE[5]);
    }

    #[test]
    fn test_widths_differ_per_tool() {
        assert_ne!(Tool::Pencil.width(), Tool::Eraser.width());
        let mut state = ToolState::default();
        assert_eq!(state.width(), DRAW_WIDTH);
        state.set_tool(Tool::Eraser);
        assert_eq!(state.width(), ERASE_WIDTH);
    }
}
