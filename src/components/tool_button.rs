use eframe::egui;

/// Square icon button that stays highlighted while its tool is active
pub struct ToolButton {
    pub icon: &'static str,
    pub tooltip: &'static str,
    pub selected: bool,
    pub enabled: bool,
}

impl ToolButton {
    pub fn new(icon: &'static str, tooltip: &'static str, selected: bool) -> Self {
        Self {
            icon,
            tooltip,
            selected,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let sense = if self.enabled {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(button_size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(231, 229, 228) // stone when selected
            } else if response.hovered() && self.enabled {
                egui::Color32::from_gray(245)
            } else {
                egui::Color32::WHITE
            };
            ui.painter().rect_filled(rect, 6.0, bg_color);

            let text_color = if !self.enabled {
                egui::Color32::from_gray(200)
            } else if self.selected {
                egui::Color32::BLACK
            } else {
                egui::Color32::from_gray(120)
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(20.0),
                text_color,
            );
        }

        response.on_hover_text(self.tooltip)
    }
}
