use eframe::egui;

/// Round palette entry; ringed while it is the pencil colour in use
pub struct ColorSwatch {
    pub color: egui::Color32,
    pub selected: bool,
}

impl ColorSwatch {
    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(28.0, 28.0), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let grow = if self.selected || response.hovered() { 2.0 } else { 0.0 };
            let radius = rect.width() / 2.0 - 2.0 + grow;
            ui.painter().circle_filled(rect.center(), radius, self.color);
            ui.painter().circle_stroke(
                rect.center(),
                radius,
                egui::Stroke::new(2.0, egui::Color32::WHITE),
            );
            if self.selected {
                ui.painter().circle_stroke(
                    rect.center(),
                    radius + 2.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(41, 37, 36)),
                );
            }
        }

        let [r, g, b, _] = self.color.to_array();
        response.on_hover_text(format!("#{r:02x}{g:02x}{b:02x}"))
    }
}
