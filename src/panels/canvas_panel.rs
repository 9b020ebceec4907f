use egui::{Color32, Rect, Sense, Ui, pos2, vec2};

use crate::DoodleApp;
use crate::components::{ColorSwatch, ToolButton};
use crate::input::{CanvasMapping, InputHandler, route_event};
use crate::surface::{DrawingSurface, PALETTE, Tool};
use crate::texture::TextureManager;

/// Largest on-screen magnification of the canvas
const MAX_SCALE: f32 = 2.0;

/// Tool row, palette, canvas and the save/critique actions
pub fn canvas_panel(app: &mut DoodleApp, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        tool_row(&mut app.surface, ui);
        ui.add_space(8.0);
        palette(&mut app.surface, ui);
        ui.add_space(12.0);

        let accepts_input = app.save_dialog.is_none();
        draw_canvas(
            ui,
            "canvas",
            &mut app.surface,
            &mut app.input,
            &mut app.textures,
            accepts_input,
        );
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            let analyzing = app.is_analyzing();
            let label = if analyzing { "Thinking..." } else { "🪄 AI Name" };
            let mut critique_button = ui.add_enabled(!analyzing, egui::Button::new(label));
            if app.config.critique_api_key.is_none() {
                critique_button = critique_button
                    .on_hover_text("No critique key configured; the critic will improvise.");
            }
            if critique_button.clicked() {
                app.request_critique();
            }
            if ui
                .add_enabled(!app.is_saving(), egui::Button::new("💾 Save Art"))
                .clicked()
            {
                app.request_save();
            }
        });
    });
}

fn tool_row(surface: &mut DrawingSurface, ui: &mut Ui) {
    ui.horizontal(|ui| {
        let tool = surface.tools().tool();
        if ToolButton::new("✏", "Pencil", tool == Tool::Pencil).show(ui).clicked() {
            surface.set_tool(Tool::Pencil);
        }
        if ToolButton::new("🧽", "Eraser", tool == Tool::Eraser).show(ui).clicked() {
            surface.set_tool(Tool::Eraser);
        }
        ui.separator();

        let can_undo = surface.can_undo();
        let can_redo = surface.can_redo();
        if ToolButton::new("⟲", "Undo", false).enabled(can_undo).show(ui).clicked() {
            surface.undo();
        }
        if ToolButton::new("⟳", "Redo", false).enabled(can_redo).show(ui).clicked() {
            surface.redo();
        }
        ui.separator();

        if ToolButton::new("🗑", "Clear Canvas", false).show(ui).clicked() {
            surface.clear();
        }
    });
}

fn palette(surface: &mut DrawingSurface, ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        let tools = *surface.tools();
        for color in PALETTE {
            let selected = tools.tool() == Tool::Pencil && tools.color() == color;
            if ColorSwatch::new(color, selected).show(ui).clicked() {
                surface.set_color(color);
            }
        }
    });
}

/// Show `surface` and feed it pointer input; shared by the paint view and the avatar editor
pub fn draw_canvas(
    ui: &mut Ui,
    texture_key: &str,
    surface: &mut DrawingSurface,
    input: &mut InputHandler,
    textures: &mut TextureManager,
    accepts_input: bool,
) {
    let frame_size = vec2(surface.frame().width() as f32, surface.frame().height() as f32);
    let scale = (ui.available_width() / frame_size.x).clamp(0.5, MAX_SCALE);
    let (rect, response) = ui.allocate_exact_size(frame_size * scale, Sense::click_and_drag());

    if accepts_input {
        let mapping = CanvasMapping::new(rect, frame_size);
        for event in input.process_input(ui.ctx(), mapping) {
            route_event(&event, surface);
        }
    } else if let Some(event) = input.reset() {
        route_event(&event, surface);
    }

    let frame = surface.frame();
    let texture = textures.get_or_create_texture(
        texture_key,
        frame.revision(),
        || Ok(frame.to_color_image()),
        ui.ctx(),
    );
    match texture {
        Ok(id) => {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            ui.painter().image(id, rect, uv, Color32::WHITE);
        }
        Err(err) => log::error!("Canvas texture failed: {}", err),
    }
    ui.painter()
        .rect_stroke(rect, 0.0, egui::Stroke::new(3.0, Color32::from_gray(40)));

    if accepts_input && response.hovered() {
        let icon = match surface.tools().tool() {
            Tool::Pencil => egui::CursorIcon::Crosshair,
            Tool::Eraser => egui::CursorIcon::Cell,
        };
        ui.ctx().set_cursor_icon(icon);
    }
}
