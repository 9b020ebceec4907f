use crate::DoodleApp;

/// Modal window for titling and submitting the current drawing
pub fn save_dialog(app: &mut DoodleApp, ctx: &egui::Context) {
    let saving = app.is_saving();
    let mut confirm = false;
    let mut cancel = false;

    let Some(dialog) = &mut app.save_dialog else {
        return;
    };

    egui::Window::new("Name Your Masterpiece")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Title");
            ui.text_edit_singleline(&mut dialog.title);
            ui.label("Critique");
            ui.text_edit_multiline(&mut dialog.critique);

            if let Some(error) = &dialog.error {
                ui.colored_label(egui::Color32::from_rgb(220, 38, 38), error);
            }

            ui.horizontal(|ui| {
                cancel = ui.add_enabled(!saving, egui::Button::new("Cancel")).clicked();
                let label = if saving { "Saving..." } else { "Hang it up!" };
                confirm = ui.add_enabled(!saving, egui::Button::new(label)).clicked();
            });
        });

    if confirm {
        app.confirm_save();
    } else if cancel {
        app.cancel_save();
    }
}
