use crate::DoodleApp;
use crate::app::View;

const VIEWS: [(View, &str); 4] = [
    (View::Dashboard, "🏠 Home"),
    (View::Paint, "🎨 Paint"),
    (View::Gallery, "🖼 Gallery"),
    (View::Profile, "👤 Profile"),
];

pub fn nav_bar(app: &mut DoodleApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Doodle Museum");
            ui.separator();

            let current = app.view();
            for (view, label) in VIEWS {
                if ui.selectable_label(current == view, label).clicked() {
                    log::info!("View selected from UI: {:?}", view);
                    app.set_view(view);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(app.state.artist_name());
            });
        });

        let mut dismissed = false;
        if let Some(status) = &app.status {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(status).italics());
                dismissed = ui.small_button("✖").clicked();
            });
        }
        if dismissed {
            app.status = None;
        }
    });
}
