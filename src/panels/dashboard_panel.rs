use egui::Ui;

use super::artwork_card;
use crate::DoodleApp;
use crate::app::View;
use crate::gallery::{ArtworkId, trending};

/// Number of artworks on the trending wall
const TRENDING_COUNT: usize = 3;

pub fn dashboard_panel(app: &mut DoodleApp, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading(format!("Welcome back, {}!", app.state.artist_name()));
        ui.label("Ready to create your next masterpiece?");
        ui.add_space(12.0);
        if ui.button("🎨 Start Painting").clicked() {
            app.set_view(View::Paint);
        }
        ui.add_space(24.0);
    });

    ui.heading("🔥 Trending");
    ui.separator();

    let mut voted: Option<ArtworkId> = None;
    let top = trending(&app.state.artworks, TRENDING_COUNT);
    if top.is_empty() {
        ui.label("Nothing on the walls yet. Be the first!");
    }
    ui.horizontal_wrapped(|ui| {
        for artwork in top {
            if artwork_card(ui, &mut app.textures, &app.museum, artwork) {
                voted = Some(artwork.id);
            }
        }
    });

    if let Some(id) = voted {
        app.vote(id);
    }
}
