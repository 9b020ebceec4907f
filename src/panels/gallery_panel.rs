use egui::{Ui, vec2};

use crate::DoodleApp;
use crate::gallery::{Artwork, ArtworkId};
use crate::gateway::Museum;
use crate::texture::{TextureManager, decode_color_image};

const THUMBNAIL_SIZE: f32 = 180.0;

pub fn gallery_panel(app: &mut DoodleApp, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.heading("The Gallery");
        if ui.button("⟳ Refresh").clicked() {
            app.refresh_gallery();
        }
    });
    ui.separator();

    if app.state.artworks.is_empty() {
        ui.label("The gallery is empty. Go paint something!");
        return;
    }

    let mut voted: Option<ArtworkId> = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for artwork in &app.state.artworks {
                if artwork_card(ui, &mut app.textures, &app.museum, artwork) {
                    voted = Some(artwork.id);
                }
            }
        });
    });

    if let Some(id) = voted {
        app.vote(id);
    }
}

/// One framed artwork with its title, artist and vote button.
/// Returns true when the vote button was clicked.
pub fn artwork_card(
    ui: &mut Ui,
    textures: &mut TextureManager,
    museum: &Museum,
    artwork: &Artwork,
) -> bool {
    let mut voted = false;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(THUMBNAIL_SIZE);
        ui.vertical(|ui| {
            let texture = textures.get_or_placeholder(
                &artwork.id.to_string(),
                0,
                || decode_color_image(&museum.fetch_image(&artwork.image_url)?),
                ui.ctx(),
            );
            ui.add(egui::Image::new((texture, vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE))));

            ui.strong(&artwork.title);
            ui.label(format!("by {}", artwork.artist));
            if let Some(description) = &artwork.description {
                ui.label(egui::RichText::new(description).small().italics());
            }
            voted = ui.button(format!("❤ {}", artwork.votes)).clicked();
        });
    });
    voted
}
