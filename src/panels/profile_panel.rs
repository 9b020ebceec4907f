use egui::{Ui, vec2};

use super::draw_canvas;
use crate::DoodleApp;
use crate::gallery::{ProfileStats, badges};
use crate::texture::decode_color_image;

const AVATAR_DISPLAY: f32 = 96.0;

pub fn profile_panel(app: &mut DoodleApp, ui: &mut Ui) {
    if app.profile_editor.is_some() {
        profile_editor(app, ui);
        return;
    }

    let name = app.state.artist_name().to_owned();
    ui.horizontal(|ui| {
        if let Some(url) = &app.state.profile.avatar_url {
            let museum = &app.museum;
            let texture = app.textures.get_or_placeholder(
                url,
                0,
                || decode_color_image(&museum.fetch_image(url)?),
                ui.ctx(),
            );
            ui.add(egui::Image::new((texture, vec2(AVATAR_DISPLAY, AVATAR_DISPLAY))));
        }
        ui.vertical(|ui| {
            ui.heading(&name);
            if let Some(bio) = &app.state.profile.bio {
                ui.label(bio);
            }
        });
    });
    if ui.button("✏ Edit Profile").clicked() {
        app.edit_profile();
    }
    ui.separator();

    let stats = ProfileStats::for_artist(&app.state.artworks, &name);
    egui::Grid::new("profile_stats").num_columns(3).spacing([40.0, 4.0]).show(ui, |ui| {
        ui.strong("Artworks");
        ui.strong("Votes");
        ui.strong("Avg. votes");
        ui.end_row();
        ui.label(stats.total_artworks.to_string());
        ui.label(stats.total_votes.to_string());
        ui.label(stats.avg_votes.to_string());
        ui.end_row();
    });
    ui.separator();

    ui.heading("Badges");
    for badge in badges(&app.state.artworks, &name) {
        let text = format!("{} · {}", badge.name, badge.description);
        if badge.unlocked {
            ui.label(egui::RichText::new(format!("🏅 {text}")).strong());
        } else {
            ui.label(egui::RichText::new(format!("🔒 {text}")).weak());
        }
    }
}

fn profile_editor(app: &mut DoodleApp, ui: &mut Ui) {
    let updating = app.is_updating_profile();
    let mut save = false;
    let mut cancel = false;

    let Some(editor) = &mut app.profile_editor else {
        return;
    };

    ui.heading("Edit Profile");
    ui.label("Artist name");
    ui.text_edit_singleline(&mut editor.name);
    ui.label("Bio");
    ui.text_edit_multiline(&mut editor.bio);
    ui.add_space(8.0);

    match &mut editor.avatar_surface {
        Some(surface) => {
            draw_canvas(
                ui,
                "avatar",
                surface,
                &mut editor.avatar_input,
                &mut app.textures,
                !updating,
            );
            if ui.button("Done").clicked() {
                editor.finish_avatar();
            }
        }
        None => {
            let label = if editor.avatar_png.is_some() {
                "Redraw avatar"
            } else {
                "Draw avatar"
            };
            if ui.button(label).clicked() {
                editor.start_avatar();
            }
        }
    }

    if let Some(error) = &editor.error {
        ui.colored_label(egui::Color32::from_rgb(220, 38, 38), error);
    }

    ui.horizontal(|ui| {
        cancel = ui.add_enabled(!updating, egui::Button::new("Cancel")).clicked();
        let label = if updating { "Saving..." } else { "Save" };
        save = ui.add_enabled(!updating, egui::Button::new(label)).clicked();
    });

    if save {
        app.save_profile();
    } else if cancel {
        app.profile_editor = None;
    }
}
