use std::sync::Arc;

use crate::config::Config;
use crate::critique::{Critic, Critique};
use crate::error::{AppError, SubmitError};
use crate::gallery::{ArtworkId, LocalBlobStore, LocalStore, Profile};
use crate::gateway::{Museum, ProfileDraft, Submission, SubmissionMetadata, validate_submission};
use crate::input::InputHandler;
use crate::panels;
use crate::pending::{self, Pending, Poll};
use crate::session::{AppState, SessionStore};
use crate::surface::{DrawingSurface, SurfaceConfig};
use crate::texture::TextureManager;

/// Side length of the avatar canvas in the profile editor
const AVATAR_SIZE: u32 = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Paint,
    Gallery,
    Profile,
}

/// The "name your masterpiece" dialog
#[derive(Debug, Clone, Default)]
pub struct SaveDialog {
    pub image: Vec<u8>,
    pub title: String,
    pub critique: String,
    pub error: Option<String>,
}

/// Profile form plus an optional avatar being drawn
pub struct ProfileEditor {
    pub name: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub avatar_png: Option<Vec<u8>>,
    pub avatar_surface: Option<DrawingSurface>,
    pub avatar_input: InputHandler,
    pub error: Option<String>,
}

impl ProfileEditor {
    fn new(profile: &Profile) -> Self {
        Self {
            name: profile.artist_name.clone(),
            bio: profile.bio.clone().unwrap_or_default(),
            avatar_url: profile.avatar_url.clone(),
            avatar_png: None,
            avatar_surface: None,
            avatar_input: InputHandler::new(),
            error: None,
        }
    }

    pub fn start_avatar(&mut self) {
        match DrawingSurface::new(SurfaceConfig::square(AVATAR_SIZE)) {
            Ok(surface) => self.avatar_surface = Some(surface),
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Keep the drawn avatar as PNG and close the avatar canvas
    pub fn finish_avatar(&mut self) {
        if let Some(surface) = self.avatar_surface.take() {
            match surface.export_png() {
                Ok(png) => self.avatar_png = Some(png),
                Err(err) => self.error = Some(err.to_string()),
            }
        }
    }

    fn draft(&self) -> ProfileDraft {
        ProfileDraft {
            name: self.name.clone(),
            bio: Some(self.bio.clone()),
            avatar_png: self.avatar_png.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

pub struct DoodleApp {
    pub(crate) config: Config,
    pub(crate) surface: DrawingSurface,
    pub(crate) input: InputHandler,
    pub(crate) textures: TextureManager,
    pub(crate) state: AppState,
    pub(crate) session: SessionStore,
    pub(crate) museum: Museum,
    pub(crate) critic: Critic,
    pub(crate) view: View,
    pub(crate) save_dialog: Option<SaveDialog>,
    pub(crate) profile_editor: Option<ProfileEditor>,
    pub(crate) status: Option<String>,
    pending_save: Option<Pending<Result<Submission, SubmitError>>>,
    pending_critique: Option<Pending<(Vec<u8>, Critique)>>,
    pending_profile: Option<Pending<Result<Profile, SubmitError>>>,
}

impl DoodleApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Result<Self, AppError> {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let gallery = LocalStore::open(config.gallery_path())?;
        let blobs = LocalBlobStore::new(config.blob_root());
        let museum = Museum::new(Arc::new(blobs), Arc::new(gallery));
        let critic = Critic::with_gemini(config.critique_api_key.clone());

        let session = SessionStore::new(config.session_path());
        let state = session.load()?;
        let surface = DrawingSurface::new(config.surface())?;

        Ok(Self::with_parts(config, surface, state, session, museum, critic))
    }

    /// Assemble the app from already constructed collaborators
    pub fn with_parts(
        config: Config,
        surface: DrawingSurface,
        mut state: AppState,
        session: SessionStore,
        museum: Museum,
        critic: Critic,
    ) -> Self {
        match museum.profile(state.user_id) {
            Ok(Some(profile)) => state.set_profile(profile),
            Ok(None) => {
                if let Err(err) = museum.register(state.user_id, state.artist_name()) {
                    log::warn!("Could not register profile: {}", err);
                }
            }
            Err(err) => log::warn!("Could not load profile: {}", err),
        }

        let mut app = Self {
            config,
            surface,
            input: InputHandler::new(),
            textures: TextureManager::new(64),
            state,
            session,
            museum,
            critic,
            view: View::default(),
            save_dialog: None,
            profile_editor: None,
            status: None,
            pending_save: None,
            pending_critique: None,
            pending_profile: None,
        };
        app.refresh_gallery();
        app
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        if self.view == view {
            return;
        }
        log::debug!("Switching view {:?} -> {:?}", self.view, view);
        if let Some(event) = self.input.reset() {
            crate::input::route_event(&event, &mut self.surface);
        }
        if matches!(view, View::Gallery | View::Dashboard | View::Profile) {
            self.refresh_gallery();
        }
        self.view = view;
    }

    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    pub fn is_analyzing(&self) -> bool {
        self.pending_critique.is_some()
    }

    pub fn is_updating_profile(&self) -> bool {
        self.pending_profile.is_some()
    }

    pub fn refresh_gallery(&mut self) {
        match self.museum.gallery() {
            Ok(artworks) => self.state.replace_artworks(artworks),
            Err(err) => {
                log::error!("Failed to fetch doodles: {}", err);
                self.status = Some(format!("Could not load the gallery: {err}"));
            }
        }
    }

    /// Open the save dialog with the current drawing and blank fields
    pub fn request_save(&mut self) {
        match self.surface.export_png() {
            Ok(image) => {
                self.save_dialog = Some(SaveDialog {
                    image,
                    ..SaveDialog::default()
                });
            }
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.status = Some(format!("Could not export the drawing: {err}"));
            }
        }
    }

    /// Ask the critic for a title; the save dialog opens with its answer
    pub fn request_critique(&mut self) {
        if self.is_analyzing() {
            return;
        }
        let image = match self.surface.export_png() {
            Ok(image) => image,
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.status = Some(format!("Could not export the drawing: {err}"));
                return;
            }
        };
        let critic = self.critic.clone();
        self.pending_critique = Some(pending::spawn(move || {
            let critique = critic.analyze(&image);
            (image, critique)
        }));
    }

    /// Submit the save dialog. Missing fields are reported without a request.
    pub fn confirm_save(&mut self) {
        if self.is_saving() {
            return;
        }
        let Some(dialog) = &mut self.save_dialog else {
            return;
        };
        let mut metadata = SubmissionMetadata::new(dialog.title.clone());
        if !dialog.critique.trim().is_empty() {
            metadata = metadata.with_note(dialog.critique.clone());
        }
        if let Err(err) = validate_submission(&dialog.image, &metadata) {
            dialog.error = Some(format!("Please provide both a title and image data! ({err})"));
            return;
        }
        dialog.error = None;

        let museum = self.museum.clone();
        let owner = self.state.user_id;
        let image = dialog.image.clone();
        self.pending_save = Some(pending::spawn(move || {
            museum.submit(owner, &image, &metadata)
        }));
    }

    pub fn cancel_save(&mut self) {
        if !self.is_saving() {
            self.save_dialog = None;
        }
    }

    pub fn vote(&mut self, id: ArtworkId) {
        match self.museum.vote(id) {
            Ok(votes) => {
                self.state.apply_vote(id, votes);
            }
            Err(err) => {
                log::error!("Vote for {} failed: {}", id, err);
                self.status = Some(format!("Vote failed: {err}"));
            }
        }
    }

    pub fn edit_profile(&mut self) {
        self.profile_editor = Some(ProfileEditor::new(&self.state.profile));
    }

    pub fn save_profile(&mut self) {
        if self.is_updating_profile() {
            return;
        }
        let Some(editor) = &mut self.profile_editor else {
            return;
        };
        editor.finish_avatar();
        let draft = editor.draft();
        let museum = self.museum.clone();
        let owner = self.state.user_id;
        self.pending_profile = Some(pending::spawn(move || museum.update_profile(owner, &draft)));
    }

    fn poll_requests(&mut self) {
        if let Some(pending) = &mut self.pending_critique {
            match pending.poll() {
                Poll::Ready((image, critique)) => {
                    self.pending_critique = None;
                    self.save_dialog = Some(SaveDialog {
                        image,
                        title: critique.title,
                        critique: critique.critique,
                        error: None,
                    });
                }
                Poll::Lost => {
                    self.pending_critique = None;
                    self.status = Some("The critic wandered off.".to_owned());
                }
                Poll::Waiting => {}
            }
        }

        if let Some(pending) = &mut self.pending_save {
            match pending.poll() {
                Poll::Ready(Ok(submission)) => {
                    self.pending_save = None;
                    self.save_dialog = None;
                    self.status = Some(format!("\"{}\" is now on display!", submission.artwork.title));
                    self.state.record_submission(submission.artwork);
                    self.set_view(View::Gallery);
                }
                Poll::Ready(Err(err)) => {
                    self.pending_save = None;
                    log::error!("Failed to save art: {}", err);
                    if let Some(dialog) = &mut self.save_dialog {
                        dialog.error = Some(format!("Failed to save art: {err}"));
                    }
                }
                Poll::Lost => {
                    self.pending_save = None;
                    if let Some(dialog) = &mut self.save_dialog {
                        dialog.error = Some("An unexpected error occurred while saving your art.".to_owned());
                    }
                }
                Poll::Waiting => {}
            }
        }

        if let Some(pending) = &mut self.pending_profile {
            match pending.poll() {
                Poll::Ready(Ok(profile)) => {
                    self.pending_profile = None;
                    self.profile_editor = None;
                    self.state.set_profile(profile);
                    self.refresh_gallery();
                }
                Poll::Ready(Err(err)) => {
                    self.pending_profile = None;
                    if let Some(editor) = &mut self.profile_editor {
                        editor.error = Some(err.to_string());
                    }
                }
                Poll::Lost => {
                    self.pending_profile = None;
                    if let Some(editor) = &mut self.profile_editor {
                        editor.error = Some("Profile update was interrupted.".to_owned());
                    }
                }
                Poll::Waiting => {}
            }
        }
    }

    fn has_pending(&self) -> bool {
        self.is_saving() || self.is_analyzing() || self.is_updating_profile()
    }

    fn persist_session(&mut self) {
        if let Err(err) = self.session.save_if_dirty(&mut self.state) {
            log::error!("Failed to save session to {}: {}", self.session.path().display(), err);
        }
    }
}

impl eframe::App for DoodleApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.textures.begin_frame();
        self.poll_requests();

        panels::nav_bar(self, ctx);
        let view = self.view;
        egui::CentralPanel::default().show(ctx, |ui| match view {
            View::Dashboard => panels::dashboard_panel(self, ui),
            View::Paint => panels::canvas_panel(self, ui),
            View::Gallery => panels::gallery_panel(self, ui),
            View::Profile => panels::profile_panel(self, ui),
        });
        panels::save_dialog(self, ctx);

        if self.has_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
        self.persist_session();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.surface.end_stroke();
        self.persist_session();
    }
}
