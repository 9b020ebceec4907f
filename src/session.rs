//! The application's state: who is drawing, their profile and the artworks on display.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SessionError;
use crate::gallery::{Artwork, ArtworkId, Profile, UserId};
use crate::util::time;

/// Artist name used until the user picks one
pub const DEFAULT_ARTIST: &str = "Artist";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub user_id: UserId,
    pub profile: Profile,
    #[serde(default)]
    pub artworks: Vec<Artwork>,
    /// When the profile was first created, seconds since the UNIX epoch
    #[serde(default)]
    pub joined_at: u64,
    #[serde(skip)]
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            user_id: UserId::new(),
            profile: Profile::named(DEFAULT_ARTIST),
            artworks: Vec::new(),
            joined_at: time::timestamp_secs(),
            dirty: true,
        }
    }
}

impl AppState {
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Put a freshly saved artwork at the front of the cached list
    pub fn record_submission(&mut self, artwork: Artwork) {
        self.artworks.retain(|existing| existing.id != artwork.id);
        self.artworks.insert(0, artwork);
        self.dirty = true;
    }

    /// Store a new vote count for one cached artwork
    pub fn apply_vote(&mut self, id: ArtworkId, votes: u64) -> bool {
        let Some(artwork) = self.artworks.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        artwork.votes = votes;
        self.dirty = true;
        true
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
        self.dirty = true;
    }

    pub fn replace_artworks(&mut self, artworks: Vec<Artwork>) {
        if self.artworks != artworks {
            self.artworks = artworks;
            self.dirty = true;
        }
    }

    pub fn artist_name(&self) -> &str {
        &self.profile.artist_name
    }
}

/// Loads the state at start-up and writes it back whenever it changed
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved state, or start a fresh one if nothing was saved yet
    pub fn load(&self) -> Result<AppState, SessionError> {
        if !self.path.exists() {
            log::info!("No session at {}, starting fresh", self.path.display());
            return Ok(AppState::default());
        }
        let json = fs::read_to_string(&self.path)?;
        let state: AppState = serde_json::from_str(&json)?;
        log::info!("Restored session for {}", state.profile.artist_name);
        Ok(state)
    }

    pub fn save(&self, state: &AppState) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Save only if the state changed since the last save
    pub fn save_if_dirty(&self, state: &mut AppState) -> Result<bool, SessionError> {
        if !state.is_dirty() {
            return Ok(false);
        }
        self.save(state)?;
        state.mark_clean();
        Ok(true)
    }
}
