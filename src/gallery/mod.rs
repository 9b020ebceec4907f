//! Artwork records, artist profiles and the stores that hold them.

mod blob;
mod local;
mod memory;
mod row;
mod stats;
mod tables;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::StoreResult;

pub use blob::{BlobStore, LocalBlobStore, MemoryBlobStore};
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use row::{ArtistRef, DoodleRow, ProfileJoin, UNKNOWN_ARTIST};
pub use stats::{Badge, ProfileStats, badges, trending};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(Uuid);

impl ArtworkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ArtworkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A saved doodle as shown in the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub owner: UserId,
    pub title: String,
    pub artist: String,
    pub image_url: String,
    /// Critique text saved alongside the doodle, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub votes: u64,
    /// Milliseconds since the UNIX epoch
    pub created_at: u64,
}

/// Fields needed to insert a new artwork record
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtwork {
    pub owner: UserId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub artist_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    pub fn named(artist_name: impl Into<String>) -> Self {
        Self {
            artist_name: artist_name.into(),
            bio: None,
            avatar_url: None,
        }
    }
}

/// Remote record store for artworks and artist profiles.
pub trait GalleryStore: Send + Sync {
    fn insert(&self, artwork: NewArtwork) -> StoreResult<Artwork>;

    /// All artworks, newest first
    fn list(&self) -> StoreResult<Vec<Artwork>>;

    /// Artworks saved by `owner`, newest first
    fn list_by_owner(&self, owner: UserId) -> StoreResult<Vec<Artwork>>;

    /// Add one vote and return the new count. Repeated calls keep counting.
    fn vote(&self, id: ArtworkId) -> StoreResult<u64>;

    fn profile(&self, user: UserId) -> StoreResult<Option<Profile>>;

    fn create_profile(&self, user: UserId, artist_name: &str) -> StoreResult<Profile>;

    fn update_profile(&self, user: UserId, profile: Profile) -> StoreResult<Profile>;
}
