use parking_lot::Mutex;

use super::tables::Tables;
use super::{Artwork, ArtworkId, GalleryStore, NewArtwork, Profile, UserId};
use crate::error::StoreResult;

/// Gallery store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GalleryStore for MemoryStore {
    fn insert(&self, artwork: NewArtwork) -> StoreResult<Artwork> {
        Ok(self.tables.lock().insert(artwork))
    }

    fn list(&self) -> StoreResult<Vec<Artwork>> {
        Ok(self.tables.lock().list(None))
    }

    fn list_by_owner(&self, owner: UserId) -> StoreResult<Vec<Artwork>> {
        Ok(self.tables.lock().list(Some(owner)))
    }

    fn vote(&self, id: ArtworkId) -> StoreResult<u64> {
        self.tables.lock().vote(id)
    }

    fn profile(&self, user: UserId) -> StoreResult<Option<Profile>> {
        Ok(self.tables.lock().profile(user))
    }

    fn create_profile(&self, user: UserId, artist_name: &str) -> StoreResult<Profile> {
        self.tables.lock().create_profile(user, artist_name)
    }

    fn update_profile(&self, user: UserId, profile: Profile) -> StoreResult<Profile> {
        self.tables.lock().update_profile(user, profile)
    }
}
