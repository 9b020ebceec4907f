use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

use super::tables::Tables;
use super::{Artwork, ArtworkId, GalleryStore, NewArtwork, Profile, UserId};
use crate::error::StoreResult;

/// Gallery store persisted as a JSON file, rewritten after every change
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    tables: Mutex<Tables>,
}

impl LocalStore {
    /// Open the table file at `path`, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let tables = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            Tables::default()
        };
        log::info!("Opened gallery store at {}", path.display());
        Ok(Self {
            path,
            tables: Mutex::new(tables),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` and write the tables back only if it succeeded
    fn mutate<T>(&self, change: impl FnOnce(&mut Tables) -> StoreResult<T>) -> StoreResult<T> {
        let mut tables = self.tables.lock();
        let mut updated = tables.clone();
        let result = change(&mut updated)?;
        self.write(&updated)?;
        *tables = updated;
        Ok(result)
    }

    fn write(&self, tables: &Tables) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(tables)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl GalleryStore for LocalStore {
    fn insert(&self, artwork: NewArtwork) -> StoreResult<Artwork> {
        self.mutate(|tables| Ok(tables.insert(artwork)))
    }

    fn list(&self) -> StoreResult<Vec<Artwork>> {
        Ok(self.tables.lock().list(None))
    }

    fn list_by_owner(&self, owner: UserId) -> StoreResult<Vec<Artwork>> {
        Ok(self.tables.lock().list(Some(owner)))
    }

    fn vote(&self, id: ArtworkId) -> StoreResult<u64> {
        self.mutate(|tables| tables.vote(id))
    }

    fn profile(&self, user: UserId) -> StoreResult<Option<Profile>> {
        Ok(self.tables.lock().profile(user))
    }

    fn create_profile(&self, user: UserId, artist_name: &str) -> StoreResult<Profile> {
        self.mutate(|tables| tables.create_profile(user, artist_name))
    }

    fn update_profile(&self, user: UserId, profile: Profile) -> StoreResult<Profile> {
        self.mutate(|tables| tables.update_profile(user, profile))
    }
}
