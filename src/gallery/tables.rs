use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::row::{ArtistRef, DoodleRow, ProfileJoin};
use super::{Artwork, ArtworkId, NewArtwork, Profile, UserId};
use crate::error::{StoreError, StoreResult};
use crate::util::time;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DoodleRecord {
    id: ArtworkId,
    user_id: UserId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    image_url: String,
    #[serde(default)]
    votes_count: u64,
    created_at: u64,
}

/// The `doodles` and `profiles` tables shared by the store implementations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct Tables {
    #[serde(default)]
    doodles: Vec<DoodleRecord>,
    #[serde(default)]
    profiles: HashMap<UserId, Profile>,
}

impl Tables {
    pub fn insert(&mut self, artwork: NewArtwork) -> Artwork {
        let record = DoodleRecord {
            id: ArtworkId::new(),
            user_id: artwork.owner,
            title: artwork.title,
            description: artwork.description,
            image_url: artwork.image_url,
            votes_count: 0,
            created_at: time::timestamp_millis(),
        };
        self.doodles.push(record.clone());
        Artwork::from(self.join(&record))
    }

    /// Newest first; among equal timestamps the later insert wins.
    pub fn list(&self, owner: Option<UserId>) -> Vec<Artwork> {
        let mut rows: Vec<&DoodleRecord> = self
            .doodles
            .iter()
            .rev()
            .filter(|record| owner.is_none_or(|owner| record.user_id == owner))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.into_iter()
            .map(|record| Artwork::from(self.join(record)))
            .collect()
    }

    pub fn vote(&mut self, id: ArtworkId) -> StoreResult<u64> {
        let record = self
            .doodles
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("doodle {id}")))?;
        record.votes_count += 1;
        Ok(record.votes_count)
    }

    pub fn profile(&self, user: UserId) -> Option<Profile> {
        self.profiles.get(&user).cloned()
    }

    pub fn create_profile(&mut self, user: UserId, artist_name: &str) -> StoreResult<Profile> {
        if self.profiles.contains_key(&user) {
            return Err(StoreError::AlreadyExists(format!("profile {user}")));
        }
        let profile = Profile::named(artist_name);
        self.profiles.insert(user, profile.clone());
        Ok(profile)
    }

    pub fn update_profile(&mut self, user: UserId, profile: Profile) -> StoreResult<Profile> {
        let existing = self
            .profiles
            .get_mut(&user)
            .ok_or_else(|| StoreError::NotFound(format!("profile {user}")))?;
        *existing = profile.clone();
        Ok(profile)
    }

    fn join(&self, record: &DoodleRecord) -> DoodleRow {
        let profiles = match self.profiles.get(&record.user_id) {
            Some(profile) => ProfileJoin::One(ArtistRef {
                artist_name: Some(profile.artist_name.clone()),
                avatar_url: profile.avatar_url.clone(),
            }),
            None => ProfileJoin::Missing,
        };
        DoodleRow {
            id: record.id,
            user_id: record.user_id,
            title: record.title.clone(),
            description: record.description.clone(),
            image_url: record.image_url.clone(),
            votes_count: Some(record.votes_count),
            created_at: record.created_at,
            profiles,
        }
    }
}
