//! Persistence gateway: validates submissions locally, then stores the image and its record.

use std::sync::Arc;
use uuid::Uuid;

use crate::error::{StoreResult, SubmitError, ValidationError};
use crate::gallery::{
    Artwork, ArtworkId, BlobStore, GalleryStore, NewArtwork, Profile, UserId,
};
use crate::util::time;

pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Title and optional note (usually the critique) saved with a doodle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionMetadata {
    pub title: String,
    pub note: Option<String>,
}

impl SubmissionMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Where a saved doodle ended up
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub reference: ArtworkId,
    pub url: String,
    pub artwork: Artwork,
}

/// Profile edits; `avatar_png` is a freshly drawn avatar to upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub bio: Option<String>,
    pub avatar_png: Option<Vec<u8>>,
    /// Keeps the current avatar when no new one is drawn
    pub avatar_url: Option<String>,
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// `<prefix>/<owner>/<millis>-<nonce>.png`; the nonce keeps same-millisecond saves apart
fn object_path(prefix: &str, owner: UserId) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    format!("{}/{}/{}-{}.png", prefix, owner, time::timestamp_millis(), &nonce[..8])
}

pub fn validate_submission(image: &[u8], metadata: &SubmissionMetadata) -> Result<(), ValidationError> {
    if metadata.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if image.is_empty() {
        return Err(ValidationError::MissingImage);
    }
    Ok(())
}

/// Front door to the gallery and blob stores
#[derive(Clone)]
pub struct Museum {
    blobs: Arc<dyn BlobStore>,
    gallery: Arc<dyn GalleryStore>,
}

impl Museum {
    pub fn new(blobs: Arc<dyn BlobStore>, gallery: Arc<dyn GalleryStore>) -> Self {
        Self { blobs, gallery }
    }

    /// Save a finished doodle. Validation happens before any storage call;
    /// storage failures are reported as [`SubmitError::Upload`] and not retried.
    ///
    /// The image is uploaded before the record is inserted. If the insert
    /// fails the uploaded object stays in blob storage unreferenced; nothing
    /// removes it.
    pub fn submit(
        &self,
        owner: UserId,
        image: &[u8],
        metadata: &SubmissionMetadata,
    ) -> Result<Submission, SubmitError> {
        validate_submission(image, metadata)?;

        let path = object_path("paintings", owner);
        let url = self
            .blobs
            .put(&path, image, PNG_CONTENT_TYPE)
            .map_err(|err| {
                log::error!("Upload of {} failed: {}", path, err);
                SubmitError::Upload(err)
            })?;

        let artwork = self
            .gallery
            .insert(NewArtwork {
                owner,
                title: metadata.title.trim().to_owned(),
                description: non_empty(metadata.note.as_deref()),
                image_url: url.clone(),
            })
            .map_err(|err| {
                log::error!("Failed to save doodle metadata: {}", err);
                SubmitError::Upload(err)
            })?;

        log::info!("Saved doodle {} \"{}\" to {}", artwork.id, artwork.title, url);
        Ok(Submission {
            reference: artwork.id,
            url,
            artwork,
        })
    }

    /// Create the profile row for a newly registered artist
    pub fn register(&self, owner: UserId, artist_name: &str) -> Result<Profile, SubmitError> {
        let name = artist_name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingArtistName.into());
        }
        self.gallery
            .create_profile(owner, name)
            .map_err(SubmitError::Upload)
    }

    /// Update name, bio and avatar, uploading a newly drawn avatar first
    pub fn update_profile(&self, owner: UserId, draft: &ProfileDraft) -> Result<Profile, SubmitError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingArtistName.into());
        }

        let avatar_url = match draft.avatar_png.as_deref() {
            Some(png) if !png.is_empty() => {
                let path = object_path("avatars", owner);
                let url = self
                    .blobs
                    .put(&path, png, PNG_CONTENT_TYPE)
                    .map_err(SubmitError::Upload)?;
                Some(url)
            }
            _ => draft.avatar_url.clone(),
        };

        let profile = Profile {
            artist_name: name.to_owned(),
            bio: non_empty(draft.bio.as_deref()),
            avatar_url,
        };
        let profile = match self.gallery.profile(owner).map_err(SubmitError::Upload)? {
            Some(_) => self.gallery.update_profile(owner, profile),
            None => self
                .gallery
                .create_profile(owner, name)
                .and_then(|_| self.gallery.update_profile(owner, profile)),
        }
        .map_err(SubmitError::Upload)?;

        log::info!("Updated profile for {}", owner);
        Ok(profile)
    }

    pub fn profile(&self, owner: UserId) -> StoreResult<Option<Profile>> {
        self.gallery.profile(owner)
    }

    /// Every artwork, newest first
    pub fn gallery(&self) -> StoreResult<Vec<Artwork>> {
        self.gallery.list()
    }

    pub fn artworks_of(&self, owner: UserId) -> StoreResult<Vec<Artwork>> {
        self.gallery.list_by_owner(owner)
    }

    pub fn vote(&self, id: ArtworkId) -> StoreResult<u64> {
        self.gallery.vote(id)
    }

    pub fn fetch_image(&self, url: &str) -> StoreResult<Vec<u8>> {
        self.blobs.fetch(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::gallery::MemoryBlobStore;

    #[test]
    fn test_blank_title_is_missing() {
        let metadata = SubmissionMetadata::new("   ");
        assert_eq!(
            validate_submission(b"png", &metadata),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_object_path_layout() {
        let owner = UserId::new();
        let path = object_path("paintings", owner);
        let prefix = format!("paintings/{owner}/");
        let file = path.strip_prefix(&prefix).unwrap();
        let stem = file.strip_suffix(".png").unwrap();
        let (millis, nonce) = stem.split_once('-').unwrap();

        assert!(millis.parse::<u64>().unwrap() > 0);
        assert_eq!(nonce.len(), 8);
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(path, object_path("paintings", owner));
    }

    /// Record store that accepts nothing
    struct ReadOnlyGallery;

    impl GalleryStore for ReadOnlyGallery {
        fn insert(&self, _artwork: NewArtwork) -> StoreResult<Artwork> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
        fn list(&self) -> StoreResult<Vec<Artwork>> {
            Ok(Vec::new())
        }
        fn list_by_owner(&self, _owner: UserId) -> StoreResult<Vec<Artwork>> {
            Ok(Vec::new())
        }
        fn vote(&self, id: ArtworkId) -> StoreResult<u64> {
            Err(StoreError::NotFound(id.to_string()))
        }
        fn profile(&self, _user: UserId) -> StoreResult<Option<Profile>> {
            Ok(None)
        }
        fn create_profile(&self, _user: UserId, _artist_name: &str) -> StoreResult<Profile> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
        fn update_profile(&self, _user: UserId, _profile: Profile) -> StoreResult<Profile> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_failed_insert_leaves_upload_behind() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let museum = Museum::new(blobs.clone(), Arc::new(ReadOnlyGallery));

        let err = museum
            .submit(UserId::new(), b"png", &SubmissionMetadata::new("Stranded"))
            .unwrap_err();

        assert!(matches!(err, SubmitError::Upload(StoreError::Io(_))));
        assert_eq!(blobs.len(), 1);
    }

    #[test]
    fn test_empty_image_is_missing() {
        let metadata = SubmissionMetadata::new("Cat");
        assert_eq!(
            validate_submission(&[], &metadata),
            Err(ValidationError::MissingImage)
        );
        assert_eq!(validate_submission(b"png", &metadata), Ok(()));
    }
}
