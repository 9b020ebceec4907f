use std::sync::Arc;

use doodle_museum::error::{StoreError, StoreResult};
use doodle_museum::gallery::{BlobStore, MemoryBlobStore, MemoryStore};
use doodle_museum::gateway::{PNG_CONTENT_TYPE, ProfileDraft};
use doodle_museum::{Museum, SubmissionMetadata, SubmitError, UserId, ValidationError};

fn museum() -> (Museum, Arc<MemoryBlobStore>) {
    let blobs = Arc::new(MemoryBlobStore::new());
    let museum = Museum::new(blobs.clone(), Arc::new(MemoryStore::new()));
    (museum, blobs)
}

/// A blob store whose network is always down
struct OfflineBlobs;

impl BlobStore for OfflineBlobs {
    fn put(&self, _path: &str, _bytes: &[u8], _content_type: &str) -> StoreResult<String> {
        Err(StoreError::Io(std::io::Error::other("connection refused")))
    }

    fn fetch(&self, url: &str) -> StoreResult<Vec<u8>> {
        Err(StoreError::NotFound(url.to_owned()))
    }
}

#[test]
fn test_submit_stores_image_and_record() {
    let (museum, blobs) = museum();
    let owner = UserId::new();
    museum.register(owner, "Pablo").unwrap();

    let metadata = SubmissionMetadata::new("  Sunset  ").with_note("Moody and brave.");
    let submission = museum.submit(owner, b"fake png bytes", &metadata).unwrap();

    assert!(submission.url.starts_with("memory://paintings/"));
    assert_eq!(submission.reference, submission.artwork.id);
    assert_eq!(submission.artwork.title, "Sunset");
    assert_eq!(submission.artwork.artist, "Pablo");
    assert_eq!(submission.artwork.description.as_deref(), Some("Moody and brave."));
    assert_eq!(submission.artwork.votes, 0);

    assert_eq!(blobs.len(), 1);
    let path = submission.url.trim_start_matches("memory://");
    assert_eq!(blobs.content_type(path).as_deref(), Some(PNG_CONTENT_TYPE));
    assert_eq!(museum.fetch_image(&submission.url).unwrap(), b"fake png bytes");

    let gallery = museum.gallery().unwrap();
    assert_eq!(gallery.len(), 1);
    assert_eq!(gallery[0].id, submission.reference);
}

#[test]
fn test_validation_fails_before_upload() {
    let (museum, blobs) = museum();
    let owner = UserId::new();

    let err = museum
        .submit(owner, b"png", &SubmissionMetadata::new(""))
        .unwrap_err();
    assert!(err.is_validation());
    assert!(matches!(err, SubmitError::Validation(ValidationError::MissingTitle)));

    let err = museum
        .submit(owner, &[], &SubmissionMetadata::new("Empty"))
        .unwrap_err();
    assert!(matches!(err, SubmitError::Validation(ValidationError::MissingImage)));

    assert!(blobs.is_empty());
    assert!(museum.gallery().unwrap().is_empty());
}

#[test]
fn test_upload_failure_is_not_a_validation_error() {
    let museum = Museum::new(Arc::new(OfflineBlobs), Arc::new(MemoryStore::new()));
    let err = museum
        .submit(UserId::new(), b"png", &SubmissionMetadata::new("Lost"))
        .unwrap_err();

    assert!(!err.is_validation());
    assert!(matches!(err, SubmitError::Upload(StoreError::Io(_))));
    assert!(museum.gallery().unwrap().is_empty());
}

#[test]
fn test_unregistered_artist_is_unknown() {
    let (museum, _) = museum();
    let submission = museum
        .submit(UserId::new(), b"png", &SubmissionMetadata::new("Orphan"))
        .unwrap();
    assert_eq!(submission.artwork.artist, "Unknown Artist");
    assert_eq!(submission.artwork.description, None);
}

#[test]
fn test_blank_note_is_dropped() {
    let (museum, _) = museum();
    let metadata = SubmissionMetadata::new("Quiet").with_note("   ");
    let submission = museum.submit(UserId::new(), b"png", &metadata).unwrap();
    assert_eq!(submission.artwork.description, None);
}

#[test]
fn test_back_to_back_submissions_get_distinct_urls() {
    let (museum, blobs) = museum();
    let owner = UserId::new();
    let metadata = SubmissionMetadata::new("Twin");
    let first = museum.submit(owner, b"one", &metadata).unwrap();
    let second = museum.submit(owner, b"two", &metadata).unwrap();

    assert_ne!(first.url, second.url);
    assert_eq!(blobs.len(), 2);
    assert_eq!(museum.artworks_of(owner).unwrap().len(), 2);
}

#[test]
fn test_register_requires_a_name() {
    let (museum, _) = museum();
    let err = museum.register(UserId::new(), "  ").unwrap_err();
    assert!(matches!(err, SubmitError::Validation(ValidationError::MissingArtistName)));
}

#[test]
fn test_update_profile_uploads_avatar() {
    let (museum, blobs) = museum();
    let owner = UserId::new();
    museum.register(owner, "Frida").unwrap();

    let draft = ProfileDraft {
        name: "Frida K.".to_owned(),
        bio: Some("Self portraits only.".to_owned()),
        avatar_png: Some(b"avatar".to_vec()),
        avatar_url: None,
    };
    let profile = museum.update_profile(owner, &draft).unwrap();

    assert_eq!(profile.artist_name, "Frida K.");
    assert_eq!(profile.bio.as_deref(), Some("Self portraits only."));
    let url = profile.avatar_url.clone().unwrap();
    assert!(url.starts_with("memory://avatars/"));
    assert_eq!(blobs.len(), 1);
    assert_eq!(museum.profile(owner).unwrap(), Some(profile));
}

#[test]
fn test_update_profile_keeps_existing_avatar() {
    let (museum, blobs) = museum();
    let owner = UserId::new();

    // no profile yet: the update creates one
    let draft = ProfileDraft {
        name: "Henri".to_owned(),
        bio: Some(String::new()),
        avatar_png: None,
        avatar_url: Some("memory://avatars/old.png".to_owned()),
    };
    let profile = museum.update_profile(owner, &draft).unwrap();

    assert_eq!(profile.avatar_url.as_deref(), Some("memory://avatars/old.png"));
    assert_eq!(profile.bio, None);
    assert!(blobs.is_empty());
}
