use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{StoreError, StoreResult};

const MEMORY_SCHEME: &str = "memory://";
const FILE_SCHEME: &str = "file://";

/// Storage for encoded images, addressed by a relative object path
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `path` and return a public URL for it.
    /// Never overwrites an existing object.
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> StoreResult<String>;

    /// Read back an object through the URL returned by [`BlobStore::put`]
    fn fetch(&self, url: &str) -> StoreResult<Vec<u8>>;
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }

    pub fn content_type(&self, path: &str) -> Option<String> {
        self.objects
            .lock()
            .get(path)
            .map(|(content_type, _)| content_type.clone())
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> StoreResult<String> {
        let mut objects = self.objects.lock();
        if objects.contains_key(path) {
            return Err(StoreError::AlreadyExists(path.to_owned()));
        }
        objects.insert(path.to_owned(), (content_type.to_owned(), bytes.to_vec()));
        Ok(format!("{MEMORY_SCHEME}{path}"))
    }

    fn fetch(&self, url: &str) -> StoreResult<Vec<u8>> {
        let path = url
            .strip_prefix(MEMORY_SCHEME)
            .ok_or_else(|| StoreError::UnsupportedUrl(url.to_owned()))?;
        self.objects
            .lock()
            .get(path)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| StoreError::NotFound(path.to_owned()))
    }
}

/// Blob store writing objects as files below a root directory
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> StoreResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)));
        if path.is_empty() || escapes {
            return Err(StoreError::UnsupportedUrl(path.to_owned()));
        }
        Ok(self.root.join(relative))
    }
}

impl BlobStore for LocalBlobStore {
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> StoreResult<String> {
        let target = self.resolve(path)?;
        if target.exists() {
            return Err(StoreError::AlreadyExists(path.to_owned()));
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, bytes)?;
        log::debug!("Stored {} ({} bytes, {})", target.display(), bytes.len(), content_type);

        let absolute = target.canonicalize()?;
        Ok(format!("{FILE_SCHEME}{}", absolute.display()))
    }

    fn fetch(&self, url: &str) -> StoreResult<Vec<u8>> {
        let path = url
            .strip_prefix(FILE_SCHEME)
            .ok_or_else(|| StoreError::UnsupportedUrl(url.to_owned()))?;
        Ok(fs::read(path)?)
    }
}
