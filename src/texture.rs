use egui::{Color32, ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    #[error("Failed to fetch image: {0}")]
    Fetch(#[from] crate::error::StoreError),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Shown in place of images that could not be fetched or decoded
const PLACEHOLDER_COLOR: Color32 = Color32::from_gray(230);

/// Decode PNG (or any format `image` understands) into an egui image
pub fn decode_color_image(bytes: &[u8]) -> Result<ColorImage, TextureGenerationError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Caches textures by `(key, version)` and evicts the least recently used
pub struct TextureManager {
    texture_cache: HashMap<(String, u64), TextureHandle>,
    last_used: HashMap<(String, u64), u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets or creates the texture for `key` at `version`.
    /// Older versions of the same key are dropped when a new one is created.
    pub fn get_or_create_texture<F>(
        &mut self,
        key: &str,
        version: u64,
        generator: F,
        ctx: &Context,
    ) -> Result<TextureId, TextureGenerationError>
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        let cache_key = (key.to_owned(), version);

        if let Some(handle) = self.texture_cache.get(&cache_key) {
            self.last_used.insert(cache_key, self.current_frame);
            return Ok(handle.id());
        }

        let image = generator()?;
        Ok(self.insert(cache_key, image, ctx))
    }

    /// Like [`Self::get_or_create_texture`], but a failed generation is cached
    /// as a flat placeholder, so each key and version is attempted once.
    pub fn get_or_placeholder<F>(
        &mut self,
        key: &str,
        version: u64,
        generator: F,
        ctx: &Context,
    ) -> TextureId
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        match self.get_or_create_texture(key, version, generator, ctx) {
            Ok(id) => id,
            Err(err) => {
                log::warn!("Texture {} unavailable, using placeholder: {}", key, err);
                let placeholder = ColorImage::new([1, 1], PLACEHOLDER_COLOR);
                self.insert((key.to_owned(), version), placeholder, ctx)
            }
        }
    }

    fn insert(&mut self, cache_key: (String, u64), image: ColorImage, ctx: &Context) -> TextureId {
        self.invalidate(&cache_key.0);
        self.prune_cache_if_needed();

        let name = format!("{}_v{}", cache_key.0, cache_key.1);
        let handle = ctx.load_texture(name, image, TextureOptions::NEAREST);
        let id = handle.id();

        self.texture_cache.insert(cache_key.clone(), handle);
        self.last_used.insert(cache_key, self.current_frame);
        id
    }

    /// Drops every cached version of `key`
    pub fn invalidate(&mut self, key: &str) {
        self.texture_cache.retain(|(k, _), _| k != key);
        self.last_used.retain(|(k, _), _| k != key);
    }

    /// Makes room for one more texture
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<((String, u64), u64)> = self
            .last_used
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() + 1 - self.max_cache_size.max(1);
        for (key, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn contains(&self, key: &str, version: u64) -> bool {
        self.texture_cache.contains_key(&(key.to_owned(), version))
    }
}
