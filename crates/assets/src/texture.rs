use crate::AssetError;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::collections::HashMap;

/// Content-addressed texture ID computed from the decoded pixels.
///
/// Two URLs serving the same image share a handle, and so a GPU upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u64);

/// Decoded RGBA8 pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decode any supported container (png, jpeg, webp) to RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    /// These pixels shrunk so neither side exceeds `max_dim`, keeping the
    /// aspect ratio. Borrows when they already fit.
    pub fn fit_within(&self, max_dim: u32) -> Result<Cow<'_, Self>, AssetError> {
        let (width, height) = fitted_size(self.width, self.height, max_dim);
        if (width, height) == (self.width, self.height) {
            return Ok(Cow::Borrowed(self));
        }
        let img = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(self.width, self.height, &self.rgba[..])
            .ok_or(AssetError::PixelBuffer {
                width: self.width,
                height: self.height,
                len: self.rgba.len(),
            })?;
        let resized = imageops::resize(&img, width, height, FilterType::Triangle);
        tracing::debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "texture downscaled"
        );
        Ok(Cow::Owned(Self {
            width,
            height,
            rgba: resized.into_raw(),
        }))
    }

    pub fn handle(&self) -> TextureHandle {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(&self.rgba);
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        TextureHandle(u64::from_le_bytes(bytes))
    }
}

/// Largest size within `max_dim` on both sides with the aspect of
/// `width`x`height`. Sides never drop below one pixel.
pub fn fitted_size(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let max_dim = max_dim.max(1);
    let longest = width.max(height);
    if longest <= max_dim {
        return (width, height);
    }
    let scale = |side: u32| ((u64::from(side) * u64::from(max_dim) / u64::from(longest)) as u32).max(1);
    (scale(width), scale(height))
}

/// Load result for one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready(TextureHandle),
    Failed,
}

/// URL → load state, plus the decoded pixels behind each ready handle.
///
/// A URL enters as `Pending` and moves at most once to `Ready` or `Failed`.
#[derive(Debug, Default)]
pub struct TextureCache {
    states: HashMap<String, LoadState>,
    textures: HashMap<TextureHandle, TextureData>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, url: &str) -> Option<LoadState> {
        self.states.get(url).copied()
    }

    /// The ready handle for `url`, if its load has finished successfully.
    pub fn handle(&self, url: &str) -> Option<TextureHandle> {
        match self.states.get(url) {
            Some(LoadState::Ready(h)) => Some(*h),
            _ => None,
        }
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&TextureData> {
        self.textures.get(&handle)
    }

    /// Record a new request. Returns false if the URL is already known.
    pub fn mark_pending(&mut self, url: &str) -> bool {
        if self.states.contains_key(url) {
            return false;
        }
        self.states.insert(url.to_string(), LoadState::Pending);
        true
    }

    pub fn mark_failed(&mut self, url: &str) {
        self.states.insert(url.to_string(), LoadState::Failed);
    }

    /// Store decoded pixels for `url` and return their handle.
    pub fn insert(&mut self, url: &str, data: TextureData) -> TextureHandle {
        let handle = data.handle();
        self.textures.entry(handle).or_insert(data);
        self.states.insert(url.to_string(), LoadState::Ready(handle));
        handle
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == LoadState::Pending)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixels(v: u8) -> TextureData {
        TextureData {
            width: 1,
            height: 1,
            rgba: vec![v, v, v, 255],
        }
    }

    #[test]
    fn lifecycle() {
        let mut cache = TextureCache::new();
        assert_eq!(cache.state("/a.png"), None);
        assert!(cache.mark_pending("/a.png"));
        assert!(!cache.mark_pending("/a.png"));
        assert_eq!(cache.state("/a.png"), Some(LoadState::Pending));
        assert_eq!(cache.handle("/a.png"), None);

        let h = cache.insert("/a.png", pixels(10));
        assert_eq!(cache.state("/a.png"), Some(LoadState::Ready(h)));
        assert_eq!(cache.texture(h).map(|t| t.width), Some(1));
        assert_eq!(cache.pending(), 0);
    }

    #[test]
    fn identical_pixels_share_a_handle() {
        let mut cache = TextureCache::new();
        let a = cache.insert("/a.png", pixels(7));
        let b = cache.insert("/b.png", pixels(7));
        let c = cache.insert("/c.png", pixels(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn failed_has_no_handle() {
        let mut cache = TextureCache::new();
        cache.mark_pending("/gone.png");
        cache.mark_failed("/gone.png");
        assert_eq!(cache.state("/gone.png"), Some(LoadState::Failed));
        assert_eq!(cache.handle("/gone.png"), None);
    }

    #[test]
    fn fitted_size_keeps_aspect() {
        assert_eq!(fitted_size(640, 480, 8192), (640, 480));
        assert_eq!(fitted_size(16384, 8192, 8192), (8192, 4096));
        assert_eq!(fitted_size(2000, 9000, 4500), (1000, 4500));
        assert_eq!(fitted_size(9000, 2, 8192), (8192, 1));
    }

    #[test]
    fn oversized_panorama_is_shrunk_to_the_limit() {
        let img = image::RgbaImage::from_pixel(9000, 2, image::Rgba([40, 80, 120, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let data = TextureData::decode(&bytes).unwrap();
        assert_eq!(data.width, 9000);

        let fitted = data.fit_within(8192).unwrap();
        assert!(matches!(fitted, Cow::Owned(_)));
        assert_eq!((fitted.width, fitted.height), (8192, 1));
        assert_eq!(fitted.rgba.len(), 8192 * 4);
        assert_eq!(&fitted.rgba[..4], &[40, 80, 120, 255]);
    }

    #[test]
    fn fitting_textures_are_borrowed() {
        let data = pixels(3);
        assert!(matches!(data.fit_within(8192).unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn short_pixel_buffer_cannot_be_resized() {
        let data = TextureData {
            width: 100,
            height: 100,
            rgba: vec![0; 16],
        };
        assert!(matches!(
            data.fit_within(10),
            Err(AssetError::PixelBuffer { len: 16, .. })
        ));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(TextureData::decode(b"not an image").is_err());
    }

    #[test]
    fn decode_png() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let data = TextureData::decode(&bytes).unwrap();
        assert_eq!((data.width, data.height), (3, 2));
        assert_eq!(&data.rgba[..4], &[1, 2, 3, 255]);
    }
}
