//! Texture loading for shop surfaces.
//!
//! Scene materials reference images by the URL the config service returned.
//! This crate resolves those URLs, fetches and decodes them off the render
//! thread, and keeps a cache the renderer can read every frame without
//! waiting.
//!
//! # Invariants
//! - A URL is fetched at most once per loader; repeat requests are no-ops.
//! - Load failures stay local to their URL and never surface past `poll`.
//! - Texture handles are content-addressed from decoded pixels.

mod loader;
mod source;
mod texture;
mod url;

pub use loader::TextureLoader;
pub use source::{FsTextureSource, TextureSource};
pub use texture::{fitted_size, LoadState, TextureCache, TextureData, TextureHandle};
pub use url::{is_absolute_url, resolve_image_url};

use std::path::PathBuf;

/// Errors from fetching or decoding a texture.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported texture url: {0}")]
    UnsupportedScheme(String),
    #[error("texture path escapes its root: {0}")]
    OutsideRoot(String),
    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    PixelBuffer { width: u32, height: u32, len: usize },
}
