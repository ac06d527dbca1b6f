use crate::AssetError;
use std::path::{Component, Path, PathBuf};

/// Where texture bytes come from. Called from loader worker threads.
pub trait TextureSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError>;
}

/// Serves `file://` URLs and plain paths from the local filesystem.
///
/// Relative paths are read under `root`. Network schemes are not supported
/// and fail the load, leaving the surface on its placeholder.
#[derive(Debug, Clone)]
pub struct FsTextureSource {
    root: PathBuf,
}

impl FsTextureSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, url: &str) -> Result<PathBuf, AssetError> {
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if url.contains("://") || url.starts_with("blob:") {
            return Err(AssetError::UnsupportedScheme(url.to_string()));
        }
        let path = Path::new(url);
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(AssetError::OutsideRoot(url.to_string()));
        }
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.root.join(path))
        }
    }
}

impl TextureSource for FsTextureSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.locate(url)?;
        std::fs::read(&path).map_err(|source| AssetError::Io { path, source })
    }
}
