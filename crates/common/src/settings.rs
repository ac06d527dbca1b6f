//! Viewer/operator settings loaded from an optional YAML file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// How the viewer picks its movement bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClassPreference {
    /// Resolve from screen size, touch support and user agent at startup.
    #[default]
    Auto,
    Constrained,
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontSettings {
    /// Directory holding the shop config document and uploads.
    pub data_dir: PathBuf,
    /// Origin that relative image paths are resolved against. A plain
    /// directory path serves images from disk. Unset means `data_dir`, so
    /// uploads are read from wherever the store wrote them.
    pub image_base_origin: Option<String>,
    /// Credential for admin operations.
    pub admin_token: String,
    pub device_class: DeviceClassPreference,
    /// Optional equirectangular sky image.
    pub sky_texture: Option<String>,
    /// Background threads decoding textures.
    pub texture_workers: usize,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./shop_data"),
            image_base_origin: None,
            admin_token: "admin-secret".into(),
            device_class: DeviceClassPreference::Auto,
            sky_texture: None,
            texture_workers: 2,
        }
    }
}

impl StorefrontSettings {
    /// Load settings from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = std::fs::File::open(path.as_ref())?;
        let settings: Self = serde_yaml::from_reader(file)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings if `path` is given and exists, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(p) if p.exists() => {
                tracing::debug!(path = %p.display(), "loading settings");
                Self::load(p)
            }
            Some(p) => {
                tracing::warn!(path = %p.display(), "settings file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// The origin image paths resolve against, after any `data_dir` override.
    pub fn image_base(&self) -> String {
        match &self.image_base_origin {
            Some(origin) => origin.clone(),
            None => self.data_dir.display().to_string(),
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.texture_workers == 0 {
            return Err(SettingsError::Invalid {
                field: "texture_workers",
                reason: "must be at least 1".into(),
            });
        }
        if self.admin_token.trim().is_empty() {
            return Err(SettingsError::Invalid {
                field: "admin_token",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_yaml_fills_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "device_class: constrained\ntexture_workers: 4").unwrap();
        let s = StorefrontSettings::load(tmp.path()).unwrap();
        assert_eq!(s.device_class, DeviceClassPreference::Constrained);
        assert_eq!(s.texture_workers, 4);
        assert_eq!(s.admin_token, "admin-secret");
    }

    #[test]
    fn zero_workers_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "texture_workers: 0").unwrap();
        let err = StorefrontSettings::load(tmp.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "texture_workers", .. }));
    }

    #[test]
    fn image_base_follows_data_dir_override() {
        let mut s = StorefrontSettings::default();
        assert_eq!(s.image_base(), "./shop_data");
        s.data_dir = PathBuf::from("/srv/bakery");
        assert_eq!(s.image_base(), "/srv/bakery");
    }

    #[test]
    fn explicit_image_base_wins() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "image_base_origin: https://cdn.example.com\ndata_dir: /srv/bakery").unwrap();
        let s = StorefrontSettings::load(tmp.path()).unwrap();
        assert_eq!(s.image_base(), "https://cdn.example.com");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let s = StorefrontSettings::load_or_default(Some(Path::new("/nonexistent/s.yaml"))).unwrap();
        assert_eq!(s, StorefrontSettings::default());
    }
}
