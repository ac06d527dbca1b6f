//! File-backed config service.
//!
//! Layout inside the store directory:
//! ```text
//! shop-config.json   - the single shop document, with its schema version
//! uploads/           - uploaded images, served as /uploads/<name>
//! ```

use crate::service::{AdminCredential, ConfigService, InfoUpdate, UploadReceipt, UploadedFile};
use crate::ServiceError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use storefront_common::{ShopConfig, WallName};

const SCHEMA_VERSION: u32 = 1;
const CONFIG_FILE: &str = "shop-config.json";
pub const UPLOADS_DIR: &str = "uploads";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    schema_version: u32,
    config: ShopConfig,
}

/// One shop document on disk plus its uploads directory.
///
/// Every call reads the document fresh, so several processes may share a
/// directory; concurrent writers are last-writer-wins.
pub struct FileConfigStore {
    root: PathBuf,
    admin_token: String,
}

impl FileConfigStore {
    /// Open or create a store at the given path. A new store starts with the
    /// demo config.
    pub fn open(path: impl AsRef<Path>, admin_token: impl Into<String>) -> Result<Self, ServiceError> {
        let root = path.as_ref().to_path_buf();
        std::fs::create_dir_all(root.join(UPLOADS_DIR))?;
        let store = Self {
            root,
            admin_token: admin_token.into(),
        };
        if store.config_path().exists() {
            store.load()?;
        } else {
            store.save(&ShopConfig::default())?;
            tracing::info!(path = %store.config_path().display(), "created shop config with demo values");
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS_DIR)
    }

    fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    fn load(&self) -> Result<ShopConfig, ServiceError> {
        let data = std::fs::read(self.config_path())?;
        let doc: StoredDocument = serde_json::from_slice(&data)?;
        if doc.schema_version != SCHEMA_VERSION {
            return Err(ServiceError::SchemaMismatch {
                file_version: doc.schema_version,
                expected_version: SCHEMA_VERSION,
            });
        }
        Ok(doc.config)
    }

    /// Write through a temporary file so readers never see a partial document.
    fn save(&self, config: &ShopConfig) -> Result<(), ServiceError> {
        let doc = StoredDocument {
            schema_version: SCHEMA_VERSION,
            config: config.clone(),
        };
        let tmp = self.root.join(format!("{CONFIG_FILE}.tmp"));
        std::fs::write(&tmp, serde_json::to_vec_pretty(&doc)?)?;
        std::fs::rename(&tmp, self.config_path())?;
        Ok(())
    }

    fn authorize(&self, credential: &AdminCredential) -> Result<(), ServiceError> {
        if credential.token() == self.admin_token {
            Ok(())
        } else {
            tracing::warn!("rejected admin call with bad token");
            Err(ServiceError::Unauthorized)
        }
    }

    /// Persist an upload under a content-derived name and return its URL.
    fn store_upload(&self, field: &str, file: &UploadedFile) -> Result<String, ServiceError> {
        if file.bytes.is_empty() {
            return Err(ServiceError::EmptyUpload);
        }
        let name = upload_file_name(field, file);
        std::fs::write(self.uploads_dir().join(&name), &file.bytes)?;
        tracing::info!(field, file = %name, bytes = file.bytes.len(), "upload stored");
        Ok(format!("/{UPLOADS_DIR}/{name}"))
    }

    fn modify(&self, f: impl FnOnce(&mut ShopConfig)) -> Result<ShopConfig, ServiceError> {
        let mut config = self.load()?;
        f(&mut config);
        self.save(&config)?;
        Ok(config)
    }
}

/// `<field>-<first 12 hex of sha256>.<ext>`; the extension is lowercased and
/// limited to alphanumerics, defaulting to `bin`.
fn upload_file_name(field: &str, file: &UploadedFile) -> String {
    let digest = Sha256::digest(&file.bytes);
    let hash: String = digest[..6].iter().map(|b| format!("{b:02x}")).collect();
    let ext = Path::new(&file.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string());
    format!("{field}-{hash}.{ext}")
}

impl ConfigService for FileConfigStore {
    fn fetch_public_config(&self) -> Result<ShopConfig, ServiceError> {
        self.load()
    }

    fn fetch_admin_config(&self, credential: &AdminCredential) -> Result<ShopConfig, ServiceError> {
        self.authorize(credential)?;
        self.load()
    }

    fn update_info(
        &mut self,
        credential: &AdminCredential,
        update: &InfoUpdate,
    ) -> Result<ShopConfig, ServiceError> {
        self.authorize(credential)?;
        let config = self.modify(|c| update.apply(c))?;
        tracing::info!(shop = %config.shop_name, "shop info updated");
        Ok(config)
    }

    fn update_grid(
        &mut self,
        credential: &AdminCredential,
        rows: u32,
        cols: u32,
    ) -> Result<ShopConfig, ServiceError> {
        self.authorize(credential)?;
        if rows == 0 || cols == 0 {
            return Err(ServiceError::InvalidGrid { rows, cols });
        }
        let config = self.modify(|c| {
            c.grid_dimensions.rows = rows;
            c.grid_dimensions.cols = cols;
        })?;
        tracing::info!(rows, cols, orphaned = config.orphaned_tiles().len(), "grid updated");
        Ok(config)
    }

    fn upload_wall_image(
        &mut self,
        credential: &AdminCredential,
        wall: WallName,
        file: &UploadedFile,
    ) -> Result<UploadReceipt, ServiceError> {
        self.authorize(credential)?;
        let image_url = self.store_upload(wall.as_str(), file)?;
        self.modify(|c| c.walls.set_image_url(wall, image_url.clone()))?;
        Ok(UploadReceipt { image_url })
    }

    fn upload_left_tile(
        &mut self,
        credential: &AdminCredential,
        row: u32,
        col: u32,
        file: &UploadedFile,
    ) -> Result<UploadReceipt, ServiceError> {
        self.authorize(credential)?;
        let image_url = self.store_upload(&format!("left-r{row}c{col}"), file)?;
        self.modify(|c| c.upsert_tile(row, col, image_url.clone()))?;
        Ok(UploadReceipt { image_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::public_config_or_default;

    const TOKEN: &str = "admin-secret";

    fn admin() -> AdminCredential {
        AdminCredential::new(TOKEN)
    }

    fn png(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.into(),
            bytes: b"\x89PNG fake image bytes".to_vec(),
        }
    }

    #[test]
    fn open_creates_demo_config() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
        assert!(tmp.path().join(CONFIG_FILE).exists());
        assert!(store.uploads_dir().is_dir());
        assert_eq!(store.fetch_public_config().unwrap(), ShopConfig::default());
    }

    #[test]
    fn reopen_preserves_changes() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let mut store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
            store.update_grid(&admin(), 3, 4).unwrap();
        }
        let store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
        let config = store.fetch_public_config().unwrap();
        assert_eq!((config.grid_dimensions.rows, config.grid_dimensions.cols), (3, 4));
    }

    #[test]
    fn schema_mismatch_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"{"schemaVersion": 99, "config": {}}"#,
        )
        .unwrap();
        assert!(matches!(
            FileConfigStore::open(tmp.path(), TOKEN),
            Err(ServiceError::SchemaMismatch { file_version: 99, .. })
        ));
    }

    #[test]
    fn admin_calls_need_the_token() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
        let wrong = AdminCredential::new("guess");
        assert!(matches!(store.fetch_admin_config(&wrong), Err(ServiceError::Unauthorized)));
        assert!(matches!(store.update_grid(&wrong, 1, 1), Err(ServiceError::Unauthorized)));
        assert!(matches!(
            store.upload_wall_image(&wrong, WallName::Front, &png("a.png")),
            Err(ServiceError::Unauthorized)
        ));
        assert!(store.fetch_admin_config(&admin()).is_ok());
    }

    #[test]
    fn grid_change_keeps_tiles() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
        store.upload_left_tile(&admin(), 1, 4, &png("t.png")).unwrap();
        let config = store.update_grid(&admin(), 1, 2).unwrap();
        assert_eq!(config.left_wall_tiles.len(), 1);
        assert_eq!(config.orphaned_tiles().len(), 1);
        let config = store.update_grid(&admin(), 2, 5).unwrap();
        assert!(config.orphaned_tiles().is_empty());
    }

    #[test]
    fn zero_grid_is_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
        assert!(matches!(
            store.update_grid(&admin(), 0, 5),
            Err(ServiceError::InvalidGrid { rows: 0, cols: 5 })
        ));
    }

    #[test]
    fn wall_upload_persists_file_and_url() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
        let receipt = store
            .upload_wall_image(&admin(), WallName::Ceiling, &png("Sky.PNG"))
            .unwrap();
        assert!(receipt.image_url.starts_with("/uploads/ceiling-"));
        assert!(receipt.image_url.ends_with(".png"));

        let file = tmp.path().join(receipt.image_url.trim_start_matches('/'));
        assert_eq!(std::fs::read(file).unwrap(), png("x").bytes);
        let config = store.fetch_public_config().unwrap();
        assert_eq!(
            config.walls.image_url(WallName::Ceiling),
            Some(receipt.image_url.as_str())
        );
    }

    #[test]
    fn tile_upload_upserts_by_cell() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
        store.upload_left_tile(&admin(), 0, 1, &png("a.jpg")).unwrap();
        let second = UploadedFile {
            file_name: "b.jpg".into(),
            bytes: b"other".to_vec(),
        };
        let receipt = store.upload_left_tile(&admin(), 0, 1, &second).unwrap();
        let config = store.fetch_public_config().unwrap();
        assert_eq!(config.left_wall_tiles.len(), 1);
        assert_eq!(config.tile(0, 1).unwrap().image_url, receipt.image_url);
        assert!(receipt.image_url.starts_with("/uploads/left-r0c1-"));
    }

    #[test]
    fn empty_upload_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
        let empty = UploadedFile {
            file_name: "x.png".into(),
            bytes: Vec::new(),
        };
        assert!(matches!(
            store.upload_wall_image(&admin(), WallName::Back, &empty),
            Err(ServiceError::EmptyUpload)
        ));
    }

    #[test]
    fn corrupt_document_falls_back_on_the_public_path() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileConfigStore::open(tmp.path(), TOKEN).unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), b"{ not json").unwrap();
        assert!(store.fetch_admin_config(&admin()).is_err());
        assert_eq!(public_config_or_default(&store), ShopConfig::default());
    }

    #[test]
    fn upload_names_are_content_addressed() {
        let a = upload_file_name("front", &png("a.JPG"));
        let b = upload_file_name("front", &png("b.jpg"));
        assert_eq!(a, b);
        assert!(a.starts_with("front-") && a.ends_with(".jpg"));
        let odd = upload_file_name(
            "back",
            &UploadedFile {
                file_name: "noext".into(),
                bytes: vec![1],
            },
        );
        assert!(odd.ends_with(".bin"));
    }
}
