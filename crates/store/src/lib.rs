//! Shop config service: the contract the viewer and admin tools consume, and
//! a file-backed implementation with image uploads.
//!
//! # Invariants
//! - Admin operations check the credential before touching disk.
//! - Grid changes never delete tiles.
//! - The public read path never fails; it falls back to the demo config.

mod file_store;
mod service;

pub use file_store::{FileConfigStore, UPLOADS_DIR};
pub use service::{
    public_config_or_default, AdminCredential, ConfigService, InfoUpdate, ShopInfoPatch,
    UploadReceipt, UploadedFile,
};

/// Errors from config service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid grid {rows}x{cols}: rows and cols must be at least 1")]
    InvalidGrid { rows: u32, cols: u32 },
    #[error("no file uploaded")]
    EmptyUpload,
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
}
