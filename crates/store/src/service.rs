use crate::ServiceError;
use serde::{Deserialize, Serialize};
use storefront_common::{Dimensions, ShopConfig, ShopInfo, WallName};

/// Operator credential, sent with every admin call.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredential(String);

impl AdminCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminCredential(..)")
    }
}

/// Partial `info` update; only present keys change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopInfoPatch {
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub contact_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub description: Option<String>,
}

impl ShopInfoPatch {
    pub fn apply(&self, info: &mut ShopInfo) {
        let fields = [
            (&self.address, &mut info.address),
            (&self.opening_hours, &mut info.opening_hours),
            (&self.contact_number, &mut info.contact_number),
            (&self.whatsapp_number, &mut info.whatsapp_number),
            (&self.description, &mut info.description),
        ];
        for (patch, field) in fields {
            if let Some(value) = patch {
                field.clone_from(value);
            }
        }
    }
}

/// Body of `update_info`. Top-level keys replace wholesale when present;
/// `info` merges key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoUpdate {
    pub shop_name: Option<String>,
    pub info: Option<ShopInfoPatch>,
    pub dimensions: Option<Dimensions>,
}

impl InfoUpdate {
    pub fn apply(&self, config: &mut ShopConfig) {
        if let Some(name) = &self.shop_name {
            config.shop_name.clone_from(name);
        }
        if let Some(patch) = &self.info {
            patch.apply(&mut config.info);
        }
        if let Some(dimensions) = self.dimensions {
            config.dimensions = dimensions;
        }
    }
}

/// An image handed over by the operator.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name; only its extension is kept.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Where an upload ended up, as a path relative to the service origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub image_url: String,
}

/// The config service as seen by the viewer and the admin tools.
pub trait ConfigService {
    /// Unauthenticated read used by the public viewer.
    fn fetch_public_config(&self) -> Result<ShopConfig, ServiceError>;

    fn fetch_admin_config(&self, credential: &AdminCredential) -> Result<ShopConfig, ServiceError>;

    fn update_info(
        &mut self,
        credential: &AdminCredential,
        update: &InfoUpdate,
    ) -> Result<ShopConfig, ServiceError>;

    /// Replace the grid size. Tiles outside the new grid are kept.
    fn update_grid(
        &mut self,
        credential: &AdminCredential,
        rows: u32,
        cols: u32,
    ) -> Result<ShopConfig, ServiceError>;

    fn upload_wall_image(
        &mut self,
        credential: &AdminCredential,
        wall: WallName,
        file: &UploadedFile,
    ) -> Result<UploadReceipt, ServiceError>;

    /// Store an image for one left-wall cell, replacing any previous tile there.
    fn upload_left_tile(
        &mut self,
        credential: &AdminCredential,
        row: u32,
        col: u32,
        file: &UploadedFile,
    ) -> Result<UploadReceipt, ServiceError>;
}

/// Public read path: any failure falls back to the demo config.
pub fn public_config_or_default(service: &dyn ConfigService) -> ShopConfig {
    match service.fetch_public_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "config service unavailable; using demo config");
            ShopConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Down;

    impl ConfigService for Down {
        fn fetch_public_config(&self) -> Result<ShopConfig, ServiceError> {
            Err(ServiceError::Io(std::io::Error::other("connection refused")))
        }
        fn fetch_admin_config(&self, _: &AdminCredential) -> Result<ShopConfig, ServiceError> {
            Err(ServiceError::Unauthorized)
        }
        fn update_info(&mut self, _: &AdminCredential, _: &InfoUpdate) -> Result<ShopConfig, ServiceError> {
            Err(ServiceError::Unauthorized)
        }
        fn update_grid(&mut self, _: &AdminCredential, _: u32, _: u32) -> Result<ShopConfig, ServiceError> {
            Err(ServiceError::Unauthorized)
        }
        fn upload_wall_image(
            &mut self,
            _: &AdminCredential,
            _: WallName,
            _: &UploadedFile,
        ) -> Result<UploadReceipt, ServiceError> {
            Err(ServiceError::Unauthorized)
        }
        fn upload_left_tile(
            &mut self,
            _: &AdminCredential,
            _: u32,
            _: u32,
            _: &UploadedFile,
        ) -> Result<UploadReceipt, ServiceError> {
            Err(ServiceError::Unauthorized)
        }
    }

    #[test]
    fn public_path_masks_failures() {
        assert_eq!(public_config_or_default(&Down), ShopConfig::default());
    }

    #[test]
    fn info_patch_merges_key_by_key() {
        let mut config = ShopConfig::default();
        let before = config.info.clone();
        let update = InfoUpdate {
            info: Some(ShopInfoPatch {
                address: Some("1 New Rd".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        update.apply(&mut config);
        assert_eq!(config.info.address, "1 New Rd");
        assert_eq!(config.info.opening_hours, before.opening_hours);
        assert_eq!(config.shop_name, "Demo Shop");
    }

    #[test]
    fn top_level_keys_replace() {
        let mut config = ShopConfig::default();
        let update: InfoUpdate = serde_json::from_str(
            r#"{"shopName":"Corner Store","dimensions":{"width":10,"height":3,"depth":6}}"#,
        )
        .unwrap();
        update.apply(&mut config);
        assert_eq!(config.shop_name, "Corner Store");
        assert_eq!(config.dimensions.width, 10.0);
        assert_eq!(config.dimensions.depth, 6.0);
    }

    #[test]
    fn credential_debug_hides_token() {
        let c = AdminCredential::new("admin-secret");
        assert!(!format!("{c:?}").contains("secret"));
    }
}
