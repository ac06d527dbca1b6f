//! Shared types for the storefront: the shop configuration model, transforms,
//! colours and viewer settings.
//!
//! # Invariants
//! - The configuration model is pure data; nothing here performs I/O except
//!   settings loading.
//! - Tiles outside the grid are retained, never dropped.

pub mod config;
pub mod settings;
mod types;

pub use config::{
    Dimensions, GridDimensions, ShopConfig, ShopInfo, TintedSurface, UnknownWall, WallImage,
    WallName, WallTile, Walls,
};
pub use settings::{DeviceClassPreference, SettingsError, StorefrontSettings};
pub use types::{Color, Transform};
