//! Typed shop configuration as stored by the config service.
//!
//! Field names serialize in camelCase to match the service's JSON documents.
//! Every field has a default so partially-populated documents still load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_FLOOR_COLOR: &str = "#e5e5e5";
pub const DEFAULT_CEILING_COLOR: &str = "#f8f8f8";

/// A shop's full visual configuration. Immutable for the duration of a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopConfig {
    pub shop_name: String,
    pub dimensions: Dimensions,
    pub walls: Walls,
    /// Sparse tiles. Entries outside `grid_dimensions` are kept but not rendered.
    pub left_wall_tiles: Vec<WallTile>,
    pub grid_dimensions: GridDimensions,
    pub info: ShopInfo,
}

/// Shop extents in metres. `depth` is the front-to-back extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 2.6,
            depth: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Walls {
    pub front: WallImage,
    pub back: WallImage,
    pub right: WallImage,
    pub floor: TintedSurface,
    pub ceiling: TintedSurface,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            front: WallImage::default(),
            back: WallImage::default(),
            right: WallImage::default(),
            floor: TintedSurface::with_color(DEFAULT_FLOOR_COLOR),
            ceiling: TintedSurface::with_color(DEFAULT_CEILING_COLOR),
        }
    }
}

impl Walls {
    /// Image URL currently stored for a named surface.
    pub fn image_url(&self, wall: WallName) -> Option<&str> {
        let url = match wall {
            WallName::Front => Some(self.front.image_url.as_str()),
            WallName::Back => Some(self.back.image_url.as_str()),
            WallName::Right => Some(self.right.image_url.as_str()),
            WallName::Floor => self.floor.image_url.as_deref(),
            WallName::Ceiling => self.ceiling.image_url.as_deref(),
        };
        url.filter(|u| !u.trim().is_empty())
    }

    pub fn set_image_url(&mut self, wall: WallName, url: String) {
        match wall {
            WallName::Front => self.front.image_url = url,
            WallName::Back => self.back.image_url = url,
            WallName::Right => self.right.image_url = url,
            WallName::Floor => self.floor.image_url = Some(url),
            WallName::Ceiling => self.ceiling.image_url = Some(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallImage {
    pub image_url: String,
}

/// Floor/ceiling: an optional image over an always-present base tint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TintedSurface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub color: String,
}

impl TintedSurface {
    pub fn with_color(color: &str) -> Self {
        Self {
            image_url: None,
            color: color.to_string(),
        }
    }
}

impl Default for TintedSurface {
    fn default() -> Self {
        Self::with_color(DEFAULT_FLOOR_COLOR)
    }
}

/// One cell of the left-wall mosaic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallTile {
    pub row: u32,
    pub col: u32,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub rows: u32,
    pub cols: u32,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self { rows: 2, cols: 5 }
    }
}

impl GridDimensions {
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.cols
    }
}

/// Display-only shop information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopInfo {
    pub address: String,
    pub opening_hours: String,
    pub contact_number: String,
    pub whatsapp_number: String,
    pub description: String,
}

impl Default for ShopConfig {
    /// Demo configuration used whenever the public config cannot be fetched.
    fn default() -> Self {
        Self {
            shop_name: "Demo Shop".into(),
            dimensions: Dimensions::default(),
            walls: Walls::default(),
            left_wall_tiles: Vec::new(),
            grid_dimensions: GridDimensions::default(),
            info: ShopInfo {
                address: "123 Demo St, Virtual City".into(),
                opening_hours: "9:00 AM - 9:00 PM".into(),
                contact_number: "+1 234 567 8900".into(),
                whatsapp_number: "+1 234 567 8900".into(),
                description: "A demo 3D shop experience.".into(),
            },
        }
    }
}

impl ShopConfig {
    /// The tile stored at `(row, col)`, whether or not it is inside the grid.
    pub fn tile(&self, row: u32, col: u32) -> Option<&WallTile> {
        self.left_wall_tiles
            .iter()
            .find(|t| t.row == row && t.col == col)
    }

    /// Tiles inside the current grid, in row-major order.
    pub fn visible_tiles(&self) -> Vec<&WallTile> {
        let mut tiles: Vec<&WallTile> = self
            .left_wall_tiles
            .iter()
            .filter(|t| self.grid_dimensions.contains(t.row, t.col))
            .collect();
        tiles.sort_by_key(|t| (t.row, t.col));
        tiles
    }

    /// Replace whatever tile sits at `(row, col)`. The new tile goes last.
    pub fn upsert_tile(&mut self, row: u32, col: u32, image_url: String) {
        self.left_wall_tiles
            .retain(|t| t.row != row || t.col != col);
        self.left_wall_tiles.push(WallTile {
            row,
            col,
            image_url,
        });
    }

    /// Tiles outside the current grid. Kept so a later resize can bring them back.
    pub fn orphaned_tiles(&self) -> Vec<&WallTile> {
        self.left_wall_tiles
            .iter()
            .filter(|t| !self.grid_dimensions.contains(t.row, t.col))
            .collect()
    }
}

/// Surfaces that take a single uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallName {
    Front,
    Back,
    Right,
    Floor,
    Ceiling,
}

impl WallName {
    pub const ALL: [WallName; 5] = [
        WallName::Front,
        WallName::Back,
        WallName::Right,
        WallName::Floor,
        WallName::Ceiling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WallName::Front => "front",
            WallName::Back => "back",
            WallName::Right => "right",
            WallName::Floor => "floor",
            WallName::Ceiling => "ceiling",
        }
    }
}

impl fmt::Display for WallName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown wall name {0:?} (expected front, back, right, floor or ceiling)")]
pub struct UnknownWall(pub String);

impl FromStr for WallName {
    type Err = UnknownWall;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WallName::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownWall(s.to_string()))
    }
}
