use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use storefront_common::{Color, Transform};

/// Stable address of a placed surface.
///
/// Ordering follows scene construction: facade, interior shell, left-wall
/// tiles (row-major), counter, exterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SurfaceId {
    FacadeLeft,
    FacadeRight,
    DoorHeader,
    Floor,
    FloorOverlay,
    Ceiling,
    CeilingOverlay,
    BackWall,
    BackWallOverlay,
    RightWall,
    RightWallOverlay,
    LeftTile { row: u32, col: u32 },
    Counter,
    Ground,
    Sidewalk,
    Sky,
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceId::LeftTile { row, col } => write!(f, "left_tile[{row},{col}]"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Geometry of a primitive in its local frame, centred on the origin.
///
/// Planes lie in the local XY plane and face local +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Plane { width: f32, height: f32 },
    Cuboid { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
}

impl Shape {
    /// Axis-aligned local extents (full size, not half size).
    pub fn extents(&self) -> Vec3 {
        match *self {
            Shape::Plane { width, height } => Vec3::new(width, height, 0.0),
            Shape::Cuboid {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth),
            Shape::Sphere { radius } => Vec3::splat(radius * 2.0),
        }
    }
}

/// Surface appearance.
///
/// `color` is what gets drawn whenever the texture is absent, still loading,
/// or failed. Overlay materials draw nothing in that case so the base plane
/// underneath shows through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub texture: Option<String>,
    pub double_sided: bool,
    pub overlay: bool,
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            texture: None,
            double_sided: false,
            overlay: false,
        }
    }

    /// Textured surface with `placeholder` shown until the image is available.
    pub fn textured(url: impl Into<String>, placeholder: Color) -> Self {
        Self {
            color: placeholder,
            texture: Some(url.into()),
            double_sided: true,
            overlay: false,
        }
    }

    pub fn overlay(url: impl Into<String>) -> Self {
        Self {
            color: Color::WHITE,
            texture: Some(url.into()),
            double_sided: true,
            overlay: true,
        }
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

/// A primitive positioned in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub id: SurfaceId,
    pub shape: Shape,
    pub transform: Transform,
    pub material: Material,
}
