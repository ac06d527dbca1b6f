use crate::primitive::{Material, Primitive, Shape, SurfaceId};
use crate::scene::Scene;
use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;
use storefront_common::config::{DEFAULT_CEILING_COLOR, DEFAULT_FLOOR_COLOR};
use storefront_common::{Color, ShopConfig, Transform, WallName};

/// Width of the gap in the facade.
pub const DOOR_WIDTH: f32 = 1.2;
/// Distance a texture overlay sits in front of its base plane.
pub const OVERLAY_OFFSET: f32 = 0.01;
/// Smallest extent a configured dimension is clamped to.
pub const MIN_EXTENT: f32 = 0.1;

pub const DOOR_HEADER_HEIGHT: f32 = 0.4;
pub const DOOR_HEADER_DEPTH: f32 = 0.1;

pub const COUNTER_WIDTH: f32 = 3.0;
pub const COUNTER_HEIGHT: f32 = 1.0;
pub const COUNTER_DEPTH: f32 = 0.6;
pub const COUNTER_Z: f32 = -4.0;

pub const SKY_RADIUS: f32 = 50.0;

pub const PLACEHOLDER_COLOR: Color = Color::rgb(0.8, 0.8, 0.8);
pub const WALL_COLOR: Color = Color::rgb(0.933, 0.933, 0.933);
pub const DOOR_HEADER_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);
pub const COUNTER_COLOR: Color = Color::rgb(0.545, 0.271, 0.075);
pub const STREET_COLOR: Color = Color::rgb(0.267, 0.267, 0.267);
pub const SIDEWALK_COLOR: Color = Color::rgb(0.6, 0.6, 0.6);
pub const SKY_COLOR: Color = Color::rgb(0.529, 0.808, 0.922);

/// Clamped shop geometry derived from a config.
///
/// The shop occupies x in [-W/2, W/2], y in [0, H], z in [-D, 0]; the facade
/// is the z = 0 plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShopLayout {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub rows: u32,
    pub cols: u32,
}

impl ShopLayout {
    pub fn from_config(config: &ShopConfig) -> Self {
        let extent = |v: f32| if v.is_finite() { v.max(MIN_EXTENT) } else { MIN_EXTENT };
        Self {
            width: extent(config.dimensions.width),
            height: extent(config.dimensions.height),
            depth: extent(config.dimensions.depth),
            rows: config.grid_dimensions.rows.max(1),
            cols: config.grid_dimensions.cols.max(1),
        }
    }

    /// Tile size as (width along the wall, height).
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(
            self.depth / self.cols as f32,
            self.height / self.rows as f32,
        )
    }

    /// Centre of tile (row, col). Column 0 is nearest the facade.
    pub fn tile_center(&self, row: u32, col: u32) -> Vec3 {
        let size = self.tile_size();
        Vec3::new(
            -self.width / 2.0,
            row as f32 * size.y + size.y / 2.0,
            -(col as f32 * size.x + size.x / 2.0),
        )
    }

    /// Width of each facade panel flanking the doorway.
    pub fn facade_panel_width(&self) -> f32 {
        ((self.width - DOOR_WIDTH) / 2.0).max(0.0)
    }
}

/// Maps a [`ShopConfig`] to placed primitives. Pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    sky_texture: Option<String>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an image for the sky backdrop. The sky colour still shows while it loads.
    pub fn with_sky_texture(mut self, url: Option<String>) -> Self {
        self.sky_texture = url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn build(&self, config: &ShopConfig) -> Scene {
        let _span = tracing::info_span!("scene_build", shop = %config.shop_name).entered();
        let layout = ShopLayout::from_config(config);
        let mut out = Vec::with_capacity(16 + (layout.rows * layout.cols) as usize);

        self.facade(config, &layout, &mut out);
        self.shell(config, &layout, &mut out);
        self.left_wall(config, &layout, &mut out);
        self.counter(&mut out);
        self.exterior(&mut out);

        let orphaned = config.orphaned_tiles().len();
        if orphaned > 0 {
            tracing::debug!(orphaned, "tiles outside the grid were not placed");
        }
        tracing::debug!(primitives = out.len(), "scene built");
        Scene::from_primitives(out)
    }

    fn facade(&self, config: &ShopConfig, layout: &ShopLayout, out: &mut Vec<Primitive>) {
        let panel_width = layout.facade_panel_width();
        let half_w = layout.width / 2.0;
        let y = layout.height / 2.0;
        let image = config.walls.image_url(WallName::Front);

        if panel_width > 0.0 {
            // Each panel maps the full image onto its own width.
            let panels = [
                (SurfaceId::FacadeLeft, -half_w + panel_width / 2.0),
                (SurfaceId::FacadeRight, DOOR_WIDTH / 2.0 + panel_width / 2.0),
            ];
            for (id, x) in panels {
                out.push(Primitive {
                    id,
                    shape: Shape::Plane {
                        width: panel_width,
                        height: layout.height,
                    },
                    transform: Transform::from_position(Vec3::new(x, y, 0.0)),
                    material: surface_material(image, PLACEHOLDER_COLOR),
                });
            }
        } else {
            tracing::warn!(width = layout.width, "shop narrower than the doorway; facade omitted");
        }

        let header_height = DOOR_HEADER_HEIGHT.min(layout.height);
        out.push(Primitive {
            id: SurfaceId::DoorHeader,
            shape: Shape::Cuboid {
                width: DOOR_WIDTH.min(layout.width),
                height: header_height,
                depth: DOOR_HEADER_DEPTH,
            },
            transform: Transform::from_position(Vec3::new(
                0.0,
                layout.height - header_height / 2.0,
                0.0,
            )),
            material: Material::solid(DOOR_HEADER_COLOR),
        });
    }

    fn shell(&self, config: &ShopConfig, layout: &ShopLayout, out: &mut Vec<Primitive>) {
        let walls = &config.walls;
        let (w, h, d) = (layout.width, layout.height, layout.depth);

        let faces = [
            (
                SurfaceId::Floor,
                SurfaceId::FloorOverlay,
                WallName::Floor,
                Transform::rotated_x(Vec3::new(0.0, 0.0, -d / 2.0), -FRAC_PI_2),
                (w, d),
                Color::parse_or(&walls.floor.color, parse_default(DEFAULT_FLOOR_COLOR)),
            ),
            (
                SurfaceId::Ceiling,
                SurfaceId::CeilingOverlay,
                WallName::Ceiling,
                Transform::rotated_x(Vec3::new(0.0, h, -d / 2.0), FRAC_PI_2),
                (w, d),
                Color::parse_or(&walls.ceiling.color, parse_default(DEFAULT_CEILING_COLOR)),
            ),
            (
                SurfaceId::BackWall,
                SurfaceId::BackWallOverlay,
                WallName::Back,
                Transform::from_position(Vec3::new(0.0, h / 2.0, -d)),
                (w, h),
                WALL_COLOR,
            ),
            (
                SurfaceId::RightWall,
                SurfaceId::RightWallOverlay,
                WallName::Right,
                Transform::rotated_y(Vec3::new(w / 2.0, h / 2.0, -d / 2.0), -FRAC_PI_2),
                (d, h),
                WALL_COLOR,
            ),
        ];

        for (base_id, overlay_id, wall, transform, (width, height), color) in faces {
            let shape = Shape::Plane { width, height };
            out.push(Primitive {
                id: base_id,
                shape,
                transform,
                material: Material::solid(color).double_sided(),
            });
            if let Some(url) = walls.image_url(wall) {
                // Offset along the facing direction, which points into the shop.
                let lifted = Transform {
                    position: transform.position + transform.facing() * OVERLAY_OFFSET,
                    ..transform
                };
                out.push(Primitive {
                    id: overlay_id,
                    shape,
                    transform: lifted,
                    material: Material::overlay(url),
                });
            }
        }
    }

    fn left_wall(&self, config: &ShopConfig, layout: &ShopLayout, out: &mut Vec<Primitive>) {
        let size = layout.tile_size();
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let image = config
                    .tile(row, col)
                    .map(|t| t.image_url.as_str())
                    .filter(|u| !u.trim().is_empty());
                out.push(Primitive {
                    id: SurfaceId::LeftTile { row, col },
                    shape: Shape::Plane {
                        width: size.x,
                        height: size.y,
                    },
                    transform: Transform::rotated_y(layout.tile_center(row, col), FRAC_PI_2),
                    material: surface_material(image, PLACEHOLDER_COLOR),
                });
            }
        }
    }

    fn counter(&self, out: &mut Vec<Primitive>) {
        out.push(Primitive {
            id: SurfaceId::Counter,
            shape: Shape::Cuboid {
                width: COUNTER_WIDTH,
                height: COUNTER_HEIGHT,
                depth: COUNTER_DEPTH,
            },
            transform: Transform::rotated_y(
                Vec3::new(0.0, COUNTER_HEIGHT / 2.0, COUNTER_Z),
                FRAC_PI_2,
            ),
            material: Material::solid(COUNTER_COLOR),
        });
    }

    fn exterior(&self, out: &mut Vec<Primitive>) {
        out.push(Primitive {
            id: SurfaceId::Ground,
            shape: Shape::Plane {
                width: 20.0,
                height: 10.0,
            },
            transform: Transform::rotated_x(Vec3::new(0.0, 0.0, 5.0), -FRAC_PI_2),
            material: Material::solid(STREET_COLOR),
        });
        out.push(Primitive {
            id: SurfaceId::Sidewalk,
            shape: Shape::Plane {
                width: 20.0,
                height: 2.0,
            },
            transform: Transform::rotated_x(Vec3::new(0.0, OVERLAY_OFFSET, 1.0), -FRAC_PI_2),
            material: Material::solid(SIDEWALK_COLOR),
        });
        let sky = match &self.sky_texture {
            Some(url) => Material::textured(url.clone(), SKY_COLOR),
            None => Material::solid(SKY_COLOR).double_sided(),
        };
        out.push(Primitive {
            id: SurfaceId::Sky,
            shape: Shape::Sphere { radius: SKY_RADIUS },
            transform: Transform::default(),
            material: sky,
        });
    }
}

/// Convenience for `SceneBuilder::new().build(config)`.
pub fn build(config: &ShopConfig) -> Scene {
    SceneBuilder::new().build(config)
}

fn surface_material(image: Option<&str>, placeholder: Color) -> Material {
    match image {
        Some(url) => Material::textured(url, placeholder),
        None => Material::solid(placeholder).double_sided(),
    }
}

fn parse_default(hex: &str) -> Color {
    Color::parse_hex(hex).unwrap_or(Color::WHITE)
}
