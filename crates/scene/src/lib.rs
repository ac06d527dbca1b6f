//! Scene composition: maps a shop configuration to placed 3D primitives.
//!
//! # Invariants
//! - `build` is pure, total and deterministic: the same config always yields
//!   the same primitive list, with left-wall tiles in row-major order.
//! - Every expected surface is present; a missing image produces a
//!   flat-coloured placeholder of identical size, never a gap.
//! - Tiles outside the grid are skipped without touching the config.

mod builder;
mod primitive;
mod scene;

pub use builder::{
    build, SceneBuilder, ShopLayout, COUNTER_Z, DOOR_WIDTH, MIN_EXTENT, OVERLAY_OFFSET,
    PLACEHOLDER_COLOR, SKY_RADIUS,
};
pub use primitive::{Material, Primitive, Shape, SurfaceId};
pub use scene::Scene;
