//! wgpu render backend for shop scenes.
//!
//! Draws every primitive of a built scene as a unit quad, cube or sphere
//! scaled by its transform, with its texture bound once uploaded.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - A texture is uploaded at most once per content handle.
//! - Until its texture is uploaded a surface draws its placeholder colour;
//!   overlays are skipped instead.

mod gpu;
mod mesh;
mod shaders;

pub use gpu::WgpuRenderer;
