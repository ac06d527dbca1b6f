//! Rendering adapter: renderer-agnostic interface over a built scene.
//!
//! # Invariants
//! - Renderers never mutate the scene.
//! - A surface whose texture is pending or failed is drawn with its
//!   placeholder colour (or skipped, for overlays). Texture state changes only
//!   affect the surfaces referencing that URL.
//!
//! The GPU backend lives in `storefront-render-wgpu`; the text renderer here
//! serves the CLI and tests.

mod renderer;
mod surface;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use surface::{mesh_scale, model_matrix, resolve_surface, SurfaceAppearance};
