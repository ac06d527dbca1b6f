use crate::surface::{resolve_surface, SurfaceAppearance};
use glam::{Mat4, Vec3};
use std::fmt::Write;
use storefront_assets::TextureCache;
use storefront_scene::{Scene, Shape};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.6, 6.0),
            target: Vec3::new(0.0, 1.6, 0.0),
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl RenderView {
    /// View looking from `eye` along `forward`.
    pub fn looking(eye: Vec3, forward: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target: eye + forward,
            aspect,
            ..Self::default()
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect.max(1e-3),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the built scene, the current texture states and a view.
/// It never mutates the scene; only the camera changes between frames.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, scene: &Scene, textures: &TextureCache, view: &RenderView) -> Self::Output;
}

/// Text renderer listing every surface and how it would be drawn.
///
/// Used by the CLI and in tests to inspect the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, textures: &TextureCache, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene (primitives={}, fingerprint={:016x}) ===",
            scene.len(),
            scene.fingerprint()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0}",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z, view.fov_degrees
        );

        for p in scene.primitives() {
            let pos = p.transform.position;
            let shape = match p.shape {
                Shape::Plane { width, height } => format!("plane {width:.2}x{height:.2}"),
                Shape::Cuboid {
                    width,
                    height,
                    depth,
                } => format!("box {width:.2}x{height:.2}x{depth:.2}"),
                Shape::Sphere { radius } => format!("sphere r={radius:.1}"),
            };
            let look = match resolve_surface(&p.material, textures) {
                SurfaceAppearance::Textured(handle) => format!("texture {:016x}", handle.0),
                SurfaceAppearance::Solid(c) => {
                    let [r, g, b, _] = c.to_array();
                    format!("solid ({r:.2}, {g:.2}, {b:.2})")
                }
                SurfaceAppearance::Hidden => "hidden".to_string(),
            };
            let _ = writeln!(
                out,
                "  {:<18} {:<22} pos=({:.2}, {:.2}, {:.2}) {}",
                p.id.to_string(),
                shape,
                pos.x,
                pos.y,
                pos.z,
                look
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_common::{ShopConfig, WallTile};

    #[test]
    fn lists_every_primitive() {
        let scene = storefront_scene::build(&ShopConfig::default());
        let output = DebugTextRenderer::new().render(&scene, &TextureCache::new(), &RenderView::default());
        assert!(output.contains(&format!("primitives={}", scene.len())));
        assert_eq!(output.lines().count(), scene.len() + 2);
        assert!(output.contains("BackWall"));
        assert!(output.contains("sphere r=50.0"));
    }

    #[test]
    fn pending_tile_is_shown_as_placeholder() {
        let mut config = ShopConfig::default();
        config.left_wall_tiles.push(WallTile {
            row: 1,
            col: 4,
            image_url: "/x.jpg".into(),
        });
        let scene = storefront_scene::build(&config);
        let output = DebugTextRenderer::new().render(&scene, &TextureCache::new(), &RenderView::default());
        let tile = output
            .lines()
            .find(|l| l.contains("left_tile[1,4]"))
            .expect("tile line");
        assert!(tile.contains("solid (0.80, 0.80, 0.80)"));
        assert!(tile.contains("pos=(-4.00, 1.95, -7.20)"));
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 60.0);
        let clip = view.view_projection().project_point3(view.target);
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
    }
}
