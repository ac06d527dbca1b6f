use glam::{Mat4, Vec3};
use storefront_assets::{LoadState, TextureCache, TextureHandle};
use storefront_common::Color;
use storefront_scene::{Material, Primitive, Shape};

/// What a surface looks like this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceAppearance {
    /// Draw the loaded texture untinted.
    Textured(TextureHandle),
    /// Draw a flat colour: untextured surfaces, or a pending/failed texture.
    Solid(Color),
    /// Skip: an overlay whose image is not available yet.
    Hidden,
}

/// Pick the appearance for `material` from the latest cache state.
///
/// Pending and failed loads never block; they fall back to the placeholder
/// colour, or to nothing for overlays so the base surface shows through.
pub fn resolve_surface(material: &Material, cache: &TextureCache) -> SurfaceAppearance {
    let Some(url) = material.texture.as_deref() else {
        return SurfaceAppearance::Solid(material.color);
    };
    match cache.state(url) {
        Some(LoadState::Ready(handle)) => SurfaceAppearance::Textured(handle),
        state => {
            tracing::trace!(url, ?state, overlay = material.overlay, "texture not ready");
            if material.overlay {
                SurfaceAppearance::Hidden
            } else {
                SurfaceAppearance::Solid(material.color)
            }
        }
    }
}

/// Scale applied to the unit mesh of each shape.
///
/// Unit meshes: a 1×1 quad in XY facing +Z, a 1×1×1 cube, a radius-1 sphere.
pub fn mesh_scale(shape: &Shape) -> Vec3 {
    match *shape {
        Shape::Plane { width, height } => Vec3::new(width, height, 1.0),
        Shape::Cuboid {
            width,
            height,
            depth,
        } => Vec3::new(width, height, depth),
        Shape::Sphere { radius } => Vec3::splat(radius),
    }
}

/// World matrix for a primitive's unit mesh.
pub fn model_matrix(primitive: &Primitive) -> Mat4 {
    let t = &primitive.transform;
    Mat4::from_scale_rotation_translation(t.scale * mesh_scale(&primitive.shape), t.rotation, t.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_assets::TextureData;
    use storefront_common::Transform;
    use storefront_scene::{SurfaceId, PLACEHOLDER_COLOR};

    fn pixel() -> TextureData {
        TextureData {
            width: 1,
            height: 1,
            rgba: vec![255, 0, 0, 255],
        }
    }

    #[test]
    fn untextured_is_solid() {
        let m = Material::solid(Color::rgb(0.1, 0.2, 0.3));
        assert_eq!(
            resolve_surface(&m, &TextureCache::new()),
            SurfaceAppearance::Solid(Color::rgb(0.1, 0.2, 0.3))
        );
    }

    #[test]
    fn pending_and_failed_show_placeholder() {
        let mut cache = TextureCache::new();
        let m = Material::textured("/a.png", PLACEHOLDER_COLOR);
        assert_eq!(resolve_surface(&m, &cache), SurfaceAppearance::Solid(PLACEHOLDER_COLOR));
        cache.mark_pending("/a.png");
        assert_eq!(resolve_surface(&m, &cache), SurfaceAppearance::Solid(PLACEHOLDER_COLOR));
        cache.mark_failed("/a.png");
        assert_eq!(resolve_surface(&m, &cache), SurfaceAppearance::Solid(PLACEHOLDER_COLOR));
    }

    #[test]
    fn ready_swaps_in_texture() {
        let mut cache = TextureCache::new();
        let handle = cache.insert("/a.png", pixel());
        let m = Material::textured("/a.png", PLACEHOLDER_COLOR);
        assert_eq!(resolve_surface(&m, &cache), SurfaceAppearance::Textured(handle));
    }

    #[test]
    fn overlays_hide_until_ready() {
        let mut cache = TextureCache::new();
        let m = Material::overlay("/floor.png");
        assert_eq!(resolve_surface(&m, &cache), SurfaceAppearance::Hidden);
        cache.mark_failed("/floor.png");
        assert_eq!(resolve_surface(&m, &cache), SurfaceAppearance::Hidden);
        cache.insert("/floor.png", pixel());
        assert!(matches!(resolve_surface(&m, &cache), SurfaceAppearance::Textured(_)));
    }

    #[test]
    fn plane_model_matrix_scales_unit_quad() {
        let p = Primitive {
            id: SurfaceId::BackWall,
            shape: Shape::Plane {
                width: 8.0,
                height: 2.6,
            },
            transform: Transform::from_position(Vec3::new(0.0, 1.3, -8.0)),
            material: Material::solid(Color::WHITE),
        };
        let corner = model_matrix(&p).transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert!((corner - Vec3::new(4.0, 2.6, -8.0)).length() < 1e-5);
    }
}
