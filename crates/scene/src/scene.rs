use crate::primitive::{Primitive, Shape, SurfaceId};
use std::collections::BTreeSet;

/// The placed primitives for one shop configuration, in construction order.
///
/// The scene is static once built; only the camera changes per frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub(crate) fn from_primitives(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn get(&self, id: SurfaceId) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.id == id)
    }

    /// Every distinct texture URL referenced by the scene, sorted.
    pub fn texture_urls(&self) -> BTreeSet<&str> {
        self.primitives
            .iter()
            .filter_map(|p| p.material.texture.as_deref())
            .collect()
    }

    /// Left-wall tiles in the order they were placed.
    pub fn tiles(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p.id, SurfaceId::LeftTile { .. }))
    }

    /// Deterministic FNV-1a hash of the full geometry list.
    pub fn fingerprint(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_f32 = |h: &mut u64, v: f32| mix(h, &v.to_le_bytes());

        for p in &self.primitives {
            mix(&mut h, p.id.to_string().as_bytes());
            match p.shape {
                Shape::Plane { width, height } => {
                    mix(&mut h, b"plane");
                    mix_f32(&mut h, width);
                    mix_f32(&mut h, height);
                }
                Shape::Cuboid {
                    width,
                    height,
                    depth,
                } => {
                    mix(&mut h, b"cuboid");
                    mix_f32(&mut h, width);
                    mix_f32(&mut h, height);
                    mix_f32(&mut h, depth);
                }
                Shape::Sphere { radius } => {
                    mix(&mut h, b"sphere");
                    mix_f32(&mut h, radius);
                }
            }
            let t = &p.transform;
            for v in t.position.to_array() {
                mix_f32(&mut h, v);
            }
            for v in t.rotation.to_array() {
                mix_f32(&mut h, v);
            }
            for v in t.scale.to_array() {
                mix_f32(&mut h, v);
            }
            for v in p.material.color.to_array() {
                mix_f32(&mut h, v);
            }
            if let Some(url) = &p.material.texture {
                mix(&mut h, url.as_bytes());
            }
            mix(&mut h, &[p.material.double_sided as u8, p.material.overlay as u8]);
        }
        h
    }
}
