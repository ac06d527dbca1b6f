use crate::device::DeviceClass;
use glam::Vec3;
use storefront_scene::{ShopLayout, DOOR_WIDTH};

/// Keep-out distance from interior walls.
pub const WALL_MARGIN: f32 = 0.5;

pub const CONSTRAINED_OUTDOOR_MAX_Z: f32 = 2.5;
pub const DESKTOP_OUTDOOR_HALF_X: f32 = 10.0;
pub const DESKTOP_OUTDOOR_MAX_Z: f32 = 10.0;

/// Two-region clamp split at the facade plane (z = 0).
///
/// Indoors (z < 0) the camera stays clear of the side walls and the back
/// wall. Outdoors (z >= 0) a per-device box applies; constrained devices are
/// additionally held in front of the doorway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementBounds {
    pub indoor_min_x: f32,
    pub indoor_max_x: f32,
    pub indoor_min_z: f32,
    pub outdoor_min_x: f32,
    pub outdoor_max_x: f32,
    pub outdoor_max_z: f32,
    /// Half-width of the band outdoors movement is limited to, if any.
    pub doorway_half_width: Option<f32>,
}

impl MovementBounds {
    pub fn new(class: DeviceClass, layout: &ShopLayout) -> Self {
        // Narrow shops could invert the range; collapse it onto the centre line.
        let half_x = (layout.width / 2.0 - WALL_MARGIN).max(0.0);
        let indoor_min_z = (-layout.depth + WALL_MARGIN).min(0.0);
        match class {
            DeviceClass::Constrained => Self {
                indoor_min_x: -half_x,
                indoor_max_x: half_x,
                indoor_min_z,
                outdoor_min_x: -half_x,
                outdoor_max_x: half_x,
                outdoor_max_z: CONSTRAINED_OUTDOOR_MAX_Z,
                doorway_half_width: Some(DOOR_WIDTH),
            },
            DeviceClass::Desktop => Self {
                indoor_min_x: -half_x,
                indoor_max_x: half_x,
                indoor_min_z,
                outdoor_min_x: -DESKTOP_OUTDOOR_HALF_X,
                outdoor_max_x: DESKTOP_OUTDOOR_HALF_X,
                outdoor_max_z: DESKTOP_OUTDOOR_MAX_Z,
                doorway_half_width: None,
            },
        }
    }

    pub fn is_indoors(position: Vec3) -> bool {
        position.z < 0.0
    }

    /// Clamp a horizontal position into the region it currently falls in.
    pub fn clamp(&self, mut position: Vec3) -> Vec3 {
        if Self::is_indoors(position) {
            position.x = position.x.clamp(self.indoor_min_x, self.indoor_max_x);
            position.z = position.z.max(self.indoor_min_z);
        } else {
            position.x = position.x.clamp(self.outdoor_min_x, self.outdoor_max_x);
            position.z = position.z.min(self.outdoor_max_z);
            if let Some(half) = self.doorway_half_width {
                position.x = position.x.clamp(-half, half);
            }
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_common::ShopConfig;

    fn layout() -> ShopLayout {
        ShopLayout::from_config(&ShopConfig::default())
    }

    #[test]
    fn indoor_clamp_keeps_off_walls() {
        let b = MovementBounds::new(DeviceClass::Desktop, &layout());
        let p = b.clamp(Vec3::new(9.0, 1.6, -20.0));
        assert_eq!(p, Vec3::new(3.5, 1.6, -7.5));
        let p = b.clamp(Vec3::new(-9.0, 1.6, -0.1));
        assert_eq!(p.x, -3.5);
    }

    #[test]
    fn desktop_outdoor_box() {
        let b = MovementBounds::new(DeviceClass::Desktop, &layout());
        let p = b.clamp(Vec3::new(-30.0, 1.6, 40.0));
        assert_eq!(p, Vec3::new(-10.0, 1.6, 10.0));
        // Outdoors the interior side limits do not apply.
        let p = b.clamp(Vec3::new(6.0, 1.6, 3.0));
        assert_eq!(p.x, 6.0);
    }

    #[test]
    fn constrained_outdoor_is_held_at_the_doorway() {
        let b = MovementBounds::new(DeviceClass::Constrained, &layout());
        let p = b.clamp(Vec3::new(3.0, 1.6, 5.0));
        assert_eq!(p, Vec3::new(DOOR_WIDTH, 1.6, CONSTRAINED_OUTDOOR_MAX_Z));
    }

    #[test]
    fn facade_plane_counts_as_outdoors() {
        let b = MovementBounds::new(DeviceClass::Constrained, &layout());
        let p = b.clamp(Vec3::new(-3.0, 1.6, 0.0));
        assert_eq!(p.x, -DOOR_WIDTH);
    }

    #[test]
    fn narrow_shop_collapses_range() {
        let mut c = ShopConfig::default();
        c.dimensions.width = 0.6;
        c.dimensions.depth = 0.2;
        let b = MovementBounds::new(DeviceClass::Desktop, &ShopLayout::from_config(&c));
        let p = b.clamp(Vec3::new(2.0, 1.6, -1.0));
        assert_eq!(p.x, 0.0);
        assert!(p.z <= 0.0);
    }
}
