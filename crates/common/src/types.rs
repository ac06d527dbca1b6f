use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Position with a rotation about the X axis (radians).
    pub fn rotated_x(position: Vec3, angle: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_x(angle),
            ..Self::default()
        }
    }

    /// Position with a rotation about the Y axis (radians).
    pub fn rotated_y(position: Vec3, angle: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(angle),
            ..Self::default()
        }
    }

    /// The local +Z axis in world space. Planes face this way.
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Linear RGBA colour with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b, 1.0])
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok().map(|v| v as f32 / 255.0);
        match hex.len() {
            3 => {
                let mut out = [0.0f32; 4];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as f32;
                    out[i] = (v * 17.0) / 255.0;
                }
                out[3] = 1.0;
                Some(Self(out))
            }
            6 => Some(Self([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                1.0,
            ])),
            _ => None,
        }
    }

    /// Parse a hex colour, falling back when the string is unusable.
    pub fn parse_or(s: &str, fallback: Color) -> Self {
        match Self::parse_hex(s) {
            Some(c) => c,
            None => {
                if !s.trim().is_empty() {
                    tracing::warn!(value = s, "unparsable colour, using fallback");
                }
                fallback
            }
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn rotated_plane_facing() {
        let floor = Transform::rotated_x(Vec3::ZERO, -std::f32::consts::FRAC_PI_2);
        assert!((floor.facing() - Vec3::Y).length() < 1e-5);

        let left = Transform::rotated_y(Vec3::ZERO, std::f32::consts::FRAC_PI_2);
        assert!((left.facing() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn parse_long_and_short_hex() {
        let c = Color::parse_hex("#ff8000").unwrap();
        assert_eq!(c.0[0], 1.0);
        assert!((c.0[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.0[2], 0.0);

        let short = Color::parse_hex("#333").unwrap();
        assert!((short.0[0] - 0.2).abs() < 1e-6);
        assert_eq!(short.0[3], 1.0);
    }

    #[test]
    fn bad_hex_falls_back() {
        assert!(Color::parse_hex("chartreuse").is_none());
        assert!(Color::parse_hex("#12345").is_none());
        assert_eq!(Color::parse_or("nope", Color::WHITE), Color::WHITE);
    }
}
