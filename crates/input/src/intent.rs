use glam::Vec2;

/// Per-axis normalized movement and look state consumed once per frame.
///
/// Each field has exactly one writer at a time: keyboard or the movement stick
/// for `move_*`, the look stick for `look_*`. Values persist across frames
/// until a key-up or pointer-release resets them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    /// Strafe: +1 is left, -1 is right.
    pub move_x: f32,
    /// Travel: +1 is forward, -1 is backward.
    pub move_z: f32,
    /// Yaw rate: +1 turns right.
    pub look_x: f32,
    /// Pitch rate: +1 tilts down.
    pub look_y: f32,
}

impl MovementIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_move(&mut self, move_x: f32, move_z: f32) {
        self.move_x = unit(move_x);
        self.move_z = unit(move_z);
    }

    pub fn set_look(&mut self, look_x: f32, look_y: f32) {
        self.look_x = unit(look_x);
        self.look_y = unit(look_y);
    }

    /// Apply a movement-stick vector in screen space (x right, y down).
    pub fn apply_move_stick(&mut self, stick: Vec2) {
        self.set_move(-stick.x, -stick.y);
    }

    /// Apply a look-stick vector in screen space (x right, y down).
    pub fn apply_look_stick(&mut self, stick: Vec2) {
        self.set_look(stick.x, stick.y);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_stick_inverts_both_axes() {
        let mut intent = MovementIntent::new();
        // Stick pushed up and to the right.
        intent.apply_move_stick(Vec2::new(0.5, -1.0));
        assert_eq!(intent.move_x, -0.5);
        assert_eq!(intent.move_z, 1.0);
    }

    #[test]
    fn look_stick_passes_through() {
        let mut intent = MovementIntent::new();
        intent.apply_look_stick(Vec2::new(0.3, -0.7));
        assert_eq!(intent.look_x, 0.3);
        assert_eq!(intent.look_y, -0.7);
    }

    #[test]
    fn values_are_clamped() {
        let mut intent = MovementIntent::new();
        intent.set_move(4.0, -9.0);
        intent.set_look(f32::NAN, 2.0);
        assert_eq!(intent.move_x, 1.0);
        assert_eq!(intent.move_z, -1.0);
        assert_eq!(intent.look_x, 0.0);
        assert_eq!(intent.look_y, 1.0);
    }

    #[test]
    fn reset_is_idle() {
        let mut intent = MovementIntent::new();
        intent.set_move(1.0, 1.0);
        assert!(!intent.is_idle());
        intent.reset();
        assert!(intent.is_idle());
    }
}
