use crate::intent::MovementIntent;
use crate::joystick::{DualAxisInputDevice, PointerId};
use glam::Vec2;

pub const JOYSTICK_RADIUS: f32 = 75.0;
pub const JOYSTICK_SIDE_PADDING: f32 = 40.0;
pub const JOYSTICK_BOTTOM_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickRole {
    Move,
    Look,
}

/// Which stick consumed a pointer event, and its new output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickUpdate {
    pub role: JoystickRole,
    pub value: Vec2,
}

/// Movement stick bottom-left, look stick bottom-right.
///
/// Routes pointer events by pointer id so both sticks can be held with two
/// fingers at once, and writes every update into a [`MovementIntent`].
#[derive(Debug, Clone)]
pub struct DualJoysticks {
    movement: DualAxisInputDevice,
    look: DualAxisInputDevice,
}

impl DualJoysticks {
    /// Lay out both sticks for a viewport of `size` logical pixels.
    pub fn new(size: Vec2) -> Self {
        let (m, l) = Self::centers(size);
        Self {
            movement: DualAxisInputDevice::new(m, JOYSTICK_RADIUS),
            look: DualAxisInputDevice::new(l, JOYSTICK_RADIUS),
        }
    }

    fn centers(size: Vec2) -> (Vec2, Vec2) {
        let y = size.y - JOYSTICK_BOTTOM_MARGIN - JOYSTICK_RADIUS;
        let inset = JOYSTICK_SIDE_PADDING + JOYSTICK_RADIUS;
        (Vec2::new(inset, y), Vec2::new(size.x - inset, y))
    }

    pub fn resize(&mut self, size: Vec2) {
        let (m, l) = Self::centers(size);
        self.movement.set_geometry(m, JOYSTICK_RADIUS);
        self.look.set_geometry(l, JOYSTICK_RADIUS);
    }

    pub fn device(&self, role: JoystickRole) -> &DualAxisInputDevice {
        match role {
            JoystickRole::Move => &self.movement,
            JoystickRole::Look => &self.look,
        }
    }

    /// Whether `pos` is on either stick.
    pub fn hit(&self, pos: Vec2) -> Option<JoystickRole> {
        if self.movement.contains(pos) {
            Some(JoystickRole::Move)
        } else if self.look.contains(pos) {
            Some(JoystickRole::Look)
        } else {
            None
        }
    }

    pub fn pointer_down(
        &mut self,
        id: PointerId,
        pos: Vec2,
        intent: &mut MovementIntent,
    ) -> Option<JoystickUpdate> {
        if let Some(v) = self.movement.pointer_down(id, pos) {
            return Some(Self::apply(JoystickRole::Move, v, intent));
        }
        self.look
            .pointer_down(id, pos)
            .map(|v| Self::apply(JoystickRole::Look, v, intent))
    }

    pub fn pointer_move(
        &mut self,
        id: PointerId,
        pos: Vec2,
        intent: &mut MovementIntent,
    ) -> Option<JoystickUpdate> {
        if let Some(v) = self.movement.pointer_move(id, pos) {
            return Some(Self::apply(JoystickRole::Move, v, intent));
        }
        self.look
            .pointer_move(id, pos)
            .map(|v| Self::apply(JoystickRole::Look, v, intent))
    }

    pub fn pointer_up(
        &mut self,
        id: PointerId,
        intent: &mut MovementIntent,
    ) -> Option<JoystickUpdate> {
        if let Some(v) = self.movement.pointer_up(id) {
            return Some(Self::apply(JoystickRole::Move, v, intent));
        }
        self.look
            .pointer_up(id)
            .map(|v| Self::apply(JoystickRole::Look, v, intent))
    }

    /// Whether a pointer id is currently captured by either stick.
    pub fn owns(&self, id: PointerId) -> bool {
        use crate::joystick::JoystickState::Engaged;
        self.movement.state() == Engaged(id) || self.look.state() == Engaged(id)
    }

    fn apply(role: JoystickRole, value: Vec2, intent: &mut MovementIntent) -> JoystickUpdate {
        match role {
            JoystickRole::Move => intent.apply_move_stick(value),
            JoystickRole::Look => intent.apply_look_stick(value),
        }
        JoystickUpdate { role, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn layout_matches_overlay() {
        let sticks = DualJoysticks::new(SCREEN);
        assert_eq!(sticks.device(JoystickRole::Move).center(), Vec2::new(115.0, 505.0));
        assert_eq!(sticks.device(JoystickRole::Look).center(), Vec2::new(685.0, 505.0));
    }

    #[test]
    fn two_fingers_drive_both_sticks() {
        let mut sticks = DualJoysticks::new(SCREEN);
        let mut intent = MovementIntent::new();

        // Finger 1 pushes the movement stick straight up (forward).
        let up = sticks.pointer_down(1, Vec2::new(115.0, 430.0), &mut intent).unwrap();
        assert_eq!(up.role, JoystickRole::Move);
        // Finger 2 pushes the look stick right.
        let right = sticks.pointer_down(2, Vec2::new(760.0, 505.0), &mut intent).unwrap();
        assert_eq!(right.role, JoystickRole::Look);

        assert!((intent.move_z - 1.0).abs() < 1e-6);
        assert!((intent.look_x - 1.0).abs() < 1e-6);

        sticks.pointer_up(1, &mut intent).unwrap();
        assert_eq!(intent.move_x, 0.0);
        assert_eq!(intent.move_z, 0.0);
        assert!((intent.look_x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn release_far_from_stick_still_zeroes_intent() {
        let mut sticks = DualJoysticks::new(SCREEN);
        let mut intent = MovementIntent::new();
        sticks.pointer_down(3, Vec2::new(685.0, 505.0), &mut intent);
        sticks.pointer_move(3, Vec2::new(0.0, 0.0), &mut intent);
        assert!(intent.look_x < 0.0 && intent.look_y < 0.0);
        let update = sticks.pointer_up(3, &mut intent).unwrap();
        assert_eq!(update.value, Vec2::ZERO);
        assert_eq!((intent.look_x, intent.look_y), (0.0, 0.0));
        assert!(sticks.pointer_up(3, &mut intent).is_none());
    }

    #[test]
    fn press_between_sticks_is_not_consumed() {
        let mut sticks = DualJoysticks::new(SCREEN);
        let mut intent = MovementIntent::new();
        assert!(sticks.pointer_down(1, Vec2::new(400.0, 300.0), &mut intent).is_none());
        assert!(!sticks.owns(1));
        assert!(intent.is_idle());
    }
}
