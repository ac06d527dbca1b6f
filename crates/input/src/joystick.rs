use glam::Vec2;

/// Identifier of a pointer (mouse or a single touch).
pub type PointerId = u64;

/// Map a pointer position onto the unit disk of a circular control.
///
/// Positions outside the circle are projected onto its rim along the same
/// angle, so diagonals saturate uniformly instead of clipping per axis.
pub fn normalize_to_disk(pointer: Vec2, center: Vec2, radius: f32) -> Vec2 {
    if radius.is_nan() || radius <= 0.0 || !pointer.is_finite() {
        return Vec2::ZERO;
    }
    let v = (pointer - center) / radius;
    let len = v.length();
    if len > 1.0 { v / len } else { v }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickState {
    Idle,
    /// Captured by a pointer; moves and releases are tracked globally.
    Engaged(PointerId),
}

/// A circular virtual joystick producing a vector in the unit disk.
#[derive(Debug, Clone)]
pub struct DualAxisInputDevice {
    center: Vec2,
    radius: f32,
    state: JoystickState,
    value: Vec2,
}

impl DualAxisInputDevice {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            state: JoystickState::Idle,
            value: Vec2::ZERO,
        }
    }

    /// Move or resize the control, e.g. after a window resize.
    pub fn set_geometry(&mut self, center: Vec2, radius: f32) {
        self.center = center;
        self.radius = radius;
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn state(&self) -> JoystickState {
        self.state
    }

    pub fn is_engaged(&self) -> bool {
        matches!(self.state, JoystickState::Engaged(_))
    }

    /// Current output vector.
    pub fn value(&self) -> Vec2 {
        self.value
    }

    /// Whether `pos` lies inside or on the control.
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.distance(self.center) <= self.radius
    }

    /// Pointer pressed. Engages the control if the press is on it.
    pub fn pointer_down(&mut self, id: PointerId, pos: Vec2) -> Option<Vec2> {
        if self.is_engaged() || !self.contains(pos) {
            return None;
        }
        self.state = JoystickState::Engaged(id);
        self.value = normalize_to_disk(pos, self.center, self.radius);
        tracing::trace!(id, value = ?self.value, "joystick engaged");
        Some(self.value)
    }

    /// Pointer moved anywhere on screen. Only the capturing pointer counts.
    pub fn pointer_move(&mut self, id: PointerId, pos: Vec2) -> Option<Vec2> {
        if self.state != JoystickState::Engaged(id) {
            return None;
        }
        self.value = normalize_to_disk(pos, self.center, self.radius);
        Some(self.value)
    }

    /// Pointer released anywhere on screen.
    ///
    /// Returns exactly one `Vec2::ZERO` for the capturing pointer; any other
    /// release is ignored.
    pub fn pointer_up(&mut self, id: PointerId) -> Option<Vec2> {
        if self.state != JoystickState::Engaged(id) {
            return None;
        }
        self.state = JoystickState::Idle;
        self.value = Vec2::ZERO;
        tracing::trace!(id, "joystick released");
        Some(Vec2::ZERO)
    }
}
