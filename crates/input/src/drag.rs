use crate::joystick::PointerId;
use glam::Vec2;

/// Tracks a pointer drag on the canvas and yields pixel deltas for look.
///
/// Once started, moves and the release are followed anywhere on screen.
#[derive(Debug, Clone, Default)]
pub struct DragLook {
    active: Option<(PointerId, Vec2)>,
}

impl DragLook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn pointer_down(&mut self, id: PointerId, pos: Vec2) {
        if self.active.is_none() {
            self.active = Some((id, pos));
        }
    }

    /// Pixel delta since the previous position of the dragging pointer.
    pub fn pointer_move(&mut self, id: PointerId, pos: Vec2) -> Option<Vec2> {
        match &mut self.active {
            Some((active_id, last)) if *active_id == id => {
                let delta = pos - *last;
                *last = pos;
                Some(delta)
            }
            _ => None,
        }
    }

    pub fn pointer_up(&mut self, id: PointerId) {
        if matches!(self.active, Some((active_id, _)) if active_id == id) {
            self.active = None;
        }
    }
}
