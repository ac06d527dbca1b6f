use crate::intent::MovementIntent;

/// Discrete movement keys. Arrow keys and WASD map to the same directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKey {
    /// Map a physical key code name (`"KeyW"`, `"ArrowUp"`, ...) to a direction.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(MoveKey::Forward),
            "KeyS" | "ArrowDown" => Some(MoveKey::Backward),
            "KeyA" | "ArrowLeft" => Some(MoveKey::Left),
            "KeyD" | "ArrowRight" => Some(MoveKey::Right),
            _ => None,
        }
    }
}

/// Apply a key press or release to the movement axes.
///
/// A press sets its axis to the full value. Releasing either key of an axis
/// zeroes that axis, so releasing W while S is held still stops travel.
pub fn apply_key(intent: &mut MovementIntent, key: MoveKey, pressed: bool) {
    match (key, pressed) {
        (MoveKey::Forward, true) => intent.move_z = 1.0,
        (MoveKey::Backward, true) => intent.move_z = -1.0,
        (MoveKey::Left, true) => intent.move_x = 1.0,
        (MoveKey::Right, true) => intent.move_x = -1.0,
        (MoveKey::Forward | MoveKey::Backward, false) => intent.move_z = 0.0,
        (MoveKey::Left | MoveKey::Right, false) => intent.move_x = 0.0,
    }
}
