//! Input fusion: virtual joysticks, keyboard and drag look feeding a shared
//! movement intent.
//!
//! # Invariants
//! - Joystick output always lies in the unit disk.
//! - Releasing a stick yields exactly one zero update, even when the release
//!   happens outside the stick.
//! - `MovementIntent` is the only state shared between event handlers and the
//!   per-frame controller.

mod drag;
mod dual;
mod intent;
mod joystick;
mod keyboard;

pub use drag::DragLook;
pub use dual::{
    DualJoysticks, JoystickRole, JoystickUpdate, JOYSTICK_BOTTOM_MARGIN, JOYSTICK_RADIUS,
    JOYSTICK_SIDE_PADDING,
};
pub use intent::MovementIntent;
pub use joystick::{normalize_to_disk, DualAxisInputDevice, JoystickState, PointerId};
pub use keyboard::{apply_key, MoveKey};
