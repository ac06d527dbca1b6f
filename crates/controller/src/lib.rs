//! First-person navigation over a built shop scene.
//!
//! A [`FirstPersonController`] reads a [`storefront_input::MovementIntent`]
//! once per frame and integrates it into a [`CameraPose`] using elapsed time.
//! Before the visitor enters, an [`OrbitCamera`] inspects the shop instead;
//! [`Navigator`] owns the switch between the two.
//!
//! # Invariants
//! - Eye height is pinned to [`EYE_HEIGHT`]; there is no vertical motion.
//! - Pitch always lies within `(-PITCH_LIMIT, PITCH_LIMIT)`.
//! - After every update the position satisfies the bounds of the region it
//!   is in (indoors `z < 0`, outdoors otherwise).
//! - [`DeviceClass`] is resolved once and carried in [`ControllerConfig`].

mod bounds;
mod camera;
mod device;
mod mode;
mod orbit;

pub use bounds::{
    MovementBounds, CONSTRAINED_OUTDOOR_MAX_Z, DESKTOP_OUTDOOR_HALF_X, DESKTOP_OUTDOOR_MAX_Z,
    WALL_MARGIN,
};
pub use camera::{
    CameraPose, ControllerConfig, FirstPersonController, Projection, DRAG_SENSITIVITY, EYE_HEIGHT,
    LOOK_DEADZONE, LOOK_SPEED, MOVE_SPEED, PITCH_LIMIT,
};
pub use device::{DeviceClass, DeviceHints, CONSTRAINED_MAX_WIDTH};
pub use mode::{NavigationMode, Navigator};
pub use orbit::{OrbitCamera, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE};
