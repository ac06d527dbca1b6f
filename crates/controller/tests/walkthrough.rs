use glam::{Vec2, Vec3};
use std::f32::consts::PI;
use storefront_common::ShopConfig;
use storefront_controller::{
    CameraPose, ControllerConfig, DeviceClass, FirstPersonController, CONSTRAINED_OUTDOOR_MAX_Z,
};
use storefront_input::{apply_key, DualJoysticks, MoveKey, MovementIntent};
use storefront_scene::{ShopLayout, DOOR_WIDTH};

const SCREEN: Vec2 = Vec2::new(800.0, 600.0);
const FRAME: f32 = 1.0 / 60.0;

fn controller(class: DeviceClass, position: Vec3, yaw: f32) -> FirstPersonController {
    FirstPersonController::new(
        ControllerConfig::new(class),
        &ShopLayout::from_config(&ShopConfig::default()),
        CameraPose {
            position,
            yaw,
            pitch: 0.0,
        },
    )
}

#[test]
fn movement_stick_walks_into_the_shop() {
    let mut sticks = DualJoysticks::new(SCREEN);
    let mut intent = MovementIntent::new();
    let mut c = controller(DeviceClass::Constrained, Vec3::new(0.0, 1.6, 2.0), 0.0);

    // Push the movement stick fully up.
    sticks.pointer_down(7, Vec2::new(115.0, 400.0), &mut intent);
    for _ in 0..60 {
        c.update(&intent, FRAME);
    }
    assert!((c.pose().position.z + 1.0).abs() < 1e-3);

    // Release far away from the stick: the very next frame stops.
    sticks.pointer_move(7, Vec2::new(500.0, 10.0), &mut intent);
    sticks.pointer_up(7, &mut intent);
    let stopped = c.pose().position;
    c.update(&intent, FRAME);
    assert_eq!(c.pose().position, stopped);
}

#[test]
fn look_stick_turns_right() {
    let mut sticks = DualJoysticks::new(SCREEN);
    let mut intent = MovementIntent::new();
    let mut c = controller(DeviceClass::Desktop, Vec3::new(0.0, 1.6, 6.0), 0.0);

    sticks.pointer_down(1, Vec2::new(760.0, 505.0), &mut intent);
    c.update(&intent, 0.5);
    assert!(c.pose().forward().x > 0.0);
    assert_eq!(c.pose().pitch, 0.0);
}

#[test]
fn both_sticks_at_once() {
    let mut sticks = DualJoysticks::new(SCREEN);
    let mut intent = MovementIntent::new();
    let mut c = controller(DeviceClass::Desktop, Vec3::new(0.0, 1.6, 6.0), 0.0);

    sticks.pointer_down(1, Vec2::new(115.0, 430.0), &mut intent);
    sticks.pointer_down(2, Vec2::new(685.0, 430.0), &mut intent);
    for _ in 0..30 {
        c.update(&intent, FRAME);
    }
    assert!(c.pose().position.z < 6.0);
    assert!(c.pose().pitch > 0.0);
    sticks.pointer_up(2, &mut intent);
    assert_eq!((intent.look_x, intent.look_y), (0.0, 0.0));
    assert!(intent.move_z > 0.0);
}

#[test]
fn keyboard_and_frames_are_rate_independent() {
    let mut intent = MovementIntent::new();
    apply_key(&mut intent, MoveKey::Forward, true);
    apply_key(&mut intent, MoveKey::Left, true);

    let mut once = controller(DeviceClass::Desktop, Vec3::new(0.0, 1.6, 8.0), 0.0);
    let mut many = once.clone();
    once.update(&intent, 1.0);
    for _ in 0..60 {
        many.update(&intent, FRAME);
    }
    assert!((once.pose().position - many.pose().position).length() < 1e-3);
    assert!((once.pose().position - Vec3::new(-3.0, 1.6, 5.0)).length() < 1e-4);

    apply_key(&mut intent, MoveKey::Forward, false);
    assert_eq!(intent.move_z, 0.0);
    assert_eq!(intent.move_x, 1.0);
}

#[test]
fn constrained_visitor_cannot_wander_down_the_street() {
    let mut intent = MovementIntent::new();
    intent.set_move(0.0, 1.0);
    let mut c = controller(DeviceClass::Constrained, Vec3::new(0.0, 1.6, 1.0), PI);
    c.update(&intent, 1.0);
    let p = c.pose().position;
    assert!(p.z <= CONSTRAINED_OUTDOOR_MAX_Z);
    assert!((-DOOR_WIDTH..=DOOR_WIDTH).contains(&p.x));
}

#[test]
fn desktop_visitor_can_explore_outside() {
    let mut intent = MovementIntent::new();
    intent.set_move(-1.0, 0.0);
    let mut c = controller(DeviceClass::Desktop, Vec3::new(0.0, 1.6, 3.0), 0.0);
    c.update(&intent, 2.0);
    assert!((c.pose().position.x - 6.0).abs() < 1e-4);
}

#[test]
fn long_random_walk_respects_indoor_bounds() {
    let mut intent = MovementIntent::new();
    let mut c = controller(DeviceClass::Desktop, Vec3::new(0.0, 1.6, -3.0), 0.0);
    let mut seed: u32 = 12345;
    let mut next = || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (seed >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
    };
    for _ in 0..2000 {
        intent.set_move(next(), next());
        intent.set_look(next(), next());
        c.update(&intent, 0.05);
        let p = c.pose().position;
        if p.z < 0.0 {
            assert!(p.x >= -3.5 && p.x <= 3.5);
            assert!(p.z >= -7.5);
        }
        assert_eq!(p.y, 1.6);
    }
}
