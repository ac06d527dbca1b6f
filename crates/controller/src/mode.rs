use crate::camera::{ControllerConfig, FirstPersonController};
use crate::orbit::OrbitCamera;
use glam::{Mat4, Vec2, Vec3};
use storefront_input::MovementIntent;
use storefront_scene::ShopLayout;

/// Which camera currently owns the view.
#[derive(Debug, Clone)]
pub enum NavigationMode {
    /// Free orbit before the visitor has entered.
    Inspect(OrbitCamera),
    /// First-person walk through the shop.
    Walk(FirstPersonController),
}

/// Switches between the inspection camera and the first-person controller.
#[derive(Debug, Clone)]
pub struct Navigator {
    mode: NavigationMode,
    config: ControllerConfig,
    layout: ShopLayout,
}

impl Navigator {
    pub fn new(config: ControllerConfig, layout: ShopLayout) -> Self {
        Self {
            mode: NavigationMode::Inspect(OrbitCamera::default()),
            config,
            layout,
        }
    }

    pub fn mode(&self) -> &NavigationMode {
        &self.mode
    }

    pub fn is_walking(&self) -> bool {
        matches!(self.mode, NavigationMode::Walk(_))
    }

    /// Start walking from wherever the orbit camera is looking.
    pub fn enter(&mut self) {
        if let NavigationMode::Inspect(orbit) = &self.mode {
            let controller = FirstPersonController::from_view(
                self.config,
                &self.layout,
                orbit.position(),
                orbit.forward(),
            );
            tracing::info!(position = ?controller.pose().position, class = ?self.config.device_class, "entered walk mode");
            self.mode = NavigationMode::Walk(controller);
        }
    }

    /// Back to inspection; the orbit camera restarts from its default view.
    pub fn exit(&mut self) {
        if self.is_walking() {
            tracing::info!("left walk mode");
            self.mode = NavigationMode::Inspect(OrbitCamera::default());
        }
    }

    pub fn update(&mut self, intent: &MovementIntent, dt: f32) {
        if let NavigationMode::Walk(controller) = &mut self.mode {
            controller.update(intent, dt);
        }
    }

    /// Route a pointer drag to whichever camera is active.
    pub fn drag(&mut self, delta: Vec2) {
        match &mut self.mode {
            NavigationMode::Inspect(orbit) => orbit.rotate(delta),
            NavigationMode::Walk(controller) => controller.apply_drag(delta),
        }
    }

    /// Scroll only zooms the inspection camera.
    pub fn scroll(&mut self, amount: f32) {
        if let NavigationMode::Inspect(orbit) = &mut self.mode {
            orbit.zoom(amount);
        }
    }

    pub fn eye(&self) -> Vec3 {
        match &self.mode {
            NavigationMode::Inspect(orbit) => orbit.position(),
            NavigationMode::Walk(controller) => controller.pose().position,
        }
    }

    /// Unit view direction of the active camera.
    pub fn forward(&self) -> Vec3 {
        match &self.mode {
            NavigationMode::Inspect(orbit) => orbit.forward(),
            NavigationMode::Walk(controller) => controller.pose().forward(),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        match &self.mode {
            NavigationMode::Inspect(orbit) => orbit.view_matrix(),
            NavigationMode::Walk(controller) => controller.view_matrix(),
        }
    }
}
