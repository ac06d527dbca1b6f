use glam::Vec2;
use std::sync::Arc;
use storefront_assets::{TextureHandle, TextureLoader, TextureSource};
use storefront_common::{ShopConfig, StorefrontSettings};
use storefront_controller::{ControllerConfig, DeviceClass, Navigator};
use storefront_input::{apply_key, DragLook, DualJoysticks, MoveKey, MovementIntent, PointerId};
use storefront_render::RenderView;
use storefront_scene::{Scene, SceneBuilder, ShopLayout};

/// Pointer id used for the mouse; touches use their id plus one.
pub const MOUSE_POINTER: PointerId = 0;

pub fn touch_pointer(id: u64) -> PointerId {
    id.wrapping_add(1)
}

/// Everything the viewer knows apart from the GPU and the window.
///
/// All input handlers write here and `update` consumes it once per frame.
pub struct AppState {
    pub config: ShopConfig,
    pub scene: Scene,
    pub loader: TextureLoader,
    pub navigator: Navigator,
    pub intent: MovementIntent,
    pub joysticks: DualJoysticks,
    pub device_class: DeviceClass,
    pub show_info: bool,
    drag: DragLook,
    viewport: Vec2,
}

impl AppState {
    /// Build the scene and start loading every texture it references.
    pub fn new(
        settings: &StorefrontSettings,
        config: ShopConfig,
        device_class: DeviceClass,
        viewport: Vec2,
        source: Arc<dyn TextureSource>,
    ) -> Self {
        let scene = SceneBuilder::new()
            .with_sky_texture(settings.sky_texture.clone())
            .build(&config);
        let mut loader = TextureLoader::new(
            source,
            settings.image_base(),
            settings.texture_workers,
        );
        loader.request_all(scene.texture_urls());

        let navigator = Navigator::new(
            ControllerConfig::new(device_class),
            ShopLayout::from_config(&config),
        );
        tracing::info!(
            shop = %config.shop_name,
            primitives = scene.len(),
            textures = loader.cache().pending(),
            ?device_class,
            "viewer state ready"
        );

        Self {
            config,
            scene,
            loader,
            navigator,
            intent: MovementIntent::new(),
            joysticks: DualJoysticks::new(viewport),
            device_class,
            show_info: true,
            drag: DragLook::new(),
            viewport,
        }
    }

    pub fn is_walking(&self) -> bool {
        self.navigator.is_walking()
    }

    pub fn enter(&mut self) {
        self.intent.reset();
        self.navigator.enter();
    }

    /// Leave walk mode, dropping any held stick or key.
    pub fn exit(&mut self) {
        self.navigator.exit();
        self.release_all();
    }

    /// Drop every held key, stick and drag. Used when the window loses focus
    /// and the matching releases will never arrive.
    pub fn release_all(&mut self) {
        self.intent.reset();
        self.joysticks = DualJoysticks::new(self.viewport);
        self.drag = DragLook::new();
    }

    /// One-line control reminder for the active input profile.
    pub fn controls_hint(&self) -> &'static str {
        match self.device_class {
            DeviceClass::Constrained => "Left stick: move | Right stick: look",
            DeviceClass::Desktop => "WASD: move | Drag: look | F1: panel | Esc: stop",
        }
    }

    /// Viewport size in logical pixels.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.joysticks.resize(viewport);
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y.max(1.0)
    }

    /// Handle a key by its physical code name (`"KeyW"`, `"Escape"`, ...).
    pub fn handle_key(&mut self, code: &str, pressed: bool) {
        match (code, pressed) {
            ("Escape", true) => self.exit(),
            ("F1", true) => self.show_info = !self.show_info,
            _ => {
                if let Some(key) = MoveKey::from_code(code) {
                    // Releases always land so a key held across exit cannot stick.
                    if self.is_walking() || !pressed {
                        apply_key(&mut self.intent, key, pressed);
                    }
                }
            }
        }
    }

    pub fn pointer_down(&mut self, id: PointerId, pos: Vec2) {
        if self.is_walking() && self.joysticks.pointer_down(id, pos, &mut self.intent).is_some() {
            return;
        }
        self.drag.pointer_down(id, pos);
    }

    pub fn pointer_move(&mut self, id: PointerId, pos: Vec2) {
        if self.joysticks.pointer_move(id, pos, &mut self.intent).is_some() {
            return;
        }
        if let Some(delta) = self.drag.pointer_move(id, pos) {
            self.navigator.drag(delta);
        }
    }

    pub fn pointer_up(&mut self, id: PointerId) {
        self.joysticks.pointer_up(id, &mut self.intent);
        self.drag.pointer_up(id);
    }

    pub fn scroll(&mut self, amount: f32) {
        self.navigator.scroll(amount);
    }

    /// Advance the camera by `dt` seconds and collect finished texture loads.
    pub fn update(&mut self, dt: f32) -> Vec<TextureHandle> {
        self.navigator.update(&self.intent, dt);
        self.loader.poll()
    }

    pub fn render_view(&self) -> RenderView {
        RenderView::looking(self.navigator.eye(), self.navigator.forward(), self.aspect())
    }
}
