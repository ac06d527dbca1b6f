use crate::state::AppState;
use egui::{Align2, Color32, Context, Id, LayerId, Order, RichText, Stroke};
use storefront_input::JoystickRole;

/// What the user asked for through the overlay this frame.
#[derive(Debug, Default)]
pub struct OverlayAction {
    pub enter: bool,
}

pub fn draw(ctx: &Context, state: &AppState) -> OverlayAction {
    let mut action = OverlayAction::default();
    if state.show_info {
        info_panel(ctx, state);
    }
    if state.is_walking() {
        joysticks(ctx, state);
    } else {
        action.enter = enter_prompt(ctx);
    }
    action
}

fn info_panel(ctx: &Context, state: &AppState) {
    let config = &state.config;
    egui::Window::new(RichText::new(&config.shop_name).heading())
        .id(Id::new("shop_info"))
        .anchor(Align2::LEFT_TOP, [20.0, 20.0])
        .resizable(false)
        .collapsible(true)
        .max_width(300.0)
        .show(ctx, |ui| {
            let row = |ui: &mut egui::Ui, label: &str, value: &str| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(label).strong());
                    ui.label(value);
                });
            };
            row(ui, "Address:", &config.info.address);
            row(ui, "Hours:", &config.info.opening_hours);
            row(ui, "Contact:", &config.info.contact_number);
            if !config.info.whatsapp_number.trim().is_empty() {
                row(ui, "WhatsApp:", &config.info.whatsapp_number);
            }
            if !config.info.description.trim().is_empty() {
                ui.separator();
                ui.label(&config.info.description);
            }
            ui.separator();
            let loading = state.loader.cache().pending();
            if loading > 0 {
                ui.small(format!("Loading {loading} images..."));
            }
            ui.small(state.controls_hint());
        });
}

/// Centred prompt shown until the visitor enters. Returns true when clicked.
fn enter_prompt(ctx: &Context) -> bool {
    let mut clicked = false;
    egui::Area::new(Id::new("enter_prompt"))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(Color32::from_black_alpha(180))
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        let button = egui::Button::new(
                            RichText::new("Click to Enter Shop")
                                .heading()
                                .color(Color32::WHITE),
                        )
                        .frame(false);
                        clicked = ui.add(button).clicked();
                        ui.label(RichText::new("Use Joysticks to Move & Look").color(Color32::WHITE));
                        ui.label(RichText::new("Or WASD + Drag").color(Color32::WHITE));
                        ui.label(RichText::new("Press ESC to exit control").color(Color32::WHITE));
                    });
                });
        });
    clicked
}

fn joysticks(ctx: &Context, state: &AppState) {
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("joysticks")));
    for role in [JoystickRole::Move, JoystickRole::Look] {
        let device = state.joysticks.device(role);
        let center = egui::pos2(device.center().x, device.center().y);
        let radius = device.radius();
        let value = device.value();
        let alpha = if device.is_engaged() { 110 } else { 60 };
        painter.circle(
            center,
            radius,
            Color32::from_white_alpha(alpha / 2),
            Stroke::new(2.0, Color32::from_white_alpha(alpha)),
        );
        let knob = center + egui::vec2(value.x, value.y) * radius;
        painter.circle_filled(knob, radius * 0.35, Color32::from_white_alpha(alpha * 2));
        let label = match role {
            JoystickRole::Move => "MOVE",
            JoystickRole::Look => "LOOK",
        };
        painter.text(
            center - egui::vec2(0.0, radius + 12.0),
            Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(12.0),
            Color32::from_white_alpha(200),
        );
    }
}
