use bevy_egui::egui;

use crate::domain::controls::Keybinds;
use crate::domain::presentation::HudSettings;

pub fn show_help_panel(ctx: &mut egui::Context, hud: &HudSettings, keybinds: &Keybinds) {
    if hud.show_help {
        egui::Window::new("Help").show(ctx, |ui| {
            ui.label(format!(
                "{:?}/{:?}/{:?}/{:?} or Arrows: Drive",
                keybinds.throttle, keybinds.left, keybinds.reverse, keybinds.right
            ));
            ui.label(format!("{:?}/{:?}: Boost", keybinds.boost, keybinds.boost_alt));
            ui.label(format!("{:?}: Toggle Stealth", keybinds.stealth));
            ui.label(format!("{:?}: Toggle Alert", keybinds.alert));
            ui.label(format!("{:?}: Toggle Signal", keybinds.signal));
            ui.label("F: Toggle Camera Follow");
            ui.label("H: Toggle Help");
            ui.label("F3: Toggle Diagnostics");
        });
    }
}
