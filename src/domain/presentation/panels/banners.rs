use bevy_egui::egui::{self, Align2, Color32, FontId, RichText};

use crate::domain::simulation::Mode;

pub fn show_mode_banner(ctx: &mut egui::Context, mode: Mode) {
    let color = match mode {
        Mode::Normal => return,
        Mode::Stealth => Color32::from_rgb(120, 140, 255),
        Mode::Alert => Color32::RED,
    };
    egui::Area::new("mode_banner".into())
        .anchor(Align2::CENTER_TOP, egui::Vec2::new(0.0, 12.0))
        .show(ctx, |ui| {
            let text = RichText::new(mode.to_string().to_uppercase())
                .font(FontId::proportional(36.0))
                .color(color);
            ui.label(text);
        });
}
