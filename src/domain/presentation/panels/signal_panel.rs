use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::simulation::{SignalLightSettings, SignalState, VehicleCommand};

pub fn show_signal_panel(
    ctx: &mut egui::Context,
    signal: &SignalState,
    ev_command: &mut EventWriter<VehicleCommand>,
) {
    egui::Window::new("Signal Light")
        .default_open(false)
        .show(ctx, |ui| {
            let srgba = signal.light.color.to_srgba();
            let mut rgb = [srgba.red, srgba.green, srgba.blue];
            let mut intensity = signal.light.intensity;
            let mut range = signal.light.range;

            let mut changed = false;
            ui.horizontal(|ui| {
                ui.label("Color");
                changed |= ui.color_edit_button_rgb(&mut rgb).changed();
            });
            changed |= ui
                .add(egui::Slider::new(&mut intensity, 0.0..=10.0).text("Intensity"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut range, 0.0..=200.0).text("Range"))
                .changed();

            if changed {
                ev_command.send(VehicleCommand::SignalLight(SignalLightSettings {
                    color: Color::srgb(rgb[0], rgb[1], rgb[2]),
                    intensity,
                    range,
                }));
            }
        });
}
