use bevy::diagnostic::{
    DiagnosticsStore, EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::presentation::HudSettings;
use crate::domain::simulation::{KinematicWheels, Mode, ModeController};

pub fn show_diagnostics_panel(
    ctx: &mut egui::Context,
    diagnostics: &DiagnosticsStore,
    hud: &HudSettings,
    fixed: &Time<Fixed>,
    modes: &ModeController,
    wheels: &KinematicWheels,
) {
    if !hud.show_diagnostics {
        return;
    }
    egui::Window::new("Diagnostics").show(ctx, |ui| {
        if let Some(value) = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
        {
            ui.label(format!("FPS: {:.1}", value));
        }
        if let Some(value) = diagnostics
            .get(&EntityCountDiagnosticsPlugin::ENTITY_COUNT)
            .and_then(|count| count.value())
        {
            ui.label(format!("Entities: {}", value));
        }
        ui.separator();
        for (name, value) in vehicle_rows(fixed, modes, wheels) {
            ui.label(format!("{name}: {value}"));
        }
    });
}

fn vehicle_rows(
    fixed: &Time<Fixed>,
    modes: &ModeController,
    wheels: &KinematicWheels,
) -> Vec<(&'static str, String)> {
    let step = fixed.timestep().as_secs_f64();
    let tick_hz = if step > 0.0 { 1.0 / step } else { 0.0 };
    let chassis = wheels.chassis_transform();
    let (heading, _, _) = chassis.rotation.to_euler(EulerRot::YXZ);

    let mut rows = vec![
        ("Physics tick", format!("{tick_hz:.0} Hz")),
        ("Chassis speed", format!("{:.2} m/s", wheels.speed())),
        ("Heading", format!("{:.1}°", heading.to_degrees())),
        (
            "Position",
            format!("{:.1}, {:.1}", chassis.translation.x, chassis.translation.z),
        ),
    ];
    if modes.current_mode() == Mode::Alert {
        let phase = if modes.flash().lights_on { "even" } else { "odd" };
        rows.push(("Flash phase", phase.to_string()));
    }
    let signal = modes.signal();
    if signal.active {
        rows.push(("Signal spin", format!("{:.0}°", signal.rotation_deg)));
    }
    rows
}
