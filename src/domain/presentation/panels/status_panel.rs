use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::simulation::{
    DriveController, KinematicWheels, Mode, ModeController, VehicleCommand, WheelPosition,
};

pub fn show_status_panel(
    ctx: &mut egui::Context,
    modes: &ModeController,
    drive: &DriveController,
    wheels: &KinematicWheels,
    ev_command: &mut EventWriter<VehicleCommand>,
) {
    egui::Window::new("Vehicle").show(ctx, |ui| {
        ui.label(format!("Mode: {}", modes.current_mode()));
        ui.label(format!("Speed multiplier: {:.2}x", modes.speed_multiplier()));
        ui.label(format!("Speed: {:.1} m/s", wheels.speed()));
        ui.label(drive_summary(drive, modes.speed_multiplier()));

        ui.horizontal(|ui| {
            for mode in Mode::ALL {
                let selected = modes.current_mode() == mode;
                if ui.selectable_label(selected, mode.to_string()).clicked() && !selected {
                    ev_command.send(VehicleCommand::ChangeMode(mode));
                }
            }
        });

        ui.separator();

        let mut active = modes.signal().active;
        if ui.checkbox(&mut active, "Signal").changed() {
            ev_command.send(VehicleCommand::SetSignal(active));
        }

        ui.separator();

        egui::Grid::new("wheel_commands").striped(true).show(ui, |ui| {
            ui.label("Wheel");
            ui.label("Steer");
            ui.label("Motor");
            ui.label("Brake");
            ui.end_row();
            for wheel in WheelPosition::ALL {
                let command = drive.last_commands()[wheel.index()];
                ui.label(format!("{:?}", wheel));
                ui.label(
                    command
                        .steer_angle
                        .map_or("-".to_string(), |deg| format!("{:.1}°", deg)),
                );
                ui.label(
                    command
                        .motor_torque
                        .map_or("-".to_string(), |t| format!("{:.0}", t)),
                );
                ui.label(format!("{:.0}", command.brake_torque));
                ui.end_row();
            }
        });
    });
}

/// Effective drive limits under the current mode.
fn drive_summary(drive: &DriveController, mode_multiplier: f32) -> String {
    let settings = drive.settings();
    format!(
        "Steer ±{:.0}°  Force {:.0} (boost {:.0})  Brake {:.0}",
        settings.max_steering_angle,
        settings.motor_force * mode_multiplier,
        settings.motor_force * mode_multiplier * settings.boost_multiplier,
        drive.brake_torque(),
    )
}
