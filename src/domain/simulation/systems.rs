use bevy::audio::AudioSink;
use bevy::prelude::*;

use super::adapters::{AlarmHandle, SignalParts, VehicleLights, WheelTransforms};
use super::drive::{DriveController, DriveInput};
use super::host::WheelPhysics;
use super::kinematic::KinematicWheels;
use super::mode::{Mode, ModeController, ModeTriggers};
use super::scene::{AlarmSpeaker, VehicleBody, WheelVisual};
use super::signal::SignalLightSettings;

/// Requests routed to the [`ModeController`], from input or the HUD.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum VehicleCommand {
    ModeTriggers(ModeTriggers),
    ChangeMode(Mode),
    ToggleSignal,
    SetSignal(bool),
    SignalLight(SignalLightSettings),
}

pub fn apply_initial_state(
    mut controller: ResMut<ModeController>,
    mut lights: VehicleLights,
    mut signal: SignalParts,
) {
    lights.with_rig(|rig| controller.set_mode(Mode::Normal, rig));
    signal.with_prop(|prop| match prop {
        Some(prop) => controller.attach_signal(prop),
        None => warn!("Signal prop missing; signal commands will only update state"),
    });
}

pub fn apply_vehicle_commands(
    mut events: EventReader<VehicleCommand>,
    mut controller: ResMut<ModeController>,
    mut lights: VehicleLights,
    mut signal: SignalParts,
) {
    for command in events.read() {
        match *command {
            VehicleCommand::ModeTriggers(triggers) => {
                lights.with_rig(|rig| controller.handle_mode_input(triggers, rig));
            }
            VehicleCommand::ChangeMode(mode) => {
                lights.with_rig(|rig| controller.change_mode(mode, rig));
            }
            VehicleCommand::ToggleSignal => {
                signal.with_prop(|prop| controller.toggle_signal(prop));
            }
            VehicleCommand::SetSignal(active) => {
                signal.with_prop(|prop| controller.set_signal(active, prop));
            }
            VehicleCommand::SignalLight(settings) => {
                signal.with_prop(|prop| controller.set_signal_light_settings(settings, prop));
            }
        }
    }
}

/// The sink is inserted once the alarm asset has loaded, possibly after the
/// mode already asked for it.
pub fn sync_loaded_alarm(
    controller: Res<ModeController>,
    speakers: Query<&AudioSink, (With<AlarmSpeaker>, Added<AudioSink>)>,
) {
    for sink in speakers.iter() {
        debug!("Alarm sound ready, syncing to {}", controller.current_mode());
        controller.sync_alarm(&mut AlarmHandle(sink));
    }
}

pub fn vehicle_visual_update(
    time: Res<Time>,
    mut controller: ResMut<ModeController>,
    mut lights: VehicleLights,
    mut signal: SignalParts,
) {
    let dt = time.delta_seconds();
    let elapsed = time.elapsed_seconds();
    lights.with_rig(|rig| {
        signal.with_prop(|prop| controller.visual_update(dt, elapsed, rig, prop));
    });
}

pub fn apply_drive_commands(
    input: Res<DriveInput>,
    modes: Res<ModeController>,
    mut drive: ResMut<DriveController>,
    mut wheels: ResMut<KinematicWheels>,
) {
    drive.apply(&input, modes.speed_multiplier(), &mut *wheels);
}

pub fn step_wheel_physics(time: Res<Time>, mut wheels: ResMut<KinematicWheels>) {
    wheels.step(time.delta_seconds());
}

pub fn sync_wheel_visuals(
    wheels: Res<KinematicWheels>,
    mut visuals: Query<(&WheelVisual, &mut Transform)>,
) {
    let mut transforms = WheelTransforms(
        visuals
            .iter_mut()
            .map(|(visual, transform)| (visual.0, transform))
            .collect(),
    );
    DriveController::sync_visuals(&*wheels, &mut transforms);
}

pub fn sync_chassis_visual(
    wheels: Res<KinematicWheels>,
    mut bodies: Query<&mut Transform, With<VehicleBody>>,
) {
    for mut transform in bodies.iter_mut() {
        *transform = wheels.chassis_transform();
    }
}
