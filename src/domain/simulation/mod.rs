//! Vehicle state: operating modes, signal prop and wheel drive.
//!
//! The controllers here are plain structs that talk to the engine through the
//! traits in [`host`]. [`SimPlugin`] wires them into Bevy: visual work runs in
//! `Update`, drive work in `FixedUpdate`.

pub mod adapters;
pub mod config;
pub mod drive;
pub mod host;
pub mod kinematic;
pub mod mode;
pub mod scene;
pub mod signal;
pub mod systems;

use bevy::prelude::*;

pub use config::{ConfigError, DriveSettings, SignalSettings, VehicleConfig};
pub use drive::{DriveController, DriveInput, WheelCommand, WheelPosition};
pub use host::{Alarm, Light, LightRig, SignalProp, WheelPhysics, WheelPose, WheelVisuals};
pub use kinematic::{ChassisParams, KinematicWheels};
pub use mode::{AlertFlash, Mode, ModeController, ModeProfile, ModeProfiles, ModeTriggers};
pub use scene::{AlertLight, HeadLight, SignalEmblem, SignalLamp, VehicleBody, WheelVisual};
pub use signal::{SignalLightSettings, SignalState};
pub use systems::VehicleCommand;

/// Per-frame ordering in `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Commands,
    Animate,
}

/// Per-tick ordering in `FixedUpdate`. Visual sync must follow the step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    Input,
    Apply,
    Step,
    Sync,
}

pub struct SimPlugin {
    pub config: VehicleConfig,
}

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();
        app.insert_resource(ModeController::new(&config))
            .insert_resource(DriveController::new(config.drive.clone()))
            .insert_resource(KinematicWheels::new(
                ChassisParams::default(),
                Vec3::ZERO,
            ))
            .insert_resource(Time::<Fixed>::from_hz(config.physics_hz))
            .insert_resource(config)
            .init_resource::<DriveInput>()
            .add_event::<VehicleCommand>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Commands, FrameSet::Animate).chain(),
            )
            .configure_sets(
                FixedUpdate,
                (
                    PhysicsSet::Input,
                    PhysicsSet::Apply,
                    PhysicsSet::Step,
                    PhysicsSet::Sync,
                )
                    .chain(),
            )
            .add_systems(Startup, scene::spawn_vehicle_scene)
            .add_systems(PostStartup, systems::apply_initial_state)
            .add_systems(
                Update,
                (
                    (systems::apply_vehicle_commands, systems::sync_loaded_alarm)
                        .chain()
                        .in_set(FrameSet::Commands),
                    systems::vehicle_visual_update.in_set(FrameSet::Animate),
                ),
            )
            .add_systems(
                FixedUpdate,
                (
                    systems::apply_drive_commands.in_set(PhysicsSet::Apply),
                    systems::step_wheel_physics.in_set(PhysicsSet::Step),
                    (systems::sync_wheel_visuals, systems::sync_chassis_visual)
                        .in_set(PhysicsSet::Sync),
                ),
            );
    }
}
