//! Steering, motor and brake commands for a front-wheel-drive chassis.
//!
//! Each physics tick the controller turns normalized driver input into one
//! [`WheelCommand`] per wheel, hands them to the wheel simulation and, once
//! the simulation has stepped, copies the resolved wheel poses onto the
//! visual wheels.

use bevy::prelude::*;

use super::config::DriveSettings;
use super::host::{WheelPhysics, WheelVisuals};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WheelPosition {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl WheelPosition {
    pub const ALL: [WheelPosition; 4] = [
        WheelPosition::FrontLeft,
        WheelPosition::FrontRight,
        WheelPosition::RearLeft,
        WheelPosition::RearRight,
    ];

    pub fn is_front(self) -> bool {
        matches!(self, WheelPosition::FrontLeft | WheelPosition::FrontRight)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-wheel command for one physics tick. `None` leaves the channel alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelCommand {
    pub steer_angle: Option<f32>,
    pub motor_torque: Option<f32>,
    pub brake_torque: f32,
}

/// Driver input sampled for one physics tick.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveInput {
    pub steering: f32,
    pub throttle: f32,
    pub boost: bool,
}

impl DriveInput {
    pub fn new(steering: f32, throttle: f32, boost: bool) -> Self {
        Self {
            steering: steering.clamp(-1.0, 1.0),
            throttle: throttle.clamp(-1.0, 1.0),
            boost,
        }
    }
}

#[derive(Resource, Clone, Debug)]
pub struct DriveController {
    settings: DriveSettings,
    brake_torque: f32,
    last_commands: [WheelCommand; 4],
}

impl DriveController {
    pub fn new(settings: DriveSettings) -> Self {
        Self {
            brake_torque: settings.brake_torque,
            settings,
            last_commands: [WheelCommand::default(); 4],
        }
    }

    pub fn settings(&self) -> &DriveSettings {
        &self.settings
    }

    pub fn brake_torque(&self) -> f32 {
        self.brake_torque
    }

    /// Nothing in the input path calls this; it is here for hosts that add a
    /// handbrake or scripted stops.
    pub fn set_brake_torque(&mut self, torque: f32) {
        self.brake_torque = torque.max(0.0);
    }

    /// Commands sent during the most recent tick, indexed by [`WheelPosition::index`].
    pub fn last_commands(&self) -> &[WheelCommand; 4] {
        &self.last_commands
    }

    pub fn steering_angle(&self, input: &DriveInput) -> f32 {
        self.settings.max_steering_angle * input.steering
    }

    pub fn motor_force(&self, input: &DriveInput, mode_multiplier: f32) -> f32 {
        let boost = if input.boost {
            self.settings.boost_multiplier
        } else {
            1.0
        };
        self.settings.motor_force * mode_multiplier * boost
    }

    pub fn motor_torque(&self, input: &DriveInput, mode_multiplier: f32) -> f32 {
        input.throttle * self.motor_force(input, mode_multiplier)
    }

    pub fn commands(&self, input: &DriveInput, mode_multiplier: f32) -> [WheelCommand; 4] {
        let steer = self.steering_angle(input);
        let torque = self.motor_torque(input, mode_multiplier);
        WheelPosition::ALL.map(|wheel| {
            if wheel.is_front() {
                WheelCommand {
                    steer_angle: Some(steer),
                    motor_torque: Some(torque),
                    brake_torque: self.brake_torque,
                }
            } else {
                WheelCommand {
                    steer_angle: None,
                    motor_torque: None,
                    brake_torque: self.brake_torque,
                }
            }
        })
    }

    pub fn apply<W: WheelPhysics + ?Sized>(
        &mut self,
        input: &DriveInput,
        mode_multiplier: f32,
        physics: &mut W,
    ) {
        let commands = self.commands(input, mode_multiplier);
        for wheel in WheelPosition::ALL {
            physics.apply(wheel, &commands[wheel.index()]);
        }
        self.last_commands = commands;
    }

    /// Copies resolved poses onto the visual wheels. Call only after `step`.
    pub fn sync_visuals<W, V>(physics: &W, visuals: &mut V)
    where
        W: WheelPhysics + ?Sized,
        V: WheelVisuals + ?Sized,
    {
        for wheel in WheelPosition::ALL {
            visuals.set_world_pose(wheel, physics.world_pose(wheel));
        }
    }

    /// Full tick for hosts without a scheduler: apply, step, then sync.
    pub fn physics_update<W, V>(
        &mut self,
        input: &DriveInput,
        mode_multiplier: f32,
        dt: f32,
        physics: &mut W,
        visuals: &mut V,
    ) where
        W: WheelPhysics + ?Sized,
        V: WheelVisuals + ?Sized,
    {
        self.apply(input, mode_multiplier, physics);
        physics.step(dt);
        Self::sync_visuals(physics, visuals);
    }
}
