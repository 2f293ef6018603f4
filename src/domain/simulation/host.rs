//! Collaborator seams between the vehicle core and whatever engine hosts it.
//!
//! The controllers in this module tree never own lights, speakers, wheels or
//! scene objects. They push property changes through these traits, and the
//! host decides what a "light" or a "wheel" actually is. `adapters` wires them
//! to Bevy components; tests wire them to recording mocks.

use bevy::prelude::*;

use super::drive::{WheelCommand, WheelPosition};
use super::signal::SignalLightSettings;

/// A lamp whose brightness and on/off state can be driven.
pub trait Light {
    fn set_intensity(&mut self, intensity: f32);
    fn set_enabled(&mut self, enabled: bool);
}

/// Looping alarm playback.
pub trait Alarm {
    fn play_looping(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// The floating signal emblem together with the point light it owns.
///
/// Hiding the emblem does not implicitly switch its light off; callers toggle
/// both explicitly.
pub trait SignalProp {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    /// Absolute spin around the emblem's facing axis, in degrees.
    fn set_spin(&mut self, degrees: f32);
    fn set_visible(&mut self, visible: bool);
    fn set_light_enabled(&mut self, enabled: bool);
    fn apply_light_settings(&mut self, settings: &SignalLightSettings);
}

/// Simulated world pose of a wheel, as read back from physics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for WheelPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Wheel contact simulation owned by the host.
///
/// `apply` only writes the channels a command carries; `None` channels keep
/// whatever the simulation already holds. Poses returned by `world_pose`
/// reflect the most recent `step`.
pub trait WheelPhysics {
    fn apply(&mut self, wheel: WheelPosition, command: &WheelCommand);
    fn step(&mut self, dt: f32);
    fn world_pose(&self, wheel: WheelPosition) -> WheelPose;
}

/// Visual wheel transforms that mirror the simulated poses.
pub trait WheelVisuals {
    fn set_world_pose(&mut self, wheel: WheelPosition, pose: WheelPose);
}

/// Everything a mode change touches. Any part may be missing.
pub struct LightRig<'a, M, A> {
    pub main_lights: &'a mut [M],
    pub alert_lights: &'a mut [A],
    pub alarm: Option<&'a mut dyn Alarm>,
}

impl<'a, M: Light, A: Light> LightRig<'a, M, A> {
    pub fn new(main_lights: &'a mut [M], alert_lights: &'a mut [A]) -> Self {
        Self {
            main_lights,
            alert_lights,
            alarm: None,
        }
    }

    pub fn with_alarm(mut self, alarm: Option<&'a mut dyn Alarm>) -> Self {
        self.alarm = alarm;
        self
    }
}
