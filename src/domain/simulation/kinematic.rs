//! Kinematic bicycle-model stand-in for an engine wheel collider set.
//!
//! Enough to make the demo chassis roll, turn and spin its wheels. There is
//! no suspension, no tire slip and no collision.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::drive::{WheelCommand, WheelPosition};
use super::host::{WheelPhysics, WheelPose};

#[derive(Clone, Debug)]
pub struct ChassisParams {
    pub mass: f32,
    pub wheel_radius: f32,
    pub wheel_base: f32,
    pub track_width: f32,
    pub ride_height: f32,
    /// Linear drag, newtons per m/s.
    pub drag: f32,
}

impl Default for ChassisParams {
    fn default() -> Self {
        Self {
            mass: 1500.0,
            wheel_radius: 0.4,
            wheel_base: 2.8,
            track_width: 1.8,
            ride_height: 0.4,
            drag: 400.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct WheelState {
    steer_deg: f32,
    motor_torque: f32,
    brake_torque: f32,
    spin: f32,
}

#[derive(Resource, Clone, Debug)]
pub struct KinematicWheels {
    params: ChassisParams,
    position: Vec3,
    heading: f32,
    speed: f32,
    wheels: [WheelState; 4],
    poses: [WheelPose; 4],
}

impl KinematicWheels {
    pub fn new(params: ChassisParams, position: Vec3) -> Self {
        let mut sim = Self {
            params,
            position,
            heading: 0.0,
            speed: 0.0,
            wheels: [WheelState::default(); 4],
            poses: [WheelPose::default(); 4],
        };
        sim.resolve_poses();
        sim
    }

    pub fn params(&self) -> &ChassisParams {
        &self.params
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn chassis_transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.chassis_rotation())
    }

    fn chassis_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.heading)
    }

    /// Chassis-local mount point. Forward is -Z.
    fn mount(&self, wheel: WheelPosition) -> Vec3 {
        let half_track = self.params.track_width * 0.5;
        let half_base = self.params.wheel_base * 0.5;
        let x = match wheel {
            WheelPosition::FrontLeft | WheelPosition::RearLeft => -half_track,
            WheelPosition::FrontRight | WheelPosition::RearRight => half_track,
        };
        let z = if wheel.is_front() { -half_base } else { half_base };
        Vec3::new(x, self.params.wheel_radius - self.params.ride_height, z)
    }

    fn front_steer_rad(&self) -> f32 {
        let left = self.wheels[WheelPosition::FrontLeft.index()].steer_deg;
        let right = self.wheels[WheelPosition::FrontRight.index()].steer_deg;
        ((left + right) * 0.5).to_radians()
    }

    fn resolve_poses(&mut self) {
        let chassis = self.chassis_rotation();
        for wheel in WheelPosition::ALL {
            let state = self.wheels[wheel.index()];
            let steer = if wheel.is_front() {
                Quat::from_rotation_y(-state.steer_deg.to_radians())
            } else {
                Quat::IDENTITY
            };
            // Cylinder meshes stand along Y; lay the axle along X.
            let axle = Quat::from_rotation_z(FRAC_PI_2);
            let spin = Quat::from_rotation_y(state.spin);
            self.poses[wheel.index()] = WheelPose {
                position: self.position + chassis * self.mount(wheel),
                rotation: chassis * steer * axle * spin,
            };
        }
    }
}

impl WheelPhysics for KinematicWheels {
    fn apply(&mut self, wheel: WheelPosition, command: &WheelCommand) {
        let state = &mut self.wheels[wheel.index()];
        if let Some(steer) = command.steer_angle {
            state.steer_deg = steer;
        }
        if let Some(torque) = command.motor_torque {
            state.motor_torque = torque;
        }
        state.brake_torque = command.brake_torque;
    }

    fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let p = &self.params;
        let radius = p.wheel_radius.max(0.01);
        let drive: f32 = self.wheels.iter().map(|w| w.motor_torque).sum::<f32>() / radius;
        let brake: f32 = self.wheels.iter().map(|w| w.brake_torque).sum::<f32>() / radius;

        let mut speed = self.speed + (drive - p.drag * self.speed) / p.mass.max(1.0) * dt;
        let brake_dv = brake / p.mass.max(1.0) * dt;
        speed = if speed.abs() <= brake_dv {
            0.0
        } else {
            speed - brake_dv * speed.signum()
        };

        let yaw_rate = -speed * self.front_steer_rad().tan() / p.wheel_base.max(0.1);
        self.heading += yaw_rate * dt;
        let forward = self.chassis_rotation() * Vec3::NEG_Z;
        self.position += forward * speed * dt;
        self.speed = speed;

        let spin = speed * dt / radius;
        for wheel in self.wheels.iter_mut() {
            wheel.spin = (wheel.spin - spin).rem_euclid(std::f32::consts::TAU);
        }
        self.resolve_poses();
    }

    fn world_pose(&self, wheel: WheelPosition) -> WheelPose {
        self.poses[wheel.index()]
    }
}
