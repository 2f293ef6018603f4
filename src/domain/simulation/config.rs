use bevy::prelude::*;
use thiserror::Error;

use super::mode::{Mode, ModeProfile, ModeProfiles};
use super::signal::SignalLightSettings;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{mode:?} speed multiplier must be positive, got {value}")]
    SpeedMultiplier { mode: Mode, value: f32 },
    #[error("{mode:?} main light intensity must not be negative, got {value}")]
    MainLightIntensity { mode: Mode, value: f32 },
    #[error("alert flash interval must be positive, got {0}")]
    FlashInterval(f32),
    #[error("motor force must be positive, got {0}")]
    MotorForce(f32),
    #[error("boost multiplier must be at least 1, got {0}")]
    BoostMultiplier(f32),
    #[error("brake torque must not be negative, got {0}")]
    BrakeTorque(f32),
    #[error("physics rate must be positive, got {0} Hz")]
    PhysicsRate(f64),
    #[error("signal light {field} must not be negative, got {value}")]
    SignalLight { field: &'static str, value: f32 },
    #[error("lumens per unit must be positive, got {0}")]
    LumensPerUnit(f32),
    #[error("{0} is not a finite number")]
    NotFinite(&'static str),
}

#[derive(Clone, Debug)]
pub struct DriveSettings {
    pub max_steering_angle: f32,
    pub motor_force: f32,
    pub brake_torque: f32,
    pub boost_multiplier: f32,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            max_steering_angle: 30.0,
            motor_force: 1000.0,
            brake_torque: 0.0,
            boost_multiplier: 2.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SignalSettings {
    /// Degrees per second.
    pub rotation_speed: f32,
    pub float_speed: f32,
    pub float_amount: f32,
    pub light: SignalLightSettings,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            rotation_speed: 10.0,
            float_speed: 1.0,
            float_amount: 0.5,
            light: SignalLightSettings::default(),
        }
    }
}

/// Startup configuration for the vehicle. Read-only once the app is running.
#[derive(Resource, Clone, Debug)]
pub struct VehicleConfig {
    pub drive: DriveSettings,
    pub profiles: ModeProfiles,
    pub alert_flash_interval: f32,
    pub signal: SignalSettings,
    pub physics_hz: f64,
    /// Lumens emitted per unit of profile intensity.
    pub lumens_per_unit: f32,
    pub alarm_sound: Option<String>,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            drive: DriveSettings::default(),
            profiles: ModeProfiles::default(),
            alert_flash_interval: 0.2,
            signal: SignalSettings::default(),
            physics_hz: 50.0,
            lumens_per_unit: 800.0,
            alarm_sound: None,
        }
    }
}

impl VehicleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in Mode::ALL {
            let ModeProfile {
                speed_multiplier,
                main_light_intensity,
                ..
            } = *self.profiles.get(mode);
            if !(speed_multiplier.is_finite() && speed_multiplier > 0.0) {
                return Err(ConfigError::SpeedMultiplier {
                    mode,
                    value: speed_multiplier,
                });
            }
            if !main_light_intensity.is_finite() {
                return Err(ConfigError::NotFinite("main light intensity"));
            }
            if main_light_intensity < 0.0 {
                return Err(ConfigError::MainLightIntensity {
                    mode,
                    value: main_light_intensity,
                });
            }
        }

        let drive = &self.drive;
        finite("max steering angle", drive.max_steering_angle)?;
        finite("motor force", drive.motor_force)?;
        finite("brake torque", drive.brake_torque)?;
        finite("boost multiplier", drive.boost_multiplier)?;
        if drive.motor_force <= 0.0 {
            return Err(ConfigError::MotorForce(drive.motor_force));
        }
        if drive.brake_torque < 0.0 {
            return Err(ConfigError::BrakeTorque(drive.brake_torque));
        }
        if drive.boost_multiplier < 1.0 {
            return Err(ConfigError::BoostMultiplier(drive.boost_multiplier));
        }

        finite("alert flash interval", self.alert_flash_interval)?;
        if self.alert_flash_interval <= 0.0 {
            return Err(ConfigError::FlashInterval(self.alert_flash_interval));
        }

        if !(self.physics_hz.is_finite() && self.physics_hz > 0.0) {
            return Err(ConfigError::PhysicsRate(self.physics_hz));
        }

        let signal = &self.signal;
        finite("signal rotation speed", signal.rotation_speed)?;
        finite("signal float speed", signal.float_speed)?;
        finite("signal float amount", signal.float_amount)?;
        finite("lumens per unit", self.lumens_per_unit)?;
        if self.lumens_per_unit <= 0.0 {
            return Err(ConfigError::LumensPerUnit(self.lumens_per_unit));
        }
        signal.light.validate()?;

        Ok(())
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite(name))
    }
}

impl SignalLightSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("signal light intensity", self.intensity)?;
        finite("signal light range", self.range)?;
        if self.intensity < 0.0 {
            return Err(ConfigError::SignalLight {
                field: "intensity",
                value: self.intensity,
            });
        }
        if self.range < 0.0 {
            return Err(ConfigError::SignalLight {
                field: "range",
                value: self.range,
            });
        }
        Ok(())
    }
}
