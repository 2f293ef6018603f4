use bevy::prelude::*;

use super::config::SignalSettings;
use super::host::SignalProp;

/// Runtime-adjustable parameters of the signal prop's point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalLightSettings {
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
}

impl Default for SignalLightSettings {
    fn default() -> Self {
        Self {
            color: Color::srgb(1.0, 0.92, 0.016),
            intensity: 3.0,
            range: 50.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SignalState {
    pub active: bool,
    pub base_position: Vec3,
    /// Kept in [0, 360).
    pub rotation_deg: f32,
    pub light: SignalLightSettings,
    rotation_speed: f32,
    float_speed: f32,
    float_amount: f32,
}

impl SignalState {
    pub fn new(settings: &SignalSettings) -> Self {
        Self {
            active: false,
            base_position: Vec3::ZERO,
            rotation_deg: 0.0,
            light: settings.light,
            rotation_speed: settings.rotation_speed,
            float_speed: settings.float_speed,
            float_amount: settings.float_amount,
        }
    }

    /// Captures the prop's resting position, configures its light and hides it.
    pub fn attach<P: SignalProp + ?Sized>(&mut self, prop: &mut P) {
        self.base_position = prop.position();
        prop.apply_light_settings(&self.light);
        self.active = false;
        show(prop, false);
    }

    pub fn set_active<P: SignalProp + ?Sized>(&mut self, active: bool, prop: Option<&mut P>) {
        self.active = active;
        if let Some(prop) = prop {
            show(prop, active);
        }
    }

    pub fn set_light_settings<P: SignalProp + ?Sized>(
        &mut self,
        settings: SignalLightSettings,
        prop: Option<&mut P>,
    ) {
        self.light = settings;
        if let Some(prop) = prop {
            prop.apply_light_settings(&settings);
        }
    }

    /// Spins and bobs the prop. Does nothing while inactive.
    pub fn advance<P: SignalProp + ?Sized>(&mut self, dt: f32, elapsed: f32, prop: Option<&mut P>) {
        if !self.active {
            return;
        }
        self.rotation_deg = (self.rotation_deg + self.rotation_speed * dt).rem_euclid(360.0);

        let Some(prop) = prop else {
            return;
        };
        prop.set_spin(self.rotation_deg);
        let mut position = prop.position();
        position.y = self.bob_height(elapsed);
        prop.set_position(position);
    }

    pub fn bob_height(&self, elapsed: f32) -> f32 {
        self.base_position.y + (elapsed * self.float_speed).sin() * self.float_amount
    }
}

fn show<P: SignalProp + ?Sized>(prop: &mut P, visible: bool) {
    prop.set_visible(visible);
    prop.set_light_enabled(visible);
}
