use std::fmt;

use bevy::prelude::*;

use super::config::VehicleConfig;
use super::host::{Alarm, Light, LightRig, SignalProp};
use super::signal::{SignalLightSettings, SignalState};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Mode {
    #[default]
    Normal,
    Stealth,
    Alert,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Stealth, Mode::Alert];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "Normal",
            Mode::Stealth => "Stealth",
            Mode::Alert => "Alert",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeProfile {
    pub speed_multiplier: f32,
    pub main_light_intensity: f32,
    pub alert_lights_enabled: bool,
    pub alarm_playing: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModeProfiles {
    pub normal: ModeProfile,
    pub stealth: ModeProfile,
    pub alert: ModeProfile,
}

impl Default for ModeProfiles {
    fn default() -> Self {
        Self {
            normal: ModeProfile {
                speed_multiplier: 1.0,
                main_light_intensity: 1.5,
                alert_lights_enabled: false,
                alarm_playing: false,
            },
            stealth: ModeProfile {
                speed_multiplier: 0.5,
                main_light_intensity: 0.2,
                alert_lights_enabled: false,
                alarm_playing: false,
            },
            alert: ModeProfile {
                speed_multiplier: 1.2,
                main_light_intensity: 3.0,
                alert_lights_enabled: true,
                alarm_playing: true,
            },
        }
    }
}

impl ModeProfiles {
    pub fn get(&self, mode: Mode) -> &ModeProfile {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Stealth => &self.stealth,
            Mode::Alert => &self.alert,
        }
    }
}

/// Edge-detected toggle presses sampled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeTriggers {
    pub stealth: bool,
    pub alert: bool,
}

/// Alternating flash of the alert light bar.
#[derive(Clone, Debug)]
pub struct AlertFlash {
    pub timer: f32,
    pub interval: f32,
    pub lights_on: bool,
}

impl AlertFlash {
    pub fn new(interval: f32) -> Self {
        Self {
            timer: 0.0,
            interval,
            lights_on: true,
        }
    }

    /// Returns true when the phase flipped during this advance.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer >= self.interval {
            self.timer = 0.0;
            self.lights_on = !self.lights_on;
            return true;
        }
        false
    }

    /// Even lights follow the phase, odd lights the opposite one.
    pub fn enabled_for(&self, index: usize) -> bool {
        if index % 2 == 0 {
            self.lights_on
        } else {
            !self.lights_on
        }
    }
}

/// Owns the active mode and the signal prop toggle.
#[derive(Resource, Clone, Debug)]
pub struct ModeController {
    mode: Mode,
    profiles: ModeProfiles,
    flash: AlertFlash,
    signal: SignalState,
}

impl ModeController {
    pub fn new(config: &VehicleConfig) -> Self {
        Self {
            mode: Mode::Normal,
            profiles: config.profiles.clone(),
            flash: AlertFlash::new(config.alert_flash_interval),
            signal: SignalState::new(&config.signal),
        }
    }

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    pub fn profile(&self) -> &ModeProfile {
        self.profiles.get(self.mode)
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.profile().speed_multiplier
    }

    pub fn flash(&self) -> &AlertFlash {
        &self.flash
    }

    pub fn signal(&self) -> &SignalState {
        &self.signal
    }

    pub fn set_mode<M: Light, A: Light>(&mut self, mode: Mode, rig: &mut LightRig<'_, M, A>) {
        self.mode = mode;
        let profile = *self.profiles.get(mode);

        for light in rig.main_lights.iter_mut() {
            light.set_intensity(profile.main_light_intensity);
        }
        for light in rig.alert_lights.iter_mut() {
            light.set_enabled(profile.alert_lights_enabled);
        }
        if let Some(alarm) = rig.alarm.as_deref_mut() {
            self.sync_alarm(alarm);
        }

        info!("Vehicle mode: {mode}");
    }

    /// Brings an alarm in line with the current profile. Also used for a
    /// speaker that only becomes available after the mode was set.
    pub fn sync_alarm(&self, alarm: &mut dyn Alarm) {
        if self.profile().alarm_playing {
            if !alarm.is_playing() {
                alarm.play_looping();
            }
        } else if alarm.is_playing() {
            alarm.stop();
        }
    }

    /// Public entry point for callers outside the input path.
    pub fn change_mode<M: Light, A: Light>(&mut self, mode: Mode, rig: &mut LightRig<'_, M, A>) {
        self.set_mode(mode, rig);
    }

    pub fn handle_mode_input<M: Light, A: Light>(
        &mut self,
        triggers: ModeTriggers,
        rig: &mut LightRig<'_, M, A>,
    ) {
        if triggers.stealth {
            let next = if self.mode == Mode::Stealth {
                Mode::Normal
            } else {
                Mode::Stealth
            };
            self.set_mode(next, rig);
        }
        if triggers.alert {
            let next = if self.mode == Mode::Alert {
                Mode::Normal
            } else {
                Mode::Alert
            };
            self.set_mode(next, rig);
        }
    }

    pub fn advance_alert_flash<A: Light>(&mut self, dt: f32, alert_lights: &mut [A]) {
        if self.mode != Mode::Alert {
            return;
        }
        if self.flash.advance(dt) {
            for (index, light) in alert_lights.iter_mut().enumerate() {
                light.set_enabled(self.flash.enabled_for(index));
            }
        }
    }

    pub fn advance_signal<P: SignalProp + ?Sized>(
        &mut self,
        dt: f32,
        elapsed: f32,
        prop: Option<&mut P>,
    ) {
        self.signal.advance(dt, elapsed, prop);
    }

    /// Per-frame animation: alert flashing, then signal spin and bob.
    pub fn visual_update<M: Light, A: Light, P: SignalProp + ?Sized>(
        &mut self,
        dt: f32,
        elapsed: f32,
        rig: &mut LightRig<'_, M, A>,
        prop: Option<&mut P>,
    ) {
        self.advance_alert_flash(dt, &mut *rig.alert_lights);
        self.advance_signal(dt, elapsed, prop);
    }

    pub fn attach_signal<P: SignalProp + ?Sized>(&mut self, prop: &mut P) {
        self.signal.attach(prop);
    }

    pub fn toggle_signal<P: SignalProp + ?Sized>(&mut self, prop: Option<&mut P>) -> bool {
        let active = !self.signal.active;
        self.signal.set_active(active, prop);
        info!("Signal: {}", if active { "ON" } else { "OFF" });
        active
    }

    pub fn set_signal<P: SignalProp + ?Sized>(&mut self, active: bool, prop: Option<&mut P>) {
        self.signal.set_active(active, prop);
    }

    pub fn set_signal_light_settings<P: SignalProp + ?Sized>(
        &mut self,
        settings: SignalLightSettings,
        prop: Option<&mut P>,
    ) {
        self.signal.set_light_settings(settings, prop);
    }
}
