//! Bevy component adapters for the collaborator traits in `host`.

use bevy::audio::{AudioSink, AudioSinkPlayback};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::config::VehicleConfig;
use super::drive::WheelPosition;
use super::host::{Alarm, Light, LightRig, SignalProp, WheelPose, WheelVisuals};
use super::scene::{AlarmSpeaker, AlertLight, HeadLight, SignalEmblem, SignalLamp};
use super::signal::SignalLightSettings;

/// Bevy light components with a scalar intensity.
pub trait Lamp: Component {
    fn intensity_mut(&mut self) -> &mut f32;
}

impl Lamp for PointLight {
    fn intensity_mut(&mut self) -> &mut f32 {
        &mut self.intensity
    }
}

impl Lamp for SpotLight {
    fn intensity_mut(&mut self) -> &mut f32 {
        &mut self.intensity
    }
}

pub struct LampHandle<'w, T: Lamp> {
    pub light: Mut<'w, T>,
    pub visibility: Mut<'w, Visibility>,
    pub lumens_per_unit: f32,
}

impl<T: Lamp> Light for LampHandle<'_, T> {
    fn set_intensity(&mut self, intensity: f32) {
        *self.light.intensity_mut() = intensity * self.lumens_per_unit;
    }

    fn set_enabled(&mut self, enabled: bool) {
        *self.visibility = visibility(enabled);
    }
}

pub struct AlarmHandle<'a>(pub &'a AudioSink);

impl Alarm for AlarmHandle<'_> {
    fn play_looping(&mut self) {
        // Looping is baked into the speaker's PlaybackSettings at spawn.
        self.0.play();
    }

    fn stop(&mut self) {
        self.0.pause();
    }

    fn is_playing(&self) -> bool {
        !self.0.is_paused()
    }
}

pub struct EmblemHandle<'w> {
    pub transform: Mut<'w, Transform>,
    pub visibility: Mut<'w, Visibility>,
    pub lamp: Option<(Mut<'w, PointLight>, Mut<'w, Visibility>)>,
    pub facing: Quat,
    pub lumens_per_unit: f32,
}

impl SignalProp for EmblemHandle<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn set_spin(&mut self, degrees: f32) {
        self.transform.rotation = self.facing * Quat::from_rotation_z(degrees.to_radians());
    }

    fn set_visible(&mut self, visible: bool) {
        *self.visibility = visibility(visible);
    }

    fn set_light_enabled(&mut self, enabled: bool) {
        if let Some((_, lamp_visibility)) = self.lamp.as_mut() {
            **lamp_visibility = visibility(enabled);
        }
    }

    fn apply_light_settings(&mut self, settings: &SignalLightSettings) {
        if let Some((lamp, _)) = self.lamp.as_mut() {
            lamp.color = settings.color;
            lamp.intensity = settings.intensity * self.lumens_per_unit;
            lamp.range = settings.range;
        }
    }
}

fn visibility(on: bool) -> Visibility {
    if on {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

pub struct WheelTransforms<'w>(pub Vec<(WheelPosition, Mut<'w, Transform>)>);

impl WheelVisuals for WheelTransforms<'_> {
    fn set_world_pose(&mut self, wheel: WheelPosition, pose: WheelPose) {
        for (position, transform) in self.0.iter_mut() {
            if *position == wheel {
                transform.translation = pose.position;
                transform.rotation = pose.rotation;
            }
        }
    }
}

pub type HeadLamp<'w> = LampHandle<'w, SpotLight>;
pub type AlertLamp<'w> = LampHandle<'w, PointLight>;

/// Head lights, alert bar and alarm speaker of the vehicle.
#[derive(SystemParam)]
pub struct VehicleLights<'w, 's> {
    heads: Query<
        'w,
        's,
        (&'static mut SpotLight, &'static mut Visibility),
        (
            With<HeadLight>,
            Without<AlertLight>,
            Without<SignalEmblem>,
            Without<SignalLamp>,
        ),
    >,
    alerts: Query<
        'w,
        's,
        (
            &'static AlertLight,
            &'static mut PointLight,
            &'static mut Visibility,
        ),
        (Without<SignalLamp>, Without<SignalEmblem>),
    >,
    alarm: Query<'w, 's, &'static AudioSink, With<AlarmSpeaker>>,
    config: Res<'w, VehicleConfig>,
}

impl VehicleLights<'_, '_> {
    pub fn with_rig<R>(
        &mut self,
        f: impl FnOnce(&mut LightRig<'_, HeadLamp<'_>, AlertLamp<'_>>) -> R,
    ) -> R {
        let lumens_per_unit = self.config.lumens_per_unit;

        let mut heads: Vec<HeadLamp> = self
            .heads
            .iter_mut()
            .map(|(light, visibility)| LampHandle {
                light,
                visibility,
                lumens_per_unit,
            })
            .collect();

        let mut tagged: Vec<_> = self.alerts.iter_mut().collect();
        tagged.sort_by_key(|(tag, _, _)| tag.index);
        let mut alerts: Vec<AlertLamp> = tagged
            .into_iter()
            .map(|(_, light, visibility)| LampHandle {
                light,
                visibility,
                lumens_per_unit,
            })
            .collect();

        let mut alarm = self.alarm.get_single().ok().map(AlarmHandle);
        let mut rig = LightRig::new(&mut heads, &mut alerts)
            .with_alarm(alarm.as_mut().map(|a| a as &mut dyn Alarm));
        f(&mut rig)
    }
}

/// The signal emblem and its child lamp.
#[derive(SystemParam)]
pub struct SignalParts<'w, 's> {
    emblem: Query<
        'w,
        's,
        (
            &'static SignalEmblem,
            &'static mut Transform,
            &'static mut Visibility,
        ),
        (Without<SignalLamp>, Without<AlertLight>, Without<HeadLight>),
    >,
    lamp: Query<
        'w,
        's,
        (&'static mut PointLight, &'static mut Visibility),
        (
            With<SignalLamp>,
            Without<AlertLight>,
            Without<SignalEmblem>,
            Without<HeadLight>,
        ),
    >,
    config: Res<'w, VehicleConfig>,
}

impl SignalParts<'_, '_> {
    pub fn with_prop<R>(&mut self, f: impl FnOnce(Option<&mut EmblemHandle<'_>>) -> R) -> R {
        let lumens_per_unit = self.config.lumens_per_unit;
        let lamp = self.lamp.iter_mut().next();
        let mut handle = self
            .emblem
            .get_single_mut()
            .ok()
            .map(|(emblem, transform, visibility)| EmblemHandle {
                transform,
                visibility,
                lamp,
                facing: emblem.facing,
                lumens_per_unit,
            });
        f(handle.as_mut())
    }
}
