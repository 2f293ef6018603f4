use batmobile_rs::domain::simulation::{
    Alarm, Light, LightRig, Mode, ModeController, ModeTriggers, SignalLightSettings, SignalProp,
    VehicleConfig,
};
use bevy::prelude::*;

#[derive(Default, Debug)]
struct MockLight {
    intensity: Option<f32>,
    enabled: Option<bool>,
}

impl Light for MockLight {
    fn set_intensity(&mut self, intensity: f32) {
        self.intensity = Some(intensity);
    }
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = Some(enabled);
    }
}

#[derive(Default)]
struct MockAlarm {
    playing: bool,
    plays: usize,
    stops: usize,
}

impl Alarm for MockAlarm {
    fn play_looping(&mut self) {
        self.playing = true;
        self.plays += 1;
    }
    fn stop(&mut self) {
        self.playing = false;
        self.stops += 1;
    }
    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[derive(Default)]
struct MockProp {
    position: Vec3,
    visible: bool,
    light_enabled: bool,
}

impl SignalProp for MockProp {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
    fn set_spin(&mut self, _degrees: f32) {}
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
    fn set_light_enabled(&mut self, enabled: bool) {
        self.light_enabled = enabled;
    }
    fn apply_light_settings(&mut self, _settings: &SignalLightSettings) {}
}

fn lights(n: usize) -> Vec<MockLight> {
    (0..n).map(|_| MockLight::default()).collect()
}

fn controller() -> ModeController {
    ModeController::new(&VehicleConfig::default())
}

#[test]
fn test_set_mode_then_current_mode_round_trips() {
    let mut modes = controller();
    let mut main = lights(2);
    let mut alert = lights(4);
    for mode in Mode::ALL {
        let mut rig = LightRig::new(&mut main, &mut alert);
        modes.set_mode(mode, &mut rig);
        assert_eq!(modes.current_mode(), mode);
    }
}

#[test]
fn test_stealth_toggle_twice_returns_to_normal() {
    let mut modes = controller();
    let mut main = lights(1);
    let mut alert = lights(2);
    let mut rig = LightRig::new(&mut main, &mut alert);
    let stealth = ModeTriggers {
        stealth: true,
        alert: false,
    };

    modes.handle_mode_input(stealth, &mut rig);
    assert_eq!(modes.current_mode(), Mode::Stealth);
    modes.handle_mode_input(stealth, &mut rig);
    assert_eq!(modes.current_mode(), Mode::Normal);
}

#[test]
fn test_alert_toggle_twice_returns_to_normal() {
    let mut modes = controller();
    let mut main = lights(1);
    let mut alert = lights(2);
    let mut rig = LightRig::new(&mut main, &mut alert);
    let press = ModeTriggers {
        stealth: false,
        alert: true,
    };

    modes.handle_mode_input(press, &mut rig);
    assert_eq!(modes.current_mode(), Mode::Alert);
    modes.handle_mode_input(press, &mut rig);
    assert_eq!(modes.current_mode(), Mode::Normal);
}

#[test]
fn test_alert_trigger_from_stealth_enters_alert() {
    let mut modes = controller();
    let mut main = lights(1);
    let mut alert = lights(2);
    let mut rig = LightRig::new(&mut main, &mut alert);

    modes.set_mode(Mode::Stealth, &mut rig);
    modes.handle_mode_input(
        ModeTriggers {
            stealth: false,
            alert: true,
        },
        &mut rig,
    );
    assert_eq!(modes.current_mode(), Mode::Alert);
}

#[test]
fn test_both_triggers_apply_stealth_first() {
    let mut modes = controller();
    let mut main = lights(1);
    let mut alert = lights(2);
    let mut rig = LightRig::new(&mut main, &mut alert);

    modes.handle_mode_input(
        ModeTriggers {
            stealth: true,
            alert: true,
        },
        &mut rig,
    );
    assert_eq!(modes.current_mode(), Mode::Alert);
}

#[test]
fn test_speed_multiplier_matches_profile() {
    let mut modes = controller();
    let mut main = lights(0);
    let mut alert = lights(0);
    let mut rig = LightRig::new(&mut main, &mut alert);

    assert_eq!(modes.speed_multiplier(), 1.0);
    modes.set_mode(Mode::Stealth, &mut rig);
    assert_eq!(modes.speed_multiplier(), 0.5);
    modes.set_mode(Mode::Alert, &mut rig);
    assert_eq!(modes.speed_multiplier(), 1.2);
}

#[test]
fn test_set_mode_pushes_profile_to_lights_and_alarm() {
    let mut modes = controller();
    let mut main = lights(2);
    let mut alert = lights(3);
    let mut alarm = MockAlarm::default();

    {
        let mut rig = LightRig::new(&mut main, &mut alert).with_alarm(Some(&mut alarm));
        modes.set_mode(Mode::Alert, &mut rig);
    }
    assert!(main.iter().all(|l| l.intensity == Some(3.0)));
    assert!(alert.iter().all(|l| l.enabled == Some(true)));
    assert!(alarm.playing);

    {
        let mut rig = LightRig::new(&mut main, &mut alert).with_alarm(Some(&mut alarm));
        modes.set_mode(Mode::Stealth, &mut rig);
    }
    assert!(main.iter().all(|l| l.intensity == Some(0.2)));
    assert!(alert.iter().all(|l| l.enabled == Some(false)));
    assert!(!alarm.playing);
    assert_eq!(alarm.stops, 1);
}

#[test]
fn test_alarm_not_restarted_while_playing() {
    let mut modes = controller();
    let mut main = lights(1);
    let mut alert = lights(1);
    let mut alarm = MockAlarm::default();

    let mut rig = LightRig::new(&mut main, &mut alert).with_alarm(Some(&mut alarm));
    modes.set_mode(Mode::Alert, &mut rig);
    modes.set_mode(Mode::Alert, &mut rig);
    drop(rig);
    assert_eq!(alarm.plays, 1);
}

#[test]
fn test_silent_modes_do_not_stop_an_idle_alarm() {
    let mut modes = controller();
    let mut main = lights(1);
    let mut alert = lights(1);
    let mut alarm = MockAlarm::default();

    let mut rig = LightRig::new(&mut main, &mut alert).with_alarm(Some(&mut alarm));
    modes.set_mode(Mode::Normal, &mut rig);
    drop(rig);
    assert_eq!(alarm.stops, 0);
}

#[test]
fn test_missing_collaborators_are_tolerated() {
    let mut modes = controller();
    let mut main: Vec<MockLight> = Vec::new();
    let mut alert: Vec<MockLight> = Vec::new();
    let mut rig = LightRig::new(&mut main, &mut alert);

    modes.set_mode(Mode::Alert, &mut rig);
    modes.visual_update(1.0, 1.0, &mut rig, None::<&mut MockProp>);
    assert!(modes.toggle_signal(None::<&mut MockProp>));
    assert_eq!(modes.current_mode(), Mode::Alert);
}

#[test]
fn test_alert_flash_flips_once_per_interval_with_alternating_pattern() {
    let mut modes = controller();
    let mut main = lights(2);
    let mut alert = lights(4);
    let mut rig = LightRig::new(&mut main, &mut alert);
    modes.set_mode(Mode::Alert, &mut rig);
    let before = modes.flash().lights_on;

    modes.visual_update(0.1, 0.1, &mut rig, None::<&mut MockProp>);
    assert_eq!(modes.flash().lights_on, before);
    modes.visual_update(0.1, 0.2, &mut rig, None::<&mut MockProp>);
    assert_eq!(modes.flash().lights_on, !before);
    drop(rig);

    let on = modes.flash().lights_on;
    for (index, light) in alert.iter().enumerate() {
        let expected = if index % 2 == 0 { on } else { !on };
        assert_eq!(light.enabled, Some(expected), "alert light {index}");
    }
}

#[test]
fn test_flash_does_not_run_outside_alert() {
    let mut modes = controller();
    let mut main = lights(1);
    let mut alert = lights(2);
    let mut rig = LightRig::new(&mut main, &mut alert);
    modes.set_mode(Mode::Normal, &mut rig);

    modes.visual_update(5.0, 5.0, &mut rig, None::<&mut MockProp>);
    drop(rig);
    assert!(modes.flash().lights_on);
    assert!(alert.iter().all(|l| l.enabled == Some(false)));
}

#[test]
fn test_toggle_signal_twice_restores_state_and_visibility() {
    let mut modes = controller();
    let mut prop = MockProp {
        position: Vec3::new(0.0, 14.0, -30.0),
        visible: true,
        light_enabled: true,
    };
    modes.attach_signal(&mut prop);
    assert!(!modes.signal().active);
    assert!(!prop.visible);

    assert!(modes.toggle_signal(Some(&mut prop)));
    assert!(prop.visible);
    assert!(prop.light_enabled);

    assert!(!modes.toggle_signal(Some(&mut prop)));
    assert!(!modes.signal().active);
    assert!(!prop.visible);
    assert!(!prop.light_enabled);
}

#[test]
fn test_set_signal_forces_state() {
    let mut modes = controller();
    let mut prop = MockProp::default();
    modes.attach_signal(&mut prop);

    modes.set_signal(true, Some(&mut prop));
    modes.set_signal(true, Some(&mut prop));
    assert!(modes.signal().active);
    assert!(prop.visible);
}

#[test]
fn test_signal_bobs_around_base_height() {
    let mut modes = controller();
    let mut main = lights(0);
    let mut alert = lights(0);
    let mut rig = LightRig::new(&mut main, &mut alert);
    let mut prop = MockProp {
        position: Vec3::new(2.0, 14.0, -30.0),
        ..default()
    };
    modes.attach_signal(&mut prop);
    modes.set_signal(true, Some(&mut prop));

    let elapsed = std::f32::consts::FRAC_PI_2;
    modes.visual_update(0.016, elapsed, &mut rig, Some(&mut prop));
    assert!((prop.position.y - 14.5).abs() < 1e-4);
    assert_eq!(prop.position.x, 2.0);
    assert_eq!(prop.position.z, -30.0);
}

#[test]
fn test_alarm_that_arrives_late_follows_current_mode() {
    let mut modes = controller();
    let mut main = lights(1);
    let mut alert = lights(2);
    let mut rig = LightRig::new(&mut main, &mut alert);
    modes.set_mode(Mode::Alert, &mut rig);
    drop(rig);

    let mut alarm = MockAlarm::default();
    modes.sync_alarm(&mut alarm);
    assert!(alarm.playing);
    modes.sync_alarm(&mut alarm);
    assert_eq!(alarm.plays, 1);

    let mut rig = LightRig::new(&mut main, &mut alert);
    modes.set_mode(Mode::Stealth, &mut rig);
    drop(rig);
    let mut late = MockAlarm {
        playing: true,
        ..default()
    };
    modes.sync_alarm(&mut late);
    assert!(!late.playing);
    assert_eq!(late.stops, 1);
}
