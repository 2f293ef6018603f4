use crate::domain::presentation::HudSettings;
use crate::domain::simulation::{
    DriveInput, FrameSet, ModeTriggers, PhysicsSet, VehicleBody, VehicleCommand,
};
use crate::MainCamera;
use bevy::input::gamepad::{GamepadConnection, GamepadEvent};
use bevy::prelude::*;

#[derive(Resource, Clone, Debug)]
pub struct Keybinds {
    pub throttle: KeyCode,
    pub reverse: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub boost: KeyCode,
    pub boost_alt: KeyCode,
    pub stealth: KeyCode,
    pub alert: KeyCode,
    pub signal: KeyCode,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            throttle: KeyCode::KeyW,
            reverse: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            boost: KeyCode::ShiftLeft,
            boost_alt: KeyCode::ShiftRight,
            stealth: KeyCode::KeyC,
            alert: KeyCode::Space,
            signal: KeyCode::KeyB,
        }
    }
}

#[derive(Resource)]
pub struct MyGamepad(pub Gamepad);

/// Keyboard-driven virtual axis that eases toward the held direction.
#[derive(Clone, Copy, Debug)]
pub struct AxisRamp {
    pub value: f32,
    pub sensitivity: f32,
    pub gravity: f32,
    pub snap: bool,
}

impl Default for AxisRamp {
    fn default() -> Self {
        Self {
            value: 0.0,
            sensitivity: 3.0,
            gravity: 3.0,
            snap: true,
        }
    }
}

impl AxisRamp {
    /// `target` is -1, 0 or 1 depending on which keys are held.
    pub fn update(&mut self, target: f32, dt: f32) -> f32 {
        if target == 0.0 {
            let fall = self.gravity * dt;
            self.value = if self.value.abs() <= fall {
                0.0
            } else {
                self.value - fall * self.value.signum()
            };
        } else {
            if self.snap && self.value * target < 0.0 {
                self.value = 0.0;
            }
            self.value = (self.value + target * self.sensitivity * dt).clamp(-1.0, 1.0);
        }
        self.value
    }
}

#[derive(Resource, Default)]
pub struct DriveAxes {
    pub steering: AxisRamp,
    pub throttle: AxisRamp,
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybinds>()
            .init_resource::<DriveAxes>()
            .add_systems(
                Update,
                (
                    gamepad_connections,
                    (mode_toggle, signal_toggle).in_set(FrameSet::Input),
                    help_toggle,
                    diagnostics_toggle,
                    follow_toggle,
                    camera_follow,
                ),
            )
            .add_systems(FixedUpdate, sample_drive_input.in_set(PhysicsSet::Input));
    }
}

fn key_axis(keys: &ButtonInput<KeyCode>, positive: [KeyCode; 2], negative: [KeyCode; 2]) -> f32 {
    let mut axis = 0.0;
    if keys.any_pressed(positive) {
        axis += 1.0;
    }
    if keys.any_pressed(negative) {
        axis -= 1.0;
    }
    axis
}

pub fn mode_toggle(
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    mut ev_command: EventWriter<VehicleCommand>,
) {
    let triggers = ModeTriggers {
        stealth: keys.just_pressed(keybinds.stealth),
        alert: keys.just_pressed(keybinds.alert),
    };
    if triggers != ModeTriggers::default() {
        ev_command.send(VehicleCommand::ModeTriggers(triggers));
    }
}

pub fn signal_toggle(
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    mut ev_command: EventWriter<VehicleCommand>,
) {
    if keys.just_pressed(keybinds.signal) {
        ev_command.send(VehicleCommand::ToggleSignal);
    }
}

pub fn sample_drive_input(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    my_gamepad: Option<Res<MyGamepad>>,
    axes: Res<Axis<GamepadAxis>>,
    buttons: Res<ButtonInput<GamepadButton>>,
    mut ramps: ResMut<DriveAxes>,
    mut input: ResMut<DriveInput>,
) {
    let dt = time.delta_seconds();
    let mut steering = ramps.steering.update(
        key_axis(
            &keys,
            [keybinds.right, KeyCode::ArrowRight],
            [keybinds.left, KeyCode::ArrowLeft],
        ),
        dt,
    );
    let mut throttle = ramps.throttle.update(
        key_axis(
            &keys,
            [keybinds.throttle, KeyCode::ArrowUp],
            [keybinds.reverse, KeyCode::ArrowDown],
        ),
        dt,
    );
    let mut boost = keys.any_pressed([keybinds.boost, keybinds.boost_alt]);

    if let Some(MyGamepad(gamepad)) = my_gamepad.as_deref() {
        let axis_lx = GamepadAxis {
            gamepad: *gamepad,
            axis_type: GamepadAxisType::LeftStickX,
        };
        let axis_ly = GamepadAxis {
            gamepad: *gamepad,
            axis_type: GamepadAxisType::LeftStickY,
        };

        if let (Some(x), Some(y)) = (axes.get(axis_lx), axes.get(axis_ly)) {
            if x.abs() > steering.abs() {
                steering = x;
            }
            if y.abs() > throttle.abs() {
                throttle = y;
            }
        }

        let boost_button = GamepadButton {
            gamepad: *gamepad,
            button_type: GamepadButtonType::South,
        };

        if buttons.pressed(boost_button) {
            boost = true;
        }
    }

    *input = DriveInput::new(steering, throttle, boost);
}

fn help_toggle(mut hud: ResMut<HudSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyH) {
        hud.show_help = !hud.show_help;
    }
}

fn diagnostics_toggle(mut hud: ResMut<HudSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::F3) {
        hud.show_diagnostics = !hud.show_diagnostics;
    }
}

fn follow_toggle(mut hud: ResMut<HudSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyF) {
        hud.follow_vehicle = !hud.follow_vehicle;
    }
}

fn camera_follow(
    mut q_cam: Query<&mut Transform, With<MainCamera>>,
    body_q: Query<&Transform, (With<VehicleBody>, Without<MainCamera>)>,
    hud: Res<HudSettings>,
    time: Res<Time>,
) {
    if !hud.follow_vehicle {
        return;
    }
    let (Ok(mut t), Ok(body)) = (q_cam.get_single_mut(), body_q.get_single()) else {
        return;
    };

    let target = body.translation + body.rotation * Vec3::new(0.0, 4.0, 11.0);
    let lerp_factor = (1.0 - (-3.0 * time.delta_seconds()).exp()).clamp(0.0, 1.0);
    t.translation = t.translation.lerp(target, lerp_factor);
    t.look_at(body.translation + Vec3::Y, Vec3::Y);
}

fn gamepad_connections(
    mut commands: Commands,
    my_gamepad: Option<Res<MyGamepad>>,
    mut evr_gamepad: EventReader<GamepadEvent>,
) {
    for ev in evr_gamepad.read() {
        // we only care about connection events
        let GamepadEvent::Connection(ev_conn) = ev else {
            continue;
        };
        match &ev_conn.connection {
            GamepadConnection::Connected(info) => {
                debug!(
                    "New gamepad connected: {:?}, name: {}",
                    ev_conn.gamepad, info.name,
                );
                if my_gamepad.is_none() {
                    commands.insert_resource(MyGamepad(ev_conn.gamepad));
                }
            }
            GamepadConnection::Disconnected => {
                debug!("Lost connection with gamepad: {:?}", ev_conn.gamepad);
                if let Some(MyGamepad(old_id)) = my_gamepad.as_deref() {
                    if *old_id == ev_conn.gamepad {
                        commands.remove_resource::<MyGamepad>();
                    }
                }
            }
        }
    }
}
