use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::controls::Keybinds;

pub fn show_keybinds_panel(
    ctx: &mut egui::Context,
    keybinds: &mut Keybinds,
    rebinding_state: &mut Option<String>,
    pressed_key: Option<egui::Key>,
) {
    egui::Window::new("Keybinds")
        .default_open(false)
        .show(ctx, |ui| {
            let mut rebind_action = |ui: &mut egui::Ui, action: &str, key: KeyCode| {
                ui.horizontal(|ui| {
                    ui.label(action);
                    let button_text = if rebinding_state.as_deref() == Some(action) {
                        "Press a key...".to_string()
                    } else {
                        format!("{:?}", key)
                    };
                    if ui.button(button_text).clicked() {
                        *rebinding_state = Some(action.to_string());
                    }
                });
            };

            rebind_action(ui, "Throttle", keybinds.throttle);
            rebind_action(ui, "Reverse", keybinds.reverse);
            rebind_action(ui, "Left", keybinds.left);
            rebind_action(ui, "Right", keybinds.right);
            rebind_action(ui, "Boost", keybinds.boost);
            rebind_action(ui, "Boost (alt)", keybinds.boost_alt);
            rebind_action(ui, "Stealth", keybinds.stealth);
            rebind_action(ui, "Alert", keybinds.alert);
            rebind_action(ui, "Signal", keybinds.signal);
        });

    if let Some(action) = rebinding_state.take() {
        match pressed_key.and_then(egui_to_bevy_keycode) {
            Some(key_code) => rebind(keybinds, &action, key_code),
            None => *rebinding_state = Some(action),
        }
    }
}

fn rebind(keybinds: &mut Keybinds, action: &str, key_code: KeyCode) {
    match action {
        "Throttle" => keybinds.throttle = key_code,
        "Reverse" => keybinds.reverse = key_code,
        "Left" => keybinds.left = key_code,
        "Right" => keybinds.right = key_code,
        "Boost" => keybinds.boost = key_code,
        "Boost (alt)" => keybinds.boost_alt = key_code,
        "Stealth" => keybinds.stealth = key_code,
        "Alert" => keybinds.alert = key_code,
        "Signal" => keybinds.signal = key_code,
        _ => {}
    }
}

fn egui_to_bevy_keycode(key: egui::Key) -> Option<KeyCode> {
    let code = match key {
        egui::Key::A => KeyCode::KeyA,
        egui::Key::B => KeyCode::KeyB,
        egui::Key::C => KeyCode::KeyC,
        egui::Key::D => KeyCode::KeyD,
        egui::Key::E => KeyCode::KeyE,
        egui::Key::F => KeyCode::KeyF,
        egui::Key::G => KeyCode::KeyG,
        egui::Key::H => KeyCode::KeyH,
        egui::Key::I => KeyCode::KeyI,
        egui::Key::J => KeyCode::KeyJ,
        egui::Key::K => KeyCode::KeyK,
        egui::Key::L => KeyCode::KeyL,
        egui::Key::M => KeyCode::KeyM,
        egui::Key::N => KeyCode::KeyN,
        egui::Key::O => KeyCode::KeyO,
        egui::Key::P => KeyCode::KeyP,
        egui::Key::Q => KeyCode::KeyQ,
        egui::Key::R => KeyCode::KeyR,
        egui::Key::S => KeyCode::KeyS,
        egui::Key::T => KeyCode::KeyT,
        egui::Key::U => KeyCode::KeyU,
        egui::Key::V => KeyCode::KeyV,
        egui::Key::W => KeyCode::KeyW,
        egui::Key::X => KeyCode::KeyX,
        egui::Key::Y => KeyCode::KeyY,
        egui::Key::Z => KeyCode::KeyZ,
        egui::Key::Num0 => KeyCode::Digit0,
        egui::Key::Num1 => KeyCode::Digit1,
        egui::Key::Num2 => KeyCode::Digit2,
        egui::Key::Num3 => KeyCode::Digit3,
        egui::Key::Num4 => KeyCode::Digit4,
        egui::Key::Num5 => KeyCode::Digit5,
        egui::Key::Num6 => KeyCode::Digit6,
        egui::Key::Num7 => KeyCode::Digit7,
        egui::Key::Num8 => KeyCode::Digit8,
        egui::Key::Num9 => KeyCode::Digit9,
        egui::Key::ArrowUp => KeyCode::ArrowUp,
        egui::Key::ArrowDown => KeyCode::ArrowDown,
        egui::Key::ArrowLeft => KeyCode::ArrowLeft,
        egui::Key::ArrowRight => KeyCode::ArrowRight,
        egui::Key::Space => KeyCode::Space,
        egui::Key::Enter => KeyCode::Enter,
        egui::Key::Tab => KeyCode::Tab,
        _ => return None,
    };
    Some(code)
}
