mod panels;

use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::domain::controls::Keybinds;
use crate::domain::simulation::{
    DriveController, KinematicWheels, ModeController, VehicleCommand,
};

use panels::banners::show_mode_banner;
use panels::diagnostics_panel::show_diagnostics_panel;
use panels::help_panel::show_help_panel;
use panels::keybinds_panel::show_keybinds_panel;
use panels::signal_panel::show_signal_panel;
use panels::status_panel::show_status_panel;

#[derive(Resource, Clone, Debug)]
pub struct HudSettings {
    pub show_help: bool,
    pub show_diagnostics: bool,
    pub follow_vehicle: bool,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            show_help: true,
            show_diagnostics: false,
            follow_vehicle: true,
        }
    }
}

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<HudSettings>()
            .add_systems(Update, hud_system);
    }
}

#[allow(clippy::too_many_arguments)]
fn hud_system(
    mut contexts: EguiContexts,
    hud: Res<HudSettings>,
    modes: Res<ModeController>,
    drive: Res<DriveController>,
    wheels: Res<KinematicWheels>,
    diagnostics: Res<DiagnosticsStore>,
    fixed: Res<Time<Fixed>>,
    mut keybinds: ResMut<Keybinds>,
    mut ev_command: EventWriter<VehicleCommand>,
    mut rebinding_state: Local<Option<String>>,
) {
    let mut pressed_key = None;
    contexts.ctx_mut().input(|i| {
        for event in &i.events {
            if let egui::Event::Key {
                key,
                pressed: true,
                ..
            } = event
            {
                pressed_key = Some(*key);
            }
        }
    });

    let ctx = contexts.ctx_mut();
    show_status_panel(ctx, &modes, &drive, &wheels, &mut ev_command);
    show_signal_panel(ctx, modes.signal(), &mut ev_command);
    show_keybinds_panel(ctx, &mut keybinds, &mut rebinding_state, pressed_key);
    show_mode_banner(ctx, modes.current_mode());
    show_help_panel(ctx, &hud, &keybinds);
    show_diagnostics_panel(ctx, &diagnostics, &hud, &fixed, &modes, &wheels);
}
