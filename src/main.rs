use batmobile_rs::domain::simulation::{ConfigError, VehicleConfig};
use batmobile_rs::domain::{InputPlugin, SimPlugin, UiPlugin};
use batmobile_rs::MainCamera;
use bevy::core_pipeline::bloom::BloomSettings;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

fn main() -> Result<(), ConfigError> {
    let config = VehicleConfig::default().validated()?;

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.03)))
        .insert_resource(Msaa::Sample4)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(EntityCountDiagnosticsPlugin)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "batmobile-rs".into(),
                resolution: (1400., 900.).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((SimPlugin { config }, UiPlugin, InputPlugin))
        .add_systems(Startup, setup_camera)
        .run();

    Ok(())
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            tonemapping: Tonemapping::TonyMcMapface,
            transform: Transform::from_xyz(0.0, 4.0, 11.0).looking_at(Vec3::Y, Vec3::Y),
            ..default()
        },
        BloomSettings::default(),
        MainCamera,
    ));
}
