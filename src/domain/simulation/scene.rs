use bevy::prelude::*;

use super::config::VehicleConfig;
use super::drive::WheelPosition;
use super::host::WheelPhysics;
use super::kinematic::KinematicWheels;

#[derive(Component)]
pub struct VehicleBody;

#[derive(Component)]
pub struct HeadLight;

/// Position in the light bar; drives the even/odd flash pattern.
#[derive(Component)]
pub struct AlertLight {
    pub index: usize,
}

#[derive(Component)]
pub struct AlarmSpeaker;

#[derive(Component)]
pub struct SignalEmblem {
    /// Orientation the spin is applied on top of.
    pub facing: Quat,
}

#[derive(Component)]
pub struct SignalLamp;

#[derive(Component)]
pub struct WheelVisual(pub WheelPosition);

const SIGNAL_ANCHOR: Vec3 = Vec3::new(0.0, 14.0, -30.0);

pub fn spawn_vehicle_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<VehicleConfig>,
    wheels: Res<KinematicWheels>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.5, 0.55, 0.8),
        brightness: 60.0,
    });
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 400.0,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 20.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(400.0, 400.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.12, 0.12, 0.14),
            perceptual_roughness: 0.9,
            ..default()
        }),
        ..default()
    });

    let params = wheels.params().clone();
    let lumens = config.lumens_per_unit;
    let normal_intensity = config.profiles.normal.main_light_intensity * lumens;

    commands
        .spawn((
            PbrBundle {
                mesh: meshes.add(Cuboid::new(
                    params.track_width,
                    0.6,
                    params.wheel_base + 1.4,
                )),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(0.05, 0.05, 0.06),
                    metallic: 0.6,
                    perceptual_roughness: 0.35,
                    ..default()
                }),
                transform: wheels.chassis_transform(),
                ..default()
            },
            VehicleBody,
        ))
        .with_children(|body| {
            let nose = -(params.wheel_base + 1.4) * 0.5;
            for x in [-0.6, 0.6] {
                body.spawn((
                    SpotLightBundle {
                        spot_light: SpotLight {
                            intensity: normal_intensity,
                            range: 40.0,
                            outer_angle: 0.6,
                            inner_angle: 0.4,
                            shadows_enabled: true,
                            ..default()
                        },
                        transform: Transform::from_xyz(x, 0.1, nose)
                            .looking_at(Vec3::new(x, -0.4, nose - 10.0), Vec3::Y),
                        ..default()
                    },
                    HeadLight,
                ));
            }

            let bar = [
                (-0.6, Color::srgb(1.0, 0.05, 0.05)),
                (-0.2, Color::srgb(0.1, 0.2, 1.0)),
                (0.2, Color::srgb(1.0, 0.05, 0.05)),
                (0.6, Color::srgb(0.1, 0.2, 1.0)),
            ];
            for (index, (x, color)) in bar.into_iter().enumerate() {
                body.spawn((
                    PointLightBundle {
                        point_light: PointLight {
                            color,
                            intensity: config.profiles.alert.main_light_intensity * lumens,
                            range: 12.0,
                            ..default()
                        },
                        transform: Transform::from_xyz(x, 0.5, 0.0),
                        visibility: Visibility::Hidden,
                        ..default()
                    },
                    AlertLight { index },
                ));
            }
        });

    let wheel_mesh = meshes.add(Cylinder::new(params.wheel_radius, 0.3));
    let wheel_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.02, 0.02, 0.02),
        perceptual_roughness: 0.8,
        ..default()
    });
    for wheel in WheelPosition::ALL {
        let pose = wheels.world_pose(wheel);
        commands.spawn((
            PbrBundle {
                mesh: wheel_mesh.clone(),
                material: wheel_material.clone(),
                transform: Transform::from_translation(pose.position).with_rotation(pose.rotation),
                ..default()
            },
            WheelVisual(wheel),
        ));
    }

    if let Some(path) = config.alarm_sound.as_deref() {
        commands.spawn((
            AudioBundle {
                source: asset_server.load(path.to_owned()),
                settings: PlaybackSettings::LOOP.paused(),
            },
            AlarmSpeaker,
        ));
    } else {
        debug!("No alarm sound configured");
    }

    let facing = Quat::IDENTITY;
    commands
        .spawn((
            PbrBundle {
                mesh: meshes.add(Cuboid::new(4.0, 2.0, 0.05)),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(1.0, 0.9, 0.2),
                    emissive: LinearRgba::rgb(6.0, 5.0, 0.8),
                    ..default()
                }),
                transform: Transform::from_translation(SIGNAL_ANCHOR).with_rotation(facing),
                ..default()
            },
            SignalEmblem { facing },
        ))
        .with_children(|emblem| {
            emblem.spawn((
                PointLightBundle {
                    transform: Transform::from_xyz(0.0, 0.0, 1.0),
                    ..default()
                },
                SignalLamp,
            ));
        });
}
