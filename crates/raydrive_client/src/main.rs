use bevy::prelude::*;
use raydrive_simulation::logger::init_logger;
use raydrive_simulation::{spawn_ground, spawn_vehicle, SimulationPlugin, VehicleSettings, WheelId, DEFAULT_HALF_EXTENTS};

mod camera;
mod frame_limiter;
mod input;
mod wheel_visuals;

use camera::{CameraPlugin, CameraTarget, ChaseCamera};
use frame_limiter::FrameLimiterPlugin;
use input::{KeyboardInputPlugin, PlayerControlled};
use wheel_visuals::{WheelVisual, WheelVisualsPlugin};

const SETTINGS_PATH: &str = "assets/vehicle.toml";
const WHEEL_RADIUS: f32 = 0.35;
const WHEEL_WIDTH: f32 = 0.3;
const GROUND_HALF_SIZE: f32 = 200.0;

fn main() {
    init_logger();

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "RAYDRIVE".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Simulation (Rapier + vehicle pipeline)
        .add_plugins(SimulationPlugin)
        // Input, visuals, camera, frame cap
        .add_plugins((KeyboardInputPlugin, WheelVisualsPlugin, CameraPlugin, FrameLimiterPlugin))
        // Setup scene
        .add_systems(Startup, setup_scene)
        .run();
}

/// Spawn ground, lights, camera and the player vehicle
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground: collider from the simulation + a plane mesh on top
    let ground = spawn_ground(&mut commands, GROUND_HALF_SIZE);
    commands.entity(ground).insert(Visibility::default()).with_child((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(GROUND_HALF_SIZE)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.5, 0.0),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Camera (chases the vehicle)
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.5, 9.0).looking_at(Vec3::ZERO, Vec3::Y),
        ChaseCamera::default(),
    ));

    let settings = VehicleSettings::load_or(SETTINGS_PATH, VehicleSettings::arcade());
    spawn_player_vehicle(&mut commands, &mut meshes, &mut materials, settings);
}

/// Simulation vehicle + body mesh + 4 visual wheels
fn spawn_player_vehicle(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    settings: VehicleSettings,
) {
    let half = DEFAULT_HALF_EXTENTS;
    let wheel_positions = WheelId::ALL.map(|wheel| {
        raydrive_simulation::vehicle::wheel::torque_local_position(
            wheel,
            half,
            settings.wheel_padding_x,
            settings.wheel_padding_z,
        )
    });

    // Wheel center: bottom face, minus spring length, plus radius
    let spring_min_y = -half.y + WHEEL_RADIUS;
    let spring_max_y = -half.y - settings.spring_rest_length + WHEEL_RADIUS;

    let vehicle = spawn_vehicle(commands, Transform::from_xyz(0.0, 1.0, 0.0), settings);
    commands.entity(vehicle).insert((PlayerControlled, CameraTarget, Visibility::default()));

    let body_mesh = meshes.add(Cuboid::new(half.x * 2.0, half.y * 2.0, half.z * 2.0));
    let body_material = materials.add(Color::srgb(0.8, 0.2, 0.15));
    let wheel_mesh = meshes.add(Cylinder::new(WHEEL_RADIUS, WHEEL_WIDTH));
    let wheel_material = materials.add(Color::srgb(0.1, 0.1, 0.1));

    commands.entity(vehicle).with_children(|parent| {
        parent.spawn((Mesh3d(body_mesh), MeshMaterial3d(body_material), Transform::default()));

        for (wheel, position) in WheelId::ALL.into_iter().zip(wheel_positions) {
            // Cylinder axis is Y; the axle runs along X
            parent
                .spawn((
                    WheelVisual::new(wheel, 360.0 / (std::f32::consts::TAU * WHEEL_RADIUS), spring_min_y, spring_max_y),
                    Transform::from_xyz(position.x, spring_max_y, position.z),
                    Visibility::default(),
                ))
                .with_child((
                    Mesh3d(wheel_mesh.clone()),
                    MeshMaterial3d(wheel_material.clone()),
                    Transform::from_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
                ));
        }
    });
}
