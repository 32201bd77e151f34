//! Spawn helpers: машина и земля

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::controller::VehicleController;
use super::input::VehicleInput;
use super::settings::VehicleSettings;

/// Размер кузова по умолчанию (half extents): 2×1×4 m
pub const DEFAULT_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 0.5, 2.0);

/// Масса кузова по умолчанию (kg), под пресет `VehicleSettings::arcade()`
pub const DEFAULT_MASS: f32 = 1200.0;

/// Маркер машины: по нему визуальный слой находит кузов
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Vehicle;

/// Spawn машины с полным набором компонентов:
/// - Transform
/// - Vehicle + VehicleController (пружины по нулям) + VehicleInput + VehicleSettings
/// - Rapier: Dynamic body + box collider + Velocity + ExternalForce + ReadMassProperties
pub fn spawn_vehicle(commands: &mut Commands, transform: Transform, settings: VehicleSettings) -> Entity {
    let half = DEFAULT_HALF_EXTENTS;

    let entity = commands
        .spawn((
            transform,
            Vehicle,
            VehicleController::default(),
            VehicleInput::default(),
            settings,
            RigidBody::Dynamic,
            Collider::cuboid(half.x, half.y, half.z),
            ColliderMassProperties::Mass(DEFAULT_MASS),
            Velocity::default(),
            ExternalForce::default(),
            ReadMassProperties::default(),
            Sleeping::disabled(),
        ))
        .id();

    crate::logger::log_info(&format!(
        "Vehicle {:?} spawned at {:?}",
        entity, transform.translation
    ));

    entity
}

/// Статичная земля: верхняя грань на y = 0
pub fn spawn_ground(commands: &mut Commands, half_size: f32) -> Entity {
    commands
        .spawn((
            Transform::from_xyz(0.0, -0.5, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(half_size, 0.5, half_size),
        ))
        .id()
}
