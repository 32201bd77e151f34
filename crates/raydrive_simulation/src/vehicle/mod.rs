//! Vehicle dynamics: raycast suspension, tire slip, drive, brakes, drag
//!
//! Организация по моделям (leaves first):
//! - wheel: WheelId + геометрия креплений
//! - suspension: raycast пружина + damped spring force
//! - tire: боковое сцепление + steering-aware roll direction
//! - drivetrain: тяга с жёстким лимитом скорости
//! - braking: трёхуровневые тормоза задней оси
//! - drag: сопротивление воздуха
//! - controller: per-wheel состояние + порядок pipeline'а
//! - rapier: VehicleBody поверх Rapier + FixedUpdate система

pub mod body;
pub mod braking;
pub mod controller;
pub mod drag;
pub mod drivetrain;
pub mod input;
pub mod rapier;
pub mod settings;
pub mod spawn;
pub mod suspension;
pub mod tire;
pub mod wheel;

use bevy::prelude::*;

pub use body::{forward_speed, vehicle_forward, VehicleBody};
pub use controller::{TickReport, VehicleController};
pub use input::{approx_zero, VehicleInput, INPUT_EPSILON};
pub use settings::{SettingsError, VehicleSettings};
pub use spawn::{spawn_ground, spawn_vehicle, Vehicle, DEFAULT_HALF_EXTENTS, DEFAULT_MASS};
pub use suspension::WheelSpringState;
pub use wheel::WheelId;

/// Vehicle Plugin
///
/// Регистрирует pipeline в FixedUpdate, до Rapier physics step.
/// Rapier plugin добавляется отдельно (см. `SimulationPlugin`).
pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier3d::plugin::PhysicsSet;

        app.register_type::<Vehicle>()
            .register_type::<VehicleController>()
            .register_type::<VehicleInput>()
            .register_type::<VehicleSettings>();

        app.add_systems(
            FixedUpdate,
            rapier::tick_vehicles.before(PhysicsSet::SyncBackend),
        );
    }
}
