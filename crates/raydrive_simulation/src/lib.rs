//! RAYDRIVE Simulation Core
//!
//! Аркадная машина на raycast "виртуальных пружинах" (Bevy 0.16 + Rapier).
//!
//! Архитектура:
//! - vehicle: чистая арифметика сил над 4 колёсами (trait VehicleBody)
//! - vehicle::rapier: адаптер rigid body + FixedUpdate система
//! - driver: scripted input для headless прогонов
//! - logger: глобальный sink логов

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod driver;
pub mod logger;
pub mod vehicle;

// Re-export базовых типов для удобства
pub use driver::{ScriptedDriver, ScriptedDriverPlugin};
pub use vehicle::{
    spawn_ground, spawn_vehicle, Vehicle, VehicleController, VehicleInput, VehiclePlugin, VehicleSettings,
    WheelId, WheelSpringState, DEFAULT_HALF_EXTENTS, DEFAULT_MASS,
};

/// Частота fixed тика (50Hz, шаг 0.02 s)
pub const FIXED_HZ: f64 = 50.0;

/// Шаг fixed тика в секундах
pub fn fixed_dt() -> f32 {
    (1.0 / FIXED_HZ) as f32
}

/// Главный plugin симуляции (Rapier + vehicle pipeline)
///
/// Rapier работает в fixed schedule с тем же шагом, что и pipeline:
/// force shaping (Δv / dt) должен делить на реальный шаг интегратора.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 50Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            // До plugin'а: Rapier берёт уже вставленный TimestepMode (init_resource)
            .insert_resource(TimestepMode::Fixed {
                dt: fixed_dt(),
                substeps: 1,
            })
            .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
            .add_plugins(VehiclePlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` продвигает время ровно на один fixed шаг,
/// независимо от wall clock — прогоны воспроизводимы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / FIXED_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
