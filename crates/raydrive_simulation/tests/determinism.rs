//! Тесты детерминизма
//!
//! Одинаковый seed scripted driver'а → идентичное состояние пружин и позы

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;
use raydrive_simulation::*;

const TICK_COUNT: usize = 300;

/// Snapshot одной поездки: пружины, input, поза, скорость
#[derive(Debug, PartialEq)]
struct RunSnapshot {
    springs: Vec<u8>,
    inputs: Vec<u8>,
    transforms: Vec<u8>,
    velocities: Vec<u8>,
}

/// Запускает поездку и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> RunSnapshot {
    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, ScriptedDriverPlugin));

    {
        let mut commands = app.world_mut().commands();
        spawn_ground(&mut commands, 500.0);
        let vehicle = spawn_vehicle(&mut commands, Transform::from_xyz(0.0, 0.9, 0.0), VehicleSettings::arcade());
        commands.entity(vehicle).insert(ScriptedDriver {
            hold_frames: 25,
            min_throttle: 0.0,
            frames_left: 0,
        });
    }

    for _ in 0..tick_count {
        app.update();
    }

    RunSnapshot {
        springs: world_snapshot::<VehicleController>(app.world_mut()),
        inputs: world_snapshot::<VehicleInput>(app.world_mut()),
        transforms: world_snapshot::<Transform>(app.world_mut()),
        velocities: world_snapshot::<Velocity>(app.world_mut()),
    }
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let run1 = run_simulation(SEED, TICK_COUNT);
    let run2 = run_simulation(SEED, TICK_COUNT);

    // Поза и скорость тоже: расхождение Rapier не спрячется за пружинами
    assert!(!run1.transforms.is_empty());
    assert!(!run1.velocities.is_empty());
    assert_eq!(
        run1, run2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_different_seeds_drive_differently() {
    let run1 = run_simulation(1, 60);
    let run2 = run_simulation(2, 60);

    assert_ne!(run1.inputs, run2.inputs, "Разные seed дали одинаковый input");
}
