//! Headless симуляция RAYDRIVE
//!
//! Машина со scripted driver'ом катается по плоской земле 1000 тиков.
//! Первый аргумент — путь к TOML с настройками (иначе пресет arcade).

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;
use raydrive_simulation::logger::{init_logger, log_info};
use raydrive_simulation::vehicle::forward_speed;
use raydrive_simulation::{
    create_headless_app, spawn_ground, spawn_vehicle, ScriptedDriver, ScriptedDriverPlugin, SimulationPlugin,
    VehicleController, VehicleSettings, WheelId,
};

fn main() {
    let seed = 42;
    init_logger();
    log_info(&format!("Starting RAYDRIVE headless simulation (seed: {})", seed));

    let settings = match std::env::args().nth(1) {
        Some(path) => VehicleSettings::load_or(path, VehicleSettings::arcade()),
        None => VehicleSettings::arcade(),
    };

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, ScriptedDriverPlugin));

    let vehicle = {
        let mut commands = app.world_mut().commands();
        spawn_ground(&mut commands, 500.0);
        let vehicle = spawn_vehicle(&mut commands, Transform::from_xyz(0.0, 1.0, 0.0), settings);
        commands.entity(vehicle).insert(ScriptedDriver::default());
        vehicle
    };

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            report(&app, vehicle, tick);
        }
    }

    log_info("Simulation complete!");
}

fn report(app: &App, vehicle: Entity, tick: usize) {
    let world = app.world();
    let (Some(controller), Some(transform), Some(velocity)) = (
        world.get::<VehicleController>(vehicle),
        world.get::<Transform>(vehicle),
        world.get::<Velocity>(vehicle),
    ) else {
        return;
    };

    let springs = WheelId::ALL.map(|wheel| controller.spring_length(wheel));
    log_info(&format!(
        "Tick {}: position {:.2?}, forward speed {:.2} m/s, springs {:.3?}",
        tick,
        transform.translation,
        forward_speed(transform, velocity.linvel),
        springs
    ));
}
