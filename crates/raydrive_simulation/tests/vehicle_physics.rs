//! Vehicle integration test (Bevy + Rapier headless)
//!
//! Проверяем:
//! - Машина садится на пружины и стоит на всех 4 колёсах
//! - Инвариант длины пружин держится каждый тик
//! - Газ разгоняет вперёд, лимит скорости не пробивается
//! - Без земли колёса не grounded

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use raydrive_simulation::vehicle::forward_speed;
use raydrive_simulation::*;

/// Helper: headless App с Rapier + vehicle pipeline
fn create_vehicle_app() -> App {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);
    app
}

/// Helper: земля + машина чуть выше equilibrium высоты
fn spawn_scene(app: &mut App, settings: VehicleSettings) -> Entity {
    let mut commands = app.world_mut().commands();
    spawn_ground(&mut commands, 200.0);
    spawn_vehicle(&mut commands, Transform::from_xyz(0.0, 0.9, 0.0), settings)
}

fn controller(app: &App, vehicle: Entity) -> VehicleController {
    app.world().get::<VehicleController>(vehicle).unwrap().clone()
}

fn check_spring_invariants(app: &App, vehicle: Entity, tick: usize) {
    let settings = app.world().get::<VehicleSettings>(vehicle).unwrap();
    let controller = controller(app, vehicle);

    for wheel in WheelId::ALL {
        let length = controller.spring_length(wheel);
        assert!(
            (0.0..=settings.spring_rest_length).contains(&length),
            "Tick {}: {:?} spring length {} вне [0, {}]",
            tick,
            wheel,
            length,
            settings.spring_rest_length
        );
    }
}

/// Test: машина оседает на пружинах и стоит на всех колёсах
#[test]
fn test_vehicle_settles_on_springs() {
    let mut app = create_vehicle_app();
    let settings = VehicleSettings::arcade();
    let vehicle = spawn_scene(&mut app, settings.clone());

    // 300 тиков = 6 sec при 50Hz
    for tick in 0..300 {
        app.update();
        check_spring_invariants(&app, vehicle, tick);
    }

    let controller = controller(&app, vehicle);
    for wheel in WheelId::ALL {
        assert!(
            controller.is_grounded(wheel, &settings),
            "{:?} не на земле: length = {}",
            wheel,
            controller.spring_length(wheel)
        );
        assert!(controller.spring_length(wheel) > 0.0);
    }

    let velocity = app.world().get::<Velocity>(vehicle).unwrap();
    assert!(velocity.linvel.length() < 0.5, "Машина не успокоилась: {:?}", velocity.linvel);

    let transform = app.world().get::<Transform>(vehicle).unwrap();
    assert!(transform.translation.y > DEFAULT_HALF_EXTENTS.y, "Кузов лежит на земле");
}

/// Test: газ в пол разгоняет машину вперёд
#[test]
fn test_throttle_accelerates_forward() {
    let mut app = create_vehicle_app();
    let vehicle = spawn_scene(&mut app, VehicleSettings::arcade());

    // Садимся на пружины
    for _ in 0..150 {
        app.update();
    }

    app.world_mut()
        .get_mut::<VehicleInput>(vehicle)
        .unwrap()
        .set_acceleration(1.0);

    for tick in 0..100 {
        app.update();
        check_spring_invariants(&app, vehicle, tick);
    }

    let transform = *app.world().get::<Transform>(vehicle).unwrap();
    let velocity = app.world().get::<Velocity>(vehicle).unwrap().linvel;
    let speed = forward_speed(&transform, velocity);

    assert!(speed > 1.0, "Машина не разогналась: forward speed = {}", speed);
    assert!(speed <= VehicleSettings::arcade().max_speed + 1.0);
}

/// Test: без земли все лучи мимо, пружины полностью разжаты
#[test]
fn test_no_ground_means_no_contact() {
    let mut app = create_vehicle_app();
    let settings = VehicleSettings::arcade();
    let vehicle = {
        let mut commands = app.world_mut().commands();
        spawn_vehicle(&mut commands, Transform::from_xyz(0.0, 50.0, 0.0), settings.clone())
    };

    for tick in 0..20 {
        app.update();
        check_spring_invariants(&app, vehicle, tick);
    }

    let controller = controller(&app, vehicle);
    for wheel in WheelId::ALL {
        assert_eq!(controller.spring_length(wheel), settings.spring_rest_length);
        assert!(!controller.is_grounded(wheel, &settings));
    }
}

/// Test: нулевые настройки не ломают симуляцию (инертная физика)
#[test]
fn test_default_settings_are_inert() {
    let mut app = create_vehicle_app();
    let vehicle = spawn_scene(&mut app, VehicleSettings::default());

    for _ in 0..50 {
        app.update();
    }

    let controller = controller(&app, vehicle);
    for wheel in WheelId::ALL {
        assert_eq!(controller.spring_length(wheel), 0.0);
    }

    let transform = app.world().get::<Transform>(vehicle).unwrap();
    assert!(transform.translation.is_finite());
}

/// Test: Rapier шагает фиксированным dt симуляции (force shaping делит на него)
#[test]
fn test_rapier_uses_simulation_timestep() {
    let app = create_vehicle_app();

    let mode = app.world().resource::<TimestepMode>();
    match *mode {
        TimestepMode::Fixed { dt, substeps } => {
            assert_eq!(dt, fixed_dt());
            assert_eq!(substeps, 1);
        }
        _ => panic!("TimestepMode не Fixed"),
    }
}

/// Test: spawn_vehicle вешает маркер Vehicle, земля без него
#[test]
fn test_only_vehicle_carries_marker() {
    let mut app = create_vehicle_app();
    let vehicle = spawn_scene(&mut app, VehicleSettings::arcade());
    app.update();

    let mut query = app.world_mut().query_filtered::<Entity, With<Vehicle>>();
    let marked: Vec<Entity> = query.iter(app.world()).collect();
    assert_eq!(marked, vec![vehicle]);
}
