//! Scripted driver для headless прогонов
//!
//! Подменяет клавиатуру: каждые `hold_frames` кадров берёт новый случайный
//! throttle/steering из DeterministicRng. Одинаковый seed → одинаковая поездка.

use bevy::prelude::*;
use rand::Rng;

use crate::vehicle::VehicleInput;
use crate::DeterministicRng;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ScriptedDriver {
    /// Сколько кадров держать выбранный input
    pub hold_frames: u32,
    /// Минимальный throttle (0.0 = может стоять, < 0 = может ехать назад)
    pub min_throttle: f32,
    pub frames_left: u32,
}

impl Default for ScriptedDriver {
    fn default() -> Self {
        Self {
            hold_frames: 50, // 1 sec при 50Hz
            min_throttle: -0.5,
            frames_left: 0,
        }
    }
}

/// Система: обновление input'а scripted driver'а
///
/// Работает в Update (variable rate) — как настоящий input.
pub fn drive_scripted_vehicles(
    mut rng: ResMut<DeterministicRng>,
    mut query: Query<(&mut ScriptedDriver, &mut VehicleInput)>,
) {
    for (mut driver, mut input) in query.iter_mut() {
        if driver.frames_left > 0 {
            driver.frames_left -= 1;
            continue;
        }

        driver.frames_left = driver.hold_frames;

        let throttle = rng.rng.gen_range(driver.min_throttle.min(1.0)..=1.0);
        let steering = rng.rng.gen_range(-1.0..=1.0);

        input.set_acceleration(throttle);
        input.set_steering(steering);
    }
}

pub struct ScriptedDriverPlugin;

impl Plugin for ScriptedDriverPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ScriptedDriver>()
            .add_systems(Update, drive_scripted_vehicles);
    }
}
