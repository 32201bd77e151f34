//! SuspensionModel — raycast "виртуальная пружина" на каждое колесо
//!
//! Луч из нижней грани кузова вниз (против up кузова), дальность = rest length.
//! Hit → длина пружины = дистанция, miss → пружина полностью разжата.

use bevy::prelude::*;

use super::body::VehicleBody;
use super::settings::VehicleSettings;
use super::wheel::{spring_local_position, WheelId};

/// Состояние пружины одного колеса
///
/// Инвариант: 0 ≤ current_length ≤ rest_length.
/// Grounded ⇔ current_length < rest_length (строго).
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct WheelSpringState {
    /// Дистанция от точки крепления до земли вдоль -up кузова (m)
    pub current_length: f32,
    /// (current - previous) / dt: > 0 разжимается, < 0 сжимается (m/s)
    pub current_velocity: f32,
}

impl WheelSpringState {
    pub fn is_grounded(&self, rest_length: f32) -> bool {
        self.current_length < rest_length
    }
}

/// Мировая точка старта луча (и точка приложения силы пружины)
pub fn spring_world_position(body: &impl VehicleBody, settings: &VehicleSettings, wheel: WheelId) -> Vec3 {
    body.to_world(spring_local_position(
        wheel,
        body.half_extents(),
        settings.wheel_padding_x,
        settings.wheel_padding_z,
    ))
}

/// Кастует луч пружины и возвращает новое состояние
///
/// На первом тике previous = 0 → один всплеск скорости. Это ожидаемо.
pub fn cast_spring(
    body: &impl VehicleBody,
    settings: &VehicleSettings,
    wheel: WheelId,
    previous: WheelSpringState,
    dt: f32,
) -> WheelSpringState {
    let rest_length = settings.spring_rest_length;
    let origin = spring_world_position(body, settings, wheel);
    let down = -body.up();

    let current_length = body
        .raycast(origin, down, rest_length)
        .map(|distance| distance.clamp(0.0, rest_length))
        .unwrap_or(rest_length);

    let current_velocity = if dt > 0.0 {
        (current_length - previous.current_length) / dt
    } else {
        0.0
    };

    WheelSpringState {
        current_length,
        current_velocity,
    }
}

/// Damped spring: (rest - length) * strength - damper * velocity
///
/// > 0 толкает кузов от земли (вдоль up кузова).
pub fn damped_spring_force(
    current_length: f32,
    length_velocity: f32,
    rest_length: f32,
    strength: f32,
    damper: f32,
) -> f32 {
    let length_offset = rest_length - current_length;
    (length_offset * strength) - (damper * length_velocity)
}

/// Применяет силу пружины в точке крепления (вызывается и для оторванных колёс)
pub fn apply_spring_force(
    body: &mut impl VehicleBody,
    settings: &VehicleSettings,
    wheel: WheelId,
    state: &WheelSpringState,
) -> f32 {
    let force = damped_spring_force(
        state.current_length,
        state.current_velocity,
        settings.spring_rest_length,
        settings.spring_strength,
        settings.spring_damper,
    );

    let point = spring_world_position(body, settings, wheel);
    let up = body.up();
    body.apply_force_at_point(up * force, point);
    force
}
