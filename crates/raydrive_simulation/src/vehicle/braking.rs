//! BrakingModel — тормоза задней оси
//!
//! Интенсивность (по порядку):
//! 1. |forward_speed| > 2.0 → 1.0
//! 2. input ≈ 0 и input-направление против скорости → 1.0
//! 3. input ≈ 0 → 0.1 (торможение двигателем / сопротивление качению)
//! 4. газ нажат на малой скорости → тормозов нет
//!
//! Порог 2.0 называется "almost stopping", но срабатывает на высокой скорости.
//! Ветка 2 срабатывает только на ненулевом input внутри epsilon (ровно 0 даёт dot = 0).

use bevy::prelude::*;

use super::body::VehicleBody;
use super::input::approx_zero;
use super::settings::VehicleSettings;
use super::suspension::spring_world_position;
use super::tire::{roll_direction, torque_world_position, velocity_change_to_force};
use super::wheel::WheelId;

pub const ALMOST_STOPPING_SPEED: f32 = 2.0;

pub const FULL_BRAKES: f32 = 1.0;
pub const COASTING_BRAKES: f32 = 0.1;

/// Выбор интенсивности тормозов; None — тормоза в этом тике не работают
pub fn brake_ratio(forward_speed: f32, forward: Vec3, velocity: Vec3, acceleration: f32) -> Option<f32> {
    let almost_stopping = forward_speed.abs() > ALMOST_STOPPING_SPEED;
    if almost_stopping {
        return Some(FULL_BRAKES);
    }

    let no_throttle = approx_zero(acceleration);
    let accelerate_contrary = no_throttle && (acceleration * forward).dot(velocity) < 0.0;

    if accelerate_contrary {
        Some(FULL_BRAKES)
    } else if no_throttle {
        Some(COASTING_BRAKES)
    } else {
        None
    }
}

/// Тормозная сила одного заднего колеса (против roll скорости в точке контакта)
pub fn brake_force(
    body: &impl VehicleBody,
    settings: &VehicleSettings,
    wheel: WheelId,
    steering: f32,
    ratio: f32,
    dt: f32,
) -> Vec3 {
    let contact = spring_world_position(body, settings, wheel);
    let roll = roll_direction(body, settings, wheel, steering);
    let roll_velocity = roll.dot(body.point_velocity(contact));

    let desired_velocity_change = -roll_velocity * ratio * settings.braking_power;
    roll * velocity_change_to_force(desired_velocity_change, dt, settings.tire_mass)
}

/// Применяет тормоза к grounded задним колёсам. Возвращает выбранную интенсивность.
pub fn apply_brakes(
    body: &mut impl VehicleBody,
    settings: &VehicleSettings,
    grounded: [bool; 4],
    steering: f32,
    acceleration: f32,
    dt: f32,
) -> Option<f32> {
    let ratio = brake_ratio(body.forward_speed(), body.forward(), body.linear_velocity(), acceleration)?;

    for wheel in WheelId::BACK {
        if !grounded[wheel.index()] {
            continue;
        }

        let force = brake_force(body, settings, wheel, steering, ratio, dt);
        let point = torque_world_position(body, settings, wheel);
        body.apply_force_at_point(force, point);
    }

    Some(ratio)
}
