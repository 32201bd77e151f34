//! DrivetrainModel — продольная тяга
//!
//! Полный привод: тянут все grounded колёса, передние — вдоль повёрнутого roll.
//! Лимит скорости жёсткий: выше max_speed (или max_reverse_speed) тяги нет вообще.

use bevy::prelude::*;

use super::body::VehicleBody;
use super::input::approx_zero;
use super::settings::VehicleSettings;
use super::tire::{roll_direction, torque_world_position};
use super::wheel::WheelId;

/// Превышен ли лимит скорости для текущего направления движения
pub fn speed_capped(forward_speed: f32, settings: &VehicleSettings) -> bool {
    let is_moving_forward = forward_speed > 0.0;
    let speed = forward_speed.abs();

    if is_moving_forward {
        speed > settings.max_speed
    } else {
        speed > settings.max_reverse_speed
    }
}

/// Сила тяги одного колеса (без проверки grounded/лимитов)
pub fn drive_force(
    body: &impl VehicleBody,
    settings: &VehicleSettings,
    wheel: WheelId,
    steering: f32,
    acceleration: f32,
) -> Vec3 {
    acceleration * roll_direction(body, settings, wheel, steering) * settings.accelerate_power
}

/// Применяет тягу ко всем grounded колёсам. Возвращает false если тяга пропущена.
pub fn apply_drive(
    body: &mut impl VehicleBody,
    settings: &VehicleSettings,
    grounded: [bool; 4],
    steering: f32,
    acceleration: f32,
) -> bool {
    if approx_zero(acceleration) {
        return false;
    }

    if speed_capped(body.forward_speed(), settings) {
        return false;
    }

    for wheel in WheelId::ALL {
        if !grounded[wheel.index()] {
            continue;
        }

        let force = drive_force(body, settings, wheel, steering, acceleration);
        let point = torque_world_position(body, settings, wheel);
        body.apply_force_at_point(force, point);
    }

    true
}
