//! DragModel — сопротивление воздуха
//!
//! Одна сила на весь кузов в центр масс, каждый тик:
//! -velocity * air_resistance * |box size|.
//! |box size| — упрощённый proxy площади, не настоящее сечение.

use bevy::prelude::*;

use super::body::VehicleBody;
use super::settings::VehicleSettings;

/// Длина диагонали bounding box'а (полный размер, не half extents)
pub fn frontal_area_proxy(half_extents: Vec3) -> f32 {
    (half_extents * 2.0).length()
}

pub fn drag_force(velocity: Vec3, air_resistance: f32, half_extents: Vec3) -> Vec3 {
    frontal_area_proxy(half_extents) * -velocity * air_resistance
}

pub fn apply_drag(body: &mut impl VehicleBody, settings: &VehicleSettings) {
    let force = drag_force(body.linear_velocity(), settings.air_resistance, body.half_extents());
    body.apply_force(force);
}
