//! VehicleController — composition root vehicle pipeline
//!
//! Один вызов `tick()` = один fixed шаг. Порядок фиксирован:
//! suspension → steering (slip) → drive → brakes → drag.
//! Steering/drive/brakes зависят от grounded флага, который только что
//! посчитала suspension, поэтому порядок не переставлять.

use bevy::prelude::*;

use super::body::VehicleBody;
use super::braking::apply_brakes;
use super::drag::apply_drag;
use super::drivetrain::apply_drive;
use super::input::VehicleInput;
use super::settings::VehicleSettings;
use super::suspension::{apply_spring_force, cast_spring, WheelSpringState};
use super::tire::apply_lateral_friction;
use super::wheel::WheelId;

/// Per-wheel состояние пружин (единственное состояние машины между тиками)
///
/// Индексируется `WheelId::index()`. На спавне всё по нулям.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct VehicleController {
    springs: [WheelSpringState; 4],
}

/// Что pipeline сделал за тик (для логов и тестов)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub spring_forces: [f32; 4],
    pub grounded: [bool; 4],
    pub drive_applied: bool,
    pub brake_ratio: Option<f32>,
}

impl VehicleController {
    pub fn spring(&self, wheel: WheelId) -> &WheelSpringState {
        &self.springs[wheel.index()]
    }

    /// Текущая длина пружины (читает визуальный слой)
    pub fn spring_length(&self, wheel: WheelId) -> f32 {
        self.springs[wheel.index()].current_length
    }

    pub fn is_grounded(&self, wheel: WheelId, settings: &VehicleSettings) -> bool {
        self.springs[wheel.index()].is_grounded(settings.spring_rest_length)
    }

    pub fn grounded_wheels(&self, settings: &VehicleSettings) -> [bool; 4] {
        WheelId::ALL.map(|wheel| self.is_grounded(wheel, settings))
    }

    /// Один fixed шаг симуляции
    pub fn tick(
        &mut self,
        body: &mut impl VehicleBody,
        settings: &VehicleSettings,
        input: &VehicleInput,
        dt: f32,
    ) -> TickReport {
        let steering = input.steering();
        let acceleration = input.acceleration();

        let spring_forces = self.update_suspensions(body, settings, dt);
        let grounded = self.grounded_wheels(settings);

        update_steering(body, settings, grounded, steering, dt);
        let drive_applied = apply_drive(body, settings, grounded, steering, acceleration);
        let brake_ratio = apply_brakes(body, settings, grounded, steering, acceleration, dt);
        apply_drag(body, settings);

        TickReport {
            spring_forces,
            grounded,
            drive_applied,
            brake_ratio,
        }
    }

    // Raycast + сила пружины, по колесу в порядке WheelId::ALL
    fn update_suspensions(
        &mut self,
        body: &mut impl VehicleBody,
        settings: &VehicleSettings,
        dt: f32,
    ) -> [f32; 4] {
        let mut forces = [0.0; 4];

        for wheel in WheelId::ALL {
            let index = wheel.index();
            self.springs[index] = cast_spring(body, settings, wheel, self.springs[index], dt);
            forces[index] = apply_spring_force(body, settings, wheel, &self.springs[index]);
        }

        forces
    }
}

fn update_steering(
    body: &mut impl VehicleBody,
    settings: &VehicleSettings,
    grounded: [bool; 4],
    steering: f32,
    dt: f32,
) {
    for wheel in WheelId::ALL {
        if !grounded[wheel.index()] {
            continue;
        }
        apply_lateral_friction(body, settings, wheel, steering, dt);
    }
}
