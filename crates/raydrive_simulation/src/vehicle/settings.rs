//! VehicleSettings — плоский набор констант тюнинга
//!
//! Загружается из TOML (`assets/vehicle.toml`) или берётся пресет.
//! Все поля по умолчанию 0: пустые настройки = инертная физика (нулевые силы).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read vehicle settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse vehicle settings: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Настройки машины (immutable после спавна)
///
/// Живёт компонентом на entity машины, в шаги pipeline передаётся по `&`.
#[derive(Component, Debug, Clone, PartialEq, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct VehicleSettings {
    // Paddings (доля от half size кузова)
    pub wheel_padding_x: f32,
    pub wheel_padding_z: f32,

    // Suspension
    /// Длина пружины в покое = максимальная дальность raycast'а (m)
    pub spring_rest_length: f32,
    /// Жёсткость (N/m)
    pub spring_strength: f32,
    /// Демпфер (N·s/m)
    pub spring_damper: f32,

    // Handling
    /// Максимальный угол поворота передних колёс (градусы)
    pub steer_angle: f32,
    pub front_wheel_grip_factor: f32,
    pub back_wheel_grip_factor: f32,

    // Body
    pub tire_mass: f32,

    // Power
    pub accelerate_power: f32,
    pub max_speed: f32,
    pub max_reverse_speed: f32,

    // Brakes / air
    pub braking_power: f32,
    pub air_resistance: f32,
}

impl VehicleSettings {
    /// Пресет для кузова 2×1×4 m массой ~1200 kg
    pub fn arcade() -> Self {
        Self {
            wheel_padding_x: 0.1,
            wheel_padding_z: 0.15,
            spring_rest_length: 0.5,
            spring_strength: 20000.0,
            spring_damper: 1500.0,
            steer_angle: 30.0,
            front_wheel_grip_factor: 0.9,
            back_wheel_grip_factor: 0.6,
            tire_mass: 50.0,
            accelerate_power: 1500.0,
            max_speed: 30.0,
            max_reverse_speed: 10.0,
            braking_power: 0.02,
            air_resistance: 5.0,
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: VehicleSettings = toml::from_str(source)?;
        Ok(settings.sanitized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Загрузка с fallback: ошибка → warning в лог + `fallback`
    pub fn load_or(path: impl AsRef<Path>, fallback: Self) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                crate::logger::log_info(&format!("Vehicle settings loaded from {}", path.display()));
                settings
            }
            Err(err) => {
                crate::logger::log_warning(&format!(
                    "{} ({}), using fallback settings",
                    err,
                    path.display()
                ));
                fallback
            }
        }
    }

    /// Все поля неотрицательные: отрицательные значения обрезаем до 0
    pub fn sanitized(self) -> Self {
        Self {
            wheel_padding_x: self.wheel_padding_x.max(0.0),
            wheel_padding_z: self.wheel_padding_z.max(0.0),
            spring_rest_length: self.spring_rest_length.max(0.0),
            spring_strength: self.spring_strength.max(0.0),
            spring_damper: self.spring_damper.max(0.0),
            steer_angle: self.steer_angle.max(0.0),
            front_wheel_grip_factor: self.front_wheel_grip_factor.max(0.0),
            back_wheel_grip_factor: self.back_wheel_grip_factor.max(0.0),
            tire_mass: self.tire_mass.max(0.0),
            accelerate_power: self.accelerate_power.max(0.0),
            max_speed: self.max_speed.max(0.0),
            max_reverse_speed: self.max_reverse_speed.max(0.0),
            braking_power: self.braking_power.max(0.0),
            air_resistance: self.air_resistance.max(0.0),
        }
    }

    /// Grip передней или задней оси
    pub fn grip_factor(&self, front: bool) -> f32 {
        if front {
            self.front_wheel_grip_factor
        } else {
            self.back_wheel_grip_factor
        }
    }
}
