//! Входные данные машины (steering + throttle)
//!
//! Заполняется раз в variable-rate кадр (клавиатура, scripted driver),
//! читается fixed-rate pipeline'ом столько раз, сколько тиков успеет пройти.

use bevy::prelude::*;

/// Допуск "почти ноль" для clamped input'ов
///
/// Ветки drive/brake выбираются сравнением с этим epsilon, не `== 0.0`.
pub const INPUT_EPSILON: f32 = 1e-5;

pub fn approx_zero(value: f32) -> bool {
    value.abs() < INPUT_EPSILON
}

/// Инвариант: steering, acceleration ∈ [-1, 1]
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct VehicleInput {
    steering: f32,
    acceleration: f32,
}

impl VehicleInput {
    pub fn new(steering: f32, acceleration: f32) -> Self {
        let mut input = Self::default();
        input.set_steering(steering);
        input.set_acceleration(acceleration);
        input
    }

    pub fn set_steering(&mut self, steering: f32) {
        self.steering = clamp_axis(steering);
    }

    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = clamp_axis(acceleration);
    }

    pub fn steering(&self) -> f32 {
        self.steering
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }
}

// NaN (сломанный axis) → 0
fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_are_clamped() {
        let input = VehicleInput::new(3.0, -7.5);
        assert_eq!(input.steering(), 1.0);
        assert_eq!(input.acceleration(), -1.0);
    }

    #[test]
    fn test_in_range_inputs_pass_through() {
        let mut input = VehicleInput::default();
        input.set_steering(-0.25);
        input.set_acceleration(0.5);
        assert_eq!(input.steering(), -0.25);
        assert_eq!(input.acceleration(), 0.5);
    }

    #[test]
    fn test_nan_input_is_neutral() {
        let input = VehicleInput::new(f32::NAN, f32::NAN);
        assert_eq!(input.steering(), 0.0);
        assert_eq!(input.acceleration(), 0.0);
    }

    #[test]
    fn test_approx_zero() {
        assert!(approx_zero(0.0));
        assert!(approx_zero(5e-6));
        assert!(approx_zero(-5e-6));
        assert!(!approx_zero(1e-3));
    }
}
