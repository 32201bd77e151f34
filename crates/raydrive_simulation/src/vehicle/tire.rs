//! TireFrictionModel — боковое сцепление (slip)
//!
//! Для каждого grounded колеса гасим долю боковой скорости в точке контакта:
//! Δv = grip * (-slide_velocity), сила = Δv / dt * tire_mass.
//! dt обязан быть fixed шагом симуляции.

use bevy::prelude::*;

use super::body::VehicleBody;
use super::settings::VehicleSettings;
use super::suspension::spring_world_position;
use super::wheel::{torque_local_position, WheelId};

/// Направление качения колеса (world)
///
/// Передние колёса повёрнуты вокруг up кузова на steering * steer_angle градусов,
/// положительный steering — поворот направо (по часовой сверху).
pub fn roll_direction(body: &impl VehicleBody, settings: &VehicleSettings, wheel: WheelId, steering: f32) -> Vec3 {
    let forward = body.forward();
    if !wheel.is_front() {
        return forward;
    }

    let angle = (steering * settings.steer_angle).to_radians();
    Quat::from_axis_angle(body.up(), -angle) * forward
}

/// Боковая ось колеса: up × roll
pub fn slide_direction(body: &impl VehicleBody, settings: &VehicleSettings, wheel: WheelId, steering: f32) -> Vec3 {
    body.up().cross(roll_direction(body, settings, wheel, steering))
}

/// Мировая "torque position": крепление колеса без опускания к земле
pub fn torque_world_position(body: &impl VehicleBody, settings: &VehicleSettings, wheel: WheelId) -> Vec3 {
    body.to_world(torque_local_position(
        wheel,
        body.half_extents(),
        settings.wheel_padding_x,
        settings.wheel_padding_z,
    ))
}

/// "Impulse as force": Δv / dt * tire_mass
pub fn velocity_change_to_force(velocity_change: f32, dt: f32, tire_mass: f32) -> f32 {
    if dt > 0.0 {
        velocity_change / dt * tire_mass
    } else {
        0.0
    }
}

/// Сила бокового сцепления для одного колеса (вызывать только для grounded)
pub fn lateral_friction_force(
    body: &impl VehicleBody,
    settings: &VehicleSettings,
    wheel: WheelId,
    steering: f32,
    dt: f32,
) -> Vec3 {
    let contact = spring_world_position(body, settings, wheel);
    let slide = slide_direction(body, settings, wheel, steering);

    let slide_velocity = slide.dot(body.point_velocity(contact));
    let desired_velocity_change = settings.grip_factor(wheel.is_front()) * -slide_velocity;

    slide * velocity_change_to_force(desired_velocity_change, dt, settings.tire_mass)
}

pub fn apply_lateral_friction(
    body: &mut impl VehicleBody,
    settings: &VehicleSettings,
    wheel: WheelId,
    steering: f32,
    dt: f32,
) {
    let force = lateral_friction_force(body, settings, wheel, steering, dt);
    let point = torque_world_position(body, settings, wheel);
    body.apply_force_at_point(force, point);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::body::test_body::FlatGroundBody;

    const DT: f32 = 0.02;

    #[test]
    fn test_back_wheels_ignore_steering() {
        let body = FlatGroundBody::resting(0.3);
        let settings = VehicleSettings::arcade();

        let roll = roll_direction(&body, &settings, WheelId::BackLeft, 1.0);
        assert_eq!(roll, Vec3::NEG_Z);
    }

    #[test]
    fn test_positive_steering_turns_right() {
        let body = FlatGroundBody::resting(0.3);
        let settings = VehicleSettings::arcade();

        let roll = roll_direction(&body, &settings, WheelId::FrontLeft, 1.0);
        // right = +X
        assert!(roll.x > 0.0);
        assert!(roll.z < 0.0);
        let expected = settings.steer_angle.to_radians();
        assert!((roll.angle_between(Vec3::NEG_Z) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_steering_symmetry() {
        let body = FlatGroundBody::resting(0.3);
        let settings = VehicleSettings::arcade();

        for wheel in [WheelId::FrontLeft, WheelId::FrontRight] {
            let left = roll_direction(&body, &settings, wheel, -0.5);
            let right = roll_direction(&body, &settings, wheel, 0.5);

            // Зеркальны относительно forward оси (-Z)
            assert!((left.x + right.x).abs() < 1e-6);
            assert!((left.z - right.z).abs() < 1e-6);
            assert!((left.y - right.y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_slide_direction_is_lateral() {
        let body = FlatGroundBody::resting(0.3);
        let settings = VehicleSettings::arcade();

        for wheel in WheelId::ALL {
            let roll = roll_direction(&body, &settings, wheel, 0.3);
            let slide = slide_direction(&body, &settings, wheel, 0.3);
            assert!(slide.dot(roll).abs() < 1e-6);
            assert!(slide.dot(body.up()).abs() < 1e-6);
            assert!((slide.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sideways_velocity_is_opposed() {
        let body = FlatGroundBody::resting(0.3).with_velocity(Vec3::new(2.0, 0.0, 0.0));
        let settings = VehicleSettings::arcade();

        let force = lateral_friction_force(&body, &settings, WheelId::BackLeft, 0.0, DT);
        // grip 0.6 * 2 m/s / 0.02 * 50 kg = 3000 N против движения
        assert!((force.x + 3000.0).abs() < 1e-2, "force = {:?}", force);
        assert!(force.z.abs() < 1e-4);
    }

    #[test]
    fn test_forward_motion_has_no_slip_on_straight_wheels() {
        let body = FlatGroundBody::resting(0.3).with_velocity(Vec3::new(0.0, 0.0, -10.0));
        let settings = VehicleSettings::arcade();

        for wheel in WheelId::ALL {
            let force = lateral_friction_force(&body, &settings, wheel, 0.0, DT);
            assert!(force.length() < 1e-3, "{:?}: {:?}", wheel, force);
        }
    }

    #[test]
    fn test_slip_sampled_at_contact_point() {
        // Вращение вокруг Z: у крепления боковой скорости нет, у точки контакта есть
        let mut body = FlatGroundBody::resting(0.3);
        body.angular_velocity = Vec3::Z;
        let settings = VehicleSettings::arcade();
        let wheel = WheelId::BackLeft;

        let slide = slide_direction(&body, &settings, wheel, 0.0);
        let mount = torque_world_position(&body, &settings, wheel);
        assert!(slide.dot(body.point_velocity(mount)).abs() < 1e-6);

        // contact - center = (-0.8, -0.5, 1.4) → ω×r = (0.5, -0.8, 0)
        // grip 0.6 * 0.5 m/s / 0.02 * 50 kg = 750 N вдоль -X
        let force = lateral_friction_force(&body, &settings, wheel, 0.0, DT);
        assert!((force - Vec3::new(-750.0, 0.0, 0.0)).length() < 1e-2, "force = {:?}", force);
    }

    #[test]
    fn test_friction_applied_at_torque_position() {
        let mut body = FlatGroundBody::resting(0.3).with_velocity(Vec3::new(1.0, 0.0, 0.0));
        let settings = VehicleSettings::arcade();

        apply_lateral_friction(&mut body, &settings, WheelId::FrontRight, 0.0, DT);

        let point = torque_world_position(&body, &settings, WheelId::FrontRight);
        assert_eq!(point.y, body.transform.translation.y);
        assert_eq!(body.forces_at(point).len(), 1);
    }
}
