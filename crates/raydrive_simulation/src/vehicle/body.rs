//! Rigid body абстракция для vehicle pipeline
//!
//! Core не знает про Rapier: он читает позу/скорость кузова, кастует лучи
//! и пишет силы через этот trait. Rapier реализация — в `vehicle::rapier`,
//! для unit-тестов — плоская земля в памяти.

use bevy::prelude::*;

/// Trait для внешнего rigid body (интегратор, raycast, силы)
///
/// Все силы копятся в один и тот же integration step.
pub trait VehicleBody {
    /// Мировая поза кузова
    fn transform(&self) -> &Transform;

    /// Half extents box-коллайдера кузова (local space)
    fn half_extents(&self) -> Vec3;

    /// Линейная скорость кузова (центр масс)
    fn linear_velocity(&self) -> Vec3;

    /// Скорость произвольной мировой точки, "прикреплённой" к кузову
    fn point_velocity(&self, point: Vec3) -> Vec3;

    /// Raycast против мира (кузов исключён). Возвращает дистанцию до hit'а.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32>;

    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3);

    /// Сила в центр масс (без момента)
    fn apply_force(&mut self, force: Vec3);

    fn up(&self) -> Vec3 {
        self.transform().rotation * Vec3::Y
    }

    fn forward(&self) -> Vec3 {
        vehicle_forward(self.transform())
    }

    /// Local → world (без кеша: поза меняется каждый тик)
    fn to_world(&self, local: Vec3) -> Vec3 {
        self.transform().transform_point(local)
    }

    /// Проекция скорости кузова на forward (знак = направление движения)
    fn forward_speed(&self) -> f32 {
        self.forward().dot(self.linear_velocity())
    }
}

/// Forward ось машины (Bevy: -Z)
pub fn vehicle_forward(transform: &Transform) -> Vec3 {
    transform.rotation * Vec3::NEG_Z
}

/// Forward speed для визуального слоя (без доступа к raycast'ам)
pub fn forward_speed(transform: &Transform, velocity: Vec3) -> f32 {
    vehicle_forward(transform).dot(velocity)
}
