//! Колёса: идентификаторы и геометрия креплений (WheelLayout)
//!
//! Оси кузова (Bevy, right-handed):
//! - forward = -Z → передние колёса на локальном -Z
//! - right = +X → левые колёса на локальном -X
//! - up = +Y

use bevy::prelude::*;

/// Колесо машины — ровно 4 варианта
///
/// Передняя/задняя ось различаются структурно: рулят только передние,
/// тормозят только задние.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum WheelId {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl WheelId {
    /// Порядок обхода колёс в каждом тике (и порядок raycast'ов)
    pub const ALL: [WheelId; 4] = [
        WheelId::FrontLeft,
        WheelId::FrontRight,
        WheelId::BackLeft,
        WheelId::BackRight,
    ];

    /// Задняя ось (тормоза)
    pub const BACK: [WheelId; 2] = [WheelId::BackLeft, WheelId::BackRight];

    /// Индекс в массиве per-wheel состояния
    pub const fn index(self) -> usize {
        match self {
            WheelId::FrontLeft => 0,
            WheelId::FrontRight => 1,
            WheelId::BackLeft => 2,
            WheelId::BackRight => 3,
        }
    }

    pub const fn is_front(self) -> bool {
        matches!(self, WheelId::FrontLeft | WheelId::FrontRight)
    }

    pub const fn is_left(self) -> bool {
        matches!(self, WheelId::FrontLeft | WheelId::BackLeft)
    }
}

/// Локальное смещение крепления колеса на середине высоты кузова
///
/// `padding_x = 0` ставит колесо на край кузова, больше — ближе к центру.
pub fn mount_offset(wheel: WheelId, half_extents: Vec3, padding_x: f32, padding_z: f32) -> Vec3 {
    let lateral = half_extents.x * (1.0 - 2.0 * padding_x);
    let longitudinal = half_extents.z * (1.0 - 2.0 * padding_z);

    let x = if wheel.is_left() { -lateral } else { lateral };
    // forward = -Z
    let z = if wheel.is_front() { -longitudinal } else { longitudinal };

    Vec3::new(x, 0.0, z)
}

/// Точка старта suspension raycast'а (нижняя грань кузова), local space
pub fn spring_local_position(wheel: WheelId, half_extents: Vec3, padding_x: f32, padding_z: f32) -> Vec3 {
    mount_offset(wheel, half_extents, padding_x, padding_z) - Vec3::Y * half_extents.y
}

/// Точка приложения steering/drive/brake сил ("torque position"), local space
pub fn torque_local_position(wheel: WheelId, half_extents: Vec3, padding_x: f32, padding_z: f32) -> Vec3 {
    mount_offset(wheel, half_extents, padding_x, padding_z)
}
