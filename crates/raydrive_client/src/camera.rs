use bevy::prelude::*;
use raydrive_simulation::vehicle::vehicle_forward;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, chase_target);
    }
}

/// Chase camera: висит за машиной по её курсу, смотрит чуть вперёд
#[derive(Component, Debug, Clone, Copy)]
pub struct ChaseCamera {
    /// Расстояние за машиной (m)
    pub distance: f32,
    /// Высота над машиной (m)
    pub height: f32,
    /// Точка взгляда впереди машины (m)
    pub look_ahead: f32,
    /// Скорость догоняния, 1/s
    pub stiffness: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            distance: 9.0,
            height: 3.5,
            look_ahead: 4.0,
            stiffness: 5.0,
        }
    }
}

/// Entity the chase camera follows
#[derive(Component)]
pub struct CameraTarget;

/// Курс машины в горизонтальной плоскости (крен и тангаж не качают камеру)
pub fn heading(target: &Transform) -> Vec3 {
    let forward = vehicle_forward(target);
    Vec3::new(forward.x, 0.0, forward.z)
        .try_normalize()
        .unwrap_or(Vec3::NEG_Z)
}

/// Куда камера стремится встать
pub fn chase_position(target: &Transform, camera: &ChaseCamera) -> Vec3 {
    target.translation - heading(target) * camera.distance + Vec3::Y * camera.height
}

pub fn look_point(target: &Transform, camera: &ChaseCamera) -> Vec3 {
    target.translation + heading(target) * camera.look_ahead
}

/// Доля пути до цели за кадр, не зависит от fps
pub fn follow_factor(stiffness: f32, dt: f32) -> f32 {
    1.0 - (-stiffness * dt).exp()
}

fn chase_target(
    time: Res<Time>,
    target: Query<&Transform, (With<CameraTarget>, Without<ChaseCamera>)>,
    mut cameras: Query<(&ChaseCamera, &mut Transform)>,
) {
    let Ok(target) = target.single() else {
        return;
    };

    for (camera, mut transform) in cameras.iter_mut() {
        let factor = follow_factor(camera.stiffness, time.delta_secs());
        let position = transform
            .translation
            .lerp(chase_position(target, camera), factor);

        *transform = Transform::from_translation(position).looking_at(look_point(target, camera), Vec3::Y);
    }
}
