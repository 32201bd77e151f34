use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;
use raydrive_simulation::vehicle::forward_speed;
use raydrive_simulation::{Vehicle, VehicleController, VehicleInput, VehicleSettings, WheelId};

pub struct WheelVisualsPlugin;

impl Plugin for WheelVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_wheel_visuals);
    }
}

/// Visual wheel mesh (child of the vehicle entity)
///
/// Reads spring length / steering / velocity from the simulation, never writes back.
#[derive(Component)]
pub struct WheelVisual {
    pub wheel: WheelId,
    /// Degrees of spin per meter of forward travel
    pub spin_speed: f32,
    /// Local Y at spring length 0
    pub spring_min_y: f32,
    /// Local Y at spring rest length
    pub spring_max_y: f32,
    /// Accumulated spin (without steering)
    pub roll: Quat,
}

impl WheelVisual {
    pub fn new(wheel: WheelId, spin_speed: f32, spring_min_y: f32, spring_max_y: f32) -> Self {
        Self {
            wheel,
            spin_speed,
            spring_min_y,
            spring_max_y,
            roll: Quat::IDENTITY,
        }
    }
}

/// Spin increment for one frame; rolling forward (-Z) is a negative rotation about X
pub fn spin_delta(forward_speed: f32, spin_speed: f32, dt: f32) -> Quat {
    Quat::from_rotation_x(-(forward_speed * spin_speed * dt).to_radians())
}

/// Same steering sign as the physics: positive input turns right
pub fn steer_rotation(steering: f32, steer_angle: f32) -> Quat {
    Quat::from_rotation_y(-(steering * steer_angle).to_radians())
}

/// Wheel height from spring travel: min + (max - min) * length / rest
pub fn suspension_height(length: f32, rest_length: f32, min_y: f32, max_y: f32) -> f32 {
    if rest_length <= 0.0 {
        return min_y;
    }
    min_y + (max_y - min_y) * (length / rest_length)
}

fn update_wheel_visuals(
    time: Res<Time>,
    vehicles: Query<
        (&VehicleController, &VehicleSettings, &VehicleInput, &Transform, &Velocity),
        (With<Vehicle>, Without<WheelVisual>),
    >,
    mut wheels: Query<(&mut WheelVisual, &mut Transform, &ChildOf)>,
) {
    let dt = time.delta_secs();

    for (mut visual, mut transform, child_of) in wheels.iter_mut() {
        let Ok((controller, settings, input, vehicle_transform, velocity)) = vehicles.get(child_of.parent()) else {
            continue;
        };

        let length = controller.spring_length(visual.wheel);

        // Spin only while touching the ground
        if length < settings.spring_rest_length {
            let speed = forward_speed(vehicle_transform, velocity.linvel);
            visual.roll *= spin_delta(speed, visual.spin_speed, dt);
        }

        transform.rotation = if visual.wheel.is_front() {
            steer_rotation(input.steering(), settings.steer_angle) * visual.roll
        } else {
            visual.roll
        };

        transform.translation.y = suspension_height(
            length,
            settings.spring_rest_length,
            visual.spring_min_y,
            visual.spring_max_y,
        );
    }
}
