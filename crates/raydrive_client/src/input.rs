use bevy::prelude::*;
use raydrive_simulation::VehicleInput;

pub struct KeyboardInputPlugin;

impl Plugin for KeyboardInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, read_keyboard_input);
    }
}

/// Marker: vehicle driven by the local keyboard
#[derive(Component)]
pub struct PlayerControlled;

/// Digital axis: -1 / 0 / +1
fn axis(keys: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> f32 {
    let mut value = 0.0;
    if keys.any_pressed(negative) {
        value -= 1.0;
    }
    if keys.any_pressed(positive) {
        value += 1.0;
    }
    value
}

/// Sample keyboard once per frame; the fixed pipeline reads the clamped values
fn read_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut vehicles: Query<&mut VehicleInput, With<PlayerControlled>>,
) {
    let steering = axis(&keys, [KeyCode::KeyA, KeyCode::ArrowLeft], [KeyCode::KeyD, KeyCode::ArrowRight]);
    let acceleration = axis(&keys, [KeyCode::KeyS, KeyCode::ArrowDown], [KeyCode::KeyW, KeyCode::ArrowUp]);

    for mut input in vehicles.iter_mut() {
        input.set_steering(steering);
        input.set_acceleration(acceleration);
    }
}
