//! Rapier реализация `VehicleBody`
//!
//! Архитектура:
//! - Raycast через ReadRapierContext (кузов исключён из запроса)
//! - Скорость точки через Velocity + ReadMassProperties (центр масс)
//! - Силы копятся в ExternalForce, который машина держит целиком:
//!   в начале тика обнуляем, pipeline добавляет, Rapier интегрирует

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::body::VehicleBody;
use super::controller::VehicleController;
use super::input::VehicleInput;
use super::settings::VehicleSettings;

pub struct RapierVehicleBody<'a, 'c> {
    entity: Entity,
    context: &'a RapierContext<'c>,
    transform: &'a Transform,
    velocity: &'a Velocity,
    center_of_mass: Vec3,
    half_extents: Vec3,
    external_force: &'a mut ExternalForce,
}

impl<'a, 'c> RapierVehicleBody<'a, 'c> {
    pub fn new(
        entity: Entity,
        context: &'a RapierContext<'c>,
        transform: &'a Transform,
        velocity: &'a Velocity,
        mass_properties: Option<&ReadMassProperties>,
        collider: Option<&Collider>,
        external_force: &'a mut ExternalForce,
    ) -> Self {
        let local_center_of_mass = mass_properties
            .map(|props| props.get().local_center_of_mass)
            .unwrap_or(Vec3::ZERO);

        // Нет box-коллайдера → нулевые extents (колёса в центре, fail soft)
        let half_extents = collider
            .and_then(|collider| collider.as_cuboid())
            .map(|cuboid| cuboid.half_extents())
            .unwrap_or(Vec3::ZERO);

        Self {
            entity,
            context,
            transform,
            velocity,
            center_of_mass: transform.transform_point(local_center_of_mass),
            half_extents,
            external_force,
        }
    }
}

impl VehicleBody for RapierVehicleBody<'_, '_> {
    fn transform(&self) -> &Transform {
        self.transform
    }

    fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity.linvel
    }

    fn point_velocity(&self, point: Vec3) -> Vec3 {
        self.velocity.linear_velocity_at_point(point, self.center_of_mass)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let filter = QueryFilter::default()
            .exclude_rigid_body(self.entity)
            .exclude_sensors();

        self.context
            .cast_ray(origin, direction, max_distance, true, filter)
            .map(|(_hit_entity, toi)| toi)
    }

    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3) {
        let at_point = ExternalForce::at_point(force, point, self.center_of_mass);
        self.external_force.force += at_point.force;
        self.external_force.torque += at_point.torque;
    }

    fn apply_force(&mut self, force: Vec3) {
        self.external_force.force += force;
    }
}

/// Система: один fixed тик pipeline'а для каждой машины
///
/// Работает в FixedUpdate до Rapier physics step.
pub fn tick_vehicles(
    rapier_context: ReadRapierContext,
    time: Res<Time<Fixed>>,
    mut vehicles: Query<(
        Entity,
        &mut VehicleController,
        &VehicleSettings,
        &VehicleInput,
        &Transform,
        &Velocity,
        &mut ExternalForce,
        Option<&ReadMassProperties>,
        Option<&Collider>,
    )>,
) {
    // Контекст ещё не создан (первый кадр) — пропускаем тик
    let Ok(context) = rapier_context.single() else {
        return;
    };

    let dt = time.delta_secs();

    for (entity, mut controller, settings, input, transform, velocity, mut external_force, mass, collider) in
        vehicles.iter_mut()
    {
        // Силы прошлого тика не должны копиться
        *external_force = ExternalForce::default();

        let mut body = RapierVehicleBody::new(
            entity,
            &context,
            transform,
            velocity,
            mass,
            collider,
            &mut *external_force,
        );

        let report = controller.tick(&mut body, settings, input, dt);

        if crate::logger::log_level() == crate::logger::LogLevel::Debug {
            crate::logger::log(&format!(
                "Vehicle {:?}: springs {:?}, grounded {:?}, drive {}, brakes {:?}",
                entity, report.spring_forces, report.grounded, report.drive_applied, report.brake_ratio
            ));
        }
    }
}
