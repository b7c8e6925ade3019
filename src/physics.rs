//! Rigid bodies for the placed paddles, falling onto a flat ground collider
//!
//! Each body is an oriented box built from the paddle's local bounds. Only
//! body-vs-ground contact is resolved; paddles pass through each other.

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::config::PhysicsSettings;
use crate::core::timer::Accumulator;
use crate::math::AABB;
use crate::store::Placed;

pub const PHYSICS_HZ: f32 = 60.0;
pub const MAX_STEPS_PER_FRAME: u8 = 8;

/// Impacts slower than this do not bounce
const BOUNCE_THRESHOLD: f32 = 2.0;
/// Corners within this fraction of the collider's size count as touching
const CONTACT_SLOP: f32 = 0.05;
const ANGULAR_DAMPING: f32 = 0.8;
const SLEEP_LINEAR: f32 = 0.5;
const SLEEP_ANGULAR: f32 = 0.3;
/// Consecutive slow contact steps before a body is put to rest
const SLEEP_STEPS: u16 = 30;

/// Collision box in body space, already scaled to world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub bounds: AABB,
}

impl Collider {
    pub fn new(bounds: AABB) -> Self {
        Self { bounds }
    }

    /// Bounds of a model mesh at the given uniform scale
    pub fn from_model(model_bounds: AABB, scale: f32) -> Self {
        Self::new(model_bounds.scaled(scale))
    }

    fn inverse_inertia(&self) -> Vec3 {
        // Unit-mass solid box about its own center
        let h = self.bounds.half_extents().max(Vec3::splat(1e-3));
        let inertia = Vec3::new(h.y * h.y + h.z * h.z, h.x * h.x + h.z * h.z, h.x * h.x + h.y * h.y) / 3.0;
        inertia.recip()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Spawn id of the placed entry this body mirrors
    pub id: u64,
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub resting: bool,
    quiet_steps: u16,
}

impl RigidBody {
    pub fn from_placed(placed: &Placed) -> Self {
        Self {
            id: placed.id,
            position: placed.pose.position,
            orientation: placed.pose.orientation(),
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            resting: false,
            quiet_steps: 0,
        }
    }

    /// Model matrix for drawing this body at the given uniform scale
    pub fn transform(&self, scale: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(scale), self.orientation, self.position)
    }

    fn world_corners(&self, collider: &Collider) -> [Vec3; 8] {
        collider
            .bounds
            .corners()
            .map(|c| self.position + self.orientation * c)
    }

    /// Lowest point of the collider in world space
    pub fn lowest_point(&self, collider: &Collider) -> f32 {
        self.world_corners(collider)
            .iter()
            .map(|c| c.y)
            .fold(f32::INFINITY, f32::min)
    }
}

/// One body per placed paddle, stepped at a fixed rate
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    settings: PhysicsSettings,
    collider: Collider,
    bodies: Vec<RigidBody>,
    accumulator: Accumulator,
}

impl PhysicsWorld {
    pub fn new(settings: PhysicsSettings, collider: Collider) -> Self {
        Self {
            settings,
            collider,
            bodies: Vec::new(),
            accumulator: Accumulator::new(PHYSICS_HZ, MAX_STEPS_PER_FRAME),
        }
    }

    /// Match bodies to the placed list by spawn id
    ///
    /// Bodies whose entry was evicted are removed; entries without a body get
    /// one at their spawn pose. Surviving bodies keep their simulated state.
    pub fn sync(&mut self, placed: &[Placed]) {
        let before = self.bodies.len();
        self.bodies
            .retain(|body| placed.binary_search_by_key(&body.id, |p| p.id).is_ok());
        let removed = before - self.bodies.len();

        let mut added = 0;
        for entry in placed {
            if let Err(index) = self.bodies.binary_search_by_key(&entry.id, |b| b.id) {
                self.bodies.insert(index, RigidBody::from_placed(entry));
                added += 1;
            }
        }

        if added + removed > 0 {
            log::debug!("Physics sync: +{} -{} bodies ({} total)", added, removed, self.bodies.len());
        }
    }

    /// Run as many fixed steps as `delta` seconds cover
    pub fn step(&mut self, delta: f32) -> usize {
        let steps: Vec<f32> = self.accumulator.tick(delta).collect();
        for dt in &steps {
            self.step_fixed(*dt);
        }
        steps.len()
    }

    /// Advance every body by exactly `dt` seconds
    pub fn step_fixed(&mut self, dt: f32) {
        let settings = self.settings;
        let collider = self.collider;
        for body in &mut self.bodies {
            integrate(body, &settings, dt);
            resolve_ground(body, &settings, &collider);
        }
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn body(&self, id: u64) -> Option<&RigidBody> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|index| &self.bodies[index])
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    /// Model matrices for every body, in spawn order
    pub fn transforms(&self, scale: f32) -> Vec<Mat4> {
        self.bodies.iter().map(|b| b.transform(scale)).collect()
    }
}

fn integrate(body: &mut RigidBody, settings: &PhysicsSettings, dt: f32) {
    if body.resting {
        return;
    }

    body.linear_velocity += settings.gravity * dt;
    body.position += body.linear_velocity * dt;

    let spin = Quat::from_scaled_axis(body.angular_velocity * dt);
    body.orientation = (spin * body.orientation).normalize();
    body.angular_velocity *= (1.0 - ANGULAR_DAMPING * dt).max(0.0);
}

fn resolve_ground(body: &mut RigidBody, settings: &PhysicsSettings, collider: &Collider) {
    if body.resting {
        return;
    }

    let corners = body.world_corners(collider);
    let lowest = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
    let penetration = settings.ground_height - lowest;
    if penetration < 0.0 {
        body.quiet_steps = 0;
        return;
    }

    // Contact point: mean of the corners touching the ground
    let slop = collider.bounds.half_extents().max_element() * CONTACT_SLOP;
    let (sum, count) = corners
        .iter()
        .filter(|c| c.y <= lowest + slop)
        .fold((Vec3::ZERO, 0.0_f32), |(sum, n), c| (sum + *c, n + 1.0));
    let r = sum / count - body.position;

    body.position.y += penetration;

    let normal = Vec3::Y;
    let rotation = Mat3::from_quat(body.orientation);
    let inverse_inertia = rotation * Mat3::from_diagonal(collider.inverse_inertia()) * rotation.transpose();

    let contact_velocity = body.linear_velocity + body.angular_velocity.cross(r);
    let normal_speed = contact_velocity.dot(normal);

    if normal_speed < 0.0 {
        let restitution = if -normal_speed > BOUNCE_THRESHOLD {
            settings.restitution
        } else {
            0.0
        };
        let denominator = 1.0 + normal.dot((inverse_inertia * r.cross(normal)).cross(r));
        let impulse = -(1.0 + restitution) * normal_speed / denominator;
        apply_impulse(body, &inverse_inertia, r, normal * impulse);

        // Coulomb friction along the sliding direction
        let contact_velocity = body.linear_velocity + body.angular_velocity.cross(r);
        let tangential = contact_velocity - normal * contact_velocity.dot(normal);
        if let Some(tangent) = tangential.try_normalize() {
            let denominator = 1.0 + tangent.dot((inverse_inertia * r.cross(tangent)).cross(r));
            let friction = (tangential.length() / denominator).min(settings.friction * impulse);
            apply_impulse(body, &inverse_inertia, r, -tangent * friction);
        }
    }

    let quiet = body.linear_velocity.length() < SLEEP_LINEAR
        && body.angular_velocity.length() < SLEEP_ANGULAR;
    body.quiet_steps = if quiet { body.quiet_steps.saturating_add(1) } else { 0 };
    if body.quiet_steps >= SLEEP_STEPS {
        body.linear_velocity = Vec3::ZERO;
        body.angular_velocity = Vec3::ZERO;
        body.resting = true;
    }
}

fn apply_impulse(body: &mut RigidBody, inverse_inertia: &Mat3, r: Vec3, impulse: Vec3) {
    body.linear_velocity += impulse;
    body.angular_velocity += *inverse_inertia * r.cross(impulse);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Pose;

    fn unit_collider() -> Collider {
        Collider::new(AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0)))
    }

    fn placed(id: u64, y: f32) -> Placed {
        Placed {
            id,
            pose: Pose::new(Vec3::new(0.0, y, 0.0), Vec3::ZERO),
        }
    }

    #[test]
    fn sync_adds_and_evicts_by_id() {
        let mut world = PhysicsWorld::new(PhysicsSettings::default(), unit_collider());
        world.sync(&[placed(0, 5.0), placed(1, 5.0), placed(2, 5.0)]);
        world.step_fixed(0.1);
        let moved = world.body(1).map(|b| b.position);

        world.sync(&[placed(1, 5.0), placed(2, 5.0), placed(3, 5.0)]);

        let ids: Vec<u64> = world.bodies().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        // Surviving body keeps its simulated position
        assert_eq!(world.body(1).map(|b| b.position), moved);
        assert_eq!(world.body(3).map(|b| b.position.y), Some(5.0));
    }

    #[test]
    fn free_fall_follows_gravity() {
        let mut world = PhysicsWorld::new(PhysicsSettings::default(), unit_collider());
        world.sync(&[placed(0, 100.0)]);
        world.step_fixed(0.1);

        let body = &world.bodies()[0];
        assert!((body.linear_velocity.y + 6.0).abs() < 1e-4);
        assert!(body.position.y < 100.0);
    }

    #[test]
    fn step_uses_fixed_timesteps() {
        let mut world = PhysicsWorld::new(PhysicsSettings::default(), unit_collider());
        assert_eq!(world.step(0.01), 0);
        assert_eq!(world.step(0.01), 1);
        assert_eq!(world.step(10.0), MAX_STEPS_PER_FRAME as usize);
    }

    #[test]
    fn lowest_point_accounts_for_rotation() {
        let body = RigidBody::from_placed(&Placed {
            id: 0,
            pose: Pose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_4)),
        });
        let lowest = body.lowest_point(&unit_collider());
        assert!((lowest + std::f32::consts::SQRT_2).abs() < 1e-4);
    }
}
