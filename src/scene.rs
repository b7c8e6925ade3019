use std::time::Duration;

use glam::Mat4;

use crate::camera::OrbitCamera;
use crate::config::SceneProfile;
use crate::math::AABB;
use crate::physics::{Collider, PhysicsWorld};
use crate::spawner::{CancelToken, Spawner};

/// Simulation state of the paddle scene, independent of the GPU
///
/// Owns the spawner, the physics world mirroring its list, and the camera.
#[derive(Debug)]
pub struct PaddleScene {
    spawner: Spawner,
    token: CancelToken,
    physics: PhysicsWorld,
    pub camera: OrbitCamera,
    model_scale: f32,
}

impl PaddleScene {
    /// `model_bounds` are the paddle mesh bounds in model units
    pub fn new(profile: &SceneProfile, model_bounds: AABB) -> Self {
        let (spawner, token) = Spawner::start(profile);
        let collider = Collider::from_model(model_bounds, profile.model_scale);
        let mut physics = PhysicsWorld::new(profile.physics, collider);
        physics.sync(spawner.entries());

        Self {
            spawner,
            token,
            physics,
            camera: OrbitCamera::new(),
            model_scale: profile.model_scale,
        }
    }

    /// Advance spawn timer and physics by one frame
    pub fn update(&mut self, delta: Duration) {
        if self.spawner.advance(delta) > 0 {
            self.physics.sync(self.spawner.entries());
        }
        self.physics.step(delta.as_secs_f32());
    }

    /// Model matrices of every live paddle, oldest first
    pub fn transforms(&self) -> Vec<Mat4> {
        self.physics.transforms(self.model_scale)
    }

    pub fn paddle_count(&self) -> usize {
        self.spawner.len()
    }

    pub fn capacity(&self) -> usize {
        self.spawner.capacity()
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Handle that stops spawning from outside the frame loop
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Stop spawning and drop every paddle and body
    pub fn teardown(&mut self) {
        self.spawner.teardown();
        self.physics.sync(self.spawner.entries());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn scene() -> PaddleScene {
        let bounds = AABB::new(Vec3::new(-0.075, -0.14, -0.008), Vec3::new(0.075, 0.13, 0.008));
        PaddleScene::new(&SceneProfile::default(), bounds)
    }

    #[test]
    fn starts_with_seed_bodies() {
        let scene = scene();
        assert_eq!(scene.paddle_count(), 4);
        assert_eq!(scene.transforms().len(), 4);
        assert_eq!(scene.capacity(), 42);
    }

    #[test]
    fn update_spawns_and_simulates() {
        let mut scene = scene();
        let before = scene.physics().bodies()[0].position;

        scene.update(Duration::from_millis(3000));

        assert_eq!(scene.paddle_count(), 5);
        assert_eq!(scene.physics().bodies().len(), 5);
        assert!(scene.physics().bodies()[0].position.y < before.y);
    }

    #[test]
    fn teardown_clears_everything() {
        let mut scene = scene();
        let token = scene.cancel_token();
        scene.teardown();

        assert!(token.is_cancelled());
        assert_eq!(scene.paddle_count(), 0);
        assert!(scene.transforms().is_empty());

        scene.update(Duration::from_secs(30));
        assert_eq!(scene.paddle_count(), 0);
    }
}
