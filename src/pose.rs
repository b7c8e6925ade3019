use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, TAU};

/// Where and how a paddle is placed when it spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order
    pub rotation: Vec3,
}

impl Pose {
    pub const fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix for an instance drawn at this pose with uniform scale
    pub fn transform(&self, scale: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(scale), self.orientation(), self.position)
    }
}

/// Hand-placed paddles present before the first spawn tick
pub fn default_seed() -> Vec<Pose> {
    vec![
        Pose::new(Vec3::new(150.0, 1.0, 60.0), Vec3::new(0.0, 0.0, FRAC_PI_2)),
        Pose::new(Vec3::new(-150.0, 0.0, -60.0), Vec3::new(0.0, FRAC_PI_4, FRAC_PI_2)),
        Pose::new(Vec3::new(-100.0, 5.0, 70.0), Vec3::new(FRAC_PI_6, 0.0, FRAC_PI_3)),
        Pose::new(Vec3::new(100.0, 10.0, -70.0), Vec3::new(FRAC_PI_4, FRAC_PI_4, 0.0)),
    ]
}

/// Axis-aligned box that spawn positions are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl SpawnVolume {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// True when every axis has `min <= max`
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all() && self.min.is_finite() && self.max.is_finite()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl Default for SpawnVolume {
    fn default() -> Self {
        Self::new(Vec3::new(-160.0, 0.0, -80.0), Vec3::new(160.0, 30.0, 80.0))
    }
}

/// Draws random spawn poses from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseGenerator {
    volume: SpawnVolume,
}

impl PoseGenerator {
    pub fn new(volume: SpawnVolume) -> Self {
        Self { volume }
    }

    /// Each coordinate uniform over its own axis of the spawn volume
    pub fn generate_position(&self) -> Vec3 {
        let mut rng = rand::thread_rng();
        Vec3::new(
            sample_axis(&mut rng, self.volume.min.x, self.volume.max.x),
            sample_axis(&mut rng, self.volume.min.y, self.volume.max.y),
            sample_axis(&mut rng, self.volume.min.z, self.volume.max.z),
        )
    }

    /// Each angle uniform over [0, 2pi)
    pub fn generate_rotation(&self) -> Vec3 {
        let mut rng = rand::thread_rng();
        Vec3::new(
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
            rng.gen_range(0.0..TAU),
        )
    }

    pub fn generate(&self) -> Pose {
        Pose::new(self.generate_position(), self.generate_rotation())
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    // gen_range panics on an empty range; a flat axis just pins the value
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}
