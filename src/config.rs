//! Scene profile: every tunable of the paddle scene in one TOML-loadable struct

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::pose::{default_seed, Pose, SpawnVolume};
use crate::store::DEFAULT_CAPACITY;

/// Profile errors
#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is out of range
    #[error("Invalid profile: {0}")]
    Invalid(String),

    /// Color string is not `#RRGGBB`
    #[error("Invalid color: {0}")]
    Color(String),
}

/// sRGB color written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn parse(text: &str) -> Result<Self, ProfileError> {
        let digits = text
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| ProfileError::Color(text.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ProfileError::Color(text.to_string()))
        };

        Ok(Self([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    /// Channels in [0, 1], still sRGB encoded
    pub fn to_srgb(self) -> [f32; 3] {
        self.0.map(|c| c as f32 / 255.0)
    }

    /// Channels in [0, 1], decoded to linear light
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb().map(crate::math::srgb_to_linear)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Rigid body world settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: Vec3,
    /// Fraction of normal velocity kept after a ground bounce, in [0, 1]
    pub restitution: f32,
    /// Height of the infinite ground collider
    pub ground_height: f32,
    /// Coulomb friction coefficient against the ground
    pub friction: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -60.0, 0.0),
            restitution: 0.7,
            ground_height: -20.0,
            friction: 0.6,
        }
    }
}

/// Colors of everything that is not a paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub floor_color: HexColor,
    pub sky_horizon: HexColor,
    pub sky_zenith: HexColor,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            floor_color: HexColor::new(0x87, 0xCE, 0xEB),
            sky_horizon: HexColor::new(0xDC, 0xEB, 0xF5),
            sky_zenith: HexColor::new(0x5A, 0x8F, 0xD0),
        }
    }
}

/// Everything that shapes one run of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneProfile {
    /// Most paddles kept alive at once
    pub capacity: usize,
    pub spawn_interval_ms: u64,
    /// Spawn ticks allowed to fire in a single frame after a stall
    pub max_catch_up_ticks: u32,
    /// Uniform scale applied to the paddle model
    pub model_scale: f32,
    pub spawn_volume: SpawnVolume,
    pub physics: PhysicsSettings,
    pub appearance: Appearance,
    pub seed: Vec<Pose>,
}

impl Default for SceneProfile {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            spawn_interval_ms: 3000,
            max_catch_up_ticks: 8,
            model_scale: 90.0,
            spawn_volume: SpawnVolume::default(),
            physics: PhysicsSettings::default(),
            appearance: Appearance::default(),
            seed: default_seed(),
        }
    }
}

impl SceneProfile {
    /// Load and validate a profile from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate; missing fields take their defaults
    pub fn from_toml(contents: &str) -> Result<Self, ProfileError> {
        let profile: Self = toml::from_str(contents)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_toml(&self) -> Result<String, ProfileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.capacity == 0 {
            return Err(ProfileError::Invalid("capacity must be at least 1".into()));
        }
        if self.spawn_interval_ms == 0 {
            return Err(ProfileError::Invalid("spawn_interval_ms must be positive".into()));
        }
        if !self.spawn_volume.is_valid() {
            return Err(ProfileError::Invalid(format!(
                "spawn_volume min {} exceeds max {}",
                self.spawn_volume.min, self.spawn_volume.max
            )));
        }
        if !(0.0..=1.0).contains(&self.physics.restitution) {
            return Err(ProfileError::Invalid(format!(
                "restitution {} outside [0, 1]",
                self.physics.restitution
            )));
        }
        if self.physics.friction < 0.0 || !self.physics.friction.is_finite() {
            return Err(ProfileError::Invalid("friction must be non-negative".into()));
        }
        if !(self.model_scale > 0.0 && self.model_scale.is_finite()) {
            return Err(ProfileError::Invalid("model_scale must be positive".into()));
        }
        if !self.physics.gravity.is_finite() {
            return Err(ProfileError::Invalid("gravity must be finite".into()));
        }
        Ok(())
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}
