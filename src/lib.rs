pub mod assets;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod loaders;
pub mod math;
pub mod mesh;
pub mod overlay;
pub mod physics;
pub mod pose;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod spawner;
pub mod store;
pub mod title;
pub mod types;

pub use config::{ProfileError, SceneProfile};
pub use pose::{Pose, PoseGenerator, SpawnVolume};
pub use spawner::{CancelToken, Spawner};
pub use store::{Placed, RetentionStore, DEFAULT_CAPACITY};
