use std::borrow::Cow;
use std::path::Path;

use crate::loaders::{load_paddle_mesh, load_texture, TextureData};
use crate::math::AABB;
use crate::mesh::Mesh;
use crate::scenes::{court_texture, procedural_paddle};

/// Size of the painted court used when no texture file is available
pub const FALLBACK_TEXTURE_SIZE: (u32, u32) = (1024, 512);

/// Paddle model and court texture ready for upload
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub paddle: Mesh,
    pub court: TextureData,
}

impl SceneAssets {
    /// Load both assets, substituting built-in ones for anything missing
    pub fn load(model: impl AsRef<Path>, texture: impl AsRef<Path>) -> Self {
        let paddle = load_paddle_mesh(model).unwrap_or_else(|err| {
            log::warn!("{:#}; using built-in paddle", err);
            procedural_paddle()
        });

        let court = load_texture(texture).unwrap_or_else(|err| {
            log::warn!("{:#}; using built-in court", err);
            Self::fallback_court()
        });

        Self { paddle, court }
    }

    /// Built-in assets only, no file access
    pub fn builtin() -> Self {
        Self {
            paddle: procedural_paddle(),
            court: Self::fallback_court(),
        }
    }

    /// Court texture no larger than `max_dimension` on either side
    pub fn court_within(&self, max_dimension: u32) -> Cow<'_, TextureData> {
        match self.court.fit_within(max_dimension) {
            Ok(None) => Cow::Borrowed(&self.court),
            Ok(Some(fitted)) => {
                log::warn!(
                    "Court texture {}x{} exceeds device limit {}, downscaled to {}x{}",
                    self.court.width,
                    self.court.height,
                    max_dimension,
                    fitted.width,
                    fitted.height
                );
                Cow::Owned(fitted)
            }
            Err(err) => {
                log::warn!("{:#}; using built-in court", err);
                let (width, height) = FALLBACK_TEXTURE_SIZE;
                Cow::Owned(court_texture(width.min(max_dimension), height.min(max_dimension)))
            }
        }
    }

    fn fallback_court() -> TextureData {
        let (width, height) = FALLBACK_TEXTURE_SIZE;
        court_texture(width, height)
    }

    /// Model-space bounds of the paddle
    pub fn paddle_bounds(&self) -> AABB {
        self.paddle
            .bounds()
            .unwrap_or_else(|| AABB::new(glam::Vec3::splat(-0.1), glam::Vec3::splat(0.1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_builtin() {
        let assets = SceneAssets::load("missing/paddle.glb", "missing/court.jpeg");
        let builtin = SceneAssets::builtin();
        assert_eq!(assets.paddle, builtin.paddle);
        assert_eq!(assets.court, builtin.court);
        assert!(assets.paddle_bounds().half_extents().y > 0.0);
    }

    #[test]
    fn court_is_downscaled_to_device_limit() {
        let assets = SceneAssets::builtin();
        assert!(matches!(assets.court_within(8192), Cow::Borrowed(_)));

        let fitted = assets.court_within(256);
        assert_eq!((fitted.width, fitted.height), (256, 128));
    }

    #[test]
    fn corrupt_court_falls_back_within_limit() {
        let mut assets = SceneAssets::builtin();
        assets.court = TextureData {
            width: 9000,
            height: 300,
            data: Vec::new(),
        };
        let court = assets.court_within(512);
        assert!(court.width <= 512 && court.height <= 512);
        assert_eq!(court.data.len(), (court.bytes_per_row() * court.height) as usize);
    }
}
