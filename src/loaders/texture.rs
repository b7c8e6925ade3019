use anyhow::{Context, Result};
use std::path::Path;

/// Decoded RGBA8 image, rows top to bottom
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl TextureData {
    /// Bytes per row as uploaded to the GPU
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    /// Downscale so neither side exceeds `max_dimension`, keeping the aspect ratio.
    /// Returns `None` when the texture already fits.
    pub fn fit_within(&self, max_dimension: u32) -> Result<Option<TextureData>> {
        if self.width <= max_dimension && self.height <= max_dimension {
            return Ok(None);
        }

        let scale = max_dimension as f64 / self.width.max(self.height) as f64;
        let width = ((self.width as f64 * scale).round() as u32).clamp(1, max_dimension);
        let height = ((self.height as f64 * scale).round() as u32).clamp(1, max_dimension);

        let source = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .context("Texture data does not match its dimensions")?;
        let resized = image::imageops::resize(&source, width, height, image::imageops::FilterType::Triangle);

        Ok(Some(TextureData {
            width,
            height,
            data: resized.into_raw(),
        }))
    }
}

pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureData> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("Failed to load texture: {}", path.display()))?
        .to_rgba8();

    let (width, height) = image.dimensions();
    log::info!("Loaded texture {} ({}x{})", path.display(), width, height);

    Ok(TextureData {
        width,
        height,
        data: image.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_texture_is_an_error() {
        assert!(load_texture("nowhere/court.jpeg").is_err());
    }

    fn solid(width: u32, height: u32) -> TextureData {
        TextureData {
            width,
            height,
            data: [200, 40, 40, 255].repeat((width * height) as usize),
        }
    }

    #[test]
    fn oversized_texture_is_downscaled() {
        let fitted = solid(300, 100).fit_within(150).unwrap().unwrap();
        assert_eq!((fitted.width, fitted.height), (150, 50));
        assert_eq!(fitted.data.len(), (fitted.bytes_per_row() * fitted.height) as usize);
        assert_eq!(&fitted.data[..4], &[200, 40, 40, 255]);

        let tall = solid(10, 4000).fit_within(2048).unwrap().unwrap();
        assert_eq!((tall.width, tall.height), (5, 2048));
    }

    #[test]
    fn fitting_texture_is_left_alone() {
        assert_eq!(solid(64, 32).fit_within(64).unwrap(), None);
    }

    #[test]
    fn mismatched_data_is_an_error() {
        let broken = TextureData {
            width: 300,
            height: 100,
            data: vec![0; 16],
        };
        assert!(broken.fit_within(150).is_err());
    }
}
