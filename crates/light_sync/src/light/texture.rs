//! Texture data for rect and dome lights

use crate::assets::ImageData;
use crate::foundation::math::Vec3;
use std::path::PathBuf;
use std::sync::Arc;

/// Decoded light texture
///
/// `width == 0 || height == 0` means no texture; the pixel buffer is then
/// empty. When present the buffer holds exactly `width * height` pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightTexture {
    /// Row-major RGB pixels, shared between record snapshots
    pub pixels: Arc<Vec<Vec3>>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Authored file the texture was read from
    pub source: Option<PathBuf>,
}

impl LightTexture {
    /// Texture that is absent but remembers which file was requested
    pub fn absent(source: Option<PathBuf>) -> Self {
        Self { source, ..Default::default() }
    }

    /// Adopt decoded image data; inconsistent buffers yield an absent
    /// texture
    pub fn from_image(image: ImageData, source: Option<PathBuf>) -> Self {
        if !image.is_consistent() {
            log::warn!(
                "Light texture {:?} declares {}x{} but holds {} pixels; ignoring it",
                source,
                image.width,
                image.height,
                image.pixels.len()
            );
            return Self::absent(source);
        }
        if image.pixels.is_empty() {
            return Self::absent(source);
        }

        Self {
            pixels: Arc::new(image.pixels),
            width: image.width,
            height: image.height,
            source,
        }
    }

    /// Whether pixel data is available
    pub fn is_present(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Pixel at integer coordinates
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec3> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Nearest-neighbour lookup at normalized coordinates
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn sample_nearest(&self, u: f32, v: f32) -> Option<Vec3> {
        if !self.is_present() {
            return None;
        }
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);
        self.pixel(x, y)
    }
}
