//! Image loading for light textures
//!
//! Decodes PNG and Radiance HDR files into RGB float pixels, the format
//! rect and dome lights sample from.

use super::ResourceError;
use crate::foundation::math::Vec3;
use std::path::Path;

/// Decoded image data, row-major, one RGB triple per pixel
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// RGB pixels, `width * height` entries when well formed
    pub pixels: Vec<Vec3>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path_ref = path.as_ref();

        log::debug!("Loading light texture from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| ResourceError::Decode(format!("{}: {}", path_ref.display(), e)))?;

        let data = Self::from_dynamic(&img);
        log::info!("Loaded light texture {}x{} from {:?}", data.width, data.height, path_ref);
        Ok(data)
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ResourceError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| ResourceError::Decode(format!("image from bytes: {}", e)))?;

        Ok(Self::from_dynamic(&img))
    }

    fn from_dynamic(img: &image::DynamicImage) -> Self {
        let rgb = img.to_rgb32f();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| Vec3::new(p.0[0], p.0[1], p.0[2]))
            .collect();

        Self { pixels, width, height }
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: Vec3) -> Self {
        let pixel_count = width as usize * height as usize;
        Self {
            pixels: vec![color; pixel_count],
            width,
            height,
        }
    }

    /// Whether the pixel buffer matches the declared dimensions
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 2, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(img.pixels.len(), 8);
        assert!(img.is_consistent());
        assert_eq!(img.pixels[0], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_png_bytes_decode_to_float() {
        let mut buffer = image::RgbImage::new(2, 1);
        buffer.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        buffer.put_pixel(1, 0, image::Rgb([0, 0, 255]));

        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(buffer)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();

        let img = ImageData::from_bytes(bytes.get_ref()).unwrap();
        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixels[0], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(img.pixels[1], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_mismatched_buffer_is_inconsistent() {
        let img = ImageData {
            pixels: vec![Vec3::zeros()],
            width: 2,
            height: 1,
        };
        assert!(!img.is_consistent());
    }

    #[test]
    fn test_missing_file() {
        assert!(ImageData::from_file("definitely/not/here.png").is_err());
    }
}
