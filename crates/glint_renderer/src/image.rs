//! Linear radiance buffer and image output.

use std::path::Path;

use crate::material::Color;

/// ACES filmic tonemap, applied per channel.
///
/// Maps linear radiance into [0, 1] with a film-like shoulder. The output
/// is treated as display-ready; no further gamma is applied.
pub fn aces_tonemap(color: Color) -> Color {
    fn fit(x: f32) -> f32 {
        ((x * (2.51 * x + 0.03)) / (x * (2.43 * x + 0.59) + 0.14)).clamp(0.0, 1.0)
    }
    Color::new(fit(color.x), fit(color.y), fit(color.z))
}

/// A width x height grid of linear radiance values.
///
/// Pixels stay in linear space until [`to_rgb8`](Self::to_rgb8) or
/// [`save`](Self::save) runs them through the tonemap.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Pixels in row-major order, top row first.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Tonemap every pixel and pack it into interleaved RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for &pixel in &self.pixels {
            let mapped = aces_tonemap(pixel) * 255.0;
            bytes.push(mapped.x as u8);
            bytes.push(mapped.y as u8);
            bytes.push(mapped.z as u8);
        }
        bytes
    }

    /// Write the tonemapped image to `path`, with the format inferred
    /// from the file extension (PNG, BMP, ...).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_black() {
        let image = ImageBuffer::new(4, 3);
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert_eq!(image.pixels().len(), 12);
        assert!(image.pixels().iter().all(|&p| p == Color::ZERO));
    }

    #[test]
    fn test_set_and_get_pixel() {
        let mut image = ImageBuffer::new(4, 3);
        image.set_pixel(2, 1, Color::new(1.0, 0.5, 0.25));
        assert_eq!(image.pixel(2, 1), Color::new(1.0, 0.5, 0.25));
        assert_eq!(image.pixel(1, 2), Color::ZERO);
    }

    #[test]
    fn test_aces_anchors() {
        assert_eq!(aces_tonemap(Color::ZERO), Color::ZERO);

        // aces(1) = 2.54 / 3.16
        let white = aces_tonemap(Color::ONE);
        assert!((white.x - 0.803797).abs() < 1e-5);

        // aces(0.5) = 0.6425 / 1.0425
        let grey = aces_tonemap(Color::new(0.5, 0.5, 0.5));
        assert!((grey.x - 0.616307).abs() < 1e-5);

        // Bright values clamp to 1 instead of wrapping.
        let hot = aces_tonemap(Color::new(10.0, 100.0, 1000.0));
        assert_eq!(hot, Color::ONE);
    }

    #[test]
    fn test_to_rgb8_applies_tonemap() {
        let mut image = ImageBuffer::new(2, 1);
        image.set_pixel(0, 0, Color::ONE);
        image.set_pixel(1, 0, Color::new(10.0, 0.0, 0.5));

        let bytes = image.to_rgb8();
        assert_eq!(bytes.len(), 6);
        assert_eq!(&bytes[0..3], &[204, 204, 204]);
        assert_eq!(&bytes[3..6], &[255, 0, 157]);
    }

    #[test]
    fn test_save_writes_png() {
        let mut image = ImageBuffer::new(8, 8);
        image.set_pixel(3, 3, Color::ONE);

        let path = std::env::temp_dir().join("glint_image_save_test.png");
        image.save(&path).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }
}
