use egui::Color32;

/// Decoded image pixels handed to the controller by the file-loading layer.
/// Stored as unmultiplied RGBA converted to `Color32`.
pub struct LoadedImage {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

impl LoadedImage {
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color32>) -> Self {
        assert!(width > 0 && height > 0, "image must have a non-zero size");
        assert_eq!(width * height, pixels.len());
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert raw RGBA bytes (4 per pixel, row-major) as produced by the
    /// `image` crate's `to_rgba8`.
    pub fn from_rgba_bytes(width: usize, height: usize, rgba: &[u8]) -> Self {
        assert_eq!(width * height * 4, rgba.len());
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| Color32::from_rgba_unmultiplied(px[0], px[1], px[2], px[3]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color32 {
        self.pixels[y * self.width + x]
    }
}
