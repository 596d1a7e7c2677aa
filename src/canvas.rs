use crate::history::Snapshot;
use crate::image::LoadedImage;
use crate::tools::DrawingStyle;
use egui::{Color32, ColorImage, Pos2, Rect, Vec2, pos2};
use std::sync::Arc;

/// Color the surface is wiped to by `clear`, `clear_rect` and at startup.
pub const BACKGROUND: Color32 = Color32::WHITE;

// Stamp spacing along strokes and circle outlines, in pixels. Half-pixel
// steps keep round-brush stamps gap-free at any stroke width.
const STAMP_SPACING: f32 = 0.5;

/// Fixed-size CPU pixel buffer with the raster primitives the drawing tools
/// need. The GPU texture is owned by the app shell; the canvas only tracks a
/// dirty flag so uploads happen when pixels actually changed.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
    dirty: bool,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "canvas must have a non-zero size");
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width * height],
            dirty: true,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    pub fn size_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Read one pixel. Unlike the drawing primitives, reads do not clip.
    ///
    /// Panics if `(x, y)` is outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Color32 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} canvas",
            self.width,
            self.height
        );
        self.pixels[y * self.width + x]
    }

    /// True once since the last call if any primitive touched the buffer.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage {
            size: [self.width, self.height],
            pixels: self.pixels.clone(),
        }
    }

    /// Capture the full current contents. No side effect on the buffer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.size(), Arc::from(self.pixels.as_slice()))
    }

    /// Write a snapshot's pixels back, replacing the current contents.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.size() != self.size() {
            log::warn!(
                "refusing to restore {:?} snapshot onto {:?} canvas",
                snapshot.size(),
                self.size()
            );
            return;
        }
        self.pixels.copy_from_slice(snapshot.pixels());
        self.dirty = true;
    }

    /// Wipe the whole surface to the background color.
    pub fn clear(&mut self) {
        self.pixels.fill(BACKGROUND);
        self.dirty = true;
    }

    /// Fill `rect` with the background color, clipped to the canvas bounds.
    pub fn clear_rect(&mut self, rect: Rect) {
        let x0 = (rect.min.x.floor().max(0.0) as usize).min(self.width);
        let y0 = (rect.min.y.floor().max(0.0) as usize).min(self.height);
        let x1 = (rect.max.x.ceil().min(self.width as f32)).max(0.0) as usize;
        let y1 = (rect.max.y.ceil().min(self.height as f32)).max(0.0) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for y in y0..y1 {
            let row = y * self.width;
            self.pixels[row + x0..row + x1].fill(BACKGROUND);
        }
        self.dirty = true;
    }

    /// Stroke a line segment with a round brush.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, style: &DrawingStyle) {
        let radius = style.width * 0.5;
        let steps = (from.distance(to) / STAMP_SPACING).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.fill_disc(from.lerp(to, t), radius, style.color);
        }
        self.dirty = true;
    }

    /// Stroke an axis-aligned rectangle outline. `extent` is signed: a drag
    /// up-and-left of the origin renders the reflected box.
    pub fn stroke_rect(&mut self, origin: Pos2, extent: Vec2, style: &DrawingStyle) {
        let rect = Rect::from_two_pos(origin, origin + extent);
        let corners = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ];
        for i in 0..4 {
            self.stroke_segment(corners[i], corners[(i + 1) % 4], style);
        }
    }

    /// Stroke a circle outline.
    pub fn stroke_circle(&mut self, center: Pos2, radius: f32, style: &DrawingStyle) {
        if radius <= 0.0 {
            self.fill_disc(center, style.width * 0.5, style.color);
            self.dirty = true;
            return;
        }
        let circumference = std::f32::consts::TAU * radius;
        let steps = (circumference / STAMP_SPACING).ceil().max(8.0) as usize;
        for i in 0..steps {
            let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
            let point = pos2(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            );
            self.fill_disc(point, style.width * 0.5, style.color);
        }
        self.dirty = true;
    }

    /// Draw decoded image pixels scaled (nearest-neighbor) to fill the whole
    /// canvas, replacing the current contents.
    pub fn draw_image_scaled(&mut self, image: &LoadedImage) {
        for y in 0..self.height {
            let src_y = y * image.height() / self.height;
            for x in 0..self.width {
                let src_x = x * image.width() / self.width;
                self.pixels[y * self.width + x] = image.pixel(src_x, src_y);
            }
        }
        self.dirty = true;
    }

    fn fill_disc(&mut self, center: Pos2, radius: f32, color: Color32) {
        let radius = radius.max(0.5);
        let x0 = ((center.x - radius).floor().max(0.0)) as usize;
        let y0 = ((center.y - radius).floor().max(0.0)) as usize;
        let x1 = ((center.x + radius).ceil().min(self.width as f32)).max(0.0) as usize;
        let y1 = ((center.y + radius).ceil().min(self.height as f32)).max(0.0) as usize;
        let r_sq = radius * radius;
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r_sq {
                    self.pixels[y * self.width + x] = color;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    fn style() -> DrawingStyle {
        DrawingStyle {
            color: Color32::BLACK,
            width: 2.0,
        }
    }

    #[test]
    fn new_canvas_is_background() {
        let canvas = Canvas::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(canvas.pixel(x, y), BACKGROUND);
            }
        }
    }

    #[test]
    fn signed_extent_matches_normalized_rect() {
        let mut reversed = Canvas::new(64, 64);
        reversed.stroke_rect(pos2(50.0, 50.0), vec2(-40.0, -40.0), &style());

        let mut normalized = Canvas::new(64, 64);
        normalized.stroke_rect(pos2(10.0, 10.0), vec2(40.0, 40.0), &style());

        assert_eq!(reversed.snapshot(), normalized.snapshot());
    }

    #[test]
    fn clear_rect_clips_to_bounds() {
        let mut canvas = Canvas::new(16, 16);
        canvas.stroke_segment(pos2(0.0, 0.0), pos2(15.0, 15.0), &style());
        // Extends past three edges; must not panic and must clear the overlap.
        canvas.clear_rect(Rect::from_min_max(pos2(-8.0, -8.0), pos2(40.0, 4.0)));
        assert_eq!(canvas.pixel(1, 1), BACKGROUND);
        assert_eq!(canvas.pixel(10, 10), Color32::BLACK);
    }

    #[test]
    fn restore_rejects_mismatched_size() {
        let small = Canvas::new(4, 4);
        let snap = small.snapshot();
        let mut big = Canvas::new(8, 8);
        big.stroke_segment(pos2(2.0, 2.0), pos2(2.0, 2.0), &style());
        let before = big.snapshot();
        big.restore(&snap);
        assert_eq!(big.snapshot(), before);
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let mut canvas = Canvas::new(8, 8);
        canvas.stroke_segment(pos2(1.0, 1.0), pos2(6.0, 6.0), &style());
        let inked = canvas.snapshot();
        canvas.clear();
        assert_eq!(canvas.pixel(3, 3), BACKGROUND);
        canvas.restore(&inked);
        assert_eq!(canvas.snapshot(), inked);
    }

    #[test]
    fn image_scaling_maps_quadrants() {
        let source = LoadedImage::from_pixels(
            2,
            2,
            vec![
                Color32::RED,
                Color32::GREEN,
                Color32::BLUE,
                Color32::YELLOW,
            ],
        );
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_image_scaled(&source);
        assert_eq!(canvas.pixel(1, 1), Color32::RED);
        assert_eq!(canvas.pixel(6, 1), Color32::GREEN);
        assert_eq!(canvas.pixel(1, 6), Color32::BLUE);
        assert_eq!(canvas.pixel(6, 6), Color32::YELLOW);
    }

    #[test]
    #[should_panic(expected = "outside 4x4 canvas")]
    fn pixel_read_out_of_bounds_panics() {
        let canvas = Canvas::new(4, 4);
        let _ = canvas.pixel(4, 0);
    }

    #[test]
    fn dirty_flag_set_by_primitives() {
        let mut canvas = Canvas::new(8, 8);
        assert!(canvas.take_dirty()); // fresh buffer wants one upload
        assert!(!canvas.take_dirty());
        canvas.stroke_segment(pos2(1.0, 1.0), pos2(2.0, 2.0), &style());
        assert!(canvas.take_dirty());
    }
}
