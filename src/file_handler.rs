use crate::error::ImageLoadError;
use crate::image::LoadedImage;
use eframe::egui;
use std::path::Path;

/// Decodes image bytes into canvas-ready pixels.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage, ImageLoadError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    log::debug!("decoded {width}x{height} image");
    Ok(LoadedImage::from_rgba_bytes(width, height, &rgba.into_raw()))
}

/// Reads and decodes an image file from disk.
pub fn load_image_from_path(path: &Path) -> Result<LoadedImage, ImageLoadError> {
    let bytes = std::fs::read(path).map_err(|source| ImageLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}

/// Accepts image files dropped onto the window and hands their decoded
/// pixels to the caller. Load failures are logged here and never surface
/// further.
pub struct FileHandler {
    processed_files: Vec<String>,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            processed_files: Vec::new(),
        }
    }

    /// Process any newly dropped files, returning the images that decoded
    /// successfully.
    pub fn poll_dropped_images(&mut self, ctx: &egui::Context) -> Vec<LoadedImage> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            // The drop is over; the same file may be dropped again later.
            self.processed_files.clear();
            return Vec::new();
        }

        let mut images = Vec::new();
        let mut attempted = 0;

        for file in &dropped {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            // A drop can linger in the raw input for a frame; load once.
            if self.processed_files.contains(&file_name) {
                continue;
            }
            self.processed_files.push(file_name.clone());
            attempted += 1;

            match self.load_dropped_file(file, &file_name) {
                Ok(image) => images.push(image),
                Err(err) => log::error!("dropped file {file_name} rejected: {err}"),
            }
        }

        if attempted > 0 && images.is_empty() {
            log::warn!("no usable images among {} dropped file(s)", dropped.len());
        }

        images
    }

    fn load_dropped_file(
        &self,
        file: &egui::DroppedFile,
        file_name: &str,
    ) -> Result<LoadedImage, ImageLoadError> {
        if !is_image_file(file) {
            return Err(ImageLoadError::UnsupportedType(file_name.to_owned()));
        }

        if let Some(bytes) = &file.bytes {
            log::info!("loading dropped image from memory: {file_name}");
            decode_image(bytes)
        } else if let Some(path) = &file.path {
            log::info!("loading dropped image from path: {file_name}");
            load_image_from_path(path)
        } else {
            Err(ImageLoadError::UnsupportedType(format!(
                "{file_name} (no accessible data)"
            )))
        }
    }

    /// Overlay telling the user the drop will be accepted.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop to load onto the canvas:".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("image_drop")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

/// Check by MIME type when the drop source provides one, otherwise by
/// extension.
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        path.extension().is_some_and(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        })
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_drop() -> egui::DroppedFile {
        let pixels = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        pixels
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        egui::DroppedFile {
            name: "drop.png".to_owned(),
            mime: "image/png".to_owned(),
            bytes: Some(bytes.into()),
            ..Default::default()
        }
    }

    fn poll_frame(
        ctx: &egui::Context,
        handler: &mut FileHandler,
        dropped_files: Vec<egui::DroppedFile>,
    ) -> usize {
        let input = egui::RawInput {
            dropped_files,
            ..Default::default()
        };
        let mut loaded = 0;
        ctx.run(input, |ctx| loaded = handler.poll_dropped_images(ctx).len());
        loaded
    }

    #[test]
    fn lingering_drop_loads_once_but_can_be_dropped_again() {
        let ctx = egui::Context::default();
        let mut handler = FileHandler::new();
        let file = png_drop();

        assert_eq!(poll_frame(&ctx, &mut handler, vec![file.clone()]), 1);
        // The same drop lingering into the next frame must not load twice.
        assert_eq!(poll_frame(&ctx, &mut handler, vec![file.clone()]), 0);
        // A frame without drops ends the gesture...
        assert_eq!(poll_frame(&ctx, &mut handler, Vec::new()), 0);
        // ...after which re-dropping the same file loads it again.
        assert_eq!(poll_frame(&ctx, &mut handler, vec![file]), 1);
    }

    #[test]
    fn undecodable_drop_yields_nothing() {
        let ctx = egui::Context::default();
        let mut handler = FileHandler::new();
        let file = egui::DroppedFile {
            name: "garbage.png".to_owned(),
            mime: "image/png".to_owned(),
            bytes: Some(vec![0u8; 16].into()),
            ..Default::default()
        };
        assert_eq!(poll_frame(&ctx, &mut handler, vec![file]), 0);
    }
}
