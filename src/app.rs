use crate::controller::CanvasController;
use crate::file_handler::{self, FileHandler};
use crate::input::InputHandler;
use crate::tools::{DrawingStyle, ToolMode};
use egui::{Rect, TextureHandle, TextureOptions, Vec2};

/// Logical canvas size in pixels. Fixed for the lifetime of the app; the
/// texture is letterboxed into whatever space the window gives it.
const CANVAS_WIDTH: usize = 960;
const CANVAS_HEIGHT: usize = 600;

/// Tool and style survive restarts. The drawing itself intentionally does
/// not.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct Settings {
    tool: ToolMode,
    style: DrawingStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool: ToolMode::Freehand,
            style: DrawingStyle::default(),
        }
    }
}

pub struct PaintApp {
    controller: CanvasController,
    input: InputHandler,
    file_handler: FileHandler,
    canvas_texture: Option<TextureHandle>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut controller = CanvasController::new(CANVAS_WIDTH, CANVAS_HEIGHT);

        if let Some(storage) = cc.storage {
            if let Some(settings) = eframe::get_value::<Settings>(storage, eframe::APP_KEY) {
                controller.set_tool(settings.tool);
                controller.set_stroke_color(settings.style.color);
                controller.set_stroke_width(settings.style.width);
            }
        }

        Self {
            controller,
            input: InputHandler::new(),
            file_handler: FileHandler::new(),
            canvas_texture: None,
        }
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");
        ui.separator();

        let current = self.controller.tool();
        for tool in [ToolMode::Freehand, ToolMode::Rectangle, ToolMode::Circle] {
            if ui.selectable_label(current == tool, tool.label()).clicked() {
                self.controller.set_tool(tool);
            }
        }
        if ui
            .selectable_label(current == ToolMode::Eraser, ToolMode::Eraser.label())
            .clicked()
        {
            self.controller.toggle_eraser();
        }

        ui.separator();

        let style = self.controller.style();
        let mut color = style.color;
        ui.horizontal(|ui| {
            ui.label("Color:");
            egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            );
        });
        if color != style.color {
            self.controller.set_stroke_color(color);
        }

        let mut width = style.width;
        ui.horizontal(|ui| {
            ui.label("Width:");
            ui.add(egui::Slider::new(&mut width, 1.0..=50.0));
        });
        if width != style.width {
            self.controller.set_stroke_width(width);
        }

        ui.separator();

        ui.horizontal(|ui| {
            let history = self.controller.history();
            let (can_undo, can_redo) = (history.can_undo(), history.can_redo());
            if ui
                .add_enabled(can_undo, egui::Button::new("⟲ Undo"))
                .clicked()
            {
                self.controller.undo();
            }
            if ui
                .add_enabled(can_redo, egui::Button::new("⟳ Redo"))
                .clicked()
            {
                self.controller.redo();
            }
        });

        if ui.button("Clear canvas").clicked() {
            self.controller.clear();
        }

        #[cfg(not(target_arch = "wasm32"))]
        if ui.button("Open image…").clicked() {
            let picked = rfd::FileDialog::new()
                .add_filter("image", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
                .pick_file();
            if let Some(path) = picked {
                match file_handler::load_image_from_path(&path) {
                    Ok(image) => self.controller.load_image(&image),
                    Err(err) => log::error!("could not open {}: {err}", path.display()),
                }
            }
        }
    }

    /// Largest rect of the canvas's aspect ratio that fits `avail`, centered.
    fn display_rect(avail: Rect, canvas_size: Vec2) -> Rect {
        let scale = (avail.width() / canvas_size.x).min(avail.height() / canvas_size.y);
        Rect::from_center_size(avail.center(), canvas_size * scale)
    }

    fn upload_texture(&mut self, ctx: &egui::Context) {
        let dirty = self.controller.canvas_mut().take_dirty();
        match &mut self.canvas_texture {
            Some(texture) => {
                if dirty {
                    texture.set(
                        self.controller.canvas().to_color_image(),
                        TextureOptions::NEAREST,
                    );
                }
            }
            None => {
                self.canvas_texture = Some(ctx.load_texture(
                    "canvas",
                    self.controller.canvas().to_color_image(),
                    TextureOptions::NEAREST,
                ));
            }
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = Settings {
            tool: self.controller.tool(),
            style: self.controller.style(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &settings);
    }

    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.file_handler.preview_files_being_dropped(ctx);
        for image in self.file_handler.poll_dropped_images(ctx) {
            self.controller.load_image(&image);
        }

        egui::SidePanel::left("tools_panel")
            .resizable(false)
            .show(ctx, |ui| self.tools_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

            let canvas_size = self.controller.canvas().size_vec2();
            let display_rect = Self::display_rect(response.rect, canvas_size);

            for event in self.input.process_input(ctx, display_rect, canvas_size) {
                self.controller.handle_pointer_event(event);
            }

            self.upload_texture(ctx);
            if let Some(texture) = &self.canvas_texture {
                painter.image(
                    texture.id(),
                    display_rect,
                    Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            // Keep frames coming while a stroke is in progress so moves are
            // sampled promptly.
            if self.controller.is_drawing() {
                ctx.request_repaint();
            }
        });
    }
}
