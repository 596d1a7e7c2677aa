use crate::canvas::Canvas;
use crate::geometry;
use crate::history::SnapshotHistory;
use crate::image::LoadedImage;
use crate::input::PointerEvent;
use crate::tools::{DrawingStyle, ToolMode};
use egui::Pos2;

/// Transient record of an in-progress pointer interaction. Exists only
/// between a press and the matching release.
struct Session {
    /// Press-down position; the shape anchor.
    anchor: Pos2,
    /// Most recent position, for freehand segment chaining.
    last: Pos2,
}

/// Owns the drawing surface, the snapshot history and the active tool state,
/// and turns pointer events into raster mutations.
///
/// The machine has two states: idle (`session` is `None`) and drawing.
/// Moves and releases that arrive without an open session are ignored, so a
/// spurious release can never push a snapshot.
pub struct CanvasController {
    canvas: Canvas,
    history: SnapshotHistory,
    tool: ToolMode,
    /// Tool to return to when the eraser is toggled off.
    previous_tool: ToolMode,
    style: DrawingStyle,
    session: Option<Session>,
}

impl CanvasController {
    pub fn new(width: usize, height: usize) -> Self {
        let canvas = Canvas::new(width, height);
        let mut history = SnapshotHistory::new();
        // Seed with the blank surface so undo can reach it and the first
        // shape drag has a preview base.
        history.push(canvas.snapshot());
        Self {
            canvas,
            history,
            tool: ToolMode::Freehand,
            previous_tool: ToolMode::Freehand,
            style: DrawingStyle::default(),
            session: None,
        }
    }

    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Pressed(pos) => self.pointer_pressed(pos),
            PointerEvent::Moved(pos) => self.pointer_moved(pos),
            PointerEvent::Released(pos) => self.pointer_released(pos),
        }
    }

    pub fn pointer_pressed(&mut self, pos: Pos2) {
        self.session = Some(Session {
            anchor: pos,
            last: pos,
        });
    }

    pub fn pointer_moved(&mut self, pos: Pos2) {
        let Some(session) = self.session.as_mut() else {
            return; // hover while idle
        };
        match self.tool {
            ToolMode::Freehand => {
                self.canvas.stroke_segment(session.last, pos, &self.style);
                session.last = pos;
            }
            ToolMode::Eraser => {
                self.canvas.clear_rect(geometry::eraser_rect(pos));
                session.last = pos;
            }
            ToolMode::Rectangle => {
                // Rubber-band: repaint from the pre-interaction snapshot so
                // previous preview outlines never accumulate.
                if let Some(base) = self.history.current() {
                    self.canvas.restore(base);
                }
                self.canvas
                    .stroke_rect(session.anchor, pos - session.anchor, &self.style);
            }
            ToolMode::Circle => {
                if let Some(base) = self.history.current() {
                    self.canvas.restore(base);
                }
                let (center, radius) = geometry::circle_from_drag(session.anchor, pos);
                self.canvas.stroke_circle(center, radius, &self.style);
            }
        }
    }

    pub fn pointer_released(&mut self, pos: Pos2) {
        let Some(session) = self.session.take() else {
            log::trace!("release without an open session ignored");
            return;
        };
        match self.tool {
            // Raster was already mutated progressively during moves.
            ToolMode::Freehand | ToolMode::Eraser => {}
            ToolMode::Rectangle => {
                if let Some(base) = self.history.current() {
                    self.canvas.restore(base);
                }
                self.canvas
                    .stroke_rect(session.anchor, pos - session.anchor, &self.style);
            }
            ToolMode::Circle => {
                if let Some(base) = self.history.current() {
                    self.canvas.restore(base);
                }
                let (center, radius) = geometry::circle_from_drag(session.anchor, pos);
                self.canvas.stroke_circle(center, radius, &self.style);
            }
        }
        // The single push per completed interaction.
        self.history.push(self.canvas.snapshot());
    }

    /// Wipe the surface and record the wiped state.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.history.push(self.canvas.snapshot());
    }

    /// Composite decoded image pixels scaled to fill the canvas and record
    /// the result.
    pub fn load_image(&mut self, image: &LoadedImage) {
        log::info!("loading {}x{} image onto canvas", image.width(), image.height());
        self.canvas.draw_image_scaled(image);
        self.history.push(self.canvas.snapshot());
    }

    pub fn undo(&mut self) {
        match self.history.undo() {
            Some(snapshot) => self.canvas.restore(&snapshot),
            None => log::debug!("nothing to undo"),
        }
    }

    pub fn redo(&mut self) {
        match self.history.redo() {
            Some(snapshot) => self.canvas.restore(&snapshot),
            None => log::debug!("nothing to redo"),
        }
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        if tool != ToolMode::Eraser {
            self.previous_tool = tool;
        }
        self.tool = tool;
    }

    /// Switch to the eraser, or back to the tool that was active before it.
    pub fn toggle_eraser(&mut self) {
        if self.tool == ToolMode::Eraser {
            self.tool = self.previous_tool;
        } else {
            self.previous_tool = self.tool;
            self.tool = ToolMode::Eraser;
        }
    }

    pub fn set_stroke_color(&mut self, color: egui::Color32) {
        self.style.color = color;
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        if width > 0.0 {
            self.style.width = width;
        } else {
            log::warn!("ignoring non-positive stroke width {width}");
        }
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn style(&self) -> DrawingStyle {
        self.style
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_some()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }
}
