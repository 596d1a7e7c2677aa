use egui::Color32;

/// The active drawing tool. Matched exhaustively wherever pointer events are
/// handled, so adding a tool is a compile-time-checked extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ToolMode {
    Freehand,
    Eraser,
    Rectangle,
    Circle,
}

impl ToolMode {
    pub fn label(&self) -> &'static str {
        match self {
            ToolMode::Freehand => "✏ Freehand",
            ToolMode::Eraser => "⌫ Eraser",
            ToolMode::Rectangle => "▭ Rectangle",
            ToolMode::Circle => "◯ Circle",
        }
    }
}

/// Stroke color and width applied to every stroke and shape commit.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawingStyle {
    pub color: Color32,
    /// Brush diameter in canvas pixels. Kept positive.
    pub width: f32,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 3.0,
        }
    }
}
