use egui::{Context, PointerButton, Pos2, Rect, Vec2, pos2};

/// A neutral pointer event in canvas-local pixel coordinates.
///
/// egui already folds mouse and touch into one pointer stream; this layer
/// additionally strips screen-space positions and widget concerns so the
/// state machine stays input-device-agnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Pos2),
    Moved(Pos2),
    Released(Pos2),
}

/// Converts raw egui pointer state into `PointerEvent`s for one canvas.
pub struct InputHandler {
    down: bool,
    last_canvas_pos: Option<Pos2>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            down: false,
            last_canvas_pos: None,
        }
    }

    /// Drain this frame's pointer input. `display_rect` is where the canvas
    /// texture is shown on screen; positions are mapped into the canvas's
    /// own `canvas_size` pixel space.
    ///
    /// Leaving `display_rect` mid-drag emits a `Released` at the last known
    /// position, ending the interaction the way releasing the button would.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        display_rect: Rect,
        canvas_size: Vec2,
    ) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let to_canvas = |p: Pos2| -> Pos2 {
                pos2(
                    ((p.x - display_rect.min.x) / display_rect.width() * canvas_size.x)
                        .clamp(0.0, canvas_size.x),
                    ((p.y - display_rect.min.y) / display_rect.height() * canvas_size.y)
                        .clamp(0.0, canvas_size.y),
                )
            };
            let inside = input
                .pointer
                .latest_pos()
                .filter(|p| display_rect.contains(*p));

            if self.down {
                match inside {
                    Some(p) => {
                        let pos = to_canvas(p);
                        if input.pointer.button_released(PointerButton::Primary) {
                            events.push(PointerEvent::Released(pos));
                            self.down = false;
                        } else if Some(pos) != self.last_canvas_pos {
                            events.push(PointerEvent::Moved(pos));
                        }
                        self.last_canvas_pos = Some(pos);
                    }
                    None => {
                        // Pointer left the canvas while drawing.
                        if let Some(pos) = self.last_canvas_pos {
                            events.push(PointerEvent::Released(pos));
                        }
                        self.down = false;
                    }
                }
            } else if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(p) = inside {
                    let pos = to_canvas(p);
                    events.push(PointerEvent::Pressed(pos));
                    self.down = true;
                    self.last_canvas_pos = Some(pos);
                }
            } else if let Some(p) = inside {
                // Plain hover. The state machine ignores these while idle,
                // but the stream stays uniform.
                let pos = to_canvas(p);
                if Some(pos) != self.last_canvas_pos {
                    events.push(PointerEvent::Moved(pos));
                }
                self.last_canvas_pos = Some(pos);
            }
        });

        events
    }
}
