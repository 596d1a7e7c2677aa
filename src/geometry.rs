use egui::{Pos2, Rect, Vec2};

/// Side length of the square the eraser clears around the pointer.
pub const ERASER_SIZE: f32 = 10.0;

/// Circle described by a drag: centered on the midpoint of the drag, with a
/// radius of half the drag distance, so anchor and release sit on opposite
/// sides of the outline.
pub fn circle_from_drag(anchor: Pos2, pos: Pos2) -> (Pos2, f32) {
    (anchor.lerp(pos, 0.5), anchor.distance(pos) * 0.5)
}

/// The fixed-size square the eraser clears, centered on the pointer.
pub fn eraser_rect(center: Pos2) -> Rect {
    Rect::from_center_size(center, Vec2::splat(ERASER_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn circle_spans_the_drag() {
        let (center, radius) = circle_from_drag(pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert_eq!(center, pos2(5.0, 0.0));
        assert_eq!(radius, 5.0);
    }

    #[test]
    fn degenerate_drag_gives_zero_radius() {
        let (center, radius) = circle_from_drag(pos2(7.0, 7.0), pos2(7.0, 7.0));
        assert_eq!(center, pos2(7.0, 7.0));
        assert_eq!(radius, 0.0);
    }

    #[test]
    fn eraser_square_is_centered() {
        let rect = eraser_rect(pos2(20.0, 30.0));
        assert_eq!(rect.min, pos2(15.0, 25.0));
        assert_eq!(rect.max, pos2(25.0, 35.0));
    }
}
