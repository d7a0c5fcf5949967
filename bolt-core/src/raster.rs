use glam::Vec2;

/// Packed 8-bit RGB color.
pub type Rgb = [u8; 3];

/// Stroke color of every branch segment.
pub const WHITE: Rgb = [255, 255, 255];

/// A drawing surface the growth engine paints line segments onto.
///
/// The engine owns no surface itself; the caller hands one in per
/// generation and keeps it alive across generations, so segments from all
/// past trees accumulate until the surface is explicitly cleared.
pub trait RasterSink {
    /// Draws a line from `p1` to `p2`.
    ///
    /// `width` is a requested width in device units and may be fractional,
    /// zero, or negative; implementations apply [`effective_stroke`]
    /// rather than rejecting such values.
    fn draw_line(&mut self, p1: Vec2, p2: Vec2, color: Rgb, width: f32);
}

/// Resolves a requested stroke into the color and integer width to draw.
///
/// Widths below one device unit cannot be drawn thinner, so the color
/// channels are scaled by the width instead (simulating sub-pixel
/// coverage) and the drawn width is pinned to 1. Anything else keeps the
/// color and truncates the width to a whole number of units. This is what
/// makes far-out branches fade smoothly instead of disappearing at one
/// unit or over-brightening the surface.
///
/// The scale is clamped at zero so a degenerate negative width dims the
/// stroke all the way to black rather than wrapping the channels.
pub fn effective_stroke(color: Rgb, width: f32) -> (Rgb, u32) {
    if width < 1.0 {
        let scale = width.max(0.0);
        let dimmed = [
            (color[0] as f32 * scale) as u8,
            (color[1] as f32 * scale) as u8,
            (color[2] as f32 * scale) as u8,
        ];
        (dimmed, 1)
    } else {
        (color, width as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_unit_width_dims_color_and_draws_one_unit() {
        let (color, width) = effective_stroke(WHITE, 0.4);
        assert_eq!(color, [102, 102, 102]);
        assert_eq!(width, 1);
    }

    #[test]
    fn wide_strokes_truncate_width_and_keep_color() {
        let (color, width) = effective_stroke(WHITE, 2.7);
        assert_eq!(color, WHITE);
        assert_eq!(width, 2);
    }

    #[test]
    fn width_of_exactly_one_is_unscaled() {
        let (color, width) = effective_stroke(WHITE, 1.0);
        assert_eq!(color, WHITE);
        assert_eq!(width, 1);
    }

    #[test]
    fn non_positive_widths_dim_to_black_at_one_unit() {
        assert_eq!(effective_stroke(WHITE, 0.0), ([0, 0, 0], 1));
        assert_eq!(effective_stroke(WHITE, -2.0), ([0, 0, 0], 1));
    }

    #[test]
    fn dimming_scales_each_channel_independently() {
        let (color, width) = effective_stroke([200, 100, 50], 0.5);
        assert_eq!(color, [100, 50, 25]);
        assert_eq!(width, 1);
    }
}
