use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Base fill of the reference visualizer.
pub const LIGHT_STEEL_BLUE: Rgb888 = Rgb888::new(0xB0, 0xC4, 0xDE);

/// Fill applied to every quad of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Solid(Rgb888),
    /// Each quad fades from `top` at its top edge to `bottom` at its bottom edge.
    VerticalGradient { top: Rgb888, bottom: Rgb888 },
}

impl Default for PaintStyle {
    fn default() -> Self {
        PaintStyle::Solid(LIGHT_STEEL_BLUE)
    }
}

impl PaintStyle {
    /// Color at relative height `t` inside a quad, 0.0 is the top edge.
    pub fn color_at(&self, t: f32) -> Rgb888 {
        match *self {
            PaintStyle::Solid(color) => color,
            PaintStyle::VerticalGradient { top, bottom } => lerp_color(top, bottom, t),
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, PaintStyle::Solid(_))
    }
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let value = a as f32 + (b as f32 - a as f32) * t;
    (value + 0.5).clamp(0.0, 255.0) as u8
}

fn lerp_color(a: Rgb888, b: Rgb888, t: f32) -> Rgb888 {
    let t = t.clamp(0.0, 1.0);
    Rgb888::new(
        lerp_channel(a.r(), b.r(), t),
        lerp_channel(a.g(), b.g(), t),
        lerp_channel(a.b(), b.b(), t),
    )
}
