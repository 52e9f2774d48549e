use alloc::vec::Vec;

use crate::consts::*;

/// Axis-aligned rectangle in area-relative coordinates, Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Quad {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square-or-rectangle from its top-left corner and extent.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// `left < right` and `top < bottom`.
    pub fn is_well_formed(&self) -> bool {
        self.left < self.right && self.top < self.bottom
    }
}

/// Quads for one frame, `6 * bar_count` of them.
pub type GeometryBatch = Vec<Quad>;

/// Everything the planner needs, fixed before the frame loop starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub area_width: f32,
    pub area_height: f32,
    /// Bar thickness used unless the layout saturates the spectrum window.
    pub bar_width: f32,
    pub bar_spacing: f32,
    /// Height of a bar fed with silence.
    pub bar_minimum: f32,
    /// Length of every frame the audio source hands out.
    pub spectrum_size: usize,
    pub spectrum_start: usize,
    pub spectrum_end: usize,
    /// Pixels a peak marker falls per frame.
    pub peak_drop: f32,
}

impl LayoutConfig {
    pub fn window_length(&self) -> usize {
        self.spectrum_end.saturating_sub(self.spectrum_start)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            area_width: AREA_WIDTH,
            area_height: AREA_HEIGHT,
            bar_width: BAR_WIDTH,
            bar_spacing: BAR_SPACING,
            bar_minimum: BAR_MINIMUM,
            spectrum_size: SPECTRUM_SIZE,
            spectrum_start: SPECTRUM_START,
            spectrum_end: SPECTRUM_END,
            peak_drop: PEAK_DROP,
        }
    }
}

/// Result of planning; does not change while the loop runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedLayout {
    pub bar_count: usize,
    pub samples_per_bar: usize,
    pub bar_width: f32,
}
