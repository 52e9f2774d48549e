use alloc::vec::Vec;

use crate::types::{DerivedLayout, GeometryBatch, Quad};

/// Quads emitted per bar: bar and both peak markers, on each side.
pub const QUADS_PER_BAR: usize = 6;

/// Horizontal layout shared by every frame of one run.
pub struct GeometryBuilder {
    layout: DerivedLayout,
    bar_spacing: f32,
    area_width: f32,
    area_height: f32,
}

impl GeometryBuilder {
    pub fn new(layout: DerivedLayout, bar_spacing: f32, area_width: f32, area_height: f32) -> Self {
        Self {
            layout,
            bar_spacing,
            area_width,
            area_height,
        }
    }

    pub fn build(&self, bar_heights: &[f32], peaks: &[f32]) -> GeometryBatch {
        let mut batch = Vec::with_capacity(self.layout.bar_count * QUADS_PER_BAR);
        self.build_into(bar_heights, peaks, &mut batch);
        batch
    }

    /// Clears `batch` and fills it with the mirrored geometry of one frame.
    ///
    /// Two cursors start at the vertical centerline, half a spacing apart, and
    /// walk outward one bar pitch per bar. Per bar the order is left bar, left
    /// top peak, left bottom peak, then the same three on the right.
    pub fn build_into(&self, bar_heights: &[f32], peaks: &[f32], batch: &mut GeometryBatch) {
        batch.clear();

        let bar_width = self.layout.bar_width;
        let pitch = bar_width + self.bar_spacing;
        let center_y = self.area_height / 2.0;

        let mut left_x = self.area_width / 2.0 - self.bar_spacing / 2.0;
        let mut right_x = self.area_width / 2.0 + self.bar_spacing / 2.0;

        for (&height, &peak_y) in bar_heights
            .iter()
            .zip(peaks.iter())
            .take(self.layout.bar_count)
        {
            let bar_top = center_y - height / 2.0;
            let bar_bottom = center_y + height / 2.0;
            let mirrored_peak_y = self.area_height - peak_y;

            batch.push(Quad::new(left_x - bar_width, bar_top, left_x, bar_bottom));
            batch.push(Quad::from_xywh(left_x - bar_width, peak_y, bar_width, bar_width));
            batch.push(Quad::from_xywh(
                left_x - bar_width,
                mirrored_peak_y,
                bar_width,
                bar_width,
            ));

            batch.push(Quad::new(right_x, bar_top, right_x + bar_width, bar_bottom));
            batch.push(Quad::from_xywh(right_x, peak_y, bar_width, bar_width));
            batch.push(Quad::from_xywh(right_x, mirrored_peak_y, bar_width, bar_width));

            left_x -= pitch;
            right_x += pitch;
        }
    }
}
