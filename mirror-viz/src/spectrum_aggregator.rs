use alloc::{vec, vec::Vec};

use crate::error::FrameError;
use crate::types::DerivedLayout;

/// Buckets the consumed spectrum window into one height per bar.
///
/// Each bucket is `samples_per_bar` consecutive samples; bucket ranges are
/// fixed at construction because the layout never changes while running.
pub struct SpectrumAggregator {
    band_ranges: Vec<(usize, usize)>,
    bar_minimum: f32,
}

impl SpectrumAggregator {
    pub fn new(layout: &DerivedLayout, spectrum_start: usize, bar_minimum: f32) -> Self {
        let band_ranges = (0..layout.bar_count)
            .map(|i| {
                let start = spectrum_start + i * layout.samples_per_bar;
                (start, start + layout.samples_per_bar)
            })
            .collect();

        Self {
            band_ranges,
            bar_minimum,
        }
    }

    /// `[start, end)` sample indices of every bar, in bar order.
    pub fn band_ranges(&self) -> &[(usize, usize)] {
        &self.band_ranges
    }

    /// One past the last sample any bar reads.
    pub fn required_len(&self) -> usize {
        self.band_ranges.last().map_or(0, |&(_, end)| end)
    }

    pub fn bar_count(&self) -> usize {
        self.band_ranges.len()
    }

    pub fn aggregate(&self, frame: &[f32], area_height: f32) -> Result<Vec<f32>, FrameError> {
        let mut heights = vec![0.0; self.bar_count()];
        self.aggregate_into(frame, area_height, &mut heights)?;
        Ok(heights)
    }

    /// Writes smoothed pixel heights into `heights`.
    ///
    /// Bars are folded left to right: each bar is averaged with the smoothed
    /// bar before it, and the fold restarts from `bar_minimum` on every call.
    /// A frame shorter than [`required_len`](Self::required_len) is rejected
    /// before any height is written.
    pub fn aggregate_into(
        &self,
        frame: &[f32],
        area_height: f32,
        heights: &mut [f32],
    ) -> Result<(), FrameError> {
        let required = self.required_len();
        if frame.len() < required {
            return Err(FrameError::ShortFrame {
                len: frame.len(),
                required,
            });
        }

        let mut last_height = self.bar_minimum;

        for (height, &(start, end)) in heights.iter_mut().zip(self.band_ranges.iter()) {
            let bucket = &frame[start..end];
            let average = bucket.iter().copied().sum::<f32>() / bucket.len() as f32;
            let raw = self.bar_minimum + average * area_height;

            last_height = (raw + last_height) / 2.0;
            *height = last_height;
        }
        Ok(())
    }
}
