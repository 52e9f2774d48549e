use alloc::{vec, vec::Vec};

/// Peak marker Y coordinate of every bar, kept from frame to frame.
///
/// Smaller Y is visually higher. A marker jumps up to its bar top at once and
/// otherwise falls by a fixed amount per frame until the bar catches it.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakState {
    peaks: Vec<f32>,
}

impl PeakState {
    /// All markers start at the vertical center of the area.
    pub fn new(bar_count: usize, area_height: f32) -> Self {
        Self {
            peaks: vec![area_height / 2.0; bar_count],
        }
    }

    pub fn peaks(&self) -> &[f32] {
        &self.peaks
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Advances one marker and returns its new position.
    pub fn update(&mut self, bar_index: usize, bar_top_y: f32, drop_rate: f32) -> f32 {
        update(&mut self.peaks, bar_index, bar_top_y, drop_rate);
        self.peaks[bar_index]
    }
}

/// `peaks[bar_index] = min(peaks[bar_index] + drop_rate, bar_top_y)`
pub fn update(peaks: &mut [f32], bar_index: usize, bar_top_y: f32, drop_rate: f32) {
    let peak = &mut peaks[bar_index];
    *peak = (*peak + drop_rate).min(bar_top_y);
}
