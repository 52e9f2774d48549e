use alloc::{vec, vec::Vec};

#[cfg(feature = "logging")]
use defmt::info;
#[cfg(feature = "logging")]
use defmt_rtt as _;

use crate::consts::LOG_INTERVAL;
use crate::error::{ConfigurationError, FrameError};
use crate::geometry_builder::{GeometryBuilder, QUADS_PER_BAR};
use crate::layout_planner::plan;
use crate::peak_tracker::PeakState;
use crate::spectrum_aggregator::SpectrumAggregator;
use crate::types::{DerivedLayout, GeometryBatch, LayoutConfig, Quad};

/// The per-frame pipeline: aggregate, advance peaks, build geometry.
///
/// Owns the peak state for the lifetime of the visualization. Height and
/// quad buffers are allocated once and overwritten every frame.
pub struct MirrorSpectrum {
    config: LayoutConfig,
    layout: DerivedLayout,
    aggregator: SpectrumAggregator,
    builder: GeometryBuilder,
    peaks: PeakState,
    heights: Vec<f32>,
    batch: GeometryBatch,
    step_counter: u32,
    log_counter: u8,
}

impl MirrorSpectrum {
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigurationError> {
        let layout = plan(&config)?;
        let aggregator = SpectrumAggregator::new(&layout, config.spectrum_start, config.bar_minimum);
        let builder = GeometryBuilder::new(
            layout,
            config.bar_spacing,
            config.area_width,
            config.area_height,
        );

        Ok(Self {
            config,
            layout,
            aggregator,
            builder,
            peaks: PeakState::new(layout.bar_count, config.area_height),
            heights: vec![config.bar_minimum; layout.bar_count],
            batch: Vec::with_capacity(layout.bar_count * QUADS_PER_BAR),
            step_counter: 0,
            log_counter: 0,
        })
    }

    /// Runs one frame and returns its quads.
    pub fn update(&mut self, frame: &[f32]) -> Result<&[Quad], FrameError> {
        // Step 1: bucket and smooth; a short frame stops the whole frame here.
        self.aggregator
            .aggregate_into(frame, self.config.area_height, &mut self.heights)?;

        // Step 2: peaks follow the top edge of each bar.
        let center_y = self.config.area_height / 2.0;
        for (i, &height) in self.heights.iter().enumerate() {
            self.peaks
                .update(i, center_y - height / 2.0, self.config.peak_drop);
        }

        // Step 3: mirrored geometry.
        self.builder
            .build_into(&self.heights, self.peaks.peaks(), &mut self.batch);

        self.step_counter = self.step_counter.wrapping_add(1);
        self.log_counter = self.log_counter.wrapping_add(1);
        if self.log_counter >= LOG_INTERVAL {
            log::trace!(
                "frame {}: bar 0 height {}, peak {}",
                self.step_counter,
                self.heights[0],
                self.peaks.peaks()[0]
            );
            #[cfg(feature = "logging")]
            info!(
                "frame {}: bar 0 height {}, peak {}",
                self.step_counter,
                self.heights[0],
                self.peaks.peaks()[0]
            );
            self.log_counter = 0;
        }

        Ok(&self.batch)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(&self) -> &DerivedLayout {
        &self.layout
    }

    /// Heights of the most recent frame.
    pub fn bar_heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn peaks(&self) -> &PeakState {
        &self.peaks
    }

    pub fn band_ranges(&self) -> &[(usize, usize)] {
        self.aggregator.band_ranges()
    }

    /// Frames processed so far.
    pub fn step_counter(&self) -> u32 {
        self.step_counter
    }
}
