//! One-time bar layout from the drawing area.

#[allow(unused_imports)]
use micromath::F32Ext;

#[cfg(feature = "logging")]
use defmt::info;
#[cfg(feature = "logging")]
use defmt_rtt as _;

use crate::error::ConfigurationError;
use crate::types::{DerivedLayout, LayoutConfig};

/// Derives bar count, samples per bar and bar width for one half of the
/// mirrored graph.
///
/// Bars fill `area_width / 2`; the count never exceeds the spectrum window
/// length since one sample per bar is the finest resolution. When every
/// sample gets its own bar the width is stretched so the bars exactly cover
/// the half width.
pub fn plan(config: &LayoutConfig) -> Result<DerivedLayout, ConfigurationError> {
    validate(config)?;

    let window_length = config.window_length();
    let spacing = config.bar_spacing;
    let half_width = config.area_width / 2.0;

    let pitch = config.bar_width + spacing;
    let bar_count = ((half_width - spacing / 2.0) / pitch).ceil().max(1.0) as usize;
    let bar_count = bar_count.min(window_length);
    let samples_per_bar = window_length / bar_count;

    let bar_width = if bar_count == window_length {
        (half_width - bar_count as f32 * spacing) / bar_count as f32
    } else {
        config.bar_width
    };
    if !(bar_width > 0.0) {
        return Err(ConfigurationError::NonPositiveBarWidth(bar_width));
    }

    // Widest coordinates the geometry reaches; sizes must survive f32 there.
    let extent_x = half_width + bar_count as f32 * pitch + bar_width;
    let extent_y = config.area_height + config.bar_minimum;
    for (size, extent) in [
        (bar_width, extent_x),
        (bar_width, extent_y),
        (config.bar_minimum, extent_y),
    ] {
        if !resolvable(size, extent) {
            return Err(ConfigurationError::BelowPrecision { size, extent });
        }
    }

    log::info!(
        "layout planned: {} bars, {} samples per bar, bar width {}",
        bar_count,
        samples_per_bar,
        bar_width
    );
    #[cfg(feature = "logging")]
    info!(
        "layout planned: {} bars, {} samples per bar, bar width {}",
        bar_count, samples_per_bar, bar_width
    );

    Ok(DerivedLayout {
        bar_count,
        samples_per_bar,
        bar_width,
    })
}

/// `size` is at least two ulps at `extent`, so `x + size > x` for any `|x| <= extent`.
fn resolvable(size: f32, extent: f32) -> bool {
    let extent = extent.abs();
    let ulp = f32::from_bits(extent.to_bits() + 1) - extent;
    size >= 2.0 * ulp
}

fn validate(config: &LayoutConfig) -> Result<(), ConfigurationError> {
    if config.spectrum_end <= config.spectrum_start {
        return Err(ConfigurationError::EmptySpectrumWindow {
            start: config.spectrum_start,
            end: config.spectrum_end,
        });
    }
    if config.spectrum_end > config.spectrum_size {
        return Err(ConfigurationError::WindowOutOfRange {
            end: config.spectrum_end,
            spectrum_size: config.spectrum_size,
        });
    }
    let (width, height) = (config.area_width, config.area_height);
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ConfigurationError::InvalidArea { width, height });
    }
    if !(config.bar_spacing >= 0.0) || !config.bar_spacing.is_finite() {
        return Err(ConfigurationError::NegativeSpacing(config.bar_spacing));
    }
    if !(config.bar_width + config.bar_spacing > 0.0) || !config.bar_width.is_finite() {
        return Err(ConfigurationError::NonPositiveBarPitch {
            bar_width: config.bar_width,
            spacing: config.bar_spacing,
        });
    }
    if !(config.bar_minimum > 0.0) || !config.bar_minimum.is_finite() {
        return Err(ConfigurationError::NonPositiveBarMinimum(config.bar_minimum));
    }
    if !(config.peak_drop >= 0.0) || !config.peak_drop.is_finite() {
        return Err(ConfigurationError::InvalidPeakDrop(config.peak_drop));
    }
    Ok(())
}
