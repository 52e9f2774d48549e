#![no_std]
//! Mirrored, peak-holding spectrum bars.
//!
//! Turns a stream of magnitude frames into a fixed-size list of quads every
//! frame: a layout is planned once from the drawing area, then each frame is
//! aggregated into smoothed bar heights, peaks are advanced and the mirrored
//! geometry is emitted for a [`Renderer`].
extern crate alloc;

pub mod audio_source;
pub mod error;
pub mod frame_loop;
pub mod geometry_builder;
pub mod layout_planner;
pub mod mirror_spectrum;
pub mod paint;
pub mod peak_tracker;
pub mod renderer;
pub mod spectrum_aggregator;
pub mod types;

pub use audio_source::AudioSource;
pub use error::{ConfigurationError, FrameError, LoopError};
pub use frame_loop::{run_frame_loop, Clock, FrameStats, PresentationSurface};
pub use layout_planner::plan;
pub use mirror_spectrum::MirrorSpectrum;
pub use paint::PaintStyle;
pub use peak_tracker::PeakState;
pub use renderer::{DrawTargetRenderer, Renderer};
pub use types::*;

/// Constants of the reference configuration.
pub mod consts {
    pub const AREA_WIDTH: f32 = 512.0;
    /// 16:9 of the width.
    pub const AREA_HEIGHT: f32 = 288.0;
    pub const SPECTRUM_SIZE: usize = 512;
    pub const SPECTRUM_START: usize = 2;
    pub const SPECTRUM_END: usize = 130;
    pub const BAR_WIDTH: f32 = 2.0;
    pub const BAR_MINIMUM: f32 = 2.0;
    pub const BAR_SPACING: f32 = 1.0;
    pub const PEAK_DROP: f32 = 0.5;
    /// Frames between periodic statistics log lines.
    pub const LOG_INTERVAL: u8 = 200;
}
