use core::fmt;

/// Rejected [`LayoutConfig`](crate::LayoutConfig); the frame loop must not start.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum ConfigurationError {
    EmptySpectrumWindow { start: usize, end: usize },
    WindowOutOfRange { end: usize, spectrum_size: usize },
    InvalidArea { width: f32, height: f32 },
    NegativeSpacing(f32),
    NonPositiveBarPitch { bar_width: f32, spacing: f32 },
    NonPositiveBarWidth(f32),
    NonPositiveBarMinimum(f32),
    InvalidPeakDrop(f32),
    /// A bar or marker dimension vanishes in f32 rounding at the layout's extent.
    BelowPrecision { size: f32, extent: f32 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpectrumWindow { start, end } => {
                write!(f, "spectrum window [{}, {}) is empty", start, end)
            }
            Self::WindowOutOfRange { end, spectrum_size } => write!(
                f,
                "spectrum window end {} exceeds frame size {}",
                end, spectrum_size
            ),
            Self::InvalidArea { width, height } => {
                write!(f, "drawing area {}x{} must be positive", width, height)
            }
            Self::NegativeSpacing(spacing) => write!(f, "bar spacing {} is negative", spacing),
            Self::NonPositiveBarPitch { bar_width, spacing } => write!(
                f,
                "bar width {} plus spacing {} must be positive",
                bar_width, spacing
            ),
            Self::NonPositiveBarWidth(width) => {
                write!(f, "derived bar width {} must be positive", width)
            }
            Self::NonPositiveBarMinimum(minimum) => {
                write!(f, "bar minimum {} must be positive", minimum)
            }
            Self::InvalidPeakDrop(drop) => write!(f, "peak drop {} must be non-negative", drop),
            Self::BelowPrecision { size, extent } => write!(
                f,
                "size {} is too small to resolve at coordinate {}",
                size, extent
            ),
        }
    }
}

impl core::error::Error for ConfigurationError {}

/// The audio source broke its contract for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum FrameError {
    ShortFrame { len: usize, required: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortFrame { len, required } => write!(
                f,
                "spectrum frame has {} samples, window needs {}",
                len, required
            ),
        }
    }
}

impl core::error::Error for FrameError {}

/// Why [`run_frame_loop`](crate::run_frame_loop) stopped early.
#[derive(Debug)]
pub enum LoopError<E> {
    Frame(FrameError),
    Render(E),
}

impl<E> From<FrameError> for LoopError<E> {
    fn from(err: FrameError) -> Self {
        Self::Frame(err)
    }
}

impl<E: fmt::Debug> fmt::Display for LoopError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(err) => write!(f, "frame rejected: {}", err),
            Self::Render(err) => write!(f, "renderer failed: {:?}", err),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for LoopError<E> {}
