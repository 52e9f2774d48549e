//! Command-line arguments.

use clap::{Parser, ValueEnum};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use mirror_viz::{consts, paint::LIGHT_STEEL_BLUE, LayoutConfig, PaintStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Uniform random magnitudes
    Noise,
    /// FFT of a synthesized frequency sweep
    Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaintKind {
    Solid,
    Gradient,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "mirror-viz-simulator")]
#[command(about = "Mirrored peak-hold spectrum bars in a desktop window", long_about = None)]
pub struct Args {
    /// Drawing area width in pixels
    #[arg(long, default_value_t = consts::AREA_WIDTH)]
    pub width: f32,

    /// Drawing area height in pixels (defaults to 16:9 of the width)
    #[arg(long)]
    pub height: Option<f32>,

    /// Left edge of the drawing area inside the window
    #[arg(long, default_value_t = 10)]
    pub origin_x: i32,

    /// Top edge of the drawing area inside the window
    #[arg(long, default_value_t = 10)]
    pub origin_y: i32,

    #[arg(long, default_value_t = consts::BAR_WIDTH)]
    pub bar_width: f32,

    #[arg(long, default_value_t = consts::BAR_SPACING)]
    pub spacing: f32,

    /// Height of a silent bar
    #[arg(long, default_value_t = consts::BAR_MINIMUM)]
    pub bar_minimum: f32,

    /// First spectrum bin shown
    #[arg(long, default_value_t = consts::SPECTRUM_START)]
    pub start: usize,

    /// One past the last spectrum bin shown
    #[arg(long, default_value_t = consts::SPECTRUM_END)]
    pub end: usize,

    /// Pixels a peak marker falls per frame
    #[arg(long, default_value_t = consts::PEAK_DROP)]
    pub peak_drop: f32,

    #[arg(long, value_enum, default_value_t = SourceKind::Noise)]
    pub source: SourceKind,

    #[arg(long, value_enum, default_value_t = PaintKind::Solid)]
    pub paint: PaintKind,

    /// Delay after presenting each frame
    #[arg(long, value_name = "MS", default_value_t = 33)]
    pub frame_delay_ms: u64,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Seed for the noise source
    #[arg(long)]
    pub seed: Option<u64>,

    /// Window pixel scale
    #[arg(long, default_value_t = 2)]
    pub scale: u32,

    /// Render off-screen without opening a window
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    pub fn area_height(&self) -> f32 {
        self.height.unwrap_or(self.width / (16.0 / 9.0))
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            area_width: self.width,
            area_height: self.area_height(),
            bar_width: self.bar_width,
            bar_spacing: self.spacing,
            bar_minimum: self.bar_minimum,
            spectrum_size: mirror_dsp::SPECTRUM_SIZE,
            spectrum_start: self.start,
            spectrum_end: self.end,
            peak_drop: self.peak_drop,
        }
    }

    pub fn paint_style(&self) -> PaintStyle {
        match self.paint {
            PaintKind::Solid => PaintStyle::Solid(LIGHT_STEEL_BLUE),
            PaintKind::Gradient => PaintStyle::VerticalGradient {
                top: LIGHT_STEEL_BLUE,
                bottom: Rgb888::new(0x46, 0x82, 0xB4),
            },
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    /// Window large enough for the area plus the same margin on every side.
    pub fn display_size(&self) -> Size {
        let margin_x = self.origin_x.max(0) as u32;
        let margin_y = self.origin_y.max(0) as u32;
        Size::new(
            self.width.max(1.0).ceil() as u32 + 2 * margin_x,
            self.area_height().max(1.0).ceil() as u32 + 2 * margin_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_layout() {
        let args = Args::parse_from(["mirror-viz-simulator"]);
        let config = args.layout_config();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(args.display_size(), Size::new(532, 308));
        assert_eq!(args.source, SourceKind::Noise);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "mirror-viz-simulator",
            "--width",
            "256",
            "--height",
            "100",
            "--end",
            "66",
            "--source",
            "tone",
            "--paint",
            "gradient",
            "--frames",
            "10",
        ]);
        let config = args.layout_config();
        assert_eq!(config.area_width, 256.0);
        assert_eq!(config.area_height, 100.0);
        assert_eq!(config.window_length(), 64);
        assert_eq!(args.source, SourceKind::Tone);
        assert!(!args.paint_style().is_solid());
        assert_eq!(args.frames, Some(10));
    }
}
