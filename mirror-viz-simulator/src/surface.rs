//! Simulator window as presentation surface and renderer.

use std::{thread, time::Duration, time::Instant};

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use mirror_viz::{Clock, DrawTargetRenderer, PaintStyle, PresentationSurface, Quad, Renderer};

const BACKGROUND: Rgb888 = Rgb888::BLACK;

/// Off-screen display, optionally mirrored into an SDL window.
pub struct SimulatorSurface {
    renderer: DrawTargetRenderer<SimulatorDisplay<Rgb888>>,
    window: Option<Window>,
    frame_delay: Duration,
    presented: bool,
    closed: bool,
}

impl SimulatorSurface {
    /// `mirror_center` is the area-relative point the bars are mirrored about.
    pub fn new(
        size: Size,
        origin: Point,
        mirror_center: (f32, f32),
        frame_delay: Duration,
    ) -> Self {
        let (center_x, center_y) = mirror_center;
        Self {
            renderer: DrawTargetRenderer::new(SimulatorDisplay::new(size), origin)
                .with_mirror_center(center_x, center_y),
            window: None,
            frame_delay,
            presented: false,
            closed: false,
        }
    }

    pub fn with_window(mut self, title: &str, scale: u32) -> Self {
        let settings = OutputSettingsBuilder::new().scale(scale.max(1)).build();
        self.window = Some(Window::new(title, &settings));
        self
    }

    #[cfg(test)]
    pub fn display(&self) -> &SimulatorDisplay<Rgb888> {
        self.renderer.target()
    }
}

impl PresentationSurface for SimulatorSurface {
    fn close_requested(&mut self) -> bool {
        // The SDL window only exists after the first update.
        if let (Some(window), true) = (self.window.as_mut(), self.presented) {
            if window.events().any(|event| matches!(event, SimulatorEvent::Quit)) {
                self.closed = true;
            }
        }
        self.closed
    }

    fn begin_frame(&mut self) {
        // Infallible for the simulator display.
        let _ = self.renderer.target_mut().clear(BACKGROUND);
    }

    fn end_frame(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.update(self.renderer.target());
        }
        self.presented = true;
        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
    }
}

impl Renderer for SimulatorSurface {
    type Error = core::convert::Infallible;

    fn submit(&mut self, batch: &[Quad], paint: &PaintStyle) -> Result<(), Self::Error> {
        self.renderer.submit(batch, paint)
    }
}

/// Seconds since construction.
pub struct InstantClock {
    start: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_viz::{run_frame_loop, LayoutConfig, MirrorSpectrum};

    use crate::audio::NoiseSource;

    #[test]
    fn test_headless_run_paints_bars_inside_area() {
        let mut surface = SimulatorSurface::new(
            Size::new(532, 308),
            Point::new(10, 10),
            (256.0, 144.0),
            Duration::ZERO,
        );
        let mut spectrum = MirrorSpectrum::new(LayoutConfig::default()).unwrap();
        let paint = PaintStyle::default();

        let stats = run_frame_loop(
            &mut surface,
            &mut NoiseSource::new(Some(2)),
            &InstantClock::new(),
            &mut spectrum,
            &paint,
            Some(3),
        )
        .unwrap();
        assert_eq!(stats.frames, 3);

        let display = surface.display();
        // the margin stays clear, the innermost bars straddle the center gap
        assert_eq!(display.get_pixel(Point::new(2, 2)), BACKGROUND);
        let row = 10 + 144;
        assert_eq!(display.get_pixel(Point::new(10 + 254, row)), paint.color_at(0.0));
        assert_eq!(display.get_pixel(Point::new(10 + 257, row)), paint.color_at(0.0));
        assert_eq!(display.get_pixel(Point::new(10 + 255, row)), BACKGROUND);
        assert_eq!(display.get_pixel(Point::new(10 + 256, row)), BACKGROUND);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = InstantClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
