//! Drives the pipeline against its collaborators until told to stop.

#[cfg(feature = "logging")]
use defmt::info;
#[cfg(feature = "logging")]
use defmt_rtt as _;

use crate::audio_source::AudioSource;
use crate::consts::LOG_INTERVAL;
use crate::error::LoopError;
use crate::mirror_spectrum::MirrorSpectrum;
use crate::paint::PaintStyle;
use crate::renderer::Renderer;

/// Monotonic time in seconds, used only to measure frames.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Where frames are presented; also the source of the close signal.
pub trait PresentationSurface {
    /// Polls pending events and reports whether the loop should end.
    fn close_requested(&mut self) -> bool;
    fn begin_frame(&mut self);
    fn end_frame(&mut self);
}

/// Frame timing gathered by [`run_frame_loop`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub last_frame_ms: f64,
    pub max_frame_ms: f64,
    pub total_seconds: f64,
}

impl FrameStats {
    pub fn record(&mut self, seconds: f64) {
        let ms = seconds * 1000.0;
        self.frames += 1;
        self.last_frame_ms = ms;
        if ms > self.max_frame_ms {
            self.max_frame_ms = ms;
        }
        self.total_seconds += seconds;
    }

    pub fn average_frame_ms(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.total_seconds * 1000.0 / self.frames as f64
    }
}

/// Polls, samples, runs the pipeline, submits and presents, once per frame.
///
/// Returns when the surface asks to close or after `max_frames` frames. A
/// frame that violates the audio contract or a failed submission ends the
/// loop with an error.
pub fn run_frame_loop<S, A, C>(
    surface: &mut S,
    source: &mut A,
    clock: &C,
    spectrum: &mut MirrorSpectrum,
    paint: &PaintStyle,
    max_frames: Option<u64>,
) -> Result<FrameStats, LoopError<S::Error>>
where
    S: PresentationSurface + Renderer,
    A: AudioSource,
    C: Clock,
{
    let mut stats = FrameStats::default();
    let mut log_counter: u8 = 0;

    while !surface.close_requested() {
        if max_frames.is_some_and(|limit| stats.frames >= limit) {
            break;
        }

        let frame_begin = clock.now();
        surface.begin_frame();

        let batch = spectrum.update(source.next_frame())?;
        surface.submit(batch, paint).map_err(LoopError::Render)?;

        surface.end_frame();
        stats.record(clock.now() - frame_begin);

        log_counter = log_counter.wrapping_add(1);
        if log_counter >= LOG_INTERVAL {
            log::debug!(
                "{} frames, last {} ms, max {} ms",
                stats.frames,
                stats.last_frame_ms,
                stats.max_frame_ms
            );
            #[cfg(feature = "logging")]
            info!(
                "{} frames, last {} ms, max {} ms",
                stats.frames,
                stats.last_frame_ms,
                stats.max_frame_ms
            );
            log_counter = 0;
        }
    }

    log::info!(
        "frame loop finished after {} frames, average {} ms",
        stats.frames,
        stats.average_frame_ms()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{vec, vec::Vec};
    use approx::assert_abs_diff_eq;
    use core::cell::Cell;

    use crate::types::{LayoutConfig, Quad};

    struct StepClock {
        t: Cell<f64>,
    }

    impl Clock for StepClock {
        fn now(&self) -> f64 {
            let t = self.t.get();
            self.t.set(t + 0.002);
            t
        }
    }

    #[derive(Default)]
    struct Surface {
        close_after: usize,
        polls: usize,
        begun: usize,
        ended: usize,
        batches: Vec<usize>,
        fail_submit: bool,
    }

    impl PresentationSurface for Surface {
        fn close_requested(&mut self) -> bool {
            self.polls += 1;
            self.polls > self.close_after
        }

        fn begin_frame(&mut self) {
            self.begun += 1;
        }

        fn end_frame(&mut self) {
            self.ended += 1;
        }
    }

    impl Renderer for Surface {
        type Error = &'static str;

        fn submit(&mut self, batch: &[Quad], _paint: &PaintStyle) -> Result<(), Self::Error> {
            if self.fail_submit {
                return Err("surface lost");
            }
            self.batches.push(batch.len());
            Ok(())
        }
    }

    struct Silence(Vec<f32>);

    impl AudioSource for Silence {
        fn next_frame(&mut self) -> &[f32] {
            &self.0
        }
    }

    fn clock() -> StepClock {
        StepClock { t: Cell::new(0.0) }
    }

    #[test]
    fn test_runs_until_close_requested() {
        let mut surface = Surface {
            close_after: 3,
            ..Surface::default()
        };
        let mut spectrum = MirrorSpectrum::new(LayoutConfig::default()).unwrap();
        let stats = run_frame_loop(
            &mut surface,
            &mut Silence(vec![0.0; 512]),
            &clock(),
            &mut spectrum,
            &PaintStyle::default(),
            None,
        )
        .unwrap();

        assert_eq!(stats.frames, 3);
        assert_eq!(surface.begun, 3);
        assert_eq!(surface.ended, 3);
        assert_eq!(surface.batches, vec![516; 3]);
        assert_abs_diff_eq!(stats.last_frame_ms, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_frame_limit_stops_early() {
        let mut surface = Surface {
            close_after: 100,
            ..Surface::default()
        };
        let mut spectrum = MirrorSpectrum::new(LayoutConfig::default()).unwrap();
        let stats = run_frame_loop(
            &mut surface,
            &mut Silence(vec![0.0; 512]),
            &clock(),
            &mut spectrum,
            &PaintStyle::default(),
            Some(5),
        )
        .unwrap();
        assert_eq!(stats.frames, 5);
        assert_eq!(spectrum.step_counter(), 5);
    }

    #[test]
    fn test_render_failure_propagates() {
        let mut surface = Surface {
            close_after: 10,
            fail_submit: true,
            ..Surface::default()
        };
        let mut spectrum = MirrorSpectrum::new(LayoutConfig::default()).unwrap();
        let result = run_frame_loop(
            &mut surface,
            &mut Silence(vec![0.0; 512]),
            &clock(),
            &mut spectrum,
            &PaintStyle::default(),
            None,
        );
        assert!(matches!(result, Err(LoopError::Render("surface lost"))));
        assert_eq!(surface.ended, 0);
    }

    #[test]
    fn test_short_frame_propagates() {
        let mut surface = Surface {
            close_after: 10,
            ..Surface::default()
        };
        let mut spectrum = MirrorSpectrum::new(LayoutConfig::default()).unwrap();
        let result = run_frame_loop(
            &mut surface,
            &mut Silence(vec![0.0; 16]),
            &clock(),
            &mut spectrum,
            &PaintStyle::default(),
            None,
        );
        assert!(matches!(result, Err(LoopError::Frame(_))));
    }

    #[test]
    fn test_average_of_no_frames_is_zero() {
        assert_eq!(FrameStats::default().average_frame_ms(), 0.0);
    }
}
