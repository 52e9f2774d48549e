//! Frame suppliers for the simulator.

use mirror_dsp::{normalized_spectrum, FFT_SIZE, SPECTRUM_SIZE};
use mirror_viz::AudioSource;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniformly distributed magnitudes in `[0, 1)`, fresh every frame.
pub struct NoiseSource {
    rng: StdRng,
    frame: Vec<f32>,
}

impl NoiseSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            frame: vec![0.0; SPECTRUM_SIZE],
        }
    }
}

impl AudioSource for NoiseSource {
    fn next_frame(&mut self) -> &[f32] {
        for sample in self.frame.iter_mut() {
            *sample = self.rng.random::<f32>();
        }
        &self.frame
    }
}

pub const SAMPLE_RATE_HZ: f32 = 48_000.0;
const SWEEP_LOW_HZ: f32 = 200.0;
const SWEEP_HIGH_HZ: f32 = 8_000.0;
/// Frames for one low-to-high sweep.
const SWEEP_FRAMES: u32 = 240;
const TONE_AMPLITUDE: f32 = 0.8;

/// Spectrum of a sine sweeping exponentially between two frequencies.
///
/// Each frame synthesizes `FFT_SIZE` PCM samples with a continuous phase and
/// runs them through the spectrum analysis.
pub struct ToneSource {
    phase: f32,
    frame_index: u32,
    pcm: [i16; FFT_SIZE],
    frame: [f32; SPECTRUM_SIZE],
}

impl ToneSource {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            frame_index: 0,
            pcm: [0; FFT_SIZE],
            frame: [0.0; SPECTRUM_SIZE],
        }
    }

    /// Frequency of the sweep at `frame_index`.
    pub fn frequency(frame_index: u32) -> f32 {
        let progress = (frame_index % SWEEP_FRAMES) as f32 / SWEEP_FRAMES as f32;
        SWEEP_LOW_HZ * (SWEEP_HIGH_HZ / SWEEP_LOW_HZ).powf(progress)
    }

    fn synthesize(&mut self) {
        let step = std::f32::consts::TAU * Self::frequency(self.frame_index) / SAMPLE_RATE_HZ;
        for sample in self.pcm.iter_mut() {
            *sample = (self.phase.sin() * TONE_AMPLITUDE * i16::MAX as f32) as i16;
            self.phase = (self.phase + step) % std::f32::consts::TAU;
        }
        self.frame_index = self.frame_index.wrapping_add(1);
    }
}

impl Default for ToneSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSource for ToneSource {
    fn next_frame(&mut self) -> &[f32] {
        self.synthesize();
        self.frame = normalized_spectrum(&self.pcm);
        &self.frame
    }
}
