#![no_std]
//! PCM frames to normalized magnitude spectra.

use core::fmt;
use microdsp::common::{apply_window_function, real_fft, WindowFunctionType::Hann};
use microfft::Complex32;

/// Samples per analysis frame.
pub const FFT_SIZE: usize = 1024;
/// Magnitude bins per analysis frame.
pub const SPECTRUM_SIZE: usize = FFT_SIZE / 2;
/// Bin magnitude of a full-scale sine after the Hann window.
pub const FULL_SCALE_MAGNITUDE: f32 = FFT_SIZE as f32 / 4.0;
/// Largest normalized magnitude; keeps every value strictly below 1.0.
pub const MAX_NORMALIZED: f32 = 1.0 - f32::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DspError {
    /// Input held the wrong number of PCM samples.
    FrameLength { expected: usize, actual: usize },
    /// FFT produced the wrong number of bins.
    BinCount { expected: usize, actual: usize },
}

impl fmt::Display for DspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DspError::FrameLength { expected, actual } => {
                write!(f, "expected {} PCM samples, got {}", expected, actual)
            }
            DspError::BinCount { expected, actual } => {
                write!(f, "expected {} FFT bins, got {}", expected, actual)
            }
        }
    }
}

impl core::error::Error for DspError {}

/// Normalize a single sample from i16 to f32.
pub fn normalize_sample(sample: i16) -> f32 {
    sample as f32 / i16::MAX as f32
}

/// Normalize a slice of i16 samples to a slice of f32 samples.
pub fn normalize_samples(samples: &[i16], normalized_samples: &mut [f32]) {
    for (out, &sample) in normalized_samples.iter_mut().zip(samples) {
        *out = normalize_sample(sample);
    }
}

/// Apply a Hann window to a slice of f32 samples.
pub fn apply_hann_window(samples: &mut [f32]) {
    apply_window_function(Hann, samples);
}

/// Compute the FFT of a frame of f32 samples in place.
pub fn compute_fft(samples: &mut [f32; FFT_SIZE]) -> &mut [Complex32] {
    real_fft(samples)
}

/// Compute the magnitude of the FFT output.
pub fn compute_magnitude(fft_output: &[Complex32]) -> Result<[f32; SPECTRUM_SIZE], DspError> {
    if fft_output.len() != SPECTRUM_SIZE {
        return Err(DspError::BinCount {
            expected: SPECTRUM_SIZE,
            actual: fft_output.len(),
        });
    }
    let mut magnitude = [0.0; SPECTRUM_SIZE];
    write_magnitudes(fft_output, &mut magnitude);
    Ok(magnitude)
}

fn write_magnitudes(fft_output: &[Complex32], magnitude: &mut [f32; SPECTRUM_SIZE]) {
    for (out, component) in magnitude.iter_mut().zip(fft_output) {
        *out = libm::sqrtf(component.re * component.re + component.im * component.im);
    }
}

/// Scales magnitudes so a full-scale sine lands near 1.0, clamped to
/// `[0, MAX_NORMALIZED]`.
pub fn normalize_magnitudes(magnitude: &mut [f32], full_scale: f32) {
    for value in magnitude.iter_mut() {
        *value = (*value / full_scale).clamp(0.0, MAX_NORMALIZED);
    }
}

/// Magnitude spectrum of exactly one analysis frame.
pub fn magnitude_spectrum(samples: &[i16; FFT_SIZE]) -> [f32; SPECTRUM_SIZE] {
    let mut normalized_samples = [0.0; FFT_SIZE];
    normalize_samples(samples, &mut normalized_samples);
    apply_hann_window(&mut normalized_samples);

    let mut magnitude = [0.0; SPECTRUM_SIZE];
    write_magnitudes(compute_fft(&mut normalized_samples), &mut magnitude);
    magnitude
}

/// [`magnitude_spectrum`] followed by [`normalize_magnitudes`]: every value
/// in `[0, 1)`, ready to feed a visualizer.
pub fn normalized_spectrum(samples: &[i16; FFT_SIZE]) -> [f32; SPECTRUM_SIZE] {
    let mut magnitude = magnitude_spectrum(samples);
    normalize_magnitudes(&mut magnitude, FULL_SCALE_MAGNITUDE);
    magnitude
}

/// Process a frame of i16 samples and return the magnitude spectrum.
pub fn process_frame(samples: &[i16]) -> Result<[f32; SPECTRUM_SIZE], DspError> {
    let samples = frame_array(samples)?;
    Ok(magnitude_spectrum(samples))
}

/// Slice form of [`normalized_spectrum`].
pub fn spectrum_frame(samples: &[i16]) -> Result<[f32; SPECTRUM_SIZE], DspError> {
    let samples = frame_array(samples)?;
    Ok(normalized_spectrum(samples))
}

fn frame_array(samples: &[i16]) -> Result<&[i16; FFT_SIZE], DspError> {
    samples.try_into().map_err(|_| DspError::FrameLength {
        expected: FFT_SIZE,
        actual: samples.len(),
    })
}
