use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use super::frames::Frame;
use super::window::hann;

/// Windowed power-spectrum transform for fixed-length frames.
///
/// Holds the planned FFT and the Hann window so per-frame work is just a
/// copy, a multiply, and the transform. The planned FFT is shareable
/// across threads, which is what makes parallel per-frame extraction safe.
pub struct SpectralTransform {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    fft_size: usize,
}

impl SpectralTransform {
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        Self {
            fft,
            window: hann(fft_size),
            fft_size,
        }
    }

    /// Number of non-redundant spectrum bins: `fft_size / 2 + 1`.
    pub fn bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Squared-magnitude spectrum of one windowed frame.
    ///
    /// Output values are finite and non-negative for finite input.
    pub fn power_spectrum(&self, frame: &Frame) -> Vec<f32> {
        let mut padded = vec![0.0f32; self.fft_size];
        frame.copy_into(&mut padded);

        let mut buffer: Vec<Complex<f32>> = padded
            .iter()
            .zip(self.window.iter())
            .map(|(&s, &w)| Complex::new(s * w, 0.0))
            .collect();
        self.fft.process(&mut buffer);

        buffer[..self.bins()].iter().map(|c| c.norm_sqr()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::frames::Frames;
    use std::f32::consts::PI;

    #[test]
    fn silence_produces_zero_spectrum() {
        let samples = vec![0.0f32; 1024];
        let frame = Frames::new(&samples, 1024, 1024).next().unwrap();
        let spectrum = SpectralTransform::new(1024).power_spectrum(&frame);
        assert_eq!(spectrum.len(), 513);
        assert!(spectrum.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn sine_peaks_at_its_bin() {
        let n = 1024;
        let bin = 32;
        let samples: Vec<f32> = (0..n)
            .map(|i| (2.0 * PI * bin as f32 * i as f32 / n as f32).sin())
            .collect();
        let frame = Frames::new(&samples, n, n).next().unwrap();
        let spectrum = SpectralTransform::new(n).power_spectrum(&frame);

        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, bin);
        assert!(spectrum.iter().all(|p| p.is_finite() && *p >= 0.0));
    }

    #[test]
    fn energy_matches_parseval() {
        let n = 1024;
        let samples: Vec<f32> = (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                0.7 * (2.0 * PI * 13.0 * t).sin() + 0.2 * (2.0 * PI * 151.0 * t).cos()
            })
            .collect();
        let frame = Frames::new(&samples, n, n).next().unwrap();
        let transform = SpectralTransform::new(n);
        let spectrum = transform.power_spectrum(&frame);

        // Time-domain energy of the windowed frame.
        let window = hann(n);
        let energy: f64 = samples
            .iter()
            .zip(window.iter())
            .map(|(&s, &w)| (s * w) as f64 * (s * w) as f64)
            .sum();

        // Reconstruct the full-spectrum sum from the non-redundant half:
        // bins 1..n/2 appear twice by Hermitian symmetry.
        let middle: f64 = spectrum[1..n / 2].iter().map(|&p| p as f64).sum();
        let full = spectrum[0] as f64 + spectrum[n / 2] as f64 + 2.0 * middle;

        let expected = n as f64 * energy;
        assert!(
            (full - expected).abs() < 1e-3 * expected,
            "Parseval mismatch: {} vs {}",
            full,
            expected
        );
    }
}
