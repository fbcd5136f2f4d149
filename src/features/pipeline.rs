use rayon::prelude::*;
use std::sync::Arc;

use crate::audio::AudioSignal;
use crate::config::AnalysisConfig;
use crate::error::Result;

use super::frames::Frames;
use super::mel::MelFilterbank;
use super::spectrum::SpectralTransform;

/// Guard against `ln(0)` on silent bands.
const LOG_EPS: f32 = 1e-6;
/// Guard against zero variance when normalizing.
const NORM_EPS: f64 = 1e-8;

/// Model input tensor of logical shape `[1][sequence_length][mel_bands]`,
/// z-score normalized over all time × band values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTensor {
    data: Vec<f32>,
    sequence_length: usize,
    mel_bands: usize,
}

impl FeatureTensor {
    pub fn shape(&self) -> [usize; 3] {
        [1, self.sequence_length, self.mel_bands]
    }

    /// Row-major contents: `sequence_length × mel_bands` values.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// One time frame of `mel_bands` values.
    pub fn frame(&self, index: usize) -> &[f32] {
        let start = index * self.mel_bands;
        &self.data[start..start + self.mel_bands]
    }
}

/// Feature extraction pipeline: frame segmentation, windowed power
/// spectra, mel projection, log compression, per-utterance normalization,
/// and fixed-shape tensor assembly.
///
/// The configuration is validated once at construction and the derived
/// window, FFT plan, and filterbank are built up front; extraction itself
/// never fails, whatever the signal content.
pub struct FeaturePipeline {
    config: AnalysisConfig,
    transform: SpectralTransform,
    filterbank: Arc<MelFilterbank>,
}

impl FeaturePipeline {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let transform = SpectralTransform::new(config.fft_size);
        let filterbank =
            MelFilterbank::cached(config.sample_rate, config.fft_size, config.mel_bands);
        Ok(Self {
            config,
            transform,
            filterbank,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Extract the model input tensor for one signal.
    pub fn extract(&self, signal: &AudioSignal) -> FeatureTensor {
        let cfg = &self.config;
        let frames: Vec<_> = Frames::new(&signal.samples, cfg.fft_size, cfg.hop_size).collect();
        log::debug!(
            "Extracting features: {} frames of {} samples (hop {})",
            frames.len(),
            cfg.fft_size,
            cfg.hop_size
        );

        // Frames are independent, so the spectral work parallelizes
        // cleanly across them.
        let log_mel: Vec<Vec<f32>> = frames
            .par_iter()
            .map(|frame| {
                let spectrum = self.transform.power_spectrum(frame);
                let mut bands = self.filterbank.apply(&spectrum);
                for value in &mut bands {
                    *value = (*value + LOG_EPS).ln();
                }
                bands
            })
            .collect();

        // Population statistics over all time × band values jointly, not
        // per band.
        let count = (log_mel.len() * cfg.mel_bands) as f64;
        let mut sum = 0.0f64;
        for row in &log_mel {
            for &v in row {
                sum += v as f64;
            }
        }
        let mean = sum / count;

        let mut var_sum = 0.0f64;
        for row in &log_mel {
            for &v in row {
                let d = v as f64 - mean;
                var_sum += d * d;
            }
        }
        let variance = var_sum / count;
        let scale = 1.0 / (variance + NORM_EPS).sqrt();

        // Fit to exactly sequence_length frames: keep the earliest frames,
        // zero-fill the tail.
        let mut data = vec![0.0f32; cfg.sequence_length * cfg.mel_bands];
        for (i, row) in log_mel.iter().take(cfg.sequence_length).enumerate() {
            for (j, &v) in row.iter().enumerate() {
                data[i * cfg.mel_bands + j] = ((v as f64 - mean) * scale) as f32;
            }
        }

        FeatureTensor {
            data,
            sequence_length: cfg.sequence_length,
            mel_bands: cfg.mel_bands,
        }
    }
}
