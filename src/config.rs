use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{AnalysisError, Result};
use crate::model::DecodeTable;

/// Parameters of one feature-extraction run.
///
/// Immutable value object; the same configuration is expected to be reused
/// across many analyze calls so the mel filterbank derived from it can be
/// shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Sample rate of the input signal in Hz.
    pub sample_rate: u32,
    /// FFT frame length in samples. Must be a power of two.
    pub fft_size: usize,
    /// Stride between consecutive frames in samples. At most `fft_size`.
    pub hop_size: usize,
    /// Number of mel bands.
    pub mel_bands: usize,
    /// Number of time frames the model expects.
    pub sequence_length: usize,
}

impl AnalysisConfig {
    /// Reference configuration at the given sample rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            fft_size: default_fft_size(),
            hop_size: default_hop_size(),
            mel_bands: default_mel_bands(),
            sequence_length: default_sequence_length(),
        }
    }

    /// Number of non-redundant spectrum bins per frame.
    pub fn spectrum_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Reject bad configurations before any signal work begins.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(invalid("sample_rate must be positive"));
        }
        if self.fft_size == 0 {
            return Err(invalid("fft_size must be positive"));
        }
        if !self.fft_size.is_power_of_two() {
            return Err(invalid(&format!(
                "fft_size must be a power of two, got {}",
                self.fft_size
            )));
        }
        if self.hop_size == 0 {
            return Err(invalid("hop_size must be positive"));
        }
        if self.hop_size > self.fft_size {
            return Err(invalid(&format!(
                "hop_size ({}) must not exceed fft_size ({})",
                self.hop_size, self.fft_size
            )));
        }
        if self.mel_bands == 0 {
            return Err(invalid("mel_bands must be positive"));
        }
        if self.sequence_length == 0 {
            return Err(invalid("sequence_length must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> AnalysisError {
    AnalysisError::InvalidConfiguration(msg.to_string())
}

/// TOML config file contents.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub model: ModelSettings,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    #[serde(default = "default_hop_size")]
    pub hop_size: usize,
    #[serde(default = "default_mel_bands")]
    pub mel_bands: usize,
    #[serde(default = "default_sequence_length")]
    pub sequence_length: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelSettings {
    /// ONNX model file to run when the CLI does not name one.
    pub path: Option<PathBuf>,
    /// Output-index mapping for the deployed model.
    #[serde(default)]
    pub outputs: DecodeTable,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            fft_size: default_fft_size(),
            hop_size: default_hop_size(),
            mel_bands: default_mel_bands(),
            sequence_length: default_sequence_length(),
        }
    }
}

fn default_fft_size() -> usize { 2048 }
fn default_hop_size() -> usize { 512 }
fn default_mel_bands() -> usize { 128 }
fn default_sequence_length() -> usize { 100 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}
