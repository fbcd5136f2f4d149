use log::debug;

use crate::audio::AudioSignal;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::features::FeaturePipeline;
use crate::model::{AnalysisResult, DecodeTable, InferenceEngine};

/// End-to-end analysis: feature extraction, one forward pass through the
/// inference collaborator, and decoding of the output vector into named
/// attributes.
pub struct Analyzer<E> {
    pipeline: FeaturePipeline,
    engine: E,
    table: DecodeTable,
}

impl<E: InferenceEngine> Analyzer<E> {
    /// Build an analyzer with the default output mapping.
    ///
    /// Fails fast with `InvalidConfiguration` before any signal work.
    pub fn new(config: AnalysisConfig, engine: E) -> Result<Self> {
        Self::with_table(config, engine, DecodeTable::default())
    }

    pub fn with_table(config: AnalysisConfig, engine: E, table: DecodeTable) -> Result<Self> {
        Ok(Self {
            pipeline: FeaturePipeline::new(config)?,
            engine,
            table,
        })
    }

    /// Analyze one signal.
    ///
    /// A not-ready model collaborator surfaces as `InferenceUnavailable`
    /// immediately, without retry. Missing model outputs degrade single
    /// result fields to their defaults rather than failing the call.
    pub fn analyze(&self, signal: &AudioSignal) -> Result<AnalysisResult> {
        if !self.engine.is_ready() {
            return Err(AnalysisError::InferenceUnavailable(
                "model is not ready".to_string(),
            ));
        }

        let features = self.pipeline.extract(signal);
        let raw = self.engine.predict(&features)?;
        debug!("Model returned {} output values", raw.len());
        Ok(self.table.decode(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureTensor;

    struct StubEngine {
        ready: bool,
        output: Vec<f32>,
    }

    impl InferenceEngine for StubEngine {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn predict(&self, features: &FeatureTensor) -> Result<Vec<f32>> {
            let [batch, sequence_length, mel_bands] = features.shape();
            assert_eq!(batch, 1);
            assert_eq!(features.data().len(), sequence_length * mel_bands);
            Ok(self.output.clone())
        }
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            sample_rate: 8000,
            fft_size: 256,
            hop_size: 128,
            mel_bands: 8,
            sequence_length: 4,
        }
    }

    #[test]
    fn not_ready_engine_is_surfaced() {
        let engine = StubEngine {
            ready: false,
            output: Vec::new(),
        };
        let analyzer = Analyzer::new(config(), engine).unwrap();
        let err = analyzer
            .analyze(&AudioSignal::new(vec![0.0; 8000], 8000))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InferenceUnavailable(_)));
    }

    #[test]
    fn decodes_model_output() {
        let engine = StubEngine {
            ready: true,
            output: vec![140.0, 3.0],
        };
        let analyzer = Analyzer::new(config(), engine).unwrap();
        let result = analyzer
            .analyze(&AudioSignal::new(vec![0.25; 8000], 8000))
            .unwrap();
        assert_eq!(result.bpm, 140.0);
        assert_eq!(result.key, 3.0);
        assert_eq!(result.scale, 0.0);
        assert_eq!(result.energy, 0.5);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let engine = StubEngine {
            ready: true,
            output: Vec::new(),
        };
        let bad = AnalysisConfig {
            mel_bands: 0,
            ..config()
        };
        assert!(matches!(
            Analyzer::new(bad, engine),
            Err(AnalysisError::InvalidConfiguration(_))
        ));
    }
}
