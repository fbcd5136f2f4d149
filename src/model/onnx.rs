use std::path::Path;
use std::sync::Mutex;

use log::info;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;

use super::engine::InferenceEngine;
use crate::error::{AnalysisError, Result};
use crate::features::FeatureTensor;

/// ONNX Runtime inference backend.
///
/// The model is loaded eagerly and warmed up with one zero-tensor forward
/// pass, so a successfully constructed engine is ready by construction.
/// Dropping the engine releases the runtime session and its memory.
pub struct OnnxEngine {
    session: Mutex<Session>,
}

impl OnnxEngine {
    /// Load and warm up a model expecting `[1][sequence_length][mel_bands]`
    /// input.
    pub fn load(path: &Path, sequence_length: usize, mel_bands: usize) -> Result<Self> {
        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| {
                AnalysisError::InferenceUnavailable(format!(
                    "failed to load model {}: {e}",
                    path.display()
                ))
            })?;

        let engine = Self {
            session: Mutex::new(session),
        };
        engine.run(sequence_length, mel_bands, vec![0.0; sequence_length * mel_bands])?;
        info!("Model loaded and warmed up: {}", path.display());
        Ok(engine)
    }

    fn run(&self, sequence_length: usize, mel_bands: usize, data: Vec<f32>) -> Result<Vec<f32>> {
        let unavailable = |e: ort::Error| AnalysisError::InferenceUnavailable(e.to_string());

        let input =
            Tensor::from_array(([1usize, sequence_length, mel_bands], data)).map_err(unavailable)?;
        let mut session = self.session.lock().expect("inference session poisoned");
        let outputs = session.run(ort::inputs![input]).map_err(unavailable)?;
        let (_, values) = outputs[0].try_extract_tensor::<f32>().map_err(unavailable)?;
        Ok(values.to_vec())
    }
}

impl InferenceEngine for OnnxEngine {
    fn is_ready(&self) -> bool {
        // Load and warm-up both happened in `load`.
        true
    }

    fn predict(&self, features: &FeatureTensor) -> Result<Vec<f32>> {
        let [_, sequence_length, mel_bands] = features.shape();
        self.run(sequence_length, mel_bands, features.data().to_vec())
    }
}
