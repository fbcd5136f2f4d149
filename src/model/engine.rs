use crate::error::Result;
use crate::features::FeatureTensor;

/// Forward-pass contract with the model-owning collaborator.
///
/// The collaborator owns model load, warm-up, and teardown; the analysis
/// side only asks whether the model is ready and for single synchronous
/// predictions. A not-ready collaborator or a failed forward pass is
/// reported as `InferenceUnavailable` and never retried here.
///
/// Implementations must be safe for concurrent use.
pub trait InferenceEngine: Send + Sync {
    /// Whether the model is loaded and warmed up.
    fn is_ready(&self) -> bool;

    /// Run one forward pass over an extracted feature tensor.
    ///
    /// Returns the model's flat output vector. Its length is model
    /// dependent and may be shorter than a decoder expects; decoding
    /// handles that, not the engine.
    fn predict(&self, features: &FeatureTensor) -> Result<Vec<f32>>;
}
