//! Neural audio analysis pipeline.
//!
//! Turns a mono PCM signal into a fixed-shape log-mel feature tensor,
//! runs it through a model behind the narrow [`InferenceEngine`] contract,
//! and decodes the model's flat output vector into named musical
//! attributes (tempo, key, energy, and mood-adjacent scores).

pub mod analyzer;
pub mod audio;
pub mod config;
pub mod error;
pub mod features;
pub mod model;

pub use analyzer::Analyzer;
pub use audio::AudioSignal;
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::{FeaturePipeline, FeatureTensor};
pub use model::{AnalysisResult, DecodeTable, InferenceEngine};
#[cfg(feature = "onnx")]
pub use model::OnnxEngine;
