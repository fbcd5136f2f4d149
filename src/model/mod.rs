//! Model-side contracts: the inference collaborator interface and the
//! decoding of its raw output vectors.

mod decode;
mod engine;
#[cfg(feature = "onnx")]
mod onnx;

pub use decode::{AnalysisResult, DecodeTable};
pub use engine::InferenceEngine;
#[cfg(feature = "onnx")]
pub use onnx::OnnxEngine;
