use thiserror::Error;

/// Errors produced by the analysis pipeline.
///
/// This is the complete taxonomy: configuration problems are rejected
/// before any signal work begins, and an unavailable model collaborator is
/// surfaced immediately without retry. Signal content itself never errors
/// (silence, clipping, and short signals are all handled by zero-padding),
/// and decoding a model output vector never fails.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("inference unavailable: {0}")]
    InferenceUnavailable(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
