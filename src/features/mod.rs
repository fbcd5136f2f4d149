//! Feature extraction: windowing, framing, spectra, mel projection, and
//! tensor assembly.

mod frames;
mod mel;
mod pipeline;
mod spectrum;
mod window;

pub use frames::{Frame, Frames};
pub use mel::MelFilterbank;
pub use pipeline::{FeaturePipeline, FeatureTensor};
pub use spectrum::SpectralTransform;
pub use window::hann;
