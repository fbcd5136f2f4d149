pub mod decode;

/// A single-channel PCM signal at a known sample rate.
///
/// Owned by the caller and borrowed by the pipeline for the duration of
/// one extraction call. Multi-channel sources must be reduced to one
/// channel before analysis; the bundled decoder takes the first channel.
#[derive(Debug, Clone)]
pub struct AudioSignal {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioSignal {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}
