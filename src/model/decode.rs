use serde::{Deserialize, Serialize};

/// Position of each named attribute in the model's flat output vector.
///
/// The mapping is a contract with the deployed model's output layer, so it
/// is data rather than code: the default matches the reference model, and
/// any index can be overridden from configuration when a differently wired
/// model is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeTable {
    pub bpm: usize,
    pub key: usize,
    pub scale: usize,
    pub energy: usize,
    pub danceability: usize,
    pub valence: usize,
    pub arousal: usize,
}

impl Default for DecodeTable {
    fn default() -> Self {
        Self {
            bpm: 0,
            key: 1,
            scale: 2,
            energy: 3,
            danceability: 4,
            valence: 5,
            arousal: 6,
        }
    }
}

impl DecodeTable {
    /// Decode a flat model output vector into named attributes.
    ///
    /// Each field reads its own index; an index past the end of the
    /// vector degrades that one field to its default. Decoding never
    /// fails, so a single missing output cannot invalidate the rest of
    /// the result.
    pub fn decode(&self, raw: &[f32]) -> AnalysisResult {
        let defaults = AnalysisResult::default();
        AnalysisResult {
            bpm: value_at(raw, self.bpm, defaults.bpm),
            key: value_at(raw, self.key, defaults.key),
            scale: value_at(raw, self.scale, defaults.scale),
            energy: value_at(raw, self.energy, defaults.energy),
            danceability: value_at(raw, self.danceability, defaults.danceability),
            valence: value_at(raw, self.valence, defaults.valence),
            arousal: value_at(raw, self.arousal, defaults.arousal),
        }
    }
}

fn value_at(raw: &[f32], index: usize, default: f32) -> f32 {
    raw.get(index).copied().unwrap_or(default)
}

/// Named musical attributes decoded from one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Estimated tempo in beats per minute.
    pub bpm: f32,
    /// Pitch class of the detected key: 0 = C through 11 = B.
    pub key: f32,
    /// Scale ordinal: 0 = major, 1 = minor.
    pub scale: f32,
    pub energy: f32,
    pub danceability: f32,
    pub valence: f32,
    pub arousal: f32,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            key: 0.0,
            scale: 0.0,
            energy: 0.5,
            danceability: 0.5,
            valence: 0.5,
            arousal: 0.5,
        }
    }
}

const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl AnalysisResult {
    /// Pitch-class name for the decoded key ordinal.
    pub fn key_name(&self) -> &'static str {
        PITCH_CLASSES[(self.key.round() as i64).rem_euclid(12) as usize]
    }

    /// `"major"` or `"minor"` for the decoded scale ordinal.
    pub fn scale_name(&self) -> &'static str {
        if self.scale.round() as i64 == 1 {
            "minor"
        } else {
            "major"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prediction_decodes_to_defaults() {
        let result = DecodeTable::default().decode(&[]);
        assert_eq!(result, AnalysisResult::default());
        assert_eq!(result.bpm, 120.0);
        assert_eq!(result.key, 0.0);
        assert_eq!(result.scale, 0.0);
        assert_eq!(result.energy, 0.5);
        assert_eq!(result.danceability, 0.5);
        assert_eq!(result.valence, 0.5);
        assert_eq!(result.arousal, 0.5);
    }

    #[test]
    fn short_prediction_defaults_per_field() {
        let result = DecodeTable::default().decode(&[140.0, 3.0]);
        assert_eq!(result.bpm, 140.0);
        assert_eq!(result.key, 3.0);
        assert_eq!(result.scale, 0.0);
        assert_eq!(result.energy, 0.5);
        assert_eq!(result.danceability, 0.5);
        assert_eq!(result.valence, 0.5);
        assert_eq!(result.arousal, 0.5);
    }

    #[test]
    fn full_prediction_maps_every_field() {
        let raw = [128.0, 9.0, 1.0, 0.8, 0.7, 0.6, 0.4];
        let result = DecodeTable::default().decode(&raw);
        assert_eq!(result.bpm, 128.0);
        assert_eq!(result.key, 9.0);
        assert_eq!(result.scale, 1.0);
        assert_eq!(result.energy, 0.8);
        assert_eq!(result.danceability, 0.7);
        assert_eq!(result.valence, 0.6);
        assert_eq!(result.arousal, 0.4);
    }

    #[test]
    fn custom_table_rewires_indices() {
        let table = DecodeTable {
            bpm: 6,
            arousal: 0,
            ..DecodeTable::default()
        };
        let raw = [0.9, 10.0, 1.0, 0.5, 0.5, 0.5, 90.0];
        let result = table.decode(&raw);
        assert_eq!(result.bpm, 90.0);
        assert_eq!(result.arousal, 0.9);
        assert_eq!(result.key, 10.0);
    }

    #[test]
    fn key_and_scale_names() {
        let result = DecodeTable::default().decode(&[120.0, 9.0, 1.0]);
        assert_eq!(result.key_name(), "A");
        assert_eq!(result.scale_name(), "minor");
        assert_eq!(AnalysisResult::default().key_name(), "C");
        assert_eq!(AnalysisResult::default().scale_name(), "major");
    }
}
