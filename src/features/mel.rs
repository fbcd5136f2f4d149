use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// `mel(f) = 2595 · log10(1 + f / 700)`
fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

type CacheKey = (u32, usize, usize);

static CACHE: OnceLock<Mutex<HashMap<CacheKey, Arc<MelFilterbank>>>> = OnceLock::new();

/// Triangular mel filterbank mapping linear FFT bins to perceptual bands.
///
/// Pure configuration-derived data: a `[mel_bands][bins]` weight matrix,
/// immutable after construction and safe to share between threads. Use
/// [`MelFilterbank::cached`] to reuse one instance per configuration.
pub struct MelFilterbank {
    weights: Vec<Vec<f32>>,
    bins: usize,
}

impl MelFilterbank {
    pub fn new(sample_rate: u32, fft_size: usize, mel_bands: usize) -> Self {
        let bins = fft_size / 2 + 1;
        let nyquist = sample_rate as f32 / 2.0;

        let mel_min = hz_to_mel(0.0);
        let mel_max = hz_to_mel(nyquist);

        // mel_bands + 2 boundary points, linearly spaced in mel space,
        // mapped back to Hz and then to the nearest FFT bin.
        let bin_points: Vec<usize> = (0..mel_bands + 2)
            .map(|i| {
                let mel = mel_min + (mel_max - mel_min) * i as f32 / (mel_bands + 1) as f32;
                let hz = mel_to_hz(mel);
                (hz * fft_size as f32 / sample_rate as f32).round() as usize
            })
            .collect();

        let mut weights = vec![vec![0.0f32; bins]; mel_bands];
        for (band, filter) in weights.iter_mut().enumerate() {
            let left = bin_points[band];
            let center = bin_points[band + 1];
            let right = bin_points[band + 2];

            // A degenerate ramp (equal boundary bins) has an empty range
            // and is skipped, so the slope is never a division by zero.
            for j in left..center.min(bins) {
                filter[j] = (j - left) as f32 / (center - left) as f32;
            }
            for j in center..right.min(bins) {
                filter[j] = (right - j) as f32 / (right - center) as f32;
            }
        }

        Self { weights, bins }
    }

    /// Shared filterbank for a configuration, built at most once.
    ///
    /// The build runs while the cache lock is held, so concurrent
    /// first-time callers for the same key wait for a single construction
    /// instead of duplicating it.
    pub fn cached(sample_rate: u32, fft_size: usize, mel_bands: usize) -> Arc<MelFilterbank> {
        let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut map = cache.lock().expect("mel filterbank cache poisoned");
        map.entry((sample_rate, fft_size, mel_bands))
            .or_insert_with(|| Arc::new(MelFilterbank::new(sample_rate, fft_size, mel_bands)))
            .clone()
    }

    /// Project a power spectrum onto the mel bands.
    pub fn apply(&self, spectrum: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .map(|filter| {
                filter
                    .iter()
                    .zip(spectrum.iter())
                    .map(|(&w, &p)| w * p)
                    .sum()
            })
            .collect()
    }

    pub fn bands(&self) -> usize {
        self.weights.len()
    }

    pub fn bins(&self) -> usize {
        self.bins
    }
}
