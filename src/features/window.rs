use std::f32::consts::PI;

/// Hann analysis window: `w[i] = 0.5 * (1 - cos(2π·i / (size - 1)))`.
///
/// A window of length 1 is degenerate; it returns `[1.0]` by convention so
/// the single sample passes through unattenuated.
pub fn hann(size: usize) -> Vec<f32> {
    if size == 1 {
        return vec![1.0];
    }
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (size - 1) as f32).cos()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_zero() {
        let w = hann(1024);
        assert_eq!(w.len(), 1024);
        assert!(w[0].abs() < 1e-7);
        assert!(w[1023].abs() < 1e-7);
    }

    #[test]
    fn peak_is_one_at_center() {
        let w = hann(1025);
        assert!((w[512] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn symmetric() {
        let w = hann(512);
        for i in 0..256 {
            assert!((w[i] - w[511 - i]).abs() < 1e-6, "asymmetry at {}", i);
        }
    }

    #[test]
    fn degenerate_size_one() {
        assert_eq!(hann(1), vec![1.0]);
    }
}
