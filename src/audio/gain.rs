//! Gain boost by amplitude scaling.

use crate::constants::gain;
use crate::error::{Error, Result};

/// Convert a dB gain value to a linear amplitude factor.
///
/// `amplitude = 10^(dB / 20)`, so +6 dB roughly doubles the signal.
pub fn db_to_amplitude(db: f32) -> f32 {
    10.0f32.powf(db / 20.0)
}

/// Apply a gain boost to samples in place.
///
/// Gain must be within [0, 30] dB. A gain of exactly 0 dB leaves the
/// samples untouched. Boosted samples are clamped to [-1.0, 1.0].
pub fn apply_gain(samples: &mut [f32], gain_db: f32) -> Result<()> {
    if !(gain::MIN_DB..=gain::MAX_DB).contains(&gain_db) {
        return Err(Error::InvalidGain {
            value: gain_db,
            min: gain::MIN_DB,
            max: gain::MAX_DB,
        });
    }

    if gain_db == 0.0 {
        return Ok(());
    }

    let scale = db_to_amplitude(gain_db);
    for sample in samples.iter_mut() {
        *sample = (*sample * scale).clamp(-1.0, 1.0);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_gain_leaves_samples_untouched() {
        let original = vec![0.1, -0.2, 0.3, -0.4];
        let mut samples = original.clone();
        apply_gain(&mut samples, 0.0).unwrap();
        assert_eq!(samples, original);
    }

    #[test]
    fn test_six_db_roughly_doubles_amplitude() {
        let mut samples = vec![0.25];
        apply_gain(&mut samples, 6.0).unwrap();
        // 10^(6/20) = 1.9953
        assert!((samples[0] - 0.4988).abs() < 1e-3);
    }

    #[test]
    fn test_twenty_db_scales_by_ten() {
        let mut samples = vec![0.05];
        apply_gain(&mut samples, 20.0).unwrap();
        assert!((samples[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_gain_clamps_to_full_scale() {
        let mut samples = vec![0.9, -0.9];
        apply_gain(&mut samples, 30.0).unwrap();
        assert_eq!(samples, vec![1.0, -1.0]);
    }

    #[test]
    fn test_negative_gain_rejected() {
        let mut samples = vec![0.5];
        let result = apply_gain(&mut samples, -3.0);
        assert!(matches!(result, Err(Error::InvalidGain { .. })));
    }

    #[test]
    fn test_gain_above_max_rejected() {
        let mut samples = vec![0.5];
        let result = apply_gain(&mut samples, 31.0);
        assert!(matches!(result, Err(Error::InvalidGain { .. })));
    }
}
