//! Amplitude effects: gain, compression and distortion

use std::f64::consts::FRAC_2_PI;
use crate::audio::AudioBuffer;
use super::common::{db_to_lin, lin_to_db, sign};

const DISTORTION_RANGE: f64 = 1000.0;

/// Shifts every sample by `volume_db` in the dB domain.
///
/// The level is taken from `|sample|` and the sign is not restored, so the
/// output is rectified.
pub fn apply_gain(buffer: &mut AudioBuffer, volume_db: f64) {
    log::debug!("Gain: {:+.2} dB", volume_db);
    buffer
        .samples_mut()
        .mapv_inplace(|sample| db_to_lin(lin_to_db(sample) + volume_db));
}

/// Static per-sample compressor.
///
/// Downward mode pulls samples above `threshold_db` towards it; upward mode
/// pulls samples below it. The original sign is kept in both modes.
pub fn apply_compressor(buffer: &mut AudioBuffer, threshold_db: f64, ratio: f64, downward: bool) {
    log::debug!("Compressor: threshold {} dB, ratio {}:1, downward {}", threshold_db, ratio, downward);
    buffer.samples_mut().mapv_inplace(|sample| {
        let sample_db = lin_to_db(sample);

        if downward && sample_db > threshold_db {
            sign(sample) * db_to_lin(threshold_db + (sample_db - threshold_db) / ratio)
        } else if !downward && sample_db < threshold_db {
            sign(sample) * db_to_lin(threshold_db - (threshold_db - sample_db) / ratio)
        } else {
            sample
        }
    });
}

/// Arctangent soft clipper. All three parameters are clamped to [0, 1].
pub fn apply_distortion(buffer: &mut AudioBuffer, drive: f64, blend: f64, volume: f64) {
    let drive = drive.clamp(0.0, 1.0);
    let blend = blend.clamp(0.0, 1.0);
    let volume = volume.clamp(0.0, 1.0);
    log::debug!("Distortion: drive {}, blend {}, volume {}", drive, blend, volume);

    buffer.samples_mut().mapv_inplace(|clean| {
        let driven = clean * drive * DISTORTION_RANGE;
        (FRAC_2_PI * driven.atan() * blend + clean * (1.0 - blend)) / 2.0 * volume
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::BitDepth;

    fn mono(samples: Vec<f64>) -> AudioBuffer {
        AudioBuffer::from_channels(44100, BitDepth::Sixteen, vec![samples]).unwrap()
    }

    #[test]
    fn test_gain_zero_db_keeps_magnitude() {
        let mut buffer = mono(vec![0.5, 0.25]);
        apply_gain(&mut buffer, 0.0);
        // The dB floor adds 1e-4 to the magnitude
        assert!((buffer.channel(0)[0] - 0.5001).abs() < 1e-9);
        assert!((buffer.channel(0)[1] - 0.2501).abs() < 1e-9);
    }

    #[test]
    fn test_gain_six_db_doubles() {
        let mut buffer = mono(vec![0.25]);
        apply_gain(&mut buffer, 20.0 * 2f64.log10());
        assert!((buffer.channel(0)[0] - 0.5002).abs() < 1e-9);
    }

    #[test]
    fn test_gain_rectifies_negative_samples() {
        let mut buffer = mono(vec![-0.5]);
        apply_gain(&mut buffer, 0.0);
        assert!(buffer.channel(0)[0] > 0.0);
    }

    #[test]
    fn test_downward_compressor() {
        let threshold = -6.0;
        let threshold_lin = db_to_lin(threshold);
        let mut buffer = mono(vec![0.9, -0.9, 0.3, -0.3, 0.0]);
        apply_compressor(&mut buffer, threshold, 2.0, true);

        let out = buffer.channel(0);
        assert!(out[0] < 0.9 && out[0] > threshold_lin);
        assert!(out[1] > -0.9 && out[1] < -threshold_lin);
        assert_eq!(out[2], 0.3);
        assert_eq!(out[3], -0.3);
        assert_eq!(out[4], 0.0);
    }

    #[test]
    fn test_upward_compressor() {
        let threshold_lin = db_to_lin(-20.0);
        let mut buffer = mono(vec![0.01, 0.9]);
        apply_compressor(&mut buffer, -20.0, 4.0, false);

        let out = buffer.channel(0);
        assert!(out[0] > 0.01 && out[0] < threshold_lin);
        assert_eq!(out[1], 0.9);
    }

    #[test]
    fn test_distortion_clean_blend() {
        let mut buffer = mono(vec![0.4, -0.8]);
        apply_distortion(&mut buffer, 1.0, 0.0, 1.0);
        assert_eq!(buffer.channel(0).to_vec(), vec![0.2, -0.4]);
    }

    #[test]
    fn test_distortion_saturates_and_clamps() {
        let mut buffer = mono(vec![0.5, -0.5]);
        apply_distortion(&mut buffer, 5.0, 2.0, 3.0);
        let out = buffer.channel(0);
        // Fully driven and blended: 2/pi * atan(500) / 2, just under 0.5
        assert!(out[0] > 0.499 && out[0] < 0.5);
        assert!((out[0] + out[1]).abs() < 1e-12);
    }
}
