//! LFO-driven effects

use crate::audio::AudioBuffer;
use crate::generator::generate_sine_wave;

/// Amplitude modulation by a sine LFO at `freq` Hz.
///
/// `out = dry * in + wet * in * (lfo / 2 + 0.5)`. `dry` and `wet` are each
/// clamped to [0, 1] and need not sum to 1.
pub fn apply_tremolo(buffer: &mut AudioBuffer, freq: f64, dry: f64, wet: f64) {
    let dry = dry.clamp(0.0, 1.0);
    let wet = wet.clamp(0.0, 1.0);
    log::debug!("Tremolo: {} Hz, dry {}, wet {}", freq, dry, wet);

    let sample_rate = buffer.sample_rate as f64;
    let lfo = generate_sine_wave(freq, buffer.length_in_seconds(), sample_rate, 0.0);

    for mut channel in buffer.channels_mut() {
        for (sample, modulation) in channel.iter_mut().zip(lfo.clone()) {
            *sample = *sample * dry + *sample * (modulation / 2.0 + 0.5) * wet;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::BitDepth;

    #[test]
    fn test_tremolo_envelope() {
        let mut buffer = AudioBuffer::from_channels(4, BitDepth::Sixteen, vec![vec![1.0; 4]; 2]).unwrap();
        apply_tremolo(&mut buffer, 1.0, 0.0, 1.0);

        // LFO at 1 Hz sampled at 4 Hz: 0, 1, 0, -1
        let expected = [0.5, 1.0, 0.5, 0.0];
        for channel in buffer.channels() {
            for (got, want) in channel.iter().zip(expected) {
                assert!((got - want).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_tremolo_dry_only_is_identity() {
        let original = AudioBuffer::from_channels(100, BitDepth::Sixteen, vec![vec![0.3; 50]]).unwrap();
        let mut buffer = original.clone();
        apply_tremolo(&mut buffer, 5.0, 1.0, 0.0);
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_tremolo_clamps_mix() {
        let mut a = AudioBuffer::from_channels(100, BitDepth::Sixteen, vec![vec![0.3; 50]]).unwrap();
        let mut b = a.clone();
        apply_tremolo(&mut a, 5.0, 3.0, -2.0);
        apply_tremolo(&mut b, 5.0, 1.0, 0.0);
        assert_eq!(a, b);
    }
}
