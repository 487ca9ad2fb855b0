//! Waveform generation for modulation sources

use std::f64::consts::PI;
use std::iter::Map;

/// Phase ramp feeding the periodic generators.
///
/// Yields `(i + phase * sample_rate) * freq * 2π / sample_rate` for
/// `ceil(length * sample_rate)` indices. Clones iterate independently.
#[derive(Debug, Clone)]
pub struct WaveInput {
    index: usize,
    len: usize,
    offset: f64,
    factor: f64,
}

impl Iterator for WaveInput {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }
        let value = (self.index as f64 + self.offset) * self.factor;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WaveInput {}

pub type SineWave = Map<WaveInput, fn(f64) -> f64>;

pub fn wave_input(freq: f64, length: f64, sample_rate: f64, phase: f64) -> WaveInput {
    let len = (length * sample_rate).ceil();
    WaveInput {
        index: 0,
        len: if len.is_finite() && len > 0.0 { len as usize } else { 0 },
        offset: phase * sample_rate,
        factor: freq * 2.0 * PI / sample_rate,
    }
}

/// Sine oscillator of `length` seconds, evaluated lazily.
pub fn generate_sine_wave(freq: f64, length: f64, sample_rate: f64, phase: f64) -> SineWave {
    wave_input(freq, length, sample_rate, phase).map(f64::sin as fn(f64) -> f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_rounded_up() {
        assert_eq!(generate_sine_wave(1.0, 1.0, 100.0, 0.0).len(), 100);
        assert_eq!(generate_sine_wave(1.0, 0.015, 100.0, 0.0).len(), 2);
        assert_eq!(generate_sine_wave(1.0, 0.0, 100.0, 0.0).len(), 0);
    }

    #[test]
    fn test_quarter_period_values() {
        let wave: Vec<f64> = generate_sine_wave(1.0, 1.0, 4.0, 0.0).collect();
        let expected = [0.0, 1.0, 0.0, -1.0];
        for (got, want) in wave.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_phase_shift_in_seconds() {
        let shifted: Vec<f64> = generate_sine_wave(1.0, 0.25, 4.0, 0.25).collect();
        assert!((shifted[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_restartable() {
        let wave = generate_sine_wave(440.0, 0.01, 44100.0, 0.0);
        let first: Vec<f64> = wave.clone().collect();
        let second: Vec<f64> = wave.collect();
        assert_eq!(first, second);
    }
}
