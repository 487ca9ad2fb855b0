//! Fade in / fade out envelopes

use std::f64::consts::{E, PI};
use serde::{Deserialize, Serialize};
use crate::audio::AudioBuffer;
use crate::error::{WavEditError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    #[default]
    #[serde(alias = "lin")]
    Linear,
    #[serde(alias = "log")]
    Logarithmic,
    /// `sin(5x/π)²`. Not monotonic over [0, 1].
    #[serde(alias = "sin")]
    Sine,
}

impl FadeCurve {
    /// Envelope value at `x`, with `x` clamped to [0, 1].
    pub fn apply(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        match self {
            FadeCurve::Linear => x,
            FadeCurve::Logarithmic => (1.0 / (1.0 - (E - 1.0) * (x - 1.0))).ln() + 1.0,
            FadeCurve::Sine => (5.0 * x / PI).sin().powi(2),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FadeCurve::Linear => "linear",
            FadeCurve::Logarithmic => "logarithmic",
            FadeCurve::Sine => "sine",
        }
    }
}

/// Scales the first `time` seconds of every channel by `curve(i / fade_samples)`.
pub fn apply_fade_in(buffer: &mut AudioBuffer, time: f64, curve: FadeCurve) -> Result<()> {
    validate_fade_time(buffer, time)?;

    let fade_samples = time * buffer.sample_rate as f64;
    log::debug!("Fade in: {}s ({} samples), {} curve", time, fade_samples, curve.name());

    for mut channel in buffer.channels_mut() {
        let len = channel.len();
        for i in (0..len).take_while(|&i| (i as f64) < fade_samples) {
            channel[i] *= curve.apply(i as f64 / fade_samples);
        }
    }
    Ok(())
}

/// Scales the last `time` seconds of every channel by `1 - curve(offset / fade_samples)`.
pub fn apply_fade_out(buffer: &mut AudioBuffer, time: f64, curve: FadeCurve) -> Result<()> {
    validate_fade_time(buffer, time)?;

    let len = buffer.samples_per_channel();
    let fade_samples = ((time * buffer.sample_rate as f64) as usize).min(len);
    let start = len - fade_samples;
    log::debug!("Fade out: {}s ({} samples from {}), {} curve", time, fade_samples, start, curve.name());

    for mut channel in buffer.channels_mut() {
        for i in start..len {
            channel[i] *= 1.0 - curve.apply((i - start) as f64 / fade_samples as f64);
        }
    }
    Ok(())
}

fn validate_fade_time(buffer: &AudioBuffer, time: f64) -> Result<()> {
    if !(time > 0.0) || time > buffer.length_in_seconds() {
        return Err(WavEditError::invalid_argument(format!(
            "Fade time {}s must be positive and no longer than the {:.3}s buffer",
            time, buffer.length_in_seconds()
        )));
    }
    Ok(())
}
