//! Channel-layout effects: mono to stereo and rotating stereo

use crate::audio::AudioBuffer;
use crate::error::{WavEditError, Result};

/// Duplicates the only channel into a second one.
pub fn mono_to_stereo(buffer: &mut AudioBuffer) -> Result<()> {
    if !buffer.is_mono() {
        return Err(WavEditError::invalid_argument(format!(
            "Buffer must be mono, it has {} channels", buffer.channel_count()
        )));
    }

    buffer.set_channel_count(2);
    let source = buffer.channel(0).to_owned();
    buffer.channel_mut(1).assign(&source);
    Ok(())
}

/// Sweeps the image between left and right.
///
/// At sample `i` the phase is `i / sample_rate * rate`; left is scaled by
/// its sine and right by its cosine.
pub fn apply_rotating_stereo(buffer: &mut AudioBuffer, rate: f64) -> Result<()> {
    if !buffer.is_stereo() {
        return Err(WavEditError::invalid_argument(format!(
            "Buffer must be stereo, it has {} channels", buffer.channel_count()
        )));
    }
    if !(rate > 0.0) {
        return Err(WavEditError::invalid_argument("Rate must be greater than 0"));
    }

    log::debug!("Rotating stereo: rate {}", rate);
    let sample_rate = buffer.sample_rate as f64;
    let samples = buffer.samples_mut();
    for i in 0..samples.ncols() {
        let x = i as f64 / sample_rate * rate;
        samples[[0, i]] *= x.sin();
        samples[[1, i]] *= x.cos();
    }
    Ok(())
}
