//! Time-domain effects: reverse, delay and reverberation

use crate::audio::AudioBuffer;
use crate::error::{WavEditError, Result};

/// Fixed (delay ms, decay) cascade used by [`apply_reverberation`].
pub const REVERB_TAPS: [(u32, f64); 3] = [(100, 0.75), (250, 0.35), (500, 0.15)];

pub fn apply_reverse(buffer: &mut AudioBuffer) {
    for mut channel in buffer.channels_mut() {
        let len = channel.len();
        for i in 0..len / 2 {
            channel.swap(i, len - 1 - i);
        }
    }
}

/// Feedback echo, in place.
///
/// Each sample adds `decay` times the sample `delay_ms` earlier. Reads see
/// earlier writes, so an impulse repeats every delay period with geometric
/// decay. `channel: None` processes every channel.
pub fn apply_delay(buffer: &mut AudioBuffer, delay_ms: u32, decay: f64, channel: Option<usize>) -> Result<()> {
    validate_delay(buffer, delay_ms, decay, channel)?;

    let delay_samples = delay_in_samples(buffer, delay_ms);
    log::debug!("Delay: {} ms ({} samples), decay {}, channel {:?}", delay_ms, delay_samples, decay, channel);

    match channel {
        Some(index) => echo(&mut buffer.channel_mut(index), delay_samples, decay),
        None => {
            for mut samples in buffer.channels_mut() {
                echo(&mut samples, delay_samples, decay);
            }
        }
    }
    Ok(())
}

/// Three cascaded delays over all channels.
///
/// Every tap is validated before the first one runs, so a buffer too short
/// for the longest tap is left untouched.
pub fn apply_reverberation(buffer: &mut AudioBuffer) -> Result<()> {
    for (delay_ms, decay) in REVERB_TAPS {
        validate_delay(buffer, delay_ms, decay, None)?;
    }
    for (delay_ms, decay) in REVERB_TAPS {
        apply_delay(buffer, delay_ms, decay, None)?;
    }
    Ok(())
}

fn validate_delay(buffer: &AudioBuffer, delay_ms: u32, decay: f64, channel: Option<usize>) -> Result<()> {
    if let Some(index) = channel {
        if index >= buffer.channel_count() {
            return Err(WavEditError::out_of_range(format!(
                "Channel {} does not exist, buffer has {} channels", index, buffer.channel_count()
            )));
        }
    }

    if delay_ms == 0 || delay_ms as f64 / 1000.0 > buffer.length_in_seconds() {
        return Err(WavEditError::out_of_range(format!(
            "Delay time {} ms must be positive and within the {:.3}s buffer",
            delay_ms, buffer.length_in_seconds()
        )));
    }

    if !(decay > 0.0) {
        return Err(WavEditError::invalid_argument("Decay must be greater than 0"));
    }

    Ok(())
}

fn delay_in_samples(buffer: &AudioBuffer, delay_ms: u32) -> usize {
    (delay_ms as f64 * buffer.sample_rate as f64 / 1000.0).round() as usize
}

fn echo(samples: &mut ndarray::ArrayViewMut1<'_, f64>, delay_samples: usize, decay: f64) {
    let len = samples.len();
    for i in 0..len.saturating_sub(delay_samples) {
        let feed = samples[i] * decay;
        samples[i + delay_samples] += feed;
    }
}
