//! Effects Engine
//!
//! Every effect works in place on an [`AudioBuffer`] and checks its
//! parameters before touching a single sample, so a rejected call leaves the
//! buffer exactly as it was. Order matters: effects do not commute.

pub mod common;
pub mod dynamics;
pub mod fade;
pub mod modulation;
pub mod stereo;
pub mod time;

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::audio::AudioBuffer;
use crate::error::{WavEditError, Result};

pub use dynamics::{apply_compressor, apply_distortion, apply_gain};
pub use fade::{apply_fade_in, apply_fade_out, FadeCurve};
pub use modulation::apply_tremolo;
pub use stereo::{apply_rotating_stereo, mono_to_stereo};
pub use time::{apply_delay, apply_reverberation, apply_reverse};

/// One effect invocation with its parameters.
///
/// Serialized with a `kind` tag, e.g. `{ kind = "delay", delay_ms = 250, decay = 0.5 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Effect {
    Gain {
        volume_db: f64,
    },
    Reverse,
    Delay {
        delay_ms: u32,
        decay: f64,
        /// Zero-based channel index; absent means every channel.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel: Option<usize>,
    },
    Reverb,
    Compressor {
        threshold_db: f64,
        ratio: f64,
        #[serde(default = "default_downward")]
        downward: bool,
    },
    Distortion {
        drive: f64,
        blend: f64,
        #[serde(default = "default_volume")]
        volume: f64,
    },
    FadeIn {
        time: f64,
        #[serde(default)]
        curve: FadeCurve,
    },
    FadeOut {
        time: f64,
        #[serde(default)]
        curve: FadeCurve,
    },
    Rotate {
        rate: f64,
    },
    Tremolo {
        freq: f64,
        #[serde(default = "default_mix")]
        dry: f64,
        #[serde(default = "default_mix")]
        wet: f64,
    },
    MonoToStereo,
}

fn default_downward() -> bool { true }
fn default_volume() -> f64 { 1.0 }
fn default_mix() -> f64 { 0.5 }

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Gain { .. } => "gain",
            Effect::Reverse => "reverse",
            Effect::Delay { .. } => "delay",
            Effect::Reverb => "reverb",
            Effect::Compressor { .. } => "compressor",
            Effect::Distortion { .. } => "distortion",
            Effect::FadeIn { .. } => "fade-in",
            Effect::FadeOut { .. } => "fade-out",
            Effect::Rotate { .. } => "rotate",
            Effect::Tremolo { .. } => "tremolo",
            Effect::MonoToStereo => "mono-to-stereo",
        }
    }

    pub fn apply(&self, buffer: &mut AudioBuffer) -> Result<()> {
        match *self {
            Effect::Gain { volume_db } => apply_gain(buffer, volume_db),
            Effect::Reverse => apply_reverse(buffer),
            Effect::Delay { delay_ms, decay, channel } => apply_delay(buffer, delay_ms, decay, channel)?,
            Effect::Reverb => apply_reverberation(buffer)?,
            Effect::Compressor { threshold_db, ratio, downward } => {
                apply_compressor(buffer, threshold_db, ratio, downward)
            }
            Effect::Distortion { drive, blend, volume } => apply_distortion(buffer, drive, blend, volume),
            Effect::FadeIn { time, curve } => apply_fade_in(buffer, time, curve)?,
            Effect::FadeOut { time, curve } => apply_fade_out(buffer, time, curve)?,
            Effect::Rotate { rate } => apply_rotating_stereo(buffer, rate)?,
            Effect::Tremolo { freq, dry, wet } => apply_tremolo(buffer, freq, dry, wet),
            Effect::MonoToStereo => mono_to_stereo(buffer)?,
        }
        Ok(())
    }

    /// Checks that do not depend on the buffer, for rejecting a chain before any file is read.
    ///
    /// Stricter than the effects themselves: it also refuses parameters the
    /// engine would accept but that are almost certainly typos.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| -> Result<()> { Err(WavEditError::config(format!("{}: {}", self.name(), msg))) };
        match *self {
            Effect::Gain { volume_db } if !volume_db.is_finite() => fail("volume_db must be finite"),
            Effect::Delay { delay_ms: 0, .. } => fail("delay_ms must be greater than 0"),
            Effect::Delay { decay, .. } if !(decay > 0.0) => fail("decay must be greater than 0"),
            Effect::Compressor { ratio, .. } if !(ratio >= 1.0) => fail("ratio must be at least 1"),
            Effect::Compressor { threshold_db, .. } if !threshold_db.is_finite() => {
                fail("threshold_db must be finite")
            }
            Effect::FadeIn { time, .. } | Effect::FadeOut { time, .. } if !(time > 0.0) => {
                fail("time must be greater than 0")
            }
            Effect::Rotate { rate } if !(rate > 0.0) => fail("rate must be greater than 0"),
            Effect::Tremolo { freq, .. } if !(freq > 0.0) => fail("freq must be greater than 0"),
            _ => Ok(()),
        }
    }
}

/// Parses `name` or `name:key=value,key=value`, using the same names as the config file.
impl FromStr for Effect {
    type Err = WavEditError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, params) = match s.split_once(':') {
            Some((name, params)) => (name, params),
            None => (s, ""),
        };

        let mut table = toml::Table::new();
        table.insert("kind".to_string(), toml::Value::String(name.trim().to_ascii_lowercase()));

        for pair in params.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                WavEditError::invalid_argument(format!("Expected key=value in effect '{}', got '{}'", s, pair))
            })?;
            table.insert(key.trim().to_string(), parse_scalar(value.trim()));
        }

        toml::Value::Table(table).try_into::<Effect>().map_err(|e| {
            WavEditError::invalid_argument(format!("Invalid effect '{}': {}", s, e))
        })
    }
}

fn parse_scalar(value: &str) -> toml::Value {
    if let Ok(i) = value.parse::<i64>() {
        toml::Value::Integer(i)
    } else if let Ok(f) = value.parse::<f64>() {
        toml::Value::Float(f)
    } else if let Ok(b) = value.parse::<bool>() {
        toml::Value::Boolean(b)
    } else {
        toml::Value::String(value.to_string())
    }
}
