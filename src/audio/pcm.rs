//! PCM bit depths and sample quantization

use serde::{Deserialize, Serialize};
use crate::error::{WavEditError, Result};

/// Integer precision a buffer was decoded from, and will be encoded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum BitDepth {
    Eight,
    Sixteen,
    TwentyFour,
    ThirtyTwo,
}

const I24_SCALE: f64 = (1 << 23) as f64;
const I32_SCALE: f64 = i32::MAX as f64;

impl BitDepth {
    pub const ALL: [BitDepth; 4] = [BitDepth::Eight, BitDepth::Sixteen, BitDepth::TwentyFour, BitDepth::ThirtyTwo];

    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
            BitDepth::TwentyFour => 24,
            BitDepth::ThirtyTwo => 32,
        }
    }

    pub fn bytes_per_sample(&self) -> usize {
        self.bits() as usize / 8
    }

    /// Decode one little-endian sample. `bytes` must hold at least `bytes_per_sample()` bytes.
    pub fn dequantize(&self, bytes: &[u8]) -> f64 {
        match self {
            BitDepth::Eight => (bytes[0] as f64 - 128.0) / 128.0,
            BitDepth::Sixteen => i16::from_le_bytes([bytes[0], bytes[1]]) as f64 / 32768.0,
            BitDepth::TwentyFour => {
                let mut value = (bytes[2] as i32) << 16 | (bytes[1] as i32) << 8 | bytes[0] as i32;
                if value & 0x80_0000 != 0 {
                    value |= !0xFF_FFFF;
                }
                value as f64 / I24_SCALE
            }
            BitDepth::ThirtyTwo => {
                i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64 / I32_SCALE
            }
        }
    }

    /// Encode one sample, appending its little-endian bytes to `out`.
    ///
    /// Each width uses the exact inverse of its decode factor and saturates at
    /// the integer limits, so samples that came from `dequantize` at the same
    /// depth are reproduced bit for bit. This intentionally differs from the
    /// `(s + 1) / 2 * 255` and `s * 32767` factors, which do not invert decode.
    pub fn quantize_into(&self, sample: f64, out: &mut Vec<u8>) {
        let sample = if sample.is_nan() { 0.0 } else { sample };
        match self {
            BitDepth::Eight => {
                let value = (sample * 128.0).round().clamp(-128.0, 127.0) + 128.0;
                out.push(value as u8);
            }
            BitDepth::Sixteen => {
                let value = (sample * 32768.0).round().clamp(i16::MIN as f64, i16::MAX as f64);
                out.extend_from_slice(&(value as i16).to_le_bytes());
            }
            BitDepth::TwentyFour => {
                let value = (sample * I24_SCALE).round().clamp(-I24_SCALE, I24_SCALE - 1.0) as i32;
                out.extend_from_slice(&value.to_le_bytes()[..3]);
            }
            BitDepth::ThirtyTwo => {
                let value = (sample * I32_SCALE).round().clamp(i32::MIN as f64, I32_SCALE);
                out.extend_from_slice(&(value as i32).to_le_bytes());
            }
        }
    }

    /// Largest decode error for a sample already inside [-1, 1].
    pub fn quantization_step(&self) -> f64 {
        match self {
            BitDepth::Eight => 1.0 / 128.0,
            BitDepth::Sixteen => 1.0 / 32768.0,
            BitDepth::TwentyFour => 1.0 / I24_SCALE,
            BitDepth::ThirtyTwo => 1.0 / I32_SCALE,
        }
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = WavEditError;

    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            24 => Ok(BitDepth::TwentyFour),
            32 => Ok(BitDepth::ThirtyTwo),
            other => Err(WavEditError::unsupported(format!(
                "Bit depth {} is not one of 8, 16, 24 or 32", other
            ))),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
