//! In-memory multi-channel sample buffer

use ndarray::{s, Array2, ArrayView1, ArrayViewMut1, Axis};
use crate::audio::BitDepth;
use crate::error::{WavEditError, Result};

/// Normalized samples laid out as one row per channel.
///
/// Storing channels as rows of a single 2-D array keeps every channel the
/// same length.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    /// Precision the buffer will be encoded with.
    pub bit_depth: BitDepth,
    samples: Array2<f64>,
}

impl Default for AudioBuffer {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            bit_depth: BitDepth::Sixteen,
            samples: Array2::zeros((1, 0)),
        }
    }
}

impl AudioBuffer {
    pub fn new(sample_rate: u32, bit_depth: BitDepth, samples: Array2<f64>) -> Self {
        Self { sample_rate, bit_depth, samples }
    }

    pub fn from_channels(sample_rate: u32, bit_depth: BitDepth, channels: Vec<Vec<f64>>) -> Result<Self> {
        let len = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|c| c.len() != len) {
            return Err(WavEditError::invalid_argument("All channels must have the same length"));
        }

        let rows = channels.len();
        let flat: Vec<f64> = channels.into_iter().flatten().collect();
        let samples = Array2::from_shape_vec((rows, len), flat)
            .map_err(|e| WavEditError::internal(format!("Channel layout: {}", e)))?;
        Ok(Self::new(sample_rate, bit_depth, samples))
    }

    pub fn samples(&self) -> &Array2<f64> {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut Array2<f64> {
        &mut self.samples
    }

    pub fn channel(&self, index: usize) -> ArrayView1<'_, f64> {
        self.samples.row(index)
    }

    pub fn channel_mut(&mut self, index: usize) -> ArrayViewMut1<'_, f64> {
        self.samples.row_mut(index)
    }

    pub fn channels(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.samples.axis_iter(Axis(0))
    }

    pub fn channels_mut(&mut self) -> impl Iterator<Item = ArrayViewMut1<'_, f64>> {
        self.samples.axis_iter_mut(Axis(0))
    }

    pub fn channel_count(&self) -> usize {
        self.samples.nrows()
    }

    pub fn samples_per_channel(&self) -> usize {
        self.samples.ncols()
    }

    pub fn length_in_seconds(&self) -> f64 {
        self.samples_per_channel() as f64 / self.sample_rate as f64
    }

    pub fn is_mono(&self) -> bool {
        self.channel_count() == 1
    }

    pub fn is_stereo(&self) -> bool {
        self.channel_count() == 2
    }

    pub fn is_multi_track(&self) -> bool {
        self.channel_count() > 2
    }

    /// Appends silent channels or drops trailing ones.
    pub fn set_channel_count(&mut self, count: usize) {
        let current = self.channel_count();
        if count == current {
            return;
        }

        let keep = count.min(current);
        let mut resized = Array2::zeros((count, self.samples_per_channel()));
        resized.slice_mut(s![..keep, ..]).assign(&self.samples.slice(s![..keep, ..]));
        self.samples = resized;
    }

    /// Zero-pads or truncates every channel at the tail.
    pub fn set_samples_per_channel(&mut self, len: usize) {
        let current = self.samples_per_channel();
        if len == current {
            return;
        }

        let keep = len.min(current);
        let mut resized = Array2::zeros((self.channel_count(), len));
        resized.slice_mut(s![.., ..keep]).assign(&self.samples.slice(s![.., ..keep]));
        self.samples = resized;
    }

    pub fn summary(&self) -> BufferSummary {
        BufferSummary {
            channels: self.channel_count(),
            samples_per_channel: self.samples_per_channel(),
            sample_rate: self.sample_rate,
            bit_depth: self.bit_depth,
            length_seconds: self.length_in_seconds(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferSummary {
    pub channels: usize,
    pub samples_per_channel: usize,
    pub sample_rate: u32,
    pub bit_depth: BitDepth,
    pub length_seconds: f64,
}

impl std::fmt::Display for BufferSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "|======================================|")?;
        writeln!(f, "| Num Channels: {}", self.channels)?;
        writeln!(f, "| Num Samples Per Channel: {}", self.samples_per_channel)?;
        writeln!(f, "| Sample Rate: {}", self.sample_rate)?;
        writeln!(f, "| Bit Depth: {}", self.bit_depth.bits())?;
        writeln!(f, "| Length in Seconds: {:.3}", self.length_seconds)?;
        write!(f, "|======================================|")
    }
}
