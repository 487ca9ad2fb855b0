//! Audio Module
//!
//! In-memory sample buffer plus the WAV codec that fills and drains it.
//! Bit depth only matters at the codec boundary; everything in between is `f64`.

pub mod buffer;
pub mod pcm;
pub mod wav;

pub use buffer::{AudioBuffer, BufferSummary};
pub use pcm::BitDepth;
pub use wav::{decode, encode, FormatChunk};
