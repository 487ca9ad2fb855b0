//! WAV (RIFF/PCM) codec

use std::path::Path;
use ndarray::Array2;
use crate::audio::{AudioBuffer, BitDepth};
use crate::error::{WavEditError, Result};

const RIFF_HEADER_LEN: usize = 12;
const FMT_CHUNK_PAYLOAD_LEN: u32 = 16;
/// Bytes between the RIFF size field and the first sample: "WAVE" + fmt chunk + data chunk header.
const HEADER_OVERHEAD: u32 = 4 + (8 + FMT_CHUNK_PAYLOAD_LEN) + 8;
const PCM_FORMAT: u16 = 1;

/// Parsed `fmt ` chunk fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatChunk {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl FormatChunk {
    fn parse(payload: &[u8]) -> Self {
        Self {
            audio_format: read_u16(payload, 0),
            channels: read_u16(payload, 2),
            sample_rate: read_u32(payload, 4),
            byte_rate: read_u32(payload, 8),
            block_align: read_u16(payload, 12),
            bits_per_sample: read_u16(payload, 14),
        }
    }

    /// Checks the fields in the order a reader cares about: support first, then consistency.
    pub fn validate(&self) -> Result<BitDepth> {
        if self.audio_format != PCM_FORMAT {
            return Err(WavEditError::unsupported(format!(
                "Audio format {} is compressed, only PCM (1) is supported", self.audio_format
            )));
        }

        if self.channels == 0 || self.channels > 2 {
            return Err(WavEditError::unsupported(format!(
                "Only mono or stereo files are supported, found {} channels", self.channels
            )));
        }

        let bit_depth = BitDepth::try_from(self.bits_per_sample)?;

        if self.sample_rate == 0 {
            return Err(WavEditError::corrupt_header("Sample rate cannot be 0"));
        }

        let expected_byte_rate = self.channels as u64 * self.sample_rate as u64 * self.bits_per_sample as u64 / 8;
        if self.byte_rate as u64 != expected_byte_rate {
            return Err(WavEditError::corrupt_header(format!(
                "Byte rate {} does not match channels * sample rate * bit depth / 8 = {}",
                self.byte_rate, expected_byte_rate
            )));
        }

        let expected_block_align = self.channels as u64 * bit_depth.bytes_per_sample() as u64;
        if self.block_align as u64 != expected_block_align {
            return Err(WavEditError::corrupt_header(format!(
                "Block align {} does not match channels * bytes per sample = {}",
                self.block_align, expected_block_align
            )));
        }

        Ok(bit_depth)
    }
}

/// Decode a complete WAV file image into a buffer.
pub fn decode(bytes: &[u8]) -> Result<AudioBuffer> {
    if bytes.len() < RIFF_HEADER_LEN || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(WavEditError::format("Missing RIFF/WAVE header"));
    }

    let fmt_index = find_tag(bytes, b"fmt ")
        .ok_or_else(|| WavEditError::format("No 'fmt ' chunk found"))?;
    let data_index = find_tag(bytes, b"data")
        .ok_or_else(|| WavEditError::format("No 'data' chunk found"))?;
    log::debug!("Chunks: fmt at {}, data at {}", fmt_index, data_index);

    let fmt_payload = bytes
        .get(fmt_index + 8..fmt_index + 8 + FMT_CHUNK_PAYLOAD_LEN as usize)
        .ok_or_else(|| WavEditError::corrupt_header("Truncated 'fmt ' chunk"))?;
    let format = FormatChunk::parse(fmt_payload);
    let bit_depth = format.validate()?;

    let size_field_end = data_index + 8;
    if bytes.len() < size_field_end {
        return Err(WavEditError::corrupt_header("Truncated 'data' chunk header"));
    }
    let declared_size = read_u32(bytes, data_index + 4) as usize;
    let available = bytes.len() - size_field_end;
    let data_size = if declared_size > available {
        log::warn!("Data chunk declares {} bytes but only {} are present, reading what is there",
                   declared_size, available);
        available
    } else {
        declared_size
    };

    let channels = format.channels as usize;
    let block_align = format.block_align as usize;
    let width = bit_depth.bytes_per_sample();
    let frames = data_size / block_align;
    let data = &bytes[size_field_end..size_field_end + frames * block_align];

    let mut samples = Array2::zeros((channels, frames));
    for (i, frame) in data.chunks_exact(block_align).enumerate() {
        for (channel, raw) in frame.chunks_exact(width).enumerate() {
            samples[[channel, i]] = bit_depth.dequantize(raw);
        }
    }

    log::debug!("Decoded {} frames: {} channels, {} Hz, {}", frames, channels, format.sample_rate, bit_depth);
    Ok(AudioBuffer::new(format.sample_rate, bit_depth, samples))
}

/// Encode a buffer as a canonical 44-byte-header PCM WAV image.
pub fn encode(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    let bit_depth = buffer.bit_depth;
    let width = bit_depth.bytes_per_sample();
    let channels = buffer.channel_count();
    let frames = buffer.samples_per_channel();

    let channel_field = u16::try_from(channels)
        .map_err(|_| WavEditError::unsupported(format!("{} channels do not fit a WAV header", channels)))?;
    let block_align = u16::try_from(channels * width)
        .map_err(|_| WavEditError::unsupported("Block align does not fit a WAV header"))?;
    let byte_rate = u32::try_from(buffer.sample_rate as u64 * block_align as u64)
        .map_err(|_| WavEditError::unsupported("Byte rate does not fit a WAV header"))?;
    let data_chunk_size = u32::try_from(frames as u64 * block_align as u64)
        .ok()
        .filter(|size| size.checked_add(HEADER_OVERHEAD).is_some())
        .ok_or_else(|| WavEditError::unsupported("Audio is too long for a RIFF container"))?;
    let file_size = HEADER_OVERHEAD + data_chunk_size;

    let mut out = Vec::with_capacity(8 + file_size as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_PAYLOAD_LEN.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    out.extend_from_slice(&channel_field.to_le_bytes());
    out.extend_from_slice(&buffer.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bit_depth.bits().to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_chunk_size.to_le_bytes());
    let data_start = out.len();

    let samples = buffer.samples();
    let mut clipped = 0usize;
    for i in 0..frames {
        for channel in 0..channels {
            let sample = samples[[channel, i]];
            if sample.abs() > 1.0 {
                clipped += 1;
            }
            bit_depth.quantize_into(sample, &mut out);
        }
    }
    if clipped > 0 {
        log::warn!("{} samples outside [-1.0, 1.0] were clipped", clipped);
    }

    let written_data = out.len() - data_start;
    let written_file = out.len() - 8;
    if written_data != data_chunk_size as usize || written_file != file_size as usize {
        return Err(WavEditError::internal(format!(
            "Header declares data {} / file {} bytes, wrote {} / {}",
            data_chunk_size, file_size, written_data, written_file
        )));
    }

    Ok(out)
}

impl AudioBuffer {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| WavEditError::io(format!("Cannot open audio file {}: {}", path.display(), e)))?;

        let buffer = decode(&bytes)?;
        log::info!("Loaded {}: {:.2}s, {}Hz, {}ch, {}",
                   path.display(), buffer.length_in_seconds(), buffer.sample_rate,
                   buffer.channel_count(), buffer.bit_depth);
        Ok(buffer)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = encode(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| WavEditError::io(format!("Cannot create output directory: {}", e)))?;
        }

        std::fs::write(path, &bytes)
            .map_err(|e| WavEditError::io(format!("Cannot write output file {}: {}", path.display(), e)))?;
        log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// First occurrence of a chunk tag after the RIFF/WAVE header.
fn find_tag(bytes: &[u8], tag: &[u8; 4]) -> Option<usize> {
    bytes[RIFF_HEADER_LEN..]
        .windows(tag.len())
        .position(|window| window == tag)
        .map(|pos| pos + RIFF_HEADER_LEN)
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn header(channels: u16, sample_rate: u32, bits: u16, data: &[u8]) -> Vec<u8> {
        let block_align = channels * bits / 8;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&channels.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&bits.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
        out
    }

    fn stereo_16() -> AudioBuffer {
        AudioBuffer::from_channels(
            44100,
            BitDepth::Sixteen,
            vec![vec![0.0, 0.5, -0.5, 1.0 - 1.0 / 32768.0], vec![-1.0, 0.25, -0.25, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_decode_deinterleaves() {
        let mut data = Vec::new();
        for s in [100i16, -100, 200, -200, 300, -300] {
            data.extend_from_slice(&s.to_le_bytes());
        }
        let buffer = decode(&header(2, 22050, 16, &data)).unwrap();

        assert_eq!(buffer.sample_rate, 22050);
        assert_eq!(buffer.bit_depth, BitDepth::Sixteen);
        assert_eq!(buffer.samples_per_channel(), 3);
        assert_eq!(buffer.channel(0).to_vec(), vec![100.0 / 32768.0, 200.0 / 32768.0, 300.0 / 32768.0]);
        assert_eq!(buffer.channel(1).to_vec(), vec![-100.0 / 32768.0, -200.0 / 32768.0, -300.0 / 32768.0]);
    }

    #[test]
    fn test_decode_skips_unknown_chunks() {
        let plain = header(1, 8000, 8, &[128, 255, 0]);
        let mut bytes = plain[..12].to_vec();
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(b"INFO");
        bytes.extend_from_slice(&plain[12..]);

        let buffer = decode(&bytes).unwrap();
        assert_eq!(buffer.channel(0).to_vec(), vec![0.0, 127.0 / 128.0, -1.0]);
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut bytes = header(1, 8000, 16, &[0, 0]);
        bytes[8..12].copy_from_slice(b"AVI ");
        assert!(matches!(decode(&bytes), Err(WavEditError::Format { .. })));
        assert!(matches!(decode(b"RIFF"), Err(WavEditError::Format { .. })));
    }

    #[test]
    fn test_decode_rejects_missing_data_chunk() {
        let mut bytes = header(1, 8000, 16, &[0, 0]);
        bytes.truncate(36);
        assert!(matches!(decode(&bytes), Err(WavEditError::Format { .. })));
    }

    #[test]
    fn test_decode_rejects_unsupported() {
        let mut compressed = header(1, 8000, 16, &[0, 0]);
        compressed[20] = 3;
        assert!(matches!(decode(&compressed), Err(WavEditError::UnsupportedFormat { .. })));

        let surround = header(6, 8000, 16, &[0; 12]);
        assert!(matches!(decode(&surround), Err(WavEditError::UnsupportedFormat { .. })));

        let twelve_bit = header(1, 8000, 12, &[0, 0]);
        assert!(matches!(decode(&twelve_bit), Err(WavEditError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_decode_rejects_inconsistent_header() {
        let mut bytes = header(2, 8000, 16, &[0; 8]);
        bytes[28..32].copy_from_slice(&1234u32.to_le_bytes());
        assert!(matches!(decode(&bytes), Err(WavEditError::CorruptHeader { .. })));

        let mut bytes = header(2, 8000, 16, &[0; 8]);
        bytes[32..34].copy_from_slice(&2u16.to_le_bytes());
        assert!(matches!(decode(&bytes), Err(WavEditError::CorruptHeader { .. })));
    }

    #[test]
    fn test_decode_tolerates_short_data() {
        let mut bytes = header(1, 8000, 16, &[0, 0, 0, 0x40]);
        bytes[40..44].copy_from_slice(&1000u32.to_le_bytes());
        let buffer = decode(&bytes).unwrap();
        assert_eq!(buffer.channel(0).to_vec(), vec![0.0, 0.5]);
    }

    #[test]
    fn test_encode_header_layout() {
        let buffer = stereo_16();
        let bytes = encode(&buffer).unwrap();

        assert_eq!(bytes.len(), 44 + 4 * 2 * 2);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(read_u32(&bytes, 4) as usize, bytes.len() - 8);
        assert_eq!(&bytes[8..16], b"WAVEfmt ");
        assert_eq!(read_u16(&bytes, 22), 2);
        assert_eq!(read_u32(&bytes, 24), 44100);
        assert_eq!(read_u32(&bytes, 28), 44100 * 4);
        assert_eq!(read_u16(&bytes, 32), 4);
        assert_eq!(read_u16(&bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(read_u32(&bytes, 40), 16);
    }

    #[test]
    fn test_encode_decode_is_lossless_at_same_depth() {
        let buffer = stereo_16();
        let reloaded = decode(&encode(&buffer).unwrap()).unwrap();
        assert_eq!(reloaded, buffer);
    }

    #[test]
    fn test_encode_multi_track() {
        let mut buffer = stereo_16();
        buffer.set_channel_count(3);
        buffer.bit_depth = BitDepth::TwentyFour;
        let bytes = encode(&buffer).unwrap();
        assert_eq!(read_u16(&bytes, 22), 3);
        assert_eq!(read_u16(&bytes, 32), 9);
        assert_eq!(read_u32(&bytes, 40), 4 * 9);
    }

    #[test]
    fn test_file_roundtrip() {
        let buffer = stereo_16();
        let temp_file = NamedTempFile::new().unwrap();

        buffer.save_to_file(temp_file.path()).unwrap();
        let loaded = AudioBuffer::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded, buffer);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AudioBuffer::from_file(dir.path().join("nope.wav"));
        assert!(matches!(result, Err(WavEditError::Io { .. })));
    }
}
