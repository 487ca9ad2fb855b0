//! Editing session: one loaded buffer and where it goes

use std::path::{Path, PathBuf};
use crate::audio::{AudioBuffer, BitDepth};
use crate::effects::Effect;
use crate::error::{WavEditError, Result};

/// The buffer being edited together with its source and destination paths.
///
/// Front ends hold one of these and pass it around by reference.
#[derive(Debug, Clone)]
pub struct Session {
    buffer: AudioBuffer,
    input_path: PathBuf,
    output_path: PathBuf,
    unsaved: bool,
}

impl Session {
    pub fn new(buffer: AudioBuffer, input_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            buffer,
            input_path,
            output_path,
            unsaved: false,
        }
    }

    /// Load `input_path` and target `output_path` on save.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(input_path: P, output_path: Q) -> Result<Self> {
        let buffer = AudioBuffer::from_file(input_path.as_ref())?;
        Ok(Self::new(buffer, input_path.as_ref().to_path_buf(), output_path.as_ref().to_path_buf()))
    }

    /// `out-<stem>.wav` in the current directory.
    pub fn default_output_path<P: AsRef<Path>>(input_path: P) -> PathBuf {
        let stem = input_path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        PathBuf::from(format!("out-{}.wav", stem))
    }

    pub fn buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Re-target the precision used by the next save.
    pub fn set_bit_depth(&mut self, bit_depth: BitDepth) {
        if self.buffer.bit_depth != bit_depth {
            log::info!("Bit depth: {} -> {}", self.buffer.bit_depth, bit_depth);
            self.buffer.bit_depth = bit_depth;
            self.unsaved = true;
        }
    }

    /// Apply one effect. On error the buffer and the unsaved flag are untouched.
    pub fn apply(&mut self, effect: &Effect) -> Result<()> {
        effect.apply(&mut self.buffer)?;
        log::info!("Applied {}", effect.name());
        self.unsaved = true;
        Ok(())
    }

    /// Apply effects in order, stopping at the first failure.
    ///
    /// Effects before the failing one stay applied.
    pub fn apply_all(&mut self, effects: &[Effect]) -> Result<()> {
        for (index, effect) in effects.iter().enumerate() {
            self.apply(effect).map_err(|e| with_position(e, index, effect))?;
        }
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        self.buffer.save_to_file(&self.output_path)?;
        self.unsaved = false;
        Ok(())
    }
}

fn with_position(error: WavEditError, index: usize, effect: &Effect) -> WavEditError {
    let prefix = format!("effect #{} ({})", index + 1, effect.name());
    match error {
        WavEditError::InvalidArgument { message } => {
            WavEditError::invalid_argument(format!("{}: {}", prefix, message))
        }
        WavEditError::OutOfRange { message } => WavEditError::out_of_range(format!("{}: {}", prefix, message)),
        other => other,
    }
}
