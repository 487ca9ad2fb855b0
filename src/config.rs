//! Configuration management for batch editing

use crate::audio::BitDepth;
use crate::effects::Effect;
use crate::error::{WavEditError, Result};
use crate::session::Session;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub output: OutputConfig,
    pub processing: ProcessingConfig,
    /// Applied in order.
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Overrides the depth the input was decoded from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<BitDepth>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input.wav"),
            output_path: None,
            output: OutputConfig::default(),
            processing: ProcessingConfig::default(),
            effects: Vec::new(),
        }
    }
}

impl Config {
    /// Explicit output path, or `out-<input stem>.wav`.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| Session::default_output_path(&self.input_path))
    }

    pub fn bit_depth(&self) -> Option<BitDepth> {
        self.output.bit_depth
    }

    pub fn verbose(&self) -> bool {
        self.processing.verbose
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "wavedit", about = "Offline WAV effects processor", version, author)]
pub struct Args {
    #[arg(value_name = "INPUT", help = "Input audio file path (WAV format)")]
    pub input: PathBuf,

    #[arg(value_name = "OUTPUT", help = "Output audio file path [default: out-<input stem>.wav]")]
    pub output: Option<PathBuf>,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[arg(
        short = 'e',
        long = "effect",
        value_name = "SPEC",
        help = "Effect to apply, e.g. 'reverse' or 'delay:delay_ms=250,decay=0.5' (repeatable, applied in order)"
    )]
    pub effects: Vec<Effect>,

    #[arg(short = 'b', long = "bit-depth", value_parser = parse_bit_depth, help = "Output bit depth (8, 16, 24 or 32)")]
    pub bit_depth: Option<BitDepth>,

    #[arg(long = "info", help = "Print a summary of the input and exit without writing")]
    pub info: bool,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,
}

fn parse_bit_depth(value: &str) -> std::result::Result<BitDepth, String> {
    let bits: u16 = value.parse().map_err(|_| format!("'{}' is not a number", value))?;
    BitDepth::try_from(bits).map_err(|e| e.to_string())
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        config.input_path = args.input;
        if args.output.is_some() {
            config.output_path = args.output;
        }
        if args.bit_depth.is_some() {
            config.output.bit_depth = args.bit_depth;
        }
        config.processing.verbose |= args.verbose;
        config.effects.extend(args.effects);

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WavEditError::config(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&content)?)
    }

    /// Validate everything that can be checked without reading audio
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(WavEditError::config("Input path cannot be empty"));
        }

        if self.output_path() == self.input_path {
            return Err(WavEditError::config("Output path must differ from the input path"));
        }

        for effect in &self.effects {
            effect.validate()?;
        }

        Ok(())
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WavEditError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| WavEditError::config(format!("Failed to write config file: {}", e)))
    }

    /// Create default config file
    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let default_config = Self::default();
        default_config.save_to_file(path)
    }
}
