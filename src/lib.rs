//! WavEdit - Offline WAV Editing Toolkit
//!
//! Decodes PCM WAV files into a normalized multi-channel buffer, runs a chain
//! of in-place effects over it and encodes the result back to PCM.

pub mod audio;
pub mod config;
pub mod effects;
pub mod error;
pub mod generator;
pub mod session;

pub use audio::{AudioBuffer, BitDepth};
pub use config::{Args, Config};
pub use effects::{Effect, FadeCurve};
pub use error::{Result, WavEditError};
pub use session::Session;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub fn init_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .try_init()
        .ok();
}

/// Name, version and the PCM depths this build reads and writes.
pub fn build_info() -> BuildInfo {
    BuildInfo {
        name: NAME,
        version: VERSION,
        bit_depths: BitDepth::ALL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub bit_depths: [BitDepth; 4],
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let depths: Vec<String> = self.bit_depths.iter().map(|d| d.bits().to_string()).collect();
        write!(f, "{} {} (PCM {}-bit)", self.name, self.version, depths.join("/"))
    }
}
