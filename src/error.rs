//! Error Types

use thiserror::Error;

/// Main error type
#[derive(Debug, Clone, Error)]
pub enum WavEditError {
    /// Bad RIFF/WAVE magic or a missing chunk.
    #[error("Format error: {message}")]
    Format { message: String },
    /// Non-PCM data, unsupported channel count or bit depth.
    #[error("Unsupported format: {message}")]
    UnsupportedFormat { message: String },
    /// Byte rate or block align disagree with the other header fields.
    #[error("Corrupt header: {message}")]
    CorruptHeader { message: String },
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
    #[error("Out of range: {message}")]
    OutOfRange { message: String },
    #[error("IO error: {message}")]
    Io { message: String },
    /// Encode-time size bookkeeping went wrong. Should be unreachable.
    #[error("Internal consistency error: {message}")]
    InternalConsistency { message: String },
    #[error("Config error: {message}")]
    Config { message: String },
}

impl WavEditError {
    pub fn format<S: Into<String>>(msg: S) -> Self { Self::Format { message: msg.into() } }
    pub fn unsupported<S: Into<String>>(msg: S) -> Self { Self::UnsupportedFormat { message: msg.into() } }
    pub fn corrupt_header<S: Into<String>>(msg: S) -> Self { Self::CorruptHeader { message: msg.into() } }
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self { Self::InvalidArgument { message: msg.into() } }
    pub fn out_of_range<S: Into<String>>(msg: S) -> Self { Self::OutOfRange { message: msg.into() } }
    pub fn io<S: Into<String>>(msg: S) -> Self { Self::Io { message: msg.into() } }
    pub fn internal<S: Into<String>>(msg: S) -> Self { Self::InternalConsistency { message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
}

pub type Result<T> = std::result::Result<T, WavEditError>;

impl From<std::io::Error> for WavEditError {
    fn from(err: std::io::Error) -> Self { Self::io(err.to_string()) }
}

impl From<toml::de::Error> for WavEditError {
    fn from(err: toml::de::Error) -> Self { Self::config(format!("Failed to parse config file: {}", err)) }
}
