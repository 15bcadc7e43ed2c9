//! Audio error types

use thiserror::Error;

/// Errors produced at the backend and settings seams.
///
/// The gate's public operations never surface these; they either perform
/// their effect or silently do nothing. Errors exist where the device and
/// the filesystem are touched.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No audio output device could be opened on this machine
    #[error("no audio hardware available: {0}")]
    NoAudioHardware(String),

    /// Settings or manifest file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings or manifest file could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Settings could not be serialized for saving
    #[error("serialization error: {0}")]
    Serialize(String),

    /// File extension not recognized by the settings loader
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}
