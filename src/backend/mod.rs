//! Audio device backends
//!
//! Platform abstraction over the playback library. The gate itself only
//! needs the one-shot hardware probe; playback goes through the asset
//! seams in [`crate::assets`].

pub mod rodio_backend;

use crate::error::AudioError;

/// Device probe seam used by [`crate::AudioGate::initialize`].
pub trait AudioBackend {
    /// Open and immediately release a throwaway output stream to test for
    /// audio hardware.
    ///
    /// # Errors
    /// [`AudioError::NoAudioHardware`] when no output device can be opened.
    fn probe(&mut self) -> Result<(), AudioError>;
}
