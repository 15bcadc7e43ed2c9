//! Rodio-backed device probe, sound bank, and music track
//!
//! Rodio is pure Rust and decodes WAV, OGG Vorbis, MP3, and FLAC. Assets
//! are described by a [`SoundManifest`] mapping integer indices to files on
//! disk; encoded bytes are read lazily and cached, decoding happens at play
//! time on a fresh sink.
//!
//! Playback failures inside this module (unreadable file, decode error,
//! sink creation) are logged and reported to the gate as a missing asset or
//! a failed play, never as errors: the gate's public contract stays
//! infallible.

use super::AudioBackend;
use crate::assets::{MusicTrack, SoundBank, SoundEffect, SoundSource};
use crate::error::AudioError;
use crate::settings::SettingsFile;
use rodio::source::Source;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Minimum spacing between spam-checked plays of the same sound
const SPAM_WINDOW: Duration = Duration::from_millis(250);

/// Pitch multipliers cycled through for [`SoundEffect::PitchVariation`]
const PITCH_STEPS: [f32; 3] = [0.97, 1.0, 1.03];

/// One sound or music file entry in a [`SoundManifest`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Asset index the gate plays this entry under
    pub index: u32,

    /// Path to the audio file
    pub path: PathBuf,
}

/// Index-to-file manifest describing the client's sound and music assets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundManifest {
    /// One-shot sound effect files
    pub sounds: Vec<ManifestEntry>,

    /// Music track files
    pub music: Vec<ManifestEntry>,
}

impl SettingsFile for SoundManifest {}

/// Probe-only backend handing the gate its hardware check
#[derive(Debug, Default)]
pub struct RodioBackend;

impl RodioBackend {
    /// Create a new backend
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AudioBackend for RodioBackend {
    fn probe(&mut self) -> Result<(), AudioError> {
        // The stream is dropped on return; holding it here would tie the
        // device to the probe's lifetime instead of the bank's.
        let (_stream, _handle) = OutputStream::try_default()
            .map_err(|e| AudioError::NoAudioHardware(e.to_string()))?;

        log::info!("audio output device probe succeeded");
        Ok(())
    }
}

/// A one-shot sound effect backed by a file on disk.
///
/// Each play starts a fresh sink so rapid retriggers overlap; drained sinks
/// are reaped on the next play.
pub struct RodioSound {
    path: PathBuf,
    handle: OutputStreamHandle,
    data: Option<Vec<u8>>,
    active: Vec<Sink>,
    last_played: Option<Instant>,
    pitch_step: usize,
}

impl RodioSound {
    fn new(path: PathBuf, handle: OutputStreamHandle) -> Self {
        Self {
            path,
            handle,
            data: None,
            active: Vec::new(),
            last_played: None,
            pitch_step: 0,
        }
    }

    fn ensure_data(&mut self) -> Option<&[u8]> {
        if self.data.is_none() {
            match std::fs::read(&self.path) {
                Ok(bytes) => self.data = Some(bytes),
                Err(err) => {
                    log::debug!("failed to read sound file {}: {err}", self.path.display());
                    return None;
                }
            }
        }
        self.data.as_deref()
    }

    fn next_pitch(&mut self) -> f32 {
        let pitch = PITCH_STEPS[self.pitch_step % PITCH_STEPS.len()];
        self.pitch_step = self.pitch_step.wrapping_add(1);
        pitch
    }

    /// Number of voices still sounding
    #[must_use]
    pub fn active_voices(&self) -> usize {
        self.active.iter().filter(|sink| !sink.empty()).count()
    }
}

impl SoundSource for RodioSound {
    fn play(&mut self, _ui: bool, effect: SoundEffect, volume: f32, spam_check: bool) -> bool {
        if spam_check {
            if let Some(at) = self.last_played {
                if at.elapsed() < SPAM_WINDOW {
                    return false;
                }
            }
        }

        self.active.retain(|sink| !sink.empty());

        let Some(data) = self.ensure_data() else {
            return false;
        };
        let data = data.to_vec();

        let source = match Decoder::new(Cursor::new(data)) {
            Ok(source) => source,
            Err(err) => {
                log::warn!("failed to decode sound {}: {err}", self.path.display());
                return false;
            }
        };

        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::warn!("failed to create voice for {}: {err}", self.path.display());
                return false;
            }
        };

        match effect {
            SoundEffect::None => {}
            SoundEffect::PitchVariation => sink.set_speed(self.next_pitch()),
            SoundEffect::LowPass | SoundEffect::Reverb => {
                log::debug!("sound effect {effect:?} is not supported by the rodio backend");
            }
        }

        sink.set_volume(volume);
        sink.append(source);
        self.active.push(sink);
        self.last_played = Some(Instant::now());
        true
    }
}

/// An owned background music track playing on its own sink
pub struct RodioMusicTrack {
    handle: OutputStreamHandle,
    data: Vec<u8>,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioMusicTrack {
    fn new(data: Vec<u8>, handle: OutputStreamHandle) -> Self {
        Self {
            handle,
            data,
            sink: None,
            volume: 0.0,
        }
    }
}

impl MusicTrack for RodioMusicTrack {
    fn play(&mut self, looped: bool, volume: f32) {
        self.stop();

        let source = match Decoder::new(Cursor::new(self.data.clone())) {
            Ok(source) => source,
            Err(err) => {
                log::warn!("failed to decode music track: {err}");
                return;
            }
        };

        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::warn!("failed to create music voice: {err}");
                return;
            }
        };

        sink.set_volume(volume);
        if looped {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        self.volume = volume;
        self.sink = Some(sink);
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn update(&mut self) {
        // Free the device voice once the track drains.
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.sink = None;
        }
    }
}

impl Drop for RodioMusicTrack {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Rodio-backed implementation of [`SoundBank`].
///
/// Owns the output stream; the bank must outlive every track it hands out.
pub struct RodioSoundBank {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sounds: HashMap<u32, RodioSound>,
    music_paths: HashMap<u32, PathBuf>,
    music_cache: HashMap<u32, Vec<u8>>,
}

impl RodioSoundBank {
    /// Open the default output device and index the manifest.
    ///
    /// # Errors
    /// [`AudioError::NoAudioHardware`] when no output device can be opened.
    pub fn new(manifest: &SoundManifest) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::NoAudioHardware(e.to_string()))?;

        let sounds = manifest
            .sounds
            .iter()
            .map(|entry| {
                (
                    entry.index,
                    RodioSound::new(entry.path.clone(), handle.clone()),
                )
            })
            .collect();

        let music_paths = manifest
            .music
            .iter()
            .map(|entry| (entry.index, entry.path.clone()))
            .collect::<HashMap<_, _>>();

        log::info!(
            "rodio sound bank ready: {} sounds, {} music entries",
            manifest.sounds.len(),
            music_paths.len()
        );

        Ok(Self {
            _stream: stream,
            handle,
            sounds,
            music_paths,
            music_cache: HashMap::new(),
        })
    }
}

impl SoundBank for RodioSoundBank {
    fn sound(&mut self, index: u32) -> Option<&mut dyn SoundSource> {
        self.sounds
            .get_mut(&index)
            .map(|sound| sound as &mut dyn SoundSource)
    }

    fn music(&mut self, index: u32) -> Option<Box<dyn MusicTrack>> {
        let path = self.music_paths.get(&index)?.clone();

        if !self.music_cache.contains_key(&index) {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    self.music_cache.insert(index, bytes);
                }
                Err(err) => {
                    log::debug!("failed to read music file {}: {err}", path.display());
                    return None;
                }
            }
        }

        let data = self.music_cache.get(&index)?.clone();
        Some(Box::new(RodioMusicTrack::new(data, self.handle.clone())))
    }
}
