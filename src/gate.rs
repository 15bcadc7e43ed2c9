//! The playback gate
//!
//! Decides whether a sound or music event may play, computes the effective
//! volume from settings and window focus, and owns the one currently
//! playing background music track.
//!
//! All operations are synchronous and driven by the host game loop:
//! [`AudioGate::initialize`] once at startup, the playback calls on demand,
//! [`AudioGate::update`] once per frame. The gate is deliberately not
//! shared across threads; a multi-threaded host owns it on its loop thread.

use crate::assets::{MusicTrack, SoundBank, SoundEffect};
use crate::backend::AudioBackend;
use crate::context::AudioContext;
use crate::settings::{MAX_MUSIC_DATA_INDEX_COUNT, SOUND_DELTA};

/// Result of the one-shot hardware probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// [`AudioGate::initialize`] has not run yet; playback is withheld
    Unprobed,
    /// The audio device opened successfully
    Available,
    /// No audio hardware; every operation is a permanent no-op
    Unavailable,
}

/// Currently playing music, keyed by the index it was resolved from
struct CurrentMusic {
    index: u32,
    track: Box<dyn MusicTrack>,
}

/// Volume-gated playback gate for a single game client.
///
/// Holds only the hardware availability state and the optional current
/// music track. Settings, focus, and scene state are passed in read-only
/// through an [`AudioContext`] on every call.
pub struct AudioGate {
    availability: Availability,
    current_music: Option<CurrentMusic>,
}

impl AudioGate {
    /// Create an unprobed gate. Call [`initialize`](Self::initialize)
    /// before any playback.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            availability: Availability::Unprobed,
            current_music: None,
        }
    }

    /// Probe the audio device once at startup.
    ///
    /// On failure the gate goes permanently silent for the process
    /// lifetime; the only diagnostic is a single warning log line. Never
    /// propagates an error.
    pub fn initialize(&mut self, backend: &mut dyn AudioBackend) {
        match backend.probe() {
            Ok(()) => self.availability = Availability::Available,
            Err(err) => {
                log::warn!("audio hardware probe failed, disabling audio: {err}");
                self.availability = Availability::Unavailable;
            }
        }
    }

    /// Current probe state
    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Index of the currently playing music track, if any
    #[must_use]
    pub fn current_music_index(&self) -> Option<u32> {
        self.current_music.as_ref().map(|current| current.index)
    }

    fn available(&self) -> bool {
        self.availability == Availability::Available
    }

    /// Play a one-shot sound effect at the profile's configured volume.
    ///
    /// Silently does nothing when the device is unavailable, no profile is
    /// active, sound is disabled, the computed volume falls outside
    /// `[-1, 1]`, or the asset is missing.
    pub fn play_sound(
        &mut self,
        bank: &mut dyn SoundBank,
        ctx: &AudioContext<'_>,
        index: u32,
        effect: SoundEffect,
        spam_check: bool,
    ) {
        if !self.available() {
            return;
        }

        let Some(profile) = ctx.profile else { return };
        if !profile.enable_sound {
            return;
        }

        let mut volume = f32::from(profile.sound_volume) / SOUND_DELTA;

        if ctx.window_focused {
            // Recomputes the identical value: the focused case applies no
            // reduction even when background playback is disallowed.
            if !profile.reproduce_sounds_in_background {
                volume = f32::from(profile.sound_volume) / SOUND_DELTA;
            }
        } else if !profile.reproduce_sounds_in_background {
            volume = 0.0;
        }

        if !(-1.0..=1.0).contains(&volume) {
            return;
        }

        if let Some(sound) = bank.sound(index) {
            sound.play(true, effect, volume, spam_check);
        }
    }

    /// Play a one-shot sound effect at a caller-computed volume.
    ///
    /// The caller has already applied distance attenuation, so the volume
    /// is passed through unscaled. Same guards as
    /// [`play_sound`](Self::play_sound), plus an outright rejection when
    /// the window is unfocused and background playback is disallowed.
    pub fn play_sound_with_distance(
        &mut self,
        bank: &mut dyn SoundBank,
        ctx: &AudioContext<'_>,
        index: u32,
        mut volume: f32,
        spam_check: bool,
    ) {
        if !self.available() {
            return;
        }

        let Some(profile) = ctx.profile else { return };
        if !profile.enable_sound
            || (!ctx.window_focused && !profile.reproduce_sounds_in_background)
        {
            return;
        }

        // Never fires: the combined guard above already rejected this case.
        if !ctx.window_focused && !profile.reproduce_sounds_in_background {
            volume = 0.0;
        }

        if !(-1.0..=1.0).contains(&volume) {
            return;
        }

        if let Some(sound) = bank.sound(index) {
            sound.play(true, SoundEffect::None, volume, spam_check);
        }
    }

    /// Start or replace the background music track.
    ///
    /// On the login scene the global login-music settings govern playback;
    /// otherwise the profile's music settings do. Requesting the index that
    /// is already playing changes nothing, not even the volume. Requesting
    /// an index with no asset stops whatever is playing.
    pub fn play_music(&mut self, bank: &mut dyn SoundBank, ctx: &AudioContext<'_>, index: u32) {
        if !self.available() || index >= MAX_MUSIC_DATA_INDEX_COUNT {
            return;
        }

        let raw_volume = if ctx.is_login() {
            if !ctx.globals.login_music {
                return;
            }
            ctx.globals.login_music_volume
        } else {
            let Some(profile) = ctx.profile else { return };
            if !profile.enable_music {
                return;
            }
            profile.music_volume
        };

        let volume = f32::from(raw_volume) / SOUND_DELTA;
        if !(-1.0..=1.0).contains(&volume) {
            return;
        }

        match bank.music(index) {
            None => {
                if self.current_music.is_some() {
                    self.stop_music();
                }
            }
            Some(mut track) => {
                let same_track = self.current_music_index() == Some(index);
                if !same_track {
                    self.stop_music();
                    track.play(false, volume);
                    self.current_music = Some(CurrentMusic { index, track });
                }
            }
        }
    }

    /// Re-apply the profile music volume to the current track.
    ///
    /// Called by the host when the user edits volume settings. No-op when
    /// nothing is playing, music is disabled, or the computed volume falls
    /// outside `[-1, 1]`.
    pub fn update_current_music_volume(&mut self, ctx: &AudioContext<'_>) {
        if !self.available() {
            return;
        }

        let Some(current) = self.current_music.as_mut() else {
            return;
        };

        let Some(profile) = ctx.profile else { return };
        if !profile.enable_music {
            return;
        }

        let volume = f32::from(profile.music_volume) / SOUND_DELTA;
        if !(-1.0..=1.0).contains(&volume) {
            return;
        }

        current.track.set_volume(volume);
    }

    /// Stop and release the current music track. Idempotent.
    pub fn stop_music(&mut self) {
        if let Some(mut current) = self.current_music.take() {
            current.track.stop();
        }
    }

    /// Per-frame tick keeping the music volume in sync with focus changes.
    ///
    /// When background playback is disallowed, losing focus forces the
    /// track volume to zero and regaining focus restores the configured
    /// volume. When background playback is allowed the volume is left
    /// untouched regardless of focus. The track's own per-tick hook runs
    /// whenever a track exists, even with no active profile.
    pub fn update(&mut self, ctx: &AudioContext<'_>) {
        if !self.available() {
            return;
        }

        if let (Some(current), Some(profile)) = (self.current_music.as_mut(), ctx.profile) {
            if ctx.window_focused {
                if !profile.reproduce_sounds_in_background {
                    current
                        .track
                        .set_volume(f32::from(profile.music_volume) / SOUND_DELTA);
                }
            } else if !profile.reproduce_sounds_in_background && current.track.volume() != 0.0 {
                current.track.set_volume(0.0);
            }
        }

        if let Some(current) = self.current_music.as_mut() {
            current.track.update();
        }
    }
}

impl Default for AudioGate {
    fn default() -> Self {
        Self::new()
    }
}
