//! Asset lookup and playback trait seams
//!
//! The gate never talks to the device library directly. It sees an
//! index-keyed [`SoundBank`] and the small playback surface it needs:
//! one-shot [`SoundSource`]s and an exclusively owned [`MusicTrack`].
//! Missing assets are `None`, never errors.

/// Post-processing effect applied to a one-shot sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundEffect {
    /// Play the sample as authored
    #[default]
    None,
    /// Small randomized pitch offset to break up repetition
    PitchVariation,
    /// Muffled, as heard through an obstacle
    LowPass,
    /// Large-room reverberation
    Reverb,
}

/// One-shot playback primitive behind a sound index.
///
/// A source may start several overlapping voices; the gate never tracks
/// them individually.
pub trait SoundSource {
    /// Start playback.
    ///
    /// # Arguments
    /// * `ui` - Sound is ambient/UI rather than positioned in the world
    /// * `effect` - Post-processing effect to apply
    /// * `volume` - Normalized volume, already gate-computed
    /// * `spam_check` - Suppress rapid replays of this same sound
    ///
    /// # Returns
    /// `true` if a voice actually started.
    fn play(&mut self, ui: bool, effect: SoundEffect, volume: f32, spam_check: bool) -> bool;
}

/// A loaded, exclusively owned background music track.
///
/// Dropping a track releases its device resources; implementors are
/// expected to stop playback on drop.
pub trait MusicTrack {
    /// Start playback at the given volume
    fn play(&mut self, looped: bool, volume: f32);

    /// Stop playback, releasing the device voice
    fn stop(&mut self);

    /// Last volume applied to the track
    fn volume(&self) -> f32;

    /// Apply a new volume
    fn set_volume(&mut self, volume: f32);

    /// Per-tick housekeeping hook, called once per frame while owned
    fn update(&mut self);
}

/// Index-keyed sound and music lookup
pub trait SoundBank {
    /// Look up a one-shot sound effect by index
    fn sound(&mut self, index: u32) -> Option<&mut dyn SoundSource>;

    /// Load the music track for an index, transferring ownership to the
    /// caller
    fn music(&mut self, index: u32) -> Option<Box<dyn MusicTrack>>;
}
