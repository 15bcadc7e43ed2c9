//! # audio-gate
//!
//! Settings- and focus-gated audio playback for a single game client.
//!
//! The crate sits between game state (user profile settings, global
//! settings, window focus, active scene) and an audio-device backend. It
//! decides whether a sound or music event may play, computes the effective
//! volume, and owns the one currently playing background music track.
//!
//! ## Features
//!
//! - **Playback gating**: sound and music requests are filtered through
//!   profile settings and window-focus state
//! - **Single-owner music track**: replacing or stopping music always
//!   releases the previous device voice first
//! - **Injected state**: every operation receives a read-only
//!   [`AudioContext`](context::AudioContext), so the gate has no hidden
//!   global dependencies
//! - **Rodio backend**: device probing and playback over [`rodio`], behind
//!   trait seams that keep the gate testable without hardware
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use audio_gate::backend::rodio_backend::{RodioBackend, RodioSoundBank, SoundManifest};
//! use audio_gate::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut gate = AudioGate::new();
//!     let mut backend = RodioBackend::new();
//!     gate.initialize(&mut backend);
//!
//!     let manifest = SoundManifest::load_from_file("assets/sounds.toml")?;
//!     let mut bank = RodioSoundBank::new(&manifest)?;
//!
//!     let settings = AudioSettings::load_from_file("settings.toml")?;
//!     let ctx = AudioContext {
//!         profile: Some(&settings.profile),
//!         globals: &settings.globals,
//!         window_focused: true,
//!         scene: SceneKind::Game,
//!     };
//!
//!     gate.play_music(&mut bank, &ctx, 9);
//!     loop {
//!         // once per frame
//!         gate.update(&ctx);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod backend;
pub mod context;
pub mod error;
pub mod gate;
pub mod settings;

pub use error::AudioError;
pub use gate::{AudioGate, Availability};

/// Common imports for gate users
pub mod prelude {
    pub use crate::assets::{MusicTrack, SoundBank, SoundEffect, SoundSource};
    pub use crate::backend::AudioBackend;
    pub use crate::context::{AudioContext, SceneKind};
    pub use crate::error::AudioError;
    pub use crate::gate::{AudioGate, Availability};
    pub use crate::settings::{
        AudioSettings, GlobalSettings, Profile, SettingsFile, MAX_MUSIC_DATA_INDEX_COUNT,
        SOUND_DELTA,
    };
}
