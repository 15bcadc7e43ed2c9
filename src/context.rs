//! Read-only game state consulted by the gate
//!
//! The host snapshots its state into an [`AudioContext`] for each call
//! instead of the gate reaching into globals, which keeps the gate free of
//! hidden dependencies and testable in isolation.

use crate::settings::{GlobalSettings, Profile};

/// Which scene the client is currently showing.
///
/// Only "is this the login scene" matters to the gate: login music is
/// governed by [`GlobalSettings`] rather than the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Login and character-select flow, before a profile exists
    Login,
    /// In-world gameplay
    Game,
}

/// Snapshot of game state borrowed for the duration of one gate call
#[derive(Debug, Clone, Copy)]
pub struct AudioContext<'a> {
    /// Active profile, if a character is logged in
    pub profile: Option<&'a Profile>,

    /// Client-wide settings
    pub globals: &'a GlobalSettings,

    /// Whether the client window currently has input focus
    pub window_focused: bool,

    /// Active scene kind
    pub scene: SceneKind,
}

impl AudioContext<'_> {
    /// Whether the client is on the login scene
    #[must_use]
    pub fn is_login(&self) -> bool {
        self.scene == SceneKind::Login
    }
}
