//! Sound cue output
//!
//! The simulation never plays audio itself; it fires cues into a [`SoundSink`]
//! and moves on. Sinks must not block and must not fail the frame.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound cues the simulation can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Player left the ground
    Jump,
    /// Player died
    Death,
    /// Level exit reached
    Complete,
    /// A trap platform vanished or collapsed
    Trap,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Death => "death",
            SoundCue::Complete => "complete",
            SoundCue::Trap => "trap",
        }
    }
}

/// Fire-and-forget cue consumer
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

impl<T: SoundSink + ?Sized> SoundSink for Box<T> {
    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue);
    }
}

/// Drops every cue (no audio backend available)
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Records cues in order, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    cues: Vec<SoundCue>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[SoundCue] {
        &self.cues
    }

    /// Number of times `cue` was played
    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl SoundSink for CueLog {
    fn play(&mut self, cue: SoundCue) {
        log::trace!("cue: {}", cue.as_str());
        self.cues.push(cue);
    }
}

/// Applies the player's sound preferences before forwarding to a backend
#[derive(Debug, Clone)]
pub struct AudioGate<S> {
    inner: S,
    enabled: bool,
    volume: f32,
}

impl<S: SoundSink> AudioGate<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            enabled: true,
            volume: 1.0,
        }
    }

    /// Gate configured from settings
    pub fn from_settings(inner: S, settings: &Settings) -> Self {
        let mut gate = Self::new(inner);
        gate.set_enabled(settings.sound_enabled);
        gate.set_volume(settings.sfx_volume);
        gate
    }

    /// Mute/unmute all cues
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Effective volume (0 when disabled)
    fn effective_volume(&self) -> f32 {
        if self.enabled { self.volume } else { 0.0 }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SoundSink> SoundSink for AudioGate<S> {
    fn play(&mut self, cue: SoundCue) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        self.inner.play(cue);
    }
}
