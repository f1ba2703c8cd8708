//! Headless simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, plays audio
//! or touches storage; side effects leave the frame as [`SimEvent`]s and are
//! forwarded by the [`Simulation`] driver to injected collaborators.
//! - One step per displayed frame
//! - Seeded RNG only
//! - Stable iteration order (list order is the collision tie-break)

pub mod driver;
pub mod hazard;
pub mod level;
pub mod particles;
pub mod player;
pub mod rect;

use glam::Vec2;

use crate::audio::SoundCue;

pub use driver::{FrameOutcome, FrameSink, Phase, Simulation};
pub use hazard::{ContactEffect, HazardEngine, HazardInstance, HazardKind, HazardSpec};
pub use level::{Level, LevelCatalog, LevelGenerator, Tier};
pub use particles::Particle;
pub use player::{InputState, Player};
pub use rect::{Rect, overlaps};

/// Side effect requested during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Play a sound cue
    Cue(SoundCue),
    /// Spawn cosmetic particles
    Burst { origin: Vec2, color: u32, count: usize },
    /// Player died and was respawned
    PlayerDied,
}
