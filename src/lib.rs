//! Trap Runner - a trap-filled 2D platformer
//!
//! Core modules:
//! - `sim`: Headless simulation (player kinematics, hazards, level generation, frame driver)
//! - `audio`: Sound cue sinks the simulation fires into
//! - `progress`: Per-level completion bookkeeping
//! - `settings`: Player-facing configuration

pub mod audio;
pub mod progress;
pub mod settings;
pub mod sim;

pub use audio::{AudioGate, CueLog, Silent, SoundCue, SoundSink};
pub use progress::{LevelStats, LevelStatus, ProgressBook, ProgressSink};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration (units/frame²)
    pub const GRAVITY: f32 = 0.6;
    /// Horizontal speed while a direction is held (units/frame)
    pub const PLAYER_SPEED: f32 = 5.5;
    /// Initial upward speed of a jump, also the upward speed cap
    pub const JUMP_POWER: f32 = 13.0;
    /// Maximum falling speed
    pub const TERMINAL_VELOCITY: f32 = 20.0;

    /// Player physics hitbox (square)
    pub const PLAYER_SIZE: f32 = 25.0;
    /// Spawn point
    pub const SPAWN_X: f32 = 50.0;
    pub const SPAWN_Y: f32 = 400.0;
    /// Positions remembered for the motion trail
    pub const TRAIL_LENGTH: usize = 8;
    /// Flying this far above the playfield counts as leaving it
    pub const CEILING_LIMIT: f32 = -100.0;

    /// Virtual playfield
    pub const PLAYFIELD_WIDTH: f32 = 900.0;
    pub const PLAYFIELD_HEIGHT: f32 = 550.0;
    /// Ground platform baseline, present in every level
    pub const GROUND_Y: f32 = 500.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Simulated frames per second (one step per displayed frame)
    pub const FRAME_RATE: u32 = 60;

    /// Levels in the catalogue
    pub const LEVEL_COUNT: u32 = 200;
}

/// Clamp `value` into `[min, max]`
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Format whole seconds as `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
