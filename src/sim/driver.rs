//! Simulation driver
//!
//! Owns every piece of mutable game state and advances it one displayed frame
//! at a time. Sound, progress and UI are injected collaborators; they only see
//! fire-and-forget notifications and read-only snapshots.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::SimEvent;
use super::hazard::{HazardEngine, HazardInstance};
use super::level::{Level, LevelCatalog};
use super::particles::{self, Particle, colors};
use super::player::{InputState, Player};
use super::rect::Rect;
use crate::audio::{SoundCue, SoundSink};
use crate::progress::ProgressSink;
use crate::settings::Settings;

/// Particles in the level-complete celebration
const CELEBRATION_PARTICLES: usize = 40;
/// Mixed into the settings seed so effects never share the layout stream
const FX_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Receives per-frame state and terminal events. Every method is optional.
pub trait FrameSink {
    /// Called once per simulated frame while a level is running
    fn frame(&mut self, _elapsed_seconds: u32, _deaths: u32) {}

    fn level_started(&mut self, _level: &Level) {}

    fn level_complete(&mut self, _level_seconds: u32, _deaths: u32) {}

    fn game_complete(&mut self, _total_seconds: u32, _total_deaths: u32) {}

    /// Player died; collapsing platforms have already been reset
    fn player_died(&mut self) {}
}

impl FrameSink for () {}

impl<T: FrameSink + ?Sized> FrameSink for Box<T> {
    fn frame(&mut self, elapsed_seconds: u32, deaths: u32) {
        (**self).frame(elapsed_seconds, deaths)
    }

    fn level_started(&mut self, level: &Level) {
        (**self).level_started(level)
    }

    fn level_complete(&mut self, level_seconds: u32, deaths: u32) {
        (**self).level_complete(level_seconds, deaths)
    }

    fn game_complete(&mut self, total_seconds: u32, total_deaths: u32) {
        (**self).game_complete(total_seconds, total_deaths)
    }

    fn player_died(&mut self) {
        (**self).player_died()
    }
}

/// Where the run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, nothing started yet
    Ready,
    Playing,
    Paused,
    /// Door reached; waiting for `next_level` or a restart
    LevelComplete,
    /// Last level finished
    GameComplete,
}

/// Result of one [`Simulation::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not playing (ready, paused or between levels)
    Idle,
    Running { elapsed_seconds: u32, deaths: u32 },
    LevelComplete {
        level_id: u32,
        deaths: u32,
        elapsed_seconds: u32,
        perfect: bool,
    },
}

/// The frame loop and its state
pub struct Simulation<S, P, U> {
    catalog: LevelCatalog,
    player: Player,
    hazards: HazardEngine,
    particles: Vec<Particle>,
    fx_rng: Pcg32,
    events: Vec<SimEvent>,

    phase: Phase,
    /// Frames since the current level (or its time limit) last restarted
    level_frames: u64,
    /// Frames since the run started
    run_frames: u64,
    run_deaths: u32,

    frame_rate: u32,
    playfield_height: f32,
    particles_enabled: bool,

    sound: S,
    progress: P,
    ui: U,
}

impl<S: SoundSink, P: ProgressSink, U: FrameSink> Simulation<S, P, U> {
    pub fn new(settings: &Settings, sound: S, progress: P, ui: U) -> Self {
        let catalog = LevelCatalog::new(settings.seed);
        let player = Player::for_level(catalog.current().reverse_controls);
        let hazards = HazardEngine::from_specs(&catalog.current().hazards);

        Self {
            catalog,
            player,
            hazards,
            particles: Vec::new(),
            fx_rng: Pcg32::seed_from_u64(settings.seed ^ FX_SEED_SALT),
            events: Vec::with_capacity(16),
            phase: Phase::Ready,
            level_frames: 0,
            run_frames: 0,
            run_deaths: 0,
            frame_rate: settings.frame_rate.max(1),
            playfield_height: settings.playfield_height,
            particles_enabled: settings.particles,
            sound,
            progress,
            ui,
        }
    }

    // === Lifecycle ===

    /// Begin a new run at the first level
    pub fn start(&mut self) {
        self.start_at(0);
    }

    /// Begin a new run at the level with 0-based `index` (clamped)
    pub fn start_at(&mut self, index: usize) {
        self.reset_run();
        self.start_level(index);
    }

    /// Throw the run away and begin again at the first level
    pub fn restart(&mut self) {
        self.start();
    }

    /// Reload the current level without touching run totals
    pub fn restart_level(&mut self) {
        self.start_level(self.catalog.current_index());
    }

    /// Load the level at 0-based `index` (clamped) and start playing it
    pub fn start_level(&mut self, index: usize) {
        let level = self.catalog.load_level(index);
        self.hazards.load(&level.hazards);
        self.player = Player::for_level(level.reverse_controls);
        self.particles.clear();
        self.events.clear();
        self.level_frames = 0;
        self.phase = Phase::Playing;

        log::info!(
            "Starting {} ({} platforms, {} hazards, limit {:?}s)",
            level.name,
            level.platforms.len(),
            level.hazards.len(),
            level.time_limit
        );
        self.ui.level_started(level);
    }

    /// Advance to the following level. Past the last one the run ends and
    /// the UI receives the run totals; returns false in that case.
    pub fn next_level(&mut self) -> bool {
        let next = self.catalog.current_index() + 1;
        if next < self.catalog.len() {
            self.start_level(next);
            return true;
        }

        self.phase = Phase::GameComplete;
        let total_seconds = self.run_seconds();
        log::info!(
            "All {} levels complete in {} with {} deaths",
            self.catalog.len(),
            crate::format_time(total_seconds),
            self.run_deaths
        );
        self.ui.game_complete(total_seconds, self.run_deaths);
        false
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
            log::debug!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Playing;
            log::debug!("Resumed");
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Playing
    }

    fn reset_run(&mut self) {
        self.run_frames = 0;
        self.run_deaths = 0;
    }

    // === Frame ===

    /// Advance one frame with the given held-button state
    pub fn step(&mut self, input: &InputState) -> FrameOutcome {
        match self.phase {
            Phase::Playing => {}
            // Celebration particles keep settling after the door
            Phase::LevelComplete | Phase::GameComplete => {
                particles::update_particles(&mut self.particles);
                return FrameOutcome::Idle;
            }
            Phase::Ready | Phase::Paused => return FrameOutcome::Idle,
        }

        self.player.apply_input(input, &mut self.events);
        self.player.update(self.playfield_height, &mut self.events);

        // Static platforms first, then solid hazards: list order breaks ties
        let platforms = &self.catalog.current().platforms;
        self.player
            .resolve_collisions(platforms.iter().chain(self.hazards.solid_rects()));

        self.hazards.update();
        self.hazards.check_collisions(&mut self.player, &mut self.events);

        self.level_frames += 1;
        self.run_frames += 1;

        let door = self.catalog.current().door;
        let time_limit = self.catalog.current().time_limit;
        let mut outcome = None;
        if self.player.hitbox().overlaps(&door) {
            outcome = Some(self.complete_level());
        } else if let Some(limit) = time_limit {
            if self.level_frames >= u64::from(limit) * u64::from(self.frame_rate) {
                log::debug!("Time limit of {}s reached", limit);
                self.player.die(&mut self.events);
                // Fresh clock for the retry
                self.level_frames = 0;
            }
        }

        self.dispatch_events();
        particles::update_particles(&mut self.particles);

        let elapsed_seconds = self.level_seconds();
        self.ui.frame(elapsed_seconds, self.player.deaths);

        outcome.unwrap_or(FrameOutcome::Running {
            elapsed_seconds,
            deaths: self.player.deaths,
        })
    }

    fn complete_level(&mut self) -> FrameOutcome {
        let level = self.catalog.current();
        let level_id = level.id;
        let deaths = self.player.deaths;
        let elapsed_seconds = self.level_seconds();
        let perfect = deaths == 0;

        self.phase = Phase::LevelComplete;
        self.events.push(SimEvent::Cue(SoundCue::Complete));
        self.events.push(SimEvent::Burst {
            origin: level.door.center(),
            color: colors::COMPLETE,
            count: CELEBRATION_PARTICLES,
        });

        log::info!(
            "{} complete in {} with {} deaths{}",
            level.name,
            crate::format_time(elapsed_seconds),
            deaths,
            if perfect { " (perfect)" } else { "" }
        );

        if !self
            .progress
            .record_completion(level_id, deaths, elapsed_seconds, perfect)
        {
            log::warn!("Failed to record completion of level {}", level_id);
        }
        self.ui.level_complete(elapsed_seconds, deaths);

        FrameOutcome::LevelComplete {
            level_id,
            deaths,
            elapsed_seconds,
            perfect,
        }
    }

    /// Forward queued side effects to collaborators
    fn dispatch_events(&mut self) {
        for event in self.events.drain(..) {
            match event {
                SimEvent::Cue(cue) => self.sound.play(cue),
                SimEvent::Burst {
                    origin,
                    color,
                    count,
                } => {
                    if self.particles_enabled {
                        let fresh = particles::burst(&mut self.fx_rng, origin, color, count);
                        particles::push_capped(&mut self.particles, fresh);
                    }
                }
                SimEvent::PlayerDied => {
                    self.hazards.reset();
                    self.hazards.rearm_disappearing();
                    self.run_deaths += 1;
                    self.ui.player_died();
                }
            }
        }
    }

    // === Snapshots ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn hazards(&self) -> &[HazardInstance] {
        self.hazards.hazards()
    }

    /// Hazards a renderer should draw this frame
    pub fn visible_hazards(&self) -> impl Iterator<Item = &HazardInstance> + '_ {
        self.hazards.visible()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn level(&self) -> &Level {
        self.catalog.current()
    }

    pub fn level_index(&self) -> usize {
        self.catalog.current_index()
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.catalog.current().platforms
    }

    /// Whole seconds on the current level clock
    pub fn level_seconds(&self) -> u32 {
        (self.level_frames / u64::from(self.frame_rate)) as u32
    }

    /// Whole seconds since the run started
    pub fn run_seconds(&self) -> u32 {
        (self.run_frames / u64::from(self.frame_rate)) as u32
    }

    pub fn run_deaths(&self) -> u32 {
        self.run_deaths
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }
}
