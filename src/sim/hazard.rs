//! Hazards and their state machines
//!
//! A [`HazardSpec`] is what the level generator emits; a [`HazardInstance`] is
//! the live, mutable copy the [`HazardEngine`] owns for the current level.
//! Behaviour is not attached to the data: [`behavior`] maps each kind to a pair
//! of pure functions that take an instance and return the next one.

use serde::{Deserialize, Serialize};

use super::SimEvent;
use super::player::Player;
use super::rect::{Rect, overlaps};
use crate::audio::SoundCue;

/// Collapsing platform defaults (frames of standing contact)
pub const COLLAPSE_TIME: u32 = 70;
pub const SHAKE_TIME: u32 = 30;
/// Feet must be this close to a collapsing platform's top to count as standing
pub const STANDING_TOLERANCE: f32 = 5.0;
/// Spike damage (every hit is lethal; kept for display)
pub const SPIKE_DAMAGE: u32 = 100;

/// Hazard type plus its type-specific parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HazardKind {
    /// Kills on touch
    Spike { damage: u32 },
    /// Looks like a platform; vanishes and kills on touch
    DisappearingPlatform,
    /// Solid until stood on for `collapse_time` frames
    CollapsingPlatform { collapse_time: u32, shake_time: u32 },
    /// Solid platform bouncing horizontally between `start_x` and `end_x`
    OscillatingPlatform { start_x: f32, end_x: f32, speed: f32 },
    /// Solid, never drawn as a normal platform
    InvisibleWall,
    /// Area that flips the player's controls
    ReverseControlZone,
}

impl HazardKind {
    pub fn spike() -> Self {
        HazardKind::Spike {
            damage: SPIKE_DAMAGE,
        }
    }

    pub fn collapsing() -> Self {
        HazardKind::CollapsingPlatform {
            collapse_time: COLLAPSE_TIME,
            shake_time: SHAKE_TIME,
        }
    }

    /// Oscillator bounds default to `[x, x + 100]` at speed 2
    pub fn oscillating(x: f32, start_x: Option<f32>, end_x: Option<f32>, speed: Option<f32>) -> Self {
        HazardKind::OscillatingPlatform {
            start_x: start_x.unwrap_or(x),
            end_x: end_x.unwrap_or(x + 100.0),
            speed: speed.unwrap_or(2.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HazardKind::Spike { .. } => "spike",
            HazardKind::DisappearingPlatform => "disappearing_platform",
            HazardKind::CollapsingPlatform { .. } => "collapsing_platform",
            HazardKind::OscillatingPlatform { .. } => "oscillating_platform",
            HazardKind::InvisibleWall => "invisible_wall",
            HazardKind::ReverseControlZone => "reverse_control_zone",
        }
    }

    /// Permanently active geometry that no contact can switch off
    pub fn is_passive_geometry(&self) -> bool {
        matches!(self, HazardKind::InvisibleWall | HazardKind::ReverseControlZone)
    }

    /// Blocks the player like a platform while active
    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            HazardKind::CollapsingPlatform { .. }
                | HazardKind::OscillatingPlatform { .. }
                | HazardKind::InvisibleWall
        )
    }
}

/// Generation-time hazard descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardSpec {
    pub kind: HazardKind,
    pub rect: Rect,
}

impl HazardSpec {
    pub fn new(kind: HazardKind, rect: Rect) -> Self {
        Self { kind, rect }
    }
}

/// Live hazard state, owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardInstance {
    kind: HazardKind,
    pub rect: Rect,
    pub active: bool,
    /// Frames of standing contact (collapsing platforms)
    pub timer: u32,
    /// +1 moving right, -1 moving left (oscillators)
    pub direction: f32,
}

impl HazardInstance {
    pub fn from_spec(spec: &HazardSpec) -> Self {
        Self {
            kind: spec.kind,
            rect: spec.rect,
            active: true,
            timer: 0,
            direction: 1.0,
        }
    }

    /// The kind is fixed at creation
    pub fn kind(&self) -> &HazardKind {
        &self.kind
    }

    /// Collapsing platform past its shake threshold
    pub fn is_shaking(&self) -> bool {
        match self.kind {
            HazardKind::CollapsingPlatform { shake_time, .. } => self.active && self.timer >= shake_time,
            _ => false,
        }
    }

    /// Horizontal jitter a renderer applies to a shaking platform
    pub fn shake_offset(&self) -> f32 {
        if self.is_shaking() {
            (self.timer as f32).sin() * 2.0
        } else {
            0.0
        }
    }

    /// Takes part in collision checks this frame
    pub fn is_live(&self) -> bool {
        self.active || self.kind.is_passive_geometry()
    }

    /// Should be drawn. Invisible walls are always handed to the renderer,
    /// which decides how faintly to show them.
    pub fn is_visible(&self) -> bool {
        self.is_live()
    }

    pub fn is_solid(&self) -> bool {
        self.is_live() && self.kind.is_solid()
    }

    /// Whether the player is touching this hazard in the way its kind reacts to
    fn touches(&self, player: &Player) -> bool {
        match self.kind {
            HazardKind::CollapsingPlatform { .. } => {
                // Probe one unit below the hitbox so a player resting exactly on
                // the top edge still counts as standing on it.
                let mut probe = player.hitbox();
                probe.height += 1.0;
                overlaps(&probe, &self.rect)
                    && (player.feet() - self.rect.y).abs() < STANDING_TOLERANCE
            }
            _ => overlaps(&player.hitbox(), &self.rect),
        }
    }
}

/// What a contact does to the player and the outside world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactEffect {
    pub kills: bool,
    pub reverses_controls: bool,
    pub cue: Option<SoundCue>,
}

impl ContactEffect {
    pub const NONE: Self = Self {
        kills: false,
        reverses_controls: false,
        cue: None,
    };
}

/// Per-kind behaviour
#[derive(Clone, Copy)]
pub struct Behavior {
    pub on_update: fn(HazardInstance) -> HazardInstance,
    pub on_contact: fn(HazardInstance) -> (HazardInstance, ContactEffect),
}

fn unchanged(h: HazardInstance) -> HazardInstance {
    h
}

fn no_contact(h: HazardInstance) -> (HazardInstance, ContactEffect) {
    (h, ContactEffect::NONE)
}

fn spike_contact(h: HazardInstance) -> (HazardInstance, ContactEffect) {
    let effect = ContactEffect {
        kills: true,
        ..ContactEffect::NONE
    };
    (h, effect)
}

fn disappearing_contact(mut h: HazardInstance) -> (HazardInstance, ContactEffect) {
    h.active = false;
    let effect = ContactEffect {
        kills: true,
        reverses_controls: false,
        cue: Some(SoundCue::Trap),
    };
    (h, effect)
}

fn collapsing_contact(mut h: HazardInstance) -> (HazardInstance, ContactEffect) {
    let HazardKind::CollapsingPlatform { collapse_time, .. } = h.kind else {
        return (h, ContactEffect::NONE);
    };
    h.timer += 1;
    if h.timer > collapse_time {
        h.active = false;
        let effect = ContactEffect {
            cue: Some(SoundCue::Trap),
            ..ContactEffect::NONE
        };
        return (h, effect);
    }
    (h, ContactEffect::NONE)
}

fn oscillate(mut h: HazardInstance) -> HazardInstance {
    let HazardKind::OscillatingPlatform { start_x, end_x, speed } = h.kind else {
        return h;
    };
    h.rect.x += speed * h.direction;
    // Turn back toward the interior at either bound
    if h.rect.x <= start_x {
        h.direction = 1.0;
    } else if h.rect.x >= end_x {
        h.direction = -1.0;
    }
    h
}

fn reverse_contact(h: HazardInstance) -> (HazardInstance, ContactEffect) {
    let effect = ContactEffect {
        reverses_controls: true,
        ..ContactEffect::NONE
    };
    (h, effect)
}

/// Dispatch table: kind -> (on_update, on_contact)
pub fn behavior(kind: &HazardKind) -> Behavior {
    match kind {
        HazardKind::Spike { .. } => Behavior {
            on_update: unchanged,
            on_contact: spike_contact,
        },
        HazardKind::DisappearingPlatform => Behavior {
            on_update: unchanged,
            on_contact: disappearing_contact,
        },
        HazardKind::CollapsingPlatform { .. } => Behavior {
            on_update: unchanged,
            on_contact: collapsing_contact,
        },
        HazardKind::OscillatingPlatform { .. } => Behavior {
            on_update: oscillate,
            on_contact: no_contact,
        },
        HazardKind::InvisibleWall => Behavior {
            on_update: unchanged,
            on_contact: no_contact,
        },
        HazardKind::ReverseControlZone => Behavior {
            on_update: unchanged,
            on_contact: reverse_contact,
        },
    }
}

/// Owns the live hazards of the current level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HazardEngine {
    hazards: Vec<HazardInstance>,
}

impl HazardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: &[HazardSpec]) -> Self {
        Self {
            hazards: specs.iter().map(HazardInstance::from_spec).collect(),
        }
    }

    /// Replace all instances with fresh ones built from `specs`
    pub fn load(&mut self, specs: &[HazardSpec]) {
        self.hazards.clear();
        self.hazards.extend(specs.iter().map(HazardInstance::from_spec));
    }

    pub fn hazards(&self) -> &[HazardInstance] {
        &self.hazards
    }

    /// Mutable access to instance state; kinds stay fixed
    pub fn hazards_mut(&mut self) -> &mut [HazardInstance] {
        &mut self.hazards
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    /// Advance per-frame behaviour (oscillators)
    pub fn update(&mut self) {
        for hazard in &mut self.hazards {
            *hazard = (behavior(&hazard.kind).on_update)(*hazard);
        }
    }

    /// Test every live hazard against the player, in list order, and apply
    /// contact effects. Stops at the first lethal contact, so a frame costs at
    /// most one death. Returns whether the player died.
    pub fn check_collisions(&mut self, player: &mut Player, events: &mut Vec<SimEvent>) -> bool {
        for hazard in &mut self.hazards {
            if !hazard.is_live() || !hazard.touches(player) {
                continue;
            }

            let was_active = hazard.active;
            let (next, effect) = (behavior(&hazard.kind).on_contact)(*hazard);
            *hazard = next;

            if was_active && !hazard.active {
                log::debug!(
                    "{} at ({:.0}, {:.0}) switched off",
                    hazard.kind.name(),
                    hazard.rect.x,
                    hazard.rect.y
                );
            }
            if let Some(cue) = effect.cue {
                events.push(SimEvent::Cue(cue));
            }
            if effect.reverses_controls {
                player.controls_reversed = true;
            }
            if effect.kills {
                player.die(events);
                return true;
            }
        }
        false
    }

    /// Restore collapsing platforms to standing, untouched state
    pub fn reset(&mut self) {
        for hazard in &mut self.hazards {
            if matches!(hazard.kind, HazardKind::CollapsingPlatform { .. }) {
                hazard.active = true;
                hazard.timer = 0;
            }
        }
    }

    /// Bring vanished disappearing platforms back (after a death)
    pub fn rearm_disappearing(&mut self) {
        for hazard in &mut self.hazards {
            if hazard.kind == HazardKind::DisappearingPlatform {
                hazard.active = true;
            }
        }
    }

    /// Rectangles the player collides with as platforms, in hazard order
    pub fn solid_rects(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.hazards.iter().filter(|h| h.is_solid()).map(|h| &h.rect)
    }

    /// Hazards a renderer should draw
    pub fn visible(&self) -> impl Iterator<Item = &HazardInstance> + '_ {
        self.hazards.iter().filter(|h| h.is_visible())
    }
}
