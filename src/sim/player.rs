//! Player kinematics
//!
//! Integrates gravity and velocity, resolves the hitbox against solid
//! rectangles and handles the death/respawn transition. The hitbox is always
//! `PLAYER_SIZE` square; any larger sprite drawn around it is a renderer concern.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::SimEvent;
use super::particles::colors;
use super::rect::Rect;
use crate::audio::SoundCue;
use crate::clamp;
use crate::consts::*;

/// Slack on the trailing-edge comparisons so f32 rounding cannot drop a resting player
const EDGE_EPSILON: f32 = 1e-3;

/// Held-button state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn right() -> Self {
        Self {
            right: true,
            ..Default::default()
        }
    }

    pub fn left() -> Self {
        Self {
            left: true,
            ..Default::default()
        }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    /// Airborne flag, recomputed every collision pass
    pub is_jumping: bool,
    pub controls_reversed: bool,
    /// Reversal the current level starts with; respawn restores it
    pub base_reversed: bool,
    /// Deaths since the level started
    pub deaths: u32,
    /// Recent hitbox centres, oldest first
    #[serde(skip)]
    pub trail: VecDeque<Vec2>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: SPAWN_X,
            y: SPAWN_Y,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            velocity_x: 0.0,
            velocity_y: 0.0,
            is_jumping: true,
            controls_reversed: false,
            base_reversed: false,
            deaths: 0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Fresh player for a level start
    pub fn for_level(reverse_controls: bool) -> Self {
        Self {
            controls_reversed: reverse_controls,
            base_reversed: reverse_controls,
            ..Self::new()
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// y coordinate of the hitbox bottom edge
    #[inline]
    pub fn feet(&self) -> f32 {
        self.y + self.height
    }

    /// Back to the spawn point. Deaths and the level's base reversal survive.
    pub fn respawn(&mut self) {
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
        self.velocity_x = 0.0;
        self.velocity_y = 0.0;
        self.is_jumping = true;
        self.controls_reversed = self.base_reversed;
        self.trail.clear();
    }

    /// Recompute horizontal velocity from held buttons and fire a jump if grounded
    pub fn apply_input(&mut self, input: &InputState, events: &mut Vec<SimEvent>) {
        self.velocity_x = match (input.left, input.right) {
            (true, false) => -PLAYER_SPEED,
            (false, true) => PLAYER_SPEED,
            _ => 0.0,
        };
        if self.controls_reversed {
            self.velocity_x = -self.velocity_x;
        }

        if input.jump && !self.is_jumping {
            self.jump(events);
        }
    }

    /// Start a jump. A no-op while airborne; returns whether the jump happened.
    pub fn jump(&mut self, events: &mut Vec<SimEvent>) -> bool {
        if self.is_jumping {
            return false;
        }
        self.velocity_y = -JUMP_POWER;
        self.is_jumping = true;

        events.push(SimEvent::Cue(SoundCue::Jump));
        events.push(SimEvent::Burst {
            origin: Vec2::new(self.x + self.width / 2.0, self.feet()),
            color: colors::PLAYER,
            count: 5,
        });
        true
    }

    pub fn apply_gravity_and_integrate(&mut self) {
        self.velocity_y = clamp(self.velocity_y + GRAVITY, -JUMP_POWER, TERMINAL_VELOCITY);
        self.x += self.velocity_x;
        self.y += self.velocity_y;
    }

    /// Remember the current hitbox centre, evicting the oldest past `TRAIL_LENGTH`
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.hitbox().center());
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Fell through the floor or flew off the top
    pub fn is_out_of_bounds(&self, playfield_height: f32) -> bool {
        self.y > playfield_height || self.y < CEILING_LIMIT
    }

    /// Integrate one frame. Returns true if the player left the playfield and died.
    pub fn update(&mut self, playfield_height: f32, events: &mut Vec<SimEvent>) -> bool {
        self.apply_gravity_and_integrate();
        self.record_trail();

        if self.is_out_of_bounds(playfield_height) {
            self.die(events);
            return true;
        }
        false
    }

    /// Push the hitbox out of every overlapping platform, in list order.
    ///
    /// The player is assumed airborne until a landing clears the flag. Each
    /// platform resolves on one axis only, checked top, bottom, left, right;
    /// earlier platforms win because later checks see the corrected velocity.
    pub fn resolve_collisions<'a>(&mut self, platforms: impl IntoIterator<Item = &'a Rect>) {
        self.is_jumping = true;

        for platform in platforms {
            if !self.hitbox().overlaps(platform) {
                continue;
            }

            // Edges as they were before this frame's integration
            let prev_top = self.y - self.velocity_y;
            let prev_left = self.x - self.velocity_x;

            if self.velocity_y > 0.0 && prev_top + self.height <= platform.y + EDGE_EPSILON {
                // Landed on top
                self.y = platform.y - self.height;
                self.velocity_y = 0.0;
                self.is_jumping = false;
            } else if self.velocity_y < 0.0 && prev_top >= platform.bottom() - EDGE_EPSILON {
                // Bumped the underside
                self.y = platform.bottom();
                self.velocity_y = 0.0;
            } else if self.velocity_x > 0.0 && prev_left + self.width <= platform.x + EDGE_EPSILON {
                self.x = platform.x - self.width;
            } else if self.velocity_x < 0.0 && prev_left >= platform.right() - EDGE_EPSILON {
                self.x = platform.right();
            }
        }
    }

    pub fn die(&mut self, events: &mut Vec<SimEvent>) {
        self.deaths += 1;
        log::debug!("Player died at ({:.1}, {:.1}), deaths={}", self.x, self.y, self.deaths);

        events.push(SimEvent::Cue(SoundCue::Death));
        events.push(SimEvent::Burst {
            origin: self.hitbox().center(),
            color: colors::DEATH,
            count: 25,
        });
        events.push(SimEvent::PlayerDied);

        self.respawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ground() -> Rect {
        Rect::new(0.0, GROUND_Y, PLAYFIELD_WIDTH, GROUND_HEIGHT)
    }

    /// Player resting on the ground after one settle frame
    fn grounded_player() -> Player {
        let mut player = Player::new();
        player.y = GROUND_Y - player.height;
        player.apply_gravity_and_integrate();
        player.resolve_collisions([&ground()]);
        assert!(!player.is_jumping);
        player
    }

    #[test]
    fn test_gravity_and_clamp() {
        let mut player = Player::new();
        player.apply_gravity_and_integrate();
        assert!((player.velocity_y - GRAVITY).abs() < 1e-6);
        assert!((player.y - (SPAWN_Y + GRAVITY)).abs() < 1e-4);

        for _ in 0..100 {
            player.apply_gravity_and_integrate();
        }
        assert_eq!(player.velocity_y, TERMINAL_VELOCITY);
    }

    #[test]
    fn test_lands_on_platform() {
        let player = grounded_player();
        assert_eq!(player.y, GROUND_Y - PLAYER_SIZE);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn test_not_overlapping_means_airborne() {
        let mut player = grounded_player();
        // Standing exactly on the edge: touching, not overlapping
        player.resolve_collisions([&ground()]);
        assert!(player.is_jumping);
    }

    #[test]
    fn test_jump_then_second_jump_is_noop() {
        let mut player = grounded_player();
        let mut events = Vec::new();

        assert!(player.jump(&mut events));
        assert!(player.is_jumping);
        assert_eq!(player.velocity_y, -JUMP_POWER);
        assert_eq!(events[0], SimEvent::Cue(SoundCue::Jump));
        assert!(matches!(events[1], SimEvent::Burst { count: 5, .. }));

        events.clear();
        assert!(!player.jump(&mut events));
        assert_eq!(player.velocity_y, -JUMP_POWER);
        assert!(events.is_empty());
    }

    #[test]
    fn test_bump_underside() {
        let ceiling = Rect::new(0.0, 300.0, 200.0, 20.0);
        let mut player = Player::new();
        player.y = 322.0;
        player.velocity_y = -10.0;
        player.apply_gravity_and_integrate();
        player.resolve_collisions([&ceiling]);
        assert_eq!(player.y, 320.0);
        assert_eq!(player.velocity_y, 0.0);
        assert!(player.is_jumping);
    }

    #[test]
    fn test_wall_stops_horizontal_motion() {
        let wall = Rect::new(100.0, 300.0, 20.0, 200.0);
        let mut player = Player::new();
        player.x = 72.0;
        player.y = 400.0;
        player.velocity_x = PLAYER_SPEED;
        player.velocity_y = -GRAVITY; // net zero vertical motion this frame
        player.apply_gravity_and_integrate();
        player.resolve_collisions([&wall]);
        assert_eq!(player.x, 100.0 - PLAYER_SIZE);
        assert_eq!(player.velocity_x, PLAYER_SPEED);

        let mut player = Player::new();
        player.x = 123.0;
        player.y = 400.0;
        player.velocity_x = -PLAYER_SPEED;
        player.velocity_y = -GRAVITY;
        player.apply_gravity_and_integrate();
        player.resolve_collisions([&wall]);
        assert_eq!(player.x, 120.0);
    }

    #[test]
    fn test_list_order_breaks_ties() {
        // Two overlapping platforms at different heights: the first lands the
        // player, the second then sees zero vertical velocity and is ignored.
        let low = Rect::new(0.0, 480.0, 200.0, 20.0);
        let high = Rect::new(0.0, 478.0, 200.0, 20.0);

        let mut player = Player::new();
        player.y = 450.0;
        player.velocity_y = 10.0;
        player.apply_gravity_and_integrate();
        player.resolve_collisions([&low, &high]);
        assert_eq!(player.y, 455.0);

        let mut player = Player::new();
        player.y = 450.0;
        player.velocity_y = 10.0;
        player.apply_gravity_and_integrate();
        player.resolve_collisions([&high, &low]);
        assert_eq!(player.y, 453.0);
    }

    #[test]
    fn test_input_mapping() {
        let mut player = Player::new();
        let mut events = Vec::new();

        player.apply_input(&InputState::right(), &mut events);
        assert_eq!(player.velocity_x, PLAYER_SPEED);

        player.apply_input(&InputState::left(), &mut events);
        assert_eq!(player.velocity_x, -PLAYER_SPEED);

        let both = InputState {
            left: true,
            right: true,
            jump: false,
        };
        player.apply_input(&both, &mut events);
        assert_eq!(player.velocity_x, 0.0);

        player.apply_input(&InputState::default(), &mut events);
        assert_eq!(player.velocity_x, 0.0);

        player.controls_reversed = true;
        player.apply_input(&InputState::right(), &mut events);
        assert_eq!(player.velocity_x, -PLAYER_SPEED);
    }

    #[test]
    fn test_jump_input_ignored_while_airborne() {
        let mut player = Player::new();
        let mut events = Vec::new();
        player.apply_input(&InputState::default().with_jump(), &mut events);
        assert_eq!(player.velocity_y, 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_trail_keeps_last_eight() {
        let mut player = Player::new();
        player.velocity_x = 1.0;
        let mut centres = Vec::new();
        for _ in 0..12 {
            player.apply_gravity_and_integrate();
            player.record_trail();
            centres.push(player.hitbox().center());
        }
        assert_eq!(player.trail.len(), TRAIL_LENGTH);
        assert_eq!(player.trail[0], centres[centres.len() - TRAIL_LENGTH]);
        assert_eq!(*player.trail.back().unwrap(), *centres.last().unwrap());
    }

    #[test]
    fn test_die_respawns_and_keeps_count() {
        let mut player = Player::for_level(false);
        player.x = 400.0;
        player.y = 100.0;
        player.velocity_x = 5.5;
        player.velocity_y = 7.0;
        player.is_jumping = false;
        player.controls_reversed = true; // picked up from a zone

        let mut events = Vec::new();
        player.die(&mut events);

        assert_eq!(player.deaths, 1);
        assert_eq!((player.x, player.y), (SPAWN_X, SPAWN_Y));
        assert_eq!((player.velocity_x, player.velocity_y), (0.0, 0.0));
        assert!(player.is_jumping);
        assert!(!player.controls_reversed);
        assert!(player.trail.is_empty());
        assert_eq!(events[0], SimEvent::Cue(SoundCue::Death));
        assert_eq!(events[2], SimEvent::PlayerDied);
    }

    #[test]
    fn test_die_restores_level_reversal() {
        let mut player = Player::for_level(true);
        player.controls_reversed = false;
        player.die(&mut Vec::new());
        assert!(player.controls_reversed);
    }

    #[test]
    fn test_falling_out_kills() {
        let mut player = Player::new();
        player.y = PLAYFIELD_HEIGHT;
        player.velocity_y = 5.0;
        let mut events = Vec::new();
        assert!(player.update(PLAYFIELD_HEIGHT, &mut events));
        assert_eq!(player.deaths, 1);
        assert_eq!(player.y, SPAWN_Y);

        let mut player = Player::new();
        player.y = -99.0;
        player.velocity_y = -JUMP_POWER;
        assert!(player.update(PLAYFIELD_HEIGHT, &mut events));
    }

    proptest! {
        #[test]
        fn prop_velocity_always_clamped(start in -50.0f32..50.0, steps in 1usize..200) {
            let mut player = Player::new();
            player.velocity_y = start;
            for _ in 0..steps {
                player.apply_gravity_and_integrate();
                prop_assert!(player.velocity_y >= -JUMP_POWER);
                prop_assert!(player.velocity_y <= TERMINAL_VELOCITY);
            }
        }
    }
}
