//! Cosmetic particle bursts
//!
//! Particles never affect gameplay. They are spawned from a driver-owned RNG
//! so the gameplay RNG stream stays untouched.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum live particles; the oldest are dropped first
pub const MAX_PARTICLES: usize = 512;

/// Downward pull on particles (units/frame²)
const PARTICLE_GRAVITY: f32 = 0.2;
/// Life lost per frame (particles start at 1.0)
const PARTICLE_FADE: f32 = 0.02;

/// Burst colours (0xRRGGBB)
pub mod colors {
    pub const PLAYER: u32 = 0x3498db;
    pub const DEATH: u32 = 0xe74c3c;
    pub const COMPLETE: u32 = 0x2ecc71;
}

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 1.0 at spawn, removed at 0
    pub life: f32,
    pub size: f32,
}

impl Particle {
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life -= PARTICLE_FADE;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Spawn `count` particles spraying out of `origin`, biased upward
pub fn burst<R: Rng>(rng: &mut R, origin: Vec2, color: u32, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            pos: origin,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 4.0,
                (rng.random::<f32>() - 0.5) * 4.0 - 2.0,
            ),
            color,
            life: 1.0,
            size: rng.random::<f32>() * 3.0 + 2.0,
        })
        .collect()
}

/// Advance all particles one frame and drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.step();
    }
    particles.retain(Particle::is_alive);
}

/// Append new particles, evicting the oldest past [`MAX_PARTICLES`]
pub fn push_capped(particles: &mut Vec<Particle>, new: Vec<Particle>) {
    particles.extend(new);
    if particles.len() > MAX_PARTICLES {
        let excess = particles.len() - MAX_PARTICLES;
        particles.drain(..excess);
    }
}
