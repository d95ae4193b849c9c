//! Ground debris
//!
//! Short-lived ballistic entities kicked out around the vortex base. Spawning
//! is one Bernoulli trial per tick, independent of dt, so spawn density
//! follows the frame rate.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::consts::*;

/// A single debris fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Debris {
    /// Canvas position
    pub pos: Vec2,
    /// Velocity (units/s, +y is down)
    pub vel: Vec2,
    /// Remaining lifetime (seconds)
    pub lifetime: f32,
}

impl Debris {
    /// Kick a fragment outward from a random point around the base
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let angle: f32 = rng.random_range(0.0..TAU);
        let speed: f32 = rng.random_range(80.0..=220.0);
        let offset: f32 = rng.random_range(10.0..=80.0);
        Self {
            pos: Vec2::new(
                CENTER_X + angle.cos() * offset,
                GROUND_Y - rng.random_range(5.0..=20.0),
            ),
            vel: Vec2::new(angle.cos() * speed, -rng.random_range(30.0..=160.0)),
            lifetime: rng.random_range(0.6..=1.4),
        }
    }

    /// Integrate gravity and position, burn lifetime
    pub fn advance(&mut self, dt: f32) {
        self.vel.y += DEBRIS_GRAVITY * dt;
        self.pos += self.vel * dt;
        self.lifetime -= dt;
    }

    /// Expired, or fell below the bottom edge of the canvas
    pub fn is_dead(&self, floor_y: f32) -> bool {
        self.lifetime <= 0.0 || self.pos.y > floor_y
    }
}

/// Dynamic set of live debris
#[derive(Debug, Clone)]
pub struct DebrisSystem {
    debris: Vec<Debris>,
    /// Entities below this y are reaped
    floor_y: f32,
}

impl Default for DebrisSystem {
    fn default() -> Self {
        Self::new(CANVAS_HEIGHT as f32)
    }
}

impl DebrisSystem {
    pub fn new(floor_y: f32) -> Self {
        Self {
            debris: Vec::new(),
            floor_y,
        }
    }

    /// One spawn trial for this tick. Returns true if a fragment was added.
    pub fn maybe_spawn<R: Rng>(&mut self, probability: f32, rng: &mut R) -> bool {
        let p = probability.clamp(0.0, 1.0) as f64;
        if rng.random_bool(p) {
            self.debris.push(Debris::spawn(rng));
            log::trace!("debris spawned ({} live)", self.debris.len());
            true
        } else {
            false
        }
    }

    /// Insert an already-built fragment
    pub fn push(&mut self, debris: Debris) {
        self.debris.push(debris);
    }

    /// Advance all fragments and reap the dead ones
    pub fn update(&mut self, dt: f32) {
        let floor_y = self.floor_y;
        self.debris.retain_mut(|d| {
            d.advance(dt);
            !d.is_dead(floor_y)
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Debris> {
        self.debris.iter()
    }

    pub fn len(&self) -> usize {
        self.debris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debris.is_empty()
    }

    pub fn clear(&mut self) {
        self.debris.clear();
    }
}
