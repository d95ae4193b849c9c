//! Persistent swirl particles
//!
//! A fixed pool created once at startup. Particles spiral upward and, on
//! passing the apex, drop back to the ground with fresh random state so the
//! field never settles into a visible loop.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::level::LevelParams;
use super::profile::radius_at;
use crate::consts::*;
use crate::wrap_angle;

/// A single swirl particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// How far out the particle orbits and how fast it rises, in [0.2, 1.0]
    pub radius_seed: f32,
    /// Height above the ground line, in [0, MAX_TORNADO_HEIGHT]
    pub altitude: f32,
    /// Orbit angle (radians, [0, τ))
    pub angle: f32,
    /// Per-particle angular speed jitter, in [0.6, 1.4]
    pub swirl_variation: f32,
    /// Colour/alpha weight, in [0.5, 1.0]
    pub brightness: f32,
}

/// Screen-space placement of a particle for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub pos: Vec2,
    /// Render radius in pixels (>= 1)
    pub size: u32,
}

impl Particle {
    /// Fresh particle anywhere along the column
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            radius_seed: rng.random_range(0.2..=1.0),
            altitude: rng.random_range(0.0..=MAX_TORNADO_HEIGHT),
            angle: rng.random_range(0.0..TAU),
            swirl_variation: rng.random_range(0.6..=1.4),
            brightness: rng.random_range(0.5..=1.0),
        }
    }

    /// Re-randomize orbit, seed and brightness for a new ascent.
    /// Altitude and swirl variation are kept.
    pub fn reseed<R: Rng>(&mut self, rng: &mut R) {
        self.angle = rng.random_range(0.0..TAU);
        self.radius_seed = rng.random_range(0.2..=1.0);
        self.brightness = rng.random_range(0.5..=1.0);
    }

    /// Advance swirl and lift by `dt`, wrapping at the apex
    pub fn advance<R: Rng>(&mut self, dt: f32, level: &LevelParams, rng: &mut R) {
        self.angle = wrap_angle(self.angle + level.swirl_rate * dt * self.swirl_variation);
        // Outer particles (larger seed) rise faster
        self.altitude += level.lift_rate * dt * (0.4 + 0.6 * self.radius_seed);

        if self.altitude > MAX_TORNADO_HEIGHT {
            self.altitude = self.altitude.rem_euclid(MAX_TORNADO_HEIGHT);
            self.reseed(rng);
        }
    }

    /// Normalized height (0 = ground, 1 = apex)
    #[inline]
    pub fn height_ratio(&self) -> f32 {
        self.altitude / MAX_TORNADO_HEIGHT
    }

    /// Project onto the canvas for a vortex of `base_radius`
    pub fn project(&self, base_radius: f32) -> Projection {
        let height_ratio = self.height_ratio();
        let radius = radius_at(self.radius_seed, base_radius, height_ratio);
        let x = CENTER_X + self.angle.cos() * radius;
        let y = GROUND_Y - self.altitude;
        // Shrink with height for a sense of distance
        let size = (4.0 * (1.0 - height_ratio) + 1.0).round().max(1.0) as u32;
        Projection {
            pos: Vec2::new(x, y),
            size,
        }
    }
}

/// Fixed-size particle pool
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Create `count` randomized particles
    pub fn new<R: Rng>(count: usize, rng: &mut R) -> Self {
        let particles = (0..count).map(|_| Particle::random(rng)).collect();
        Self { particles }
    }

    /// Advance every particle by one tick
    pub fn update<R: Rng>(&mut self, dt: f32, level: &LevelParams, rng: &mut R) {
        for particle in &mut self.particles {
            particle.advance(dt, level, rng);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
