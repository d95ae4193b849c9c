//! Simulation world state
//!
//! One owned struct holds everything that changes from frame to frame. The
//! loop owns it; update and render borrow it for the duration of a call.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::debris::DebrisSystem;
use super::level::{EfLevel, LevelParams};
use super::particles::ParticleField;
use crate::consts::*;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Currently selected severity level
    pub level: EfLevel,
    /// Accumulated simulation time (seconds since start)
    pub elapsed: f64,
    /// Persistent swirl particles
    pub particles: ParticleField,
    /// Live debris
    pub debris: DebrisSystem,
    /// Simulation tick counter
    pub ticks: u64,
    rng: Pcg32,
}

impl SimulationState {
    /// Create a new state at the default level (EF2)
    pub fn new(seed: u64) -> Self {
        Self::with_level(seed, EfLevel::default())
    }

    /// Create a new state at `level`
    pub fn with_level(seed: u64, level: EfLevel) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = ParticleField::new(PARTICLE_COUNT, &mut rng);
        Self {
            seed,
            level,
            elapsed: 0.0,
            particles,
            debris: DebrisSystem::default(),
            ticks: 0,
            rng,
        }
    }

    /// Parameters of the current level
    pub fn level_params(&self) -> &'static LevelParams {
        self.level.params()
    }

    /// Cyclic advance to the next level
    pub fn advance_level(&mut self) {
        self.set_level(self.level.next());
    }

    /// Direct selection by index (clamped to EF5)
    pub fn select_level(&mut self, index: usize) {
        self.set_level(EfLevel::from_index(index));
    }

    fn set_level(&mut self, level: EfLevel) {
        if level != self.level {
            log::info!("Level {} -> {}", self.level, level);
        }
        self.level = level;
    }

    /// Split borrow for the update pass
    pub(crate) fn parts_mut(&mut self) -> (&mut ParticleField, &mut DebrisSystem, &mut Pcg32) {
        (&mut self.particles, &mut self.debris, &mut self.rng)
    }
}
