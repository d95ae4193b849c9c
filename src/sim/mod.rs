//! Simulation module
//!
//! All motion logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (particle pool index, debris insertion order)
//! - dt is supplied by the caller

pub mod debris;
pub mod level;
pub mod particles;
pub mod profile;
pub mod state;
pub mod tick;

pub use debris::{Debris, DebrisSystem};
pub use level::{EfLevel, LEVELS, LevelParams};
pub use particles::{Particle, ParticleField, Projection};
pub use profile::radius_at;
pub use state::SimulationState;
pub use tick::{Command, apply_command, tick};
