//! Per-frame simulation step
//!
//! Commands are applied first, then the particle field and debris advance
//! with the parameters of whatever level is current after the commands.

use super::state::SimulationState;

/// Discrete input commands for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Window close or escape
    Quit,
    /// Cyclic advance (space/enter)
    NextLevel,
    /// Direct selection (digit keys), clamped to the last level
    SelectLevel(usize),
}

/// Apply a level command. `Quit` is handled by the loop and ignored here.
pub fn apply_command(state: &mut SimulationState, command: Command) {
    match command {
        Command::NextLevel => state.advance_level(),
        Command::SelectLevel(index) => state.select_level(index),
        Command::Quit => {}
    }
}

/// Advance the simulation by `dt` seconds
pub fn tick(state: &mut SimulationState, dt: f32) {
    state.elapsed += dt as f64;
    state.ticks += 1;

    let level = state.level_params();
    let (particles, debris, rng) = state.parts_mut();
    particles.update(dt, level, rng);
    debris.maybe_spawn(level.debris_probability, rng);
    debris.update(dt);
}
