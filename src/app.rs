//! Simulation loop
//!
//! Owns the world state and compositor and sequences one frame:
//! commands, update, render. Platform code feeds it dt and key commands
//! and presents whatever frame comes back.

use crate::renderer::{Canvas, Compositor, TextRenderer};
use crate::settings::Settings;
use crate::sim::{Command, SimulationState, apply_command, tick};

/// Loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Terminal
    Stopped,
}

pub struct SimulationLoop {
    state: SimulationState,
    compositor: Compositor,
    run_state: RunState,
}

impl SimulationLoop {
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "Starting at {} (seed {}, quality {})",
            settings.start_level,
            seed,
            settings.quality.as_str()
        );

        let mut compositor = Compositor::new(settings.quality);
        compositor.set_show_hud(settings.show_hud);

        Self {
            state: SimulationState::with_level(seed, settings.start_level),
            compositor,
            run_state: RunState::Running,
        }
    }

    /// Run one frame. Returns the composited frame, or `None` once stopped.
    pub fn frame<I>(&mut self, dt: f32, commands: I, text: Option<&mut TextRenderer>) -> Option<&Canvas>
    where
        I: IntoIterator<Item = Command>,
    {
        if self.run_state == RunState::Stopped {
            return None;
        }

        for command in commands {
            if command == Command::Quit {
                log::info!(
                    "Quit requested after {:.1}s ({} ticks)",
                    self.state.elapsed,
                    self.state.ticks
                );
                self.run_state = RunState::Stopped;
                return None;
            }
            apply_command(&mut self.state, command);
        }

        tick(&mut self.state, dt);
        Some(self.compositor.render(&self.state, text))
    }

    /// Stop without running another frame (window closed)
    pub fn stop(&mut self) {
        self.run_state = RunState::Stopped;
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }
}
