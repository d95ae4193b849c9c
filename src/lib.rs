//! Tornado Sim - A real-time procedural tornado visualization
//!
//! Core modules:
//! - `sim`: Seeded simulation (EF level table, particle field, debris)
//! - `renderer`: Software layer compositing and GPU frame presentation
//! - `platform`: Frame clock, key mapping, font discovery
//! - `app`: Simulation loop state machine (update then render)
//! - `settings`: Optional user configuration

pub mod app;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{RunState, SimulationLoop};
pub use error::PlatformError;
pub use settings::{QualityPreset, Settings};

/// Simulation and canvas constants
pub mod consts {
    /// Logical canvas size (pixels)
    pub const CANVAS_WIDTH: u32 = 960;
    pub const CANVAS_HEIGHT: u32 = 720;

    /// Frame cap
    pub const TARGET_FPS: u32 = 60;
    /// Largest dt fed to the simulation after a stall (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Horizontal centre of the vortex
    pub const CENTER_X: f32 = (CANVAS_WIDTH / 2) as f32;
    /// Ground line (85% down the canvas)
    pub const GROUND_Y: f32 = 612.0;
    /// Apex altitude above the ground line (75% of canvas height)
    pub const MAX_TORNADO_HEIGHT: f32 = 540.0;

    /// Persistent particle pool size
    pub const PARTICLE_COUNT: usize = 220;

    /// Downward acceleration applied to debris (units/s²)
    pub const DEBRIS_GRAVITY: f32 = 220.0;
}

/// An opaque 8-bit colour
pub type Rgb = [u8; 3];

/// Linear interpolation between two colours (channels truncate toward zero)
#[inline]
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let ch = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    [ch(a[0], b[0]), ch(a[1], b[1]), ch(a[2], b[2])]
}

/// Wrap an angle into [0, τ)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly τ for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}
