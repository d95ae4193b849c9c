//! Platform layer
//!
//! Everything the simulation needs from the host:
//! - Frame timing and the tick limiter
//! - Keyboard input mapped to commands
//! - Locating the HUD font

pub mod clock;
pub mod fonts;
pub mod input;

pub use clock::FrameClock;
pub use fonts::load_text_renderer;
pub use input::command_for_key;
