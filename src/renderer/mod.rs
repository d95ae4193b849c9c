//! Rendering module
//!
//! Frames are composited on the CPU and handed to wgpu for presentation.

pub mod canvas;
pub mod compositor;
pub mod present;
pub mod text;

pub use canvas::{BlendMode, Canvas};
pub use compositor::Compositor;
pub use present::FramePresenter;
pub use text::{FontSize, TextRenderer};
