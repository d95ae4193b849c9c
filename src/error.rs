//! Platform initialization errors
//!
//! The simulation core cannot fail. Everything here happens while bringing
//! up the window, GPU, or HUD font, and is fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for platform setup
pub type Result<T> = std::result::Result<T, PlatformError>;

#[derive(Error, Debug)]
pub enum PlatformError {
    /// Event loop could not be created or exited abnormally
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation failed
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// GPU surface creation failed
    #[error("failed to create GPU surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No adapter compatible with the surface
    #[error("no compatible GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// Device request rejected
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// None of the candidate font paths exist
    #[error("no HUD font found (searched: {searched}); set font_path in settings")]
    FontNotFound { searched: String },

    /// Font file could not be read
    #[error("failed to read font {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font file is not a usable TrueType/OpenType font
    #[error("failed to parse font {}: {reason}", path.display())]
    FontParse { path: PathBuf, reason: &'static str },
}
