//! HUD font discovery
//!
//! Uses the configured font file when given, otherwise the first bold sans
//! font found in the usual system locations.

use std::path::{Path, PathBuf};

use crate::error::{PlatformError, Result};
use crate::renderer::TextRenderer;

/// Common system font locations, checked in order
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// First existing path among `candidates`
pub fn find_font<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf> {
    candidates
        .iter()
        .map(|p| p.as_ref())
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| PlatformError::FontNotFound {
            searched: candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// The configured font path, or the first system candidate that exists
pub fn locate_font(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) => Ok(path.to_path_buf()),
        None => find_font(FONT_CANDIDATES),
    }
}

/// Read and parse a font file
pub fn load_font(path: &Path) -> Result<TextRenderer> {
    let bytes = std::fs::read(path).map_err(|source| PlatformError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    TextRenderer::from_bytes(bytes).map_err(|reason| PlatformError::FontParse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Locate and load the HUD font
pub fn load_text_renderer(configured: Option<&Path>) -> Result<TextRenderer> {
    let path = locate_font(configured)?;
    let renderer = load_font(&path)?;
    log::info!("Loaded HUD font {}", path.display());
    Ok(renderer)
}
