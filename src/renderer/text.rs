//! HUD text rendering
//!
//! Glyphs are rasterized with fontdue on first use and cached per size.

use std::collections::HashMap;

use fontdue::{Font, FontSettings, Metrics};

use super::canvas::{BlendMode, Canvas, rgba};
use crate::Rgb;

/// The two HUD font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    /// Title line
    Large,
    /// Stats and hint lines
    Small,
}

impl FontSize {
    pub fn px(self) -> f32 {
        match self {
            FontSize::Large => 36.0,
            FontSize::Small => 20.0,
        }
    }
}

struct Glyph {
    metrics: Metrics,
    coverage: Vec<u8>,
}

/// A loaded font plus a glyph cache
pub struct TextRenderer {
    font: Font,
    cache: HashMap<(char, FontSize), Glyph>,
}

impl TextRenderer {
    /// Parse a TrueType/OpenType font
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, &'static str> {
        let font = Font::from_bytes(bytes, FontSettings::default())?;
        Ok(Self {
            font,
            cache: HashMap::new(),
        })
    }

    fn glyph(&mut self, ch: char, size: FontSize) -> &Glyph {
        let font = &self.font;
        self.cache.entry((ch, size)).or_insert_with(|| {
            let (metrics, coverage) = font.rasterize(ch, size.px());
            Glyph { metrics, coverage }
        })
    }

    fn ascent(&self, size: FontSize) -> f32 {
        self.font
            .horizontal_line_metrics(size.px())
            .map(|m| m.ascent)
            .unwrap_or(size.px() * 0.8)
    }

    /// Draw `text` with the top of its line box at (x, y). Returns the advance.
    pub fn draw(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: FontSize,
        color: Rgb,
    ) -> f32 {
        let baseline = (y + self.ascent(size)).round() as i32;
        let mut pen = x;
        let mut prev = None;
        for ch in text.chars() {
            if let Some(p) = prev {
                pen += self.font.horizontal_kern(p, ch, size.px()).unwrap_or(0.0);
            }
            let glyph = self.glyph(ch, size);
            let m = glyph.metrics;
            let left = pen.round() as i32 + m.xmin;
            let top = baseline - (m.height as i32 + m.ymin);
            for row in 0..m.height {
                for col in 0..m.width {
                    let coverage = glyph.coverage[row * m.width + col];
                    if coverage > 0 {
                        canvas.blend_pixel(
                            left + col as i32,
                            top + row as i32,
                            rgba(color, coverage),
                            BlendMode::Over,
                        );
                    }
                }
            }
            pen += m.advance_width;
            prev = Some(ch);
        }
        pen - x
    }
}
