//! Software raster surface
//!
//! RGBA8 pixels stored premultiplied, so a finished layer can be composited
//! with `src + dst * (1 - src_alpha)` and smoothly rescaled without dark
//! fringes. Primitive colours are passed straight (non-premultiplied).

use glam::Vec2;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::Rgb;

/// How source pixels combine with the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Premultiplied source-over
    Over,
    /// Source colour (scaled by its alpha) added to the destination
    Additive,
}

/// Straight colour with alpha
#[inline]
pub fn rgba(rgb: Rgb, alpha: u8) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], alpha])
}

/// x * y / 255 with rounding
#[inline]
fn mul255(x: u8, y: u8) -> u8 {
    let t = x as u32 * y as u32 + 128;
    ((t + (t >> 8)) >> 8) as u8
}

#[inline]
fn premultiply(color: Rgba<u8>) -> [u8; 4] {
    let [r, g, b, a] = color.0;
    [mul255(r, a), mul255(g, a), mul255(b, a), a]
}

#[inline]
fn blend(dst: &mut Rgba<u8>, src: [u8; 4], mode: BlendMode) {
    match mode {
        BlendMode::Over => {
            let inv = 255 - src[3];
            for c in 0..4 {
                dst.0[c] = src[c].saturating_add(mul255(dst.0[c], inv));
            }
        }
        BlendMode::Additive => {
            for c in 0..4 {
                dst.0[c] = dst.0[c].saturating_add(src[c]);
            }
        }
    }
}

/// An RGBA raster layer
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Opaque canvas filled with one colour
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, rgba(color, 255)),
        }
    }

    /// Opaque top-to-bottom gradient
    pub fn vertical_gradient(width: u32, height: u32, top: Rgb, bottom: Rgb) -> Self {
        let mut canvas = Self::new(width, height);
        for y in 0..height {
            let t = y as f32 / height as f32;
            canvas.fill_row(y, rgba(crate::lerp_rgb(top, bottom, t), 255), BlendMode::Over);
        }
        canvas
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Premultiplied RGBA at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Raw premultiplied RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Reset to fully transparent
    pub fn clear(&mut self) {
        self.image.fill(0);
    }

    /// Overwrite with the contents of a same-sized canvas
    pub fn copy_from(&mut self, other: &Canvas) {
        if self.image.dimensions() == other.image.dimensions() {
            let dst: &mut [u8] = &mut self.image;
            dst.copy_from_slice(other.image.as_raw());
        } else {
            self.image = other.image.clone();
        }
    }

    /// Blend a single pixel; out-of-bounds coordinates are ignored
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>, mode: BlendMode) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        blend(self.image.get_pixel_mut(x as u32, y as u32), premultiply(color), mode);
    }

    /// Blend pixels [x0, x1) of row y, clipped to the canvas
    fn span(&mut self, y: i32, x0: i32, x1: i32, src: [u8; 4], mode: BlendMode) {
        if y < 0 || y as u32 >= self.height() {
            return;
        }
        let x0 = x0.max(0) as u32;
        let x1 = x1.min(self.width() as i32);
        if x1 <= x0 as i32 {
            return;
        }
        for x in x0..x1 as u32 {
            blend(self.image.get_pixel_mut(x, y as u32), src, mode);
        }
    }

    /// Full-width horizontal line
    pub fn fill_row(&mut self, y: u32, color: Rgba<u8>, mode: BlendMode) {
        let width = self.width() as i32;
        self.span(y as i32, 0, width, premultiply(color), mode);
    }

    /// Filled axis-aligned ellipse (pixel-centre sampling)
    pub fn fill_ellipse(&mut self, center: Vec2, rx: f32, ry: f32, color: Rgba<u8>, mode: BlendMode) {
        if rx <= 0.0 || ry <= 0.0 || color.0[3] == 0 {
            return;
        }
        let src = premultiply(color);
        let y0 = (center.y - ry).floor().max(0.0) as i32;
        let y1 = ((center.y + ry).ceil() as i32).min(self.height() as i32);
        for y in y0..y1 {
            let dy = (y as f32 + 0.5 - center.y) / ry;
            if dy.abs() > 1.0 {
                continue;
            }
            let half = rx * (1.0 - dy * dy).sqrt();
            let x0 = (center.x - half).round() as i32;
            let x1 = (center.x + half).round() as i32;
            self.span(y, x0, x1, src, mode);
        }
    }

    /// Filled circle
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba<u8>, mode: BlendMode) {
        self.fill_ellipse(center, radius, radius, color, mode);
    }

    /// Filled rectangle with circular corners
    #[allow(clippy::too_many_arguments)]
    pub fn fill_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        radius: f32,
        color: Rgba<u8>,
        mode: BlendMode,
    ) {
        let radius = radius.min(width as f32 / 2.0).min(height as f32 / 2.0).max(0.0);
        let src = premultiply(color);
        for row in 0..height {
            let fy = row as f32 + 0.5;
            let from_edge = fy.min(height as f32 - fy);
            let inset = if from_edge < radius {
                let dy = radius - from_edge;
                radius - (radius * radius - dy * dy).max(0.0).sqrt()
            } else {
                0.0
            };
            let inset = inset.round() as i32;
            self.span(y + row as i32, x + inset, x + width as i32 - inset, src, mode);
        }
    }

    /// Additive radial glow, brightest at the centre and fading to nothing at
    /// `radius` with a quadratic falloff
    pub fn radial_glow(&mut self, center: Vec2, radius: f32, color: Rgb, peak_alpha: u8) {
        if radius <= 0.0 {
            return;
        }
        let y0 = (center.y - radius).floor().max(0.0) as i32;
        let y1 = ((center.y + radius).ceil() as i32).min(self.height() as i32);
        let x0 = (center.x - radius).floor().max(0.0) as i32;
        let x1 = ((center.x + radius).ceil() as i32).min(self.width() as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center) / radius;
                if d >= 1.0 {
                    continue;
                }
                let falloff = (1.0 - d) * (1.0 - d);
                let alpha = (peak_alpha as f32 * falloff) as u8;
                if alpha > 0 {
                    self.blend_pixel(x, y, rgba(color, alpha), BlendMode::Additive);
                }
            }
        }
    }

    /// Composite another (premultiplied) canvas with its top-left at (x, y)
    pub fn blit(&mut self, src: &Canvas, x: i32, y: i32, mode: BlendMode) {
        let dst_w = self.width() as i32;
        let dst_h = self.height() as i32;
        for sy in 0..src.height() as i32 {
            let dy = y + sy;
            if dy < 0 || dy >= dst_h {
                continue;
            }
            for sx in 0..src.width() as i32 {
                let dx = x + sx;
                if dx < 0 || dx >= dst_w {
                    continue;
                }
                let s = src.image.get_pixel(sx as u32, sy as u32).0;
                if s[3] == 0 && s[0] == 0 && s[1] == 0 && s[2] == 0 {
                    continue;
                }
                blend(self.image.get_pixel_mut(dx as u32, dy as u32), s, mode);
            }
        }
    }

    /// Smoothly rescaled copy (bilinear)
    pub fn scaled(&self, width: u32, height: u32) -> Canvas {
        Canvas {
            image: imageops::resize(&self.image, width, height, FilterType::Triangle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul255() {
        assert_eq!(mul255(255, 255), 255);
        assert_eq!(mul255(255, 0), 0);
        assert_eq!(mul255(128, 255), 128);
        assert_eq!(mul255(100, 128), 50);
    }

    #[test]
    fn test_over_on_opaque() {
        let mut canvas = Canvas::filled(4, 4, [0, 0, 0]);
        canvas.blend_pixel(1, 1, rgba([200, 100, 0], 128), BlendMode::Over);
        let px = canvas.pixel(1, 1);
        assert_eq!(px[3], 255);
        assert!((px[0] as i32 - 100).abs() <= 1);
        assert!((px[1] as i32 - 50).abs() <= 1);
    }

    #[test]
    fn test_additive_saturates() {
        let mut canvas = Canvas::filled(2, 2, [250, 10, 10]);
        canvas.blend_pixel(0, 0, rgba([100, 100, 100], 255), BlendMode::Additive);
        assert_eq!(canvas.pixel(0, 0), [255, 110, 110, 255]);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut canvas = Canvas::new(4, 4);
        canvas.blend_pixel(-1, 0, rgba([255, 255, 255], 255), BlendMode::Over);
        canvas.blend_pixel(0, 4, rgba([255, 255, 255], 255), BlendMode::Over);
        canvas.fill_circle(Vec2::new(-50.0, -50.0), 10.0, rgba([255, 0, 0], 255), BlendMode::Over);
        assert!(canvas.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_circle_coverage() {
        let mut canvas = Canvas::new(64, 64);
        canvas.fill_circle(Vec2::new(32.0, 32.0), 10.0, rgba([255, 0, 0], 255), BlendMode::Over);
        assert_eq!(canvas.pixel(32, 32), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(32, 23), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(32, 20)[3], 0);
        assert_eq!(canvas.pixel(44, 32)[3], 0);
        let covered = canvas.as_raw().chunks(4).filter(|p| p[3] > 0).count();
        let area = std::f32::consts::PI * 100.0;
        assert!((covered as f32 - area).abs() < area * 0.1, "covered {covered}");
    }

    #[test]
    fn test_ellipse_clipped_to_canvas() {
        let mut canvas = Canvas::new(100, 20);
        canvas.fill_ellipse(
            Vec2::new(50.0, 10.0),
            200.0,
            60.0,
            rgba([10, 20, 30], 255),
            BlendMode::Over,
        );
        assert!(canvas.as_raw().chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_rounded_rect_corners_are_open() {
        let mut canvas = Canvas::new(40, 40);
        canvas.fill_rounded_rect(0, 0, 40, 40, 10.0, rgba([255, 255, 255], 255), BlendMode::Over);
        assert_eq!(canvas.pixel(0, 0)[3], 0);
        assert_eq!(canvas.pixel(39, 39)[3], 0);
        assert_eq!(canvas.pixel(20, 0)[3], 255);
        assert_eq!(canvas.pixel(0, 20)[3], 255);
    }

    #[test]
    fn test_gradient_endpoints() {
        let canvas = Canvas::vertical_gradient(8, 100, [0, 0, 0], [200, 100, 50]);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 255]);
        let bottom = canvas.pixel(7, 99);
        assert!(bottom[0] >= 195 && bottom[3] == 255);
    }

    #[test]
    fn test_glow_peaks_at_center() {
        let mut canvas = Canvas::filled(100, 100, [0, 0, 0]);
        canvas.radial_glow(Vec2::new(50.0, 50.0), 40.0, [255, 255, 255], 60);
        let center = canvas.pixel(50, 50)[0];
        let mid = canvas.pixel(70, 50)[0];
        assert!(center > mid);
        assert_eq!(canvas.pixel(95, 50)[0], 0);
    }

    #[test]
    fn test_blit_premultiplied_over() {
        let mut layer = Canvas::new(2, 2);
        layer.blend_pixel(0, 0, rgba([255, 255, 255], 128), BlendMode::Over);
        let mut frame = Canvas::filled(4, 4, [0, 0, 0]);
        frame.blit(&layer, 1, 1, BlendMode::Over);
        let px = frame.pixel(1, 1);
        assert!((px[0] as i32 - 128).abs() <= 1);
        assert_eq!(frame.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(frame.pixel(2, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn test_scaled_softens_edges() {
        let mut small = Canvas::new(8, 8);
        small.fill_ellipse(Vec2::new(4.0, 4.0), 2.0, 2.0, rgba([255, 255, 255], 255), BlendMode::Over);
        let big = small.scaled(32, 32);
        assert_eq!(big.width(), 32);
        // Bilinear upscaling yields intermediate alpha values along the rim
        assert!(big.as_raw().chunks(4).any(|p| p[3] > 0 && p[3] < 255));
    }
}
