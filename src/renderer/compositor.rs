//! Layered frame compositing
//!
//! Layers, back to front:
//! sky -> clouds -> vortex body -> particles + glow -> debris -> ground/fog -> HUD.
//!
//! The sky and the ground strip never change during a session and are
//! rasterized once. The vortex body is drawn into a reduced-resolution
//! layer, smoothly upscaled, then composited, which gives a soft silhouette
//! without per-ring antialiasing.

use glam::Vec2;
use image::Rgba;

use super::canvas::{BlendMode, Canvas, rgba};
use super::text::{FontSize, TextRenderer};
use crate::consts::*;
use crate::settings::QualityPreset;
use crate::sim::{DebrisSystem, EfLevel, LevelParams, ParticleField, SimulationState, radius_at};
use crate::{Rgb, lerp_rgb};

pub const SKY_TOP: Rgb = [16, 24, 48];
pub const SKY_BOTTOM: Rgb = [90, 140, 200];
pub const GROUND_TOP: Rgb = [40, 80, 30];
pub const GROUND_BOTTOM: Rgb = [12, 40, 18];
const FOG_COLOR: Rgb = [120, 140, 130];
const FOG_MAX_ALPHA: f32 = 120.0;

const CLOUD_COUNT: usize = 8;

const BODY_RINGS: usize = 40;
const BODY_RING_HALF_HEIGHT: f32 = 30.0;
const BODY_MAX_ALPHA: f32 = 100.0;

const PARTICLE_BASE_TONE: Rgb = [60, 60, 70];
const HAZE_COLOR: Rgb = [100, 120, 130];

const DEBRIS_COLOR: Rgb = [200, 180, 120];

const PANEL_COLOR: Rgb = [10, 12, 18];
const PANEL_ALPHA: u8 = 140;
const TITLE_COLOR: Rgb = [230, 240, 255];
const STATS_COLOR: Rgb = [200, 210, 220];
const HINT_COLOR: Rgb = [180, 190, 200];

/// Ellipse for cloud band `index` at time `t`: (centre, rx, ry, colour)
pub fn cloud_band(index: usize, t: f32) -> (Vec2, f32, f32, Rgba<u8>) {
    let i = index as f32;
    let phase = t * (0.2 + i * 0.03);
    let offset = phase.sin() * 40.0;
    let top = 80.0 + i * 18.0 + (phase * 0.7).cos() * 12.0;
    let width = CANVAS_WIDTH as f32 + 320.0;
    let height = 120.0;
    let center = Vec2::new(offset - 160.0 + width / 2.0, top + height / 2.0);
    let n = index as u8;
    let color = Rgba([200 + n * 3, 210 + n * 4, 220 + n * 5, 30 + n * 8]);
    (center, width / 2.0, height / 2.0, color)
}

/// Opacity of a body ring at height fraction `t`
pub fn ring_alpha(t: f32) -> u8 {
    (BODY_MAX_ALPHA * (1.0 - t).max(0.0).powf(1.8)) as u8
}

/// Debris opacity: fades with age but never below 40
pub fn debris_alpha(lifetime: f32) -> u8 {
    ((255.0 * (lifetime + 0.3).min(1.0)) as i32).max(40) as u8
}

/// Debris radius: shrinks as lifetime runs out, never below 2
pub fn debris_size(lifetime: f32) -> f32 {
    (4.0 - lifetime * 2.0).max(2.0)
}

/// The three HUD lines for a level
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub title: String,
    pub stats: String,
    pub hint: &'static str,
}

pub fn hud_text(level: EfLevel) -> HudText {
    let params = level.params();
    HudText {
        title: format!("{} Tornado", level.name()),
        stats: format!(
            "Swirl {:.1}x   Lift {:.0}u/s   Debris {}%",
            params.swirl_rate,
            params.lift_rate,
            (params.debris_probability * 100.0).round() as u32
        ),
        hint: "Press SPACE or 0-5 to change EF level",
    }
}

/// Produces frames from simulation state
pub struct Compositor {
    sky: Canvas,
    /// Ground gradient with the fog already laid over it
    ground: Canvas,
    body: Canvas,
    body_scale: f32,
    frame: Canvas,
    show_hud: bool,
}

impl Compositor {
    pub fn new(quality: QualityPreset) -> Self {
        let ground_height = CANVAS_HEIGHT - GROUND_Y as u32;
        let mut ground =
            Canvas::vertical_gradient(CANVAS_WIDTH, ground_height, GROUND_TOP, GROUND_BOTTOM);
        let mut fog = Canvas::new(CANVAS_WIDTH, ground_height);
        for y in 0..ground_height {
            let alpha = (FOG_MAX_ALPHA * (1.0 - y as f32 / ground_height as f32)) as u8;
            fog.fill_row(y, rgba(FOG_COLOR, alpha), BlendMode::Over);
        }
        ground.blit(&fog, 0, 0, BlendMode::Over);

        let body_scale = quality.body_layer_scale();
        let body_w = ((CANVAS_WIDTH as f32 * body_scale).round() as u32).max(1);
        let body_h = ((CANVAS_HEIGHT as f32 * body_scale).round() as u32).max(1);

        log::debug!(
            "Compositor: {}x{} canvas, body layer {}x{}",
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
            body_w,
            body_h
        );

        Self {
            sky: Canvas::vertical_gradient(CANVAS_WIDTH, CANVAS_HEIGHT, SKY_TOP, SKY_BOTTOM),
            ground,
            body: Canvas::new(body_w, body_h),
            body_scale,
            frame: Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            show_hud: true,
        }
    }

    pub fn set_show_hud(&mut self, show: bool) {
        self.show_hud = show;
    }

    /// Last rendered frame
    pub fn frame(&self) -> &Canvas {
        &self.frame
    }

    /// Compose one frame. Text is skipped when no renderer is supplied.
    pub fn render(&mut self, state: &SimulationState, text: Option<&mut TextRenderer>) -> &Canvas {
        let level = state.level_params();

        self.frame.copy_from(&self.sky);
        self.draw_clouds(state.elapsed as f32);
        self.draw_body(level);
        self.draw_particles(&state.particles, level);
        self.draw_debris(&state.debris);
        self.draw_ground();
        if self.show_hud {
            self.draw_overlay(state.level, text);
        }

        &self.frame
    }

    fn draw_clouds(&mut self, t: f32) {
        for i in 0..CLOUD_COUNT {
            let (center, rx, ry, color) = cloud_band(i, t);
            self.frame.fill_ellipse(center, rx, ry, color, BlendMode::Over);
        }
    }

    /// Composited premultiplied source-over rather than summed, so the body
    /// reads dimmer than a purely additive blend would.
    fn draw_body(&mut self, level: &LevelParams) {
        let s = self.body_scale;
        self.body.clear();
        for ring in 0..BODY_RINGS {
            let t = ring as f32 / BODY_RINGS as f32;
            // Seed falls with height so the upper rings pinch in harder
            let radius = radius_at(1.0 - t * 0.85, level.base_radius, t);
            let y = GROUND_Y - t * MAX_TORNADO_HEIGHT;
            self.body.fill_ellipse(
                Vec2::new(CENTER_X * s, y * s),
                radius * s,
                BODY_RING_HALF_HEIGHT * s,
                rgba(level.tint, ring_alpha(t)),
                BlendMode::Over,
            );
        }

        if self.body.width() == CANVAS_WIDTH && self.body.height() == CANVAS_HEIGHT {
            self.frame.blit(&self.body, 0, 0, BlendMode::Over);
        } else {
            let upscaled = self.body.scaled(CANVAS_WIDTH, CANVAS_HEIGHT);
            self.frame.blit(&upscaled, 0, 0, BlendMode::Over);
        }
    }

    fn draw_particles(&mut self, particles: &ParticleField, level: &LevelParams) {
        for particle in particles.particles() {
            let projection = particle.project(level.base_radius);
            let alpha = (220.0 * particle.brightness) as u8;
            let tone = lerp_rgb(PARTICLE_BASE_TONE, level.tint, particle.brightness);
            self.frame.fill_circle(
                projection.pos,
                projection.size as f32,
                rgba(tone, alpha),
                BlendMode::Over,
            );
        }

        self.frame.radial_glow(
            Vec2::new(CENTER_X, GROUND_Y - MAX_TORNADO_HEIGHT / 2.0),
            220.0,
            level.tint,
            55,
        );
        self.frame
            .radial_glow(Vec2::new(CENTER_X, GROUND_Y), 260.0, HAZE_COLOR, 60);
    }

    fn draw_debris(&mut self, debris: &DebrisSystem) {
        for d in debris.iter() {
            self.frame.fill_circle(
                d.pos,
                debris_size(d.lifetime),
                rgba(DEBRIS_COLOR, debris_alpha(d.lifetime)),
                BlendMode::Over,
            );
        }
    }

    fn draw_ground(&mut self) {
        self.frame.blit(&self.ground, 0, GROUND_Y as i32, BlendMode::Over);
    }

    fn draw_overlay(&mut self, level: EfLevel, text: Option<&mut TextRenderer>) {
        self.frame.fill_rounded_rect(
            20,
            20,
            320,
            150,
            14.0,
            rgba(PANEL_COLOR, PANEL_ALPHA),
            BlendMode::Over,
        );

        let Some(text) = text else {
            return;
        };
        let hud = hud_text(level);
        text.draw(&mut self.frame, &hud.title, 40.0, 40.0, FontSize::Large, TITLE_COLOR);
        text.draw(&mut self.frame, &hud.stats, 40.0, 90.0, FontSize::Small, STATS_COLOR);
        text.draw(&mut self.frame, hud.hint, 40.0, 130.0, FontSize::Small, HINT_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Debris, tick};

    fn rendered(level: EfLevel) -> (Compositor, SimulationState) {
        let mut state = SimulationState::with_level(4242, level);
        for _ in 0..30 {
            tick(&mut state, 1.0 / 60.0);
        }
        let mut compositor = Compositor::new(QualityPreset::Medium);
        compositor.render(&state, None);
        (compositor, state)
    }

    #[test]
    fn test_frame_is_opaque_and_full_size() {
        let (compositor, _) = rendered(EfLevel::Ef3);
        let frame = compositor.frame();
        assert_eq!(frame.width(), CANVAS_WIDTH);
        assert_eq!(frame.height(), CANVAS_HEIGHT);
        assert!(frame.as_raw().chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_sky_corner_untouched() {
        let (compositor, _) = rendered(EfLevel::Ef2);
        assert_eq!(compositor.frame().pixel(0, 0), [16, 24, 48, 255]);
    }

    #[test]
    fn test_ground_strip_at_bottom() {
        let (compositor, _) = rendered(EfLevel::Ef2);
        // Bottom-left corner: ground gradient end with almost no fog
        let px = compositor.frame().pixel(0, CANVAS_HEIGHT - 1);
        assert!((px[0] as i32 - GROUND_BOTTOM[0] as i32).abs() <= 4);
        assert!((px[1] as i32 - GROUND_BOTTOM[1] as i32).abs() <= 4);
        assert!((px[2] as i32 - GROUND_BOTTOM[2] as i32).abs() <= 4);
    }

    #[test]
    fn test_hud_panel_darkens_frame() {
        let state = SimulationState::new(1);
        let mut plain = Compositor::new(QualityPreset::Low);
        plain.set_show_hud(false);
        plain.render(&state, None);
        let mut hud = Compositor::new(QualityPreset::Low);
        hud.render(&state, None);

        let without = plain.frame().pixel(30, 165);
        let with = hud.frame().pixel(30, 165);
        assert!(with[0] < without[0] && with[2] < without[2]);
        // Outside the panel the two frames agree
        assert_eq!(plain.frame().pixel(600, 40), hud.frame().pixel(600, 40));
    }

    #[test]
    fn test_hud_text_lands_inside_panel() {
        use crate::platform::fonts::{FONT_CANDIDATES, find_font, load_font};

        let Ok(path) = find_font(FONT_CANDIDATES) else {
            return;
        };
        let mut text = load_font(&path).expect("system font parses");
        let state = SimulationState::new(1);

        let mut bare = Compositor::new(QualityPreset::Low);
        bare.render(&state, None);
        let mut labelled = Compositor::new(QualityPreset::Low);
        labelled.render(&state, Some(&mut text));

        // Title, stats and hint rows each pick up glyph pixels
        for (top, bottom) in [(40, 86), (90, 120), (130, 160)] {
            let changed = (top..bottom).any(|y| {
                (40..340).any(|x| bare.frame().pixel(x, y) != labelled.frame().pixel(x, y))
            });
            assert!(changed, "no text in rows {top}..{bottom}");
        }
        // Nothing is drawn outside the panel
        for y in [10, 180, 400] {
            for x in [10, 360, 700] {
                assert_eq!(bare.frame().pixel(x, y), labelled.frame().pixel(x, y));
            }
        }
    }

    #[test]
    fn test_top_left_is_plain_sky_without_hud() {
        let state = SimulationState::new(1);
        let mut compositor = Compositor::new(QualityPreset::Low);
        compositor.set_show_hud(false);
        compositor.render(&state, None);
        assert_eq!(compositor.frame().pixel(25, 25), compositor.sky.pixel(25, 25));
    }

    #[test]
    fn test_body_width_follows_level() {
        let probe = (680, 592);
        for (level, expect_body) in [(EfLevel::Ef0, false), (EfLevel::Ef5, true)] {
            let mut compositor = Compositor::new(QualityPreset::Medium);
            compositor.frame.copy_from(&compositor.sky.clone());
            compositor.draw_body(level.params());
            let px = compositor.frame().pixel(probe.0, probe.1);
            let sky = compositor.sky.pixel(probe.0, probe.1);
            assert_eq!(px != sky, expect_body, "{level}");
        }
    }

    #[test]
    fn test_full_resolution_body_matches_layer() {
        let mut compositor = Compositor::new(QualityPreset::High);
        assert_eq!(compositor.body.width(), CANVAS_WIDTH);
        compositor.frame.copy_from(&compositor.sky.clone());
        compositor.draw_body(EfLevel::Ef2.params());
        // Base of the funnel picks up the tint
        let base = compositor.frame().pixel(CENTER_X as u32, GROUND_Y as u32 - 2);
        let sky = compositor.sky.pixel(CENTER_X as u32, GROUND_Y as u32 - 2);
        assert!(base[0] > sky[0]);
    }

    #[test]
    fn test_debris_drawn_over_sky() {
        let mut state = SimulationState::new(3);
        state.debris.push(Debris {
            pos: Vec2::new(100.0, 400.0),
            vel: Vec2::ZERO,
            lifetime: 1.0,
        });
        let mut compositor = Compositor::new(QualityPreset::Low);
        compositor.frame.copy_from(&compositor.sky.clone());
        compositor.draw_debris(&state.debris);
        assert_eq!(compositor.frame().pixel(100, 400), [200, 180, 120, 255]);
    }

    #[test]
    fn test_ring_alpha_falls_with_height() {
        assert_eq!(ring_alpha(0.0), 100);
        assert_eq!(ring_alpha(1.0), 0);
        let mut last = u8::MAX;
        for i in 0..BODY_RINGS {
            let a = ring_alpha(i as f32 / BODY_RINGS as f32);
            assert!(a <= last);
            last = a;
        }
    }

    #[test]
    fn test_debris_fade_and_shrink() {
        assert_eq!(debris_alpha(1.4), 255);
        assert_eq!(debris_alpha(0.7), 255);
        assert_eq!(debris_alpha(0.2), 127);
        assert_eq!(debris_alpha(-0.5), 40);
        assert_eq!(debris_size(1.4), 2.0);
        assert_eq!(debris_size(0.5), 3.0);
        assert_eq!(debris_size(0.0), 4.0);
    }

    #[test]
    fn test_clouds_drift_over_time() {
        for i in 0..CLOUD_COUNT {
            let (a, rx, ry, color) = cloud_band(i, 0.0);
            let (b, _, _, _) = cloud_band(i, 5.0);
            assert_ne!(a, b);
            assert_eq!((rx, ry), (640.0, 60.0));
            assert_eq!(color.0[3], 30 + 8 * i as u8);
        }
        // Deeper bands are more opaque
        assert!(cloud_band(7, 0.0).3.0[3] > cloud_band(0, 0.0).3.0[3]);
    }

    #[test]
    fn test_hud_text() {
        let hud = hud_text(EfLevel::Ef2);
        assert_eq!(hud.title, "EF2 Tornado");
        assert_eq!(hud.stats, "Swirl 2.2x   Lift 200u/s   Debris 26%");
        let hud = hud_text(EfLevel::Ef3);
        assert_eq!(hud.stats, "Swirl 2.9x   Lift 240u/s   Debris 35%");
        assert_eq!(hud.hint, "Press SPACE or 0-5 to change EF level");
    }
}
