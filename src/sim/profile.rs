//! Vortex radius profile
//!
//! Maps (seed, base radius, normalized height) to a horizontal radius. Shared
//! by particle projection and body rendering, so it must stay pure.

/// Horizontal radius at `height_ratio` (0 = ground, 1 = apex).
///
/// The narrowing exponent depends on `seed`: low seeds get a sharper neck,
/// so particles and rings with different seeds taper at different rates.
/// Out-of-range heights are clamped into [0, 1].
#[inline]
pub fn radius_at(seed: f32, base_radius: f32, height_ratio: f32) -> f32 {
    let h = height_ratio.clamp(0.0, 1.0);
    let neck_ratio = 0.05 + 0.35 * (1.0 - seed);
    let width = base_radius * (1.0 - h).powf(0.4 + neck_ratio);
    width * (0.6 + 0.4 * seed)
}
