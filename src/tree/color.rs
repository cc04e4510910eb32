//! Bark palette: HSB conversion and the animated hue gradient.
//!
//! Hues live on a 0-255 wheel so that configuration offsets such as
//! `trunk_hue_end + 100` wrap naturally.

use crate::core::Rgba;
use crate::growth::GrowthType;

/// Hue shift added per recursion depth.
pub const HUE_PER_DEPTH: f32 = 6.0;

/// Hue animation speed-up for the chaotic variant.
pub const CHAOTIC_HUE_SPEED_MULT: f32 = 8.0;

/// Hue drift speed for a growth type. Eldritch bark cycles much faster.
#[inline]
pub fn hue_drift_speed(base_speed: f32, growth_type: GrowthType) -> f32 {
    match growth_type {
        GrowthType::Eldritch => base_speed * CHAOTIC_HUE_SPEED_MULT,
        _ => base_speed,
    }
}

/// Convert hue/saturation/brightness (each `0..=255`, hue wraps) to RGBA.
pub fn hsb_to_rgba(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Rgba {
    let h = hue.rem_euclid(255.0) / 255.0 * 6.0;
    let s = (saturation / 255.0).clamp(0.0, 1.0);
    let v = (brightness / 255.0).clamp(0.0, 1.0);

    if s <= 0.0 {
        return [v, v, v, alpha];
    }

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [r, g, b, alpha]
}

/// Bark hue for a segment: linear map from the start to the end hue by
/// mutation, drifting with time and offset per depth. Wrapped to `[0, 255)`.
pub fn bark_hue(
    hue_start: f32,
    hue_end: f32,
    mutation: f32,
    depth: i32,
    elapsed: f32,
    drift_speed: f32,
) -> f32 {
    let base = hue_start + (hue_end - hue_start) * mutation.clamp(0.0, 1.0);
    (base + elapsed * drift_speed + depth as f32 * HUE_PER_DEPTH).rem_euclid(255.0)
}

/// Bark color: saturation rises with chaos, brightness rises toward the tips.
pub fn bark_color(hue: f32, mutation: f32, depth: i32, max_depth: u32) -> Rgba {
    let saturation = 150.0 + 100.0 * mutation.clamp(0.0, 1.0);
    let tip_ratio = if max_depth == 0 {
        1.0
    } else {
        1.0 - (depth.max(0) as f32 / max_depth as f32).min(1.0)
    };
    let brightness = 120.0 + 100.0 * tip_ratio;
    hsb_to_rgba(hue, saturation, brightness, 1.0)
}
