//! Coherent noise used for chaos deformation and flower sway.

use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Spatial frequency of the melt displacement (per world unit).
const MELT_FREQUENCY: f64 = 0.015;
/// How fast the melt pattern evolves (per second).
const MELT_TIME_SCALE: f64 = 0.6;
/// How fast spirit flowers sway (per second).
const SWAY_TIME_SCALE: f64 = 0.8;

/// Perlin noise seeded from the tree seed.
///
/// All samples are pure functions of position and elapsed time, so two
/// rebuilds at the same time produce the same geometry.
pub struct ChaosNoise {
    perlin: Perlin,
}

impl ChaosNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// 3D displacement in `[-1, 1]^3` at a world position and time.
    pub fn displacement(&self, p: Vec3, elapsed: f32) -> Vec3 {
        let x = p.x as f64 * MELT_FREQUENCY;
        let y = p.y as f64 * MELT_FREQUENCY;
        let z = p.z as f64 * MELT_FREQUENCY;
        let t = elapsed as f64 * MELT_TIME_SCALE;

        // Decorrelate the three axes by sampling offset regions of the field
        Vec3::new(
            self.perlin.get([x + t, y, z]) as f32,
            self.perlin.get([x + 31.4, y + t, z - 17.3]) as f32,
            self.perlin.get([x - 47.1, y + 12.9, z + t]) as f32,
        )
        .clamp(Vec3::NEG_ONE, Vec3::ONE)
    }

    /// Slow 1D flicker in `[-1, 1]` used for sway. `channel` selects an
    /// independent lane.
    pub fn sway(&self, elapsed: f32, channel: u32) -> f32 {
        let t = elapsed as f64 * SWAY_TIME_SCALE;
        (self.perlin.get([t, channel as f64 * 19.7 + 0.5]) as f32).clamp(-1.0, 1.0)
    }
}
