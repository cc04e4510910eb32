//! Recursive branch walk that turns growth values into stem, leaf and
//! flower geometry.
//!
//! The walk is depth-first and pre-order from the identity transform. Each
//! node emits its stem, then decorates the tip and recurses into 2 or 3
//! children spread radially around the parent axis. The jitter RNG is
//! re-seeded from the tree seed on every build, so the same inputs always
//! produce the same mesh.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::color::{bark_color, bark_hue};
use super::config::TreeSettings;
use super::mesh::Mesh;
use super::noise::ChaosNoise;
use super::shapes::{self, Bloom, Melt, Stem};
use crate::core::rgba_from_u8;
use crate::growth::FlowerType;

/// Bloom threshold with no catalyst upgrades.
pub const BLOOM_BASE_THRESHOLD: f32 = 0.4;
/// Bloom threshold reduction per catalyst level.
pub const BLOOM_STEP: f32 = 0.05;
/// Highest catalyst level that still lowers the threshold.
pub const MAX_CATALYST_LEVEL: u32 = 5;

/// Collapse threshold with no chaos resistance.
pub const COLLAPSE_BASE_THRESHOLD: f32 = 0.9;
/// Collapse threshold increase per resistance level.
pub const COLLAPSE_STEP: f32 = 0.02;
/// Displacement at full collapse, in world units.
pub const MAX_MELT: f32 = 135.0;

/// Maximum random spread jitter at full mutation (degrees).
pub const JITTER_DEGREES: f32 = 10.0;
/// Segments this close to the tips carry leaves.
pub const LEAF_DEPTH: i32 = 1;

/// Mutation high-water mark above which flowers unlock.
#[inline]
pub fn bloom_threshold(catalyst_level: u32) -> f32 {
    BLOOM_BASE_THRESHOLD - BLOOM_STEP * catalyst_level.min(MAX_CATALYST_LEVEL) as f32
}

/// Mutation high-water mark above which the geometry starts melting.
#[inline]
pub fn collapse_threshold(resist_level: u32) -> f32 {
    COLLAPSE_BASE_THRESHOLD + COLLAPSE_STEP * resist_level as f32
}

/// Melt strength in `[0, 1]`: zero at the threshold, one at full chaos.
pub fn collapse_amount(max_mutation: f32, threshold: f32) -> f32 {
    let span = 1.0 - threshold;
    if span <= 0.0 || max_mutation <= threshold {
        return 0.0;
    }
    ((max_mutation - threshold) / span).clamp(0.0, 1.0)
}

/// One segment of the walk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchNode {
    pub length: f32,
    pub thickness: f32,
    /// Generations left above this segment; `0` is a terminal segment
    pub depth_remaining: i32,
    pub transform: Mat4,
}

impl BranchNode {
    /// Trunk segment at the origin.
    pub fn root(length: f32, thickness: f32, depth: i32) -> Self {
        Self {
            length,
            thickness,
            depth_remaining: depth,
            transform: Mat4::IDENTITY,
        }
    }

    /// Fewer forks near the tips, a denser crown toward the trunk.
    #[inline]
    pub fn child_count(&self) -> u32 {
        if self.depth_remaining < 2 { 2 } else { 3 }
    }

    /// Transform at the far end of this segment.
    #[inline]
    pub fn tip(&self) -> Mat4 {
        self.transform * Mat4::from_translation(Vec3::new(0.0, self.length, 0.0))
    }
}

/// Everything a rebuild reads besides the growth values on the root node.
#[derive(Clone, Debug)]
pub struct BuildParams<'a> {
    pub settings: &'a TreeSettings,
    /// Smoothed mutation in `[0, 1]`; drives spread, jitter and saturation
    pub mutation: f32,
    /// Mutation high-water mark; drives the bark hue gradient
    pub max_mutation: f32,
    /// Melt strength in `[0, 1]`; zero disables deformation
    pub collapse: f32,
    /// Flowers unlocked by the mutation high-water mark
    pub bloomed: bool,
    pub flower_type: FlowerType,
    /// Hue drift in hue units per second
    pub hue_speed: f32,
    /// Seconds since start, drives hue drift, melt and sway
    pub elapsed: f32,
    pub seed: u64,
}

impl BuildParams<'_> {
    /// Terminal segments carry a flower.
    #[inline]
    fn shows_flowers(&self) -> bool {
        self.bloomed || self.flower_type != FlowerType::None
    }
}

/// Counts of emitted parts, for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub stems: u32,
    pub leaves: u32,
    pub flowers: u32,
}

/// Single-use walker holding the per-build RNG and noise field.
pub struct BranchBuilder<'a> {
    params: BuildParams<'a>,
    rng: StdRng,
    noise: ChaosNoise,
    stats: BuildStats,
}

impl<'a> BranchBuilder<'a> {
    pub fn new(params: BuildParams<'a>) -> Self {
        let rng = StdRng::seed_from_u64(params.seed);
        let noise = ChaosNoise::new(params.seed as u32);
        Self {
            params,
            rng,
            noise,
            stats: BuildStats::default(),
        }
    }

    /// Walk the whole tree from `root`, appending into `mesh`.
    pub fn build(mut self, root: BranchNode, mesh: &mut Mesh) -> BuildStats {
        self.build_branch(&root, mesh);
        self.stats
    }

    fn build_branch(&mut self, node: &BranchNode, mesh: &mut Mesh) {
        if node.depth_remaining < 0 {
            return;
        }

        self.emit_stem(node, mesh);
        let tip = node.tip();
        self.decorate(node, &tip, mesh);

        let settings = self.params.settings;
        let mutation = self.params.mutation;
        let spread_base = settings.base_angle + settings.mutation_angle_max * mutation;

        let count = node.child_count();
        for i in 0..count {
            // Always draw, so the jitter sequence does not depend on mutation
            let jitter = self.rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES) * mutation;
            let spin = i as f32 * TAU / count as f32;
            let spread = (spread_base + jitter).to_radians();

            let child = BranchNode {
                length: node.length * settings.branch_len_ratio,
                thickness: node.thickness * settings.branch_thick_ratio,
                depth_remaining: node.depth_remaining - 1,
                transform: tip * Mat4::from_rotation_y(spin) * Mat4::from_rotation_z(spread),
            };
            self.build_branch(&child, mesh);
        }
    }

    fn emit_stem(&mut self, node: &BranchNode, mesh: &mut Mesh) {
        let p = &self.params;
        let settings = p.settings;

        let hue = bark_hue(
            settings.trunk_hue_start,
            settings.trunk_hue_end,
            p.max_mutation,
            node.depth_remaining,
            p.elapsed,
            p.hue_speed,
        );
        let stem = Stem {
            r1: node.thickness,
            r2: node.thickness * settings.branch_thick_ratio,
            height: node.length,
            segments: shapes::stem_segments(node.depth_remaining),
            twist: settings.twist_factor.to_radians(),
            color: bark_color(hue, p.mutation, node.depth_remaining, settings.max_depth),
        };

        let melt = (p.collapse > 0.0).then(|| Melt {
            noise: &self.noise,
            amount: MAX_MELT * p.collapse,
            elapsed: p.elapsed,
        });
        shapes::add_stem(mesh, &node.transform, &stem, melt.as_ref());
        self.stats.stems += 1;
    }

    fn decorate(&mut self, node: &BranchNode, tip: &Mat4, mesh: &mut Mesh) {
        let p = &self.params;
        if node.depth_remaining == 0 && p.shows_flowers() {
            let bloom = Bloom {
                size: (node.thickness * 3.0).max(6.0),
                color: rgba_from_u8(p.settings.flower_color),
                noise: &self.noise,
                elapsed: p.elapsed,
            };
            shapes::add_flower(mesh, tip, p.flower_type, &bloom);
            self.stats.flowers += 1;
        } else if node.depth_remaining <= LEAF_DEPTH {
            let size = (node.thickness * 3.0).max(4.0);
            shapes::add_leaf(mesh, tip, size, rgba_from_u8(p.settings.leaf_color));
            self.stats.leaves += 1;
        }
    }
}
