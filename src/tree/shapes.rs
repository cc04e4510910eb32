//! Geometry generators for stems, leaves and flowers.
//!
//! Every generator builds its shape in the local frame of a branch (growth
//! along +Y) and writes world-space vertices through the given transform.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use super::mesh::Mesh;
use super::noise::ChaosNoise;
use crate::core::Rgba;
use crate::growth::FlowerType;

/// Rings along each stem (base ring plus three bands).
pub const STEM_RINGS: u32 = 4;
/// Radial facets for stems near the trunk.
pub const STEM_SEGMENTS_NEAR: u32 = 5;
/// Radial facets for stems near the tips.
pub const STEM_SEGMENTS_FAR: u32 = 3;

/// Vertex color of spirit flowers.
pub const SPIRIT_COLOR: Rgba = [0.75, 0.88, 1.0, 0.55];

/// Facet count for a stem with `depth_remaining` generations above it.
#[inline]
pub fn stem_segments(depth_remaining: i32) -> u32 {
    if depth_remaining < 2 {
        STEM_SEGMENTS_FAR
    } else {
        STEM_SEGMENTS_NEAR
    }
}

/// Tapered, optionally twisted cylindrical shell.
#[derive(Clone, Copy, Debug)]
pub struct Stem {
    /// Base radius
    pub r1: f32,
    /// Tip radius
    pub r2: f32,
    pub height: f32,
    pub segments: u32,
    /// Total ring rotation from base to tip (radians)
    pub twist: f32,
    pub color: Rgba,
}

/// Chaos deformation applied to stem rings above the base.
pub struct Melt<'a> {
    pub noise: &'a ChaosNoise,
    /// Maximum displacement in world units
    pub amount: f32,
    pub elapsed: f32,
}

/// Append a stem. Each band between two rings yields `segments` quads.
pub fn add_stem(mesh: &mut Mesh, transform: &Mat4, stem: &Stem, melt: Option<&Melt>) {
    let segments = stem.segments.max(3);
    let slope = if stem.height > 0.0 {
        (stem.r1 - stem.r2) / stem.height
    } else {
        0.0
    };

    let first = mesh.vertex_count() as u32;
    for ring in 0..STEM_RINGS {
        let f = ring as f32 / (STEM_RINGS - 1) as f32;
        let y = stem.height * f;
        let radius = stem.r1 + (stem.r2 - stem.r1) * f;
        let ring_twist = stem.twist * f;

        for j in 0..segments {
            let theta = j as f32 / segments as f32 * TAU + ring_twist;
            let (sin, cos) = theta.sin_cos();

            let local = Vec3::new(radius * cos, y, radius * sin);
            let mut position = transform.transform_point3(local);
            if ring > 0 {
                if let Some(melt) = melt {
                    position += melt.noise.displacement(position, melt.elapsed) * melt.amount * f;
                }
            }

            let normal = transform
                .transform_vector3(Vec3::new(cos, slope, sin))
                .normalize_or_zero();
            mesh.add_vertex(position, normal, stem.color);
        }
    }

    for ring in 0..STEM_RINGS - 1 {
        let lower = first + ring * segments;
        let upper = lower + segments;
        for j in 0..segments {
            let next = (j + 1) % segments;
            // Counter-clockwise seen from outside the shell
            mesh.add_quad(lower + j, upper + j, upper + next, lower + next);
        }
    }
}

/// Append a diamond-shaped leaf billboard facing local +Z.
pub fn add_leaf(mesh: &mut Mesh, transform: &Mat4, size: f32, color: Rgba) {
    let normal = transform.transform_vector3(Vec3::Z).normalize_or_zero();
    let half = size * 0.5;
    let corners = [
        Vec3::ZERO,
        Vec3::new(half, half, 0.0),
        Vec3::new(0.0, size, 0.0),
        Vec3::new(-half, half, 0.0),
    ];
    let [a, b, c, d] = corners.map(|p| mesh.add_vertex(transform.transform_point3(p), normal, color));
    mesh.add_quad(a, b, c, d);
}

/// Shared inputs for flower generators.
pub struct Bloom<'a> {
    pub size: f32,
    pub color: Rgba,
    pub noise: &'a ChaosNoise,
    pub elapsed: f32,
}

/// Append the flower for `flower_type`. `FlowerType::None` (bloomed before a
/// variant was chosen) uses the petal shape.
pub fn add_flower(mesh: &mut Mesh, transform: &Mat4, flower_type: FlowerType, bloom: &Bloom) {
    match flower_type {
        FlowerType::Crystal => add_crystal(mesh, transform, bloom.size, bloom.color),
        FlowerType::Petal | FlowerType::None => add_petals(mesh, transform, bloom.size, bloom.color),
        FlowerType::Spirit => add_spirit(mesh, transform, bloom.size, bloom.noise, bloom.elapsed),
    }
}

/// Six-point faceted fan around a raised center.
fn add_crystal(mesh: &mut Mesh, transform: &Mat4, size: f32, color: Rgba) {
    const POINTS: u32 = 6;
    let up = transform.transform_vector3(Vec3::Y).normalize_or_zero();
    let center = mesh.add_vertex(
        transform.transform_point3(Vec3::new(0.0, size * 0.3, 0.0)),
        up,
        color,
    );

    let rim: Vec<u32> = (0..POINTS)
        .map(|i| {
            let angle = i as f32 / POINTS as f32 * TAU;
            // Alternate tall and short spikes for the faceted look
            let lift = if i % 2 == 0 { 0.6 } else { 0.15 };
            let local = Vec3::new(size * angle.cos(), size * lift, size * angle.sin());
            let normal = transform
                .transform_vector3(Vec3::new(angle.cos(), 1.0, angle.sin()))
                .normalize_or_zero();
            mesh.add_vertex(transform.transform_point3(local), normal, color)
        })
        .collect();

    for i in 0..POINTS as usize {
        let next = (i + 1) % POINTS as usize;
        mesh.add_triangle(center, rim[next], rim[i]);
    }
}

/// Five independent petals at 72 degree spacing.
fn add_petals(mesh: &mut Mesh, transform: &Mat4, size: f32, color: Rgba) {
    const PETALS: u32 = 5;
    const HALF_WIDTH: f32 = 0.3;
    let up = transform.transform_vector3(Vec3::Y).normalize_or_zero();

    for i in 0..PETALS {
        let angle = i as f32 / PETALS as f32 * TAU;
        let inner = Vec3::new(size * 0.1 * angle.cos(), 0.0, size * 0.1 * angle.sin());
        let left = Vec3::new(
            size * (angle - HALF_WIDTH).cos(),
            size * 0.3,
            size * (angle - HALF_WIDTH).sin(),
        );
        let right = Vec3::new(
            size * (angle + HALF_WIDTH).cos(),
            size * 0.3,
            size * (angle + HALF_WIDTH).sin(),
        );
        let a = mesh.add_vertex(transform.transform_point3(inner), up, color);
        let b = mesh.add_vertex(transform.transform_point3(left), up, color);
        let c = mesh.add_vertex(transform.transform_point3(right), up, color);
        mesh.add_triangle(a, c, b);
    }
}

/// Translucent tetrahedron whose apex sways with time.
fn add_spirit(mesh: &mut Mesh, transform: &Mat4, size: f32, noise: &ChaosNoise, elapsed: f32) {
    let sway_x = noise.sway(elapsed, 0) * size * 0.5;
    let sway_z = noise.sway(elapsed, 1) * size * 0.5;
    let apex_local = Vec3::new(sway_x, size * 1.5, sway_z);

    let base_local: [Vec3; 3] = [0.0_f32, 1.0, 2.0].map(|k| {
        let angle = k / 3.0 * TAU;
        Vec3::new(size * 0.6 * angle.cos(), 0.0, size * 0.6 * angle.sin())
    });

    let centroid = (base_local[0] + base_local[1] + base_local[2] + apex_local) / 4.0;
    let mut add = |local: Vec3| {
        let normal = transform
            .transform_vector3(local - centroid)
            .normalize_or_zero();
        mesh.add_vertex(transform.transform_point3(local), normal, SPIRIT_COLOR)
    };
    let b0 = add(base_local[0]);
    let b1 = add(base_local[1]);
    let b2 = add(base_local[2]);
    let apex = add(apex_local);

    mesh.add_triangle(b0, b1, b2);
    mesh.add_triangle(b0, apex, b1);
    mesh.add_triangle(b1, apex, b2);
    mesh.add_triangle(b2, apex, b0);
}
