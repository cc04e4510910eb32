//! Append-only triangle mesh rebuilt wholesale on every structural change.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::core::Rgba;

/// GPU-ready vertex (40 bytes): position, normal, RGBA color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    #[inline]
    pub fn new(position: Vec3, normal: Vec3, color: Rgba) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry, keeping the allocations for the next rebuild.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Append a vertex and return its index.
    #[inline]
    pub fn add_vertex(&mut self, position: Vec3, normal: Vec3, color: Rgba) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex::new(position, normal, color));
        index
    }

    #[inline]
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Two triangles `(a, b, c)` and `(a, c, d)`.
    #[inline]
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw vertex bytes for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Axis-aligned bounds of all vertices, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from(self.vertices.first()?.position);
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            let p = Vec3::from(v.position);
            (min.min(p), max.max(p))
        }))
    }
}
