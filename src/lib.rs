//! Kodama - procedural tree growth and mesh generation for a tree-raising game

pub mod core;
pub mod growth;
pub mod tree;
