//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Bytes between consecutive vertices in an uploaded buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` within a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GREEN_BASKET: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const RED_BASKET: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const CANNON: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const CATCH_LINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const SEGMENT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const RED_BLOCK: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BLACK_BLOCK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const GREEN_BLOCK: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const PROJECTILE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const MIRROR: [f32; 4] = [0.52, 0.8, 0.98, 1.0]; // Sky blue
}
