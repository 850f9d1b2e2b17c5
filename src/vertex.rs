use bytemuck_derive::{Pod, Zeroable};

use crate::render_vec::{GlType, VertexAttribute, VertexLayout};

/// A 2D position in normalized device coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Position2 {
    pub pos: [f32; 2],
}

impl Position2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { pos: [x, y] }
    }
}

unsafe impl VertexLayout for Position2 {
    const ATTRIBUTES: &'static [VertexAttribute] = &[VertexAttribute {
        name: c"in_vert",
        gl_type: GlType::Float,
        components: 2,
    }];
}

pub const TRIANGLE: [Position2; 3] = [
    // Left
    Position2::new(-0.6, -0.6),
    // Right
    Position2::new(0.6, -0.6),
    // Up
    Position2::new(0.0, 0.6),
];
