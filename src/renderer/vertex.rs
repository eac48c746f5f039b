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
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements, one per sprite
pub mod colors {
    use crate::assets::SpriteKey;

    pub const BACKGROUND: [f32; 4] = [0.96, 0.94, 0.86, 1.0];
    pub const GRID_LINE: [f32; 4] = [0.85, 0.82, 0.72, 1.0];
    pub const PLATFORM: [f32; 4] = [0.35, 0.75, 0.25, 1.0];
    pub const DOODLER: [f32; 4] = [0.85, 0.8, 0.2, 1.0];
    pub const DOODLER_JUMP: [f32; 4] = [0.95, 0.65, 0.15, 1.0];
    pub const EYE: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

    /// Flat color standing in for a sprite texture
    pub fn for_sprite(sprite: SpriteKey) -> [f32; 4] {
        match sprite {
            SpriteKey::Background => BACKGROUND,
            SpriteKey::DoodlerLeft | SpriteKey::DoodlerRight => DOODLER,
            SpriteKey::DoodlerJump => DOODLER_JUMP,
            SpriteKey::Platform => PLATFORM,
        }
    }
}
