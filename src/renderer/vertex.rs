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

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.0, 0.0, 0.067, 1.0]; // #001
    pub const SKY_BOTTOM: [f32; 4] = [0.067, 0.133, 0.2, 1.0]; // #123
    pub const HILLS: [f32; 4] = [0.0, 0.133, 0.133, 1.0]; // #022
    pub const STAR: [f32; 4] = [0.85, 0.9, 1.0, 1.0];
    pub const PLATFORM: [f32; 4] = [0.333, 0.333, 0.333, 1.0]; // #555
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const FINISH_LINE: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    /// Drawn in place of the player sprite when none is available
    pub const PLAYER_PLACEHOLDER: [f32; 4] = [0.2, 0.6, 1.0, 1.0];

    /// High contrast variants
    pub const HC_PLATFORM: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const HC_ENEMY: [f32; 4] = [1.0, 0.2, 0.8, 1.0];
}
