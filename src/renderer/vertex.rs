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

/// Colors for game elements (fallback palette, no sprites)
pub mod colors {
    /// Convert a 0xRRGGBB literal to RGBA floats
    pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            alpha,
        ]
    }

    pub const SKY_TOP: [f32; 4] = hex(0xe0f7fa, 1.0);
    pub const SKY_BOTTOM: [f32; 4] = hex(0xffffff, 1.0);
    pub const FLOOR: [f32; 4] = hex(0xdfe6e9, 1.0);
    pub const GROUND_LINE: [f32; 4] = hex(0x535353, 1.0);
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.2];
    pub const PLAYER: [f32; 4] = hex(0x6c63ff, 1.0);
    pub const OBSTACLE_GROUND: [f32; 4] = hex(0xff6584, 1.0);
    pub const OBSTACLE_AIR: [f32; 4] = hex(0x6c63ff, 1.0);
    pub const BACKGROUND: [f32; 4] = SKY_BOTTOM;
}
