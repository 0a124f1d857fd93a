//! Vertex types and palettes for 2D rendering

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
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sky: [f32; 4],
    pub pipe: [f32; 4],
    pub avatar: [f32; 4],
    pub background: [f32; 4],
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        sky: [0.53, 0.81, 0.92, 1.0],
        pipe: [0.0, 1.0, 0.0, 1.0],
        avatar: [1.0, 1.0, 0.0, 1.0],
        background: [1.0, 1.0, 1.0, 0.6],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        sky: [0.0, 0.0, 0.0, 1.0],
        pipe: [1.0, 1.0, 1.0, 1.0],
        avatar: [1.0, 0.85, 0.0, 1.0],
        background: [0.35, 0.35, 0.35, 1.0],
    };

    pub fn for_contrast(high_contrast: bool) -> Self {
        if high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::STANDARD
        }
    }

    /// Sky color as a clear color
    pub fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.sky[0] as f64,
            g: self.sky[1] as f64,
            b: self.sky[2] as f64,
            a: self.sky[3] as f64,
        }
    }
}
