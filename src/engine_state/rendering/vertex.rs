//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format emitted by the chunk mesher and the
//! matching layout description for the shader pipeline.

use cgmath::Point3;

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 20 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Texture-atlas UV coordinates
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex at `pos` sampling the atlas at `tex_coords`.
    pub fn new(pos: Point3<f32>, tex_coords: [f32; 2]) -> Self {
        Vertex {
            position: [pos.x, pos.y, pos.z],
            tex_coords,
        }
    }

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: tex_coords (vec2<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_stride_matches_struct_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn vertices_cast_to_bytes() {
        let vertices = [Vertex::new(Point3::new(1.0, 2.0, 3.0), [0.25, 0.5])];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 20);
    }
}
