//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

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

    pub fn at(pos: Vec2, color: [f32; 4]) -> Self {
        Self::new(pos.x, pos.y, color)
    }

    /// Size of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Opaque RGBA from an RGB vector
pub fn rgba(rgb: Vec3) -> [f32; 4] {
    [rgb.x, rgb.y, rgb.z, 1.0]
}

/// Colors for game elements
pub mod colors {
    /// Light gray play area
    pub const PLAY_AREA: [f32; 4] = [0.973, 0.976, 0.980, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 24);
        let verts = [Vertex::new(1.0, 2.0, [0.1, 0.2, 0.3, 1.0]); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 72);
    }
}
