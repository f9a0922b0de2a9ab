//! Vertex data for the textured quad.

use std::mem::{offset_of, size_of};

use glow::HasContext;

use crate::abs::Vertex;

/// A quad corner: position, colour and texture coordinates, tightly packed.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub colour: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl QuadVertex {
    const fn new(position: [f32; 3], colour: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            colour,
            tex_coords,
        }
    }
}

impl Vertex for QuadVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = size_of::<QuadVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(QuadVertex, position) as i32,
            );

            // Colour attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(QuadVertex, colour) as i32,
            );

            // Texture coordinate attribute
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                offset_of!(QuadVertex, tex_coords) as i32,
            );
        }
    }
}

/// Corners in normalised device coordinates: top-left, top-right, bottom-right, bottom-left.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex::new([-0.5, 0.5, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0]),
    QuadVertex::new([0.5, 0.5, 0.0], [1.0, 0.7, 0.0], [1.0, 1.0]),
    QuadVertex::new([0.5, -0.5, 0.0], [1.0, 0.2, 0.0], [1.0, 0.0]),
    QuadVertex::new([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0]),
];

/// Two triangles sharing the top-left to bottom-right diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 2, 3, 0, 1, 2];

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(tri: &[u32]) -> f32 {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| QUAD_VERTICES[i as usize].position);
        (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(size_of::<QuadVertex>(), 8 * size_of::<f32>());
        assert_eq!(offset_of!(QuadVertex, position), 0);
        assert_eq!(offset_of!(QuadVertex, colour), 3 * size_of::<f32>());
        assert_eq!(offset_of!(QuadVertex, tex_coords), 6 * size_of::<f32>());
    }

    #[test]
    fn test_indices_in_range() {
        assert!(
            QUAD_INDICES
                .iter()
                .all(|&i| (i as usize) < QUAD_VERTICES.len())
        );
    }

    #[test]
    fn test_triangles_share_winding_and_cover_quad() {
        let areas: Vec<f32> = QUAD_INDICES.chunks(3).map(signed_area).collect();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].signum(), areas[1].signum());
        // Each triangle covers half of the unit quad (area 0.5, doubled by the cross product).
        let total: f32 = areas.iter().map(|a| a.abs() / 2.0).sum();
        assert!((total - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_tex_coords_follow_positions() {
        for v in QUAD_VERTICES {
            assert_eq!(v.tex_coords[0], v.position[0] + 0.5);
            assert_eq!(v.tex_coords[1], v.position[1] + 0.5);
        }
    }
}
