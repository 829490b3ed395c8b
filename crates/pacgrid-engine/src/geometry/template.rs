use bytemuck::{Pod, Zeroable};

/// Number of vertices in one cell (two triangles, no index buffer).
pub const VERTICES_PER_CELL: usize = 6;

/// Vertex layout shared by the template and every placed cell (20 bytes):
///
///  offset  0  position   [f32; 3]   loc 0
///  offset 12  tex_coord  [f32; 2]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // tex_coord
    ];

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, z],
            tex_coord: [u, v],
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Canonical unit quad: two triangles spanning [-0.5, 0.5] in x/y and [0, 1] in u/v.
pub const UNIT_QUAD: [Vertex; VERTICES_PER_CELL] = [
    //          X     Y    Z    U    V
    Vertex::new(-0.5, 0.5, 0.0, 0.0, 1.0),
    Vertex::new(-0.5, -0.5, 0.0, 0.0, 0.0),
    Vertex::new(0.5, -0.5, 0.0, 1.0, 0.0),
    Vertex::new(-0.5, 0.5, 0.0, 0.0, 1.0),
    Vertex::new(0.5, 0.5, 0.0, 1.0, 1.0),
    Vertex::new(0.5, -0.5, 0.0, 1.0, 0.0),
];

/// Returns the template every cell is placed from.
#[inline]
pub fn unit_quad() -> &'static [Vertex; VERTICES_PER_CELL] {
    &UNIT_QUAD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_area(a: &Vertex, b: &Vertex, c: &Vertex) -> f32 {
        let (ax, ay) = (a.position[0], a.position[1]);
        let (bx, by) = (b.position[0], b.position[1]);
        let (cx, cy) = (c.position[0], c.position[1]);
        ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay)).abs() * 0.5
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn vertex_is_five_packed_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 5 * std::mem::size_of::<f32>());
    }

    #[test]
    fn layout_matches_position_then_tex_coord() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x2);
    }

    // ── template ──────────────────────────────────────────────────────────

    #[test]
    fn template_spans_half_unit_square() {
        for v in unit_quad() {
            assert!(v.position[0] == -0.5 || v.position[0] == 0.5);
            assert!(v.position[1] == -0.5 || v.position[1] == 0.5);
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn template_tex_coords_follow_corners() {
        for v in unit_quad() {
            assert_eq!(v.tex_coord[0], v.position[0] + 0.5);
            assert_eq!(v.tex_coord[1], v.position[1] + 0.5);
        }
    }

    #[test]
    fn two_triangles_cover_the_unit_square() {
        let q = unit_quad();
        let area = triangle_area(&q[0], &q[1], &q[2]) + triangle_area(&q[3], &q[4], &q[5]);
        assert_eq!(area, 1.0);
    }

    #[test]
    fn casts_to_thirty_floats() {
        let floats: &[f32] = bytemuck::cast_slice(unit_quad());
        assert_eq!(floats.len(), 30);
        assert_eq!(&floats[..5], &[-0.5, 0.5, 0.0, 0.0, 1.0]);
    }
}
